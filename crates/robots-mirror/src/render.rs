//! HTML rendering for mirrored text

/// Body of the index page
pub const POINTER_TEXT: &str = "Please go to /robots to read the robots.txt file.";

/// Wrap text in `<pre>`, turning each `\n` into `<br>`.
///
/// The text is inserted as-is; it is not HTML-escaped.
pub fn render_pre(text: &str) -> String {
    format!("<pre>{}</pre>", text.replace('\n', "<br>"))
}
