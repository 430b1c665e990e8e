//! robots-mirror library
//!
//! Fetches one remote robots.txt, keeps a copy on disk and serves it back
//! as HTML. The binary in `main.rs` wires these pieces to the environment.

pub mod config;
pub mod error;
pub mod mirror;
pub mod render;
pub mod server;
pub mod types;

pub use config::MirrorConfig;
pub use error::{MirrorError, Result, ServeError};
pub use mirror::{RobotsMirror, Served};
pub use server::{create_router, start_server, ServerState, SharedState};
