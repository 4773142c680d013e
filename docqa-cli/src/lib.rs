//! # docqa-cli
//!
//! Command-line front end for `docqa-rag`: load a document, then ask
//! questions about it once or in an interactive prompt.

pub mod app;
pub mod args;
pub mod console;

pub use app::open_session;
pub use args::Args;
