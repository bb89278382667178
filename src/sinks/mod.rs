//! Result persistence: one file per strategy, overwritten on every run.
pub mod config;
mod format;
mod writers;


pub use config::SinkConfig;
pub use format::render_result;
pub use writers::{persist_result, write_result};
