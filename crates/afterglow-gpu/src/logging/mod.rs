//! Logging utilities.
//!
//! Centralizes logger initialization. All crates in the workspace log
//! through the standard `log` facade; only this module knows about the
//! `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
