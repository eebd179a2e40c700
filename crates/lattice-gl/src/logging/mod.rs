//! Logging setup.
//!
//! Everything in this crate logs through the `log` facade; this module only
//! installs `env_logger` for hosts that do not bring their own logger.

mod init;

pub use init::{init_logging, LoggingConfig};
