//! Process-level plumbing shared by binaries: configuration, logging, shutdown signals.

pub mod config;
pub mod logging;
pub mod shutdown;

pub use config::{AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section, ServerConfig};
pub use shutdown::wait_for_shutdown;
