//! Process-level plumbing shared by modules: layered configuration and logging setup.

pub mod config;
pub mod logging;

pub use config::{default_logging_config, AppConfig, LoggingConfig, Section};
pub use logging::init_logging_from_config;
