//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty console output, on stderr unless configured otherwise
//! - Optional rolling JSON log files

pub mod config;
pub mod logger;

pub use config::{ConsoleTarget, LogConfig, LogFormat, RotationPolicy};
pub use logger::{
    console_writer, debug, error, info, instrument, parse_log_level, trace, warn, LoggerImpl,
};
