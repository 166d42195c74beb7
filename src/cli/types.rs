//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::serve::ServeArgs;
use super::commands::show::ShowArgs;
use crate::infrastructure::logging::{LogConfig, LogFormat};

#[derive(Parser, Debug)]
#[command(name = "microkit")]
#[command(about = "Microkit - configuration and startup for microservices", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "MICROKIT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format: json or pretty
    #[arg(long, global = true, env = "MICROKIT_LOG_FORMAT", default_value = "pretty", value_parser = parse_log_format)]
    pub log_format: LogFormat,

    /// Also write JSON logs to this directory
    #[arg(long, global = true, env = "MICROKIT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            format: self.log_format,
            log_dir: self.log_dir.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start up a service and serve until interrupted
    Serve(ServeArgs),

    /// Run the startup sequence and print the resolved configuration
    Show(ShowArgs),
}

fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    LogFormat::from_str(s).ok_or_else(|| format!("invalid log format '{s}' (expected json or pretty)"))
}
