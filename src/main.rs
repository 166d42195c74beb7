//! Microkit CLI entry point.

use clap::Parser;

use microkit::cli::{Cli, Commands};
use microkit::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _logger = match LoggerImpl::init(&cli.log_config()) {
        Ok(logger) => logger,
        Err(err) => microkit::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Serve(args) => microkit::cli::commands::serve::execute(args).await,
        Commands::Show(args) => microkit::cli::commands::show::execute(args, cli.json),
    };

    if let Err(err) = result {
        microkit::cli::handle_error(err, cli.json);
    }
}
