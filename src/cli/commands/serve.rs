//! Implementation of the `microkit serve` command.

use anyhow::Result;
use clap::Args;

use crate::services::{new_service, nil_init};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Default service name; also picks the config search directories
    #[arg(long, short, env = "MICROKIT_DEFAULT_NAME", default_value = "")]
    pub name: String,

    /// Version reported to the service framework
    #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
    pub service_version: String,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let service = new_service(&args.service_version, &args.name, nil_init);
    service.run().await?;
    Ok(())
}
