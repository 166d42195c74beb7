//! Implementation of the `microkit show` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::ports::ServiceFramework;
use crate::services::{new_service, nil_init};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Default service name; also picks the config search directories
    #[arg(long, short, env = "MICROKIT_DEFAULT_NAME", default_value = "")]
    pub name: String,

    /// Version reported to the service framework
    #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
    pub service_version: String,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub service_name: String,
    pub version: String,
    pub name: String,
    pub namespace: String,
    pub database_driver: String,
    pub register_ttl_secs: u64,
    pub register_interval_secs: u64,
    pub keys: Vec<String>,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Service:            {}", self.service_name),
            format!("Version:            {}", self.version),
            format!("Namespace:          {}", self.namespace),
            format!("Register TTL:       {}s", self.register_ttl_secs),
            format!("Register interval:  {}s", self.register_interval_secs),
        ];
        if !self.database_driver.is_empty() {
            lines.push(format!("Database driver:    {}", self.database_driver));
        }
        lines.join("\n")
    }
}

pub fn execute(args: ShowArgs, json_mode: bool) -> Result<()> {
    let mut service = new_service(&args.service_version, &args.name, nil_init);
    service.init()?;

    let store = service.store();
    let options = service.framework().options();
    let mut keys = store.keys();
    keys.sort();

    let result = ShowOutput {
        service_name: options.name,
        version: options.version,
        name: store.name(),
        namespace: store.namespace(),
        database_driver: store.database_driver(),
        register_ttl_secs: options.register_ttl.as_secs(),
        register_interval_secs: options.register_interval.as_secs(),
        keys,
    };
    output(&result, json_mode);
    Ok(())
}
