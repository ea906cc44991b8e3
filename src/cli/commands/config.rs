//! Config command: print the effective configuration.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Only validate; print nothing on success
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    #[serde(flatten)]
    pub config: Config,
}

impl ConfigOutput {
    /// Wrap `config` with the API key masked.
    pub fn redacted(config: &Config) -> Self {
        let mut config = config.clone();
        if let Some(key) = config.anthropic.api_key.as_mut() {
            let prefix: String = key.chars().take(7).collect();
            *key = format!("{prefix}...[REDACTED]");
        }
        Self { config }
    }
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config).unwrap_or_default()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or_default()
    }
}

pub fn execute(args: &ConfigArgs, config: &Config, json_mode: bool) -> Result<()> {
    ConfigLoader::validate(config)?;
    if !args.check {
        output(&ConfigOutput::redacted(config), json_mode);
    }
    Ok(())
}
