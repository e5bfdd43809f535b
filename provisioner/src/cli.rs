use anyhow::Result;
use clap::Args as ClapArgs;

use crate::config::AppConfig;

pub const DEFAULT_CONFIG: &str = "config.toml";

/// Flags shared by every binary that talks to the queue backend.
/// Use with `#[command(flatten)] common: CommonArgs`.
#[derive(Clone, Debug, ClapArgs)]
pub struct CommonArgs {
    /// Path to the application config (optional when left at the default)
    #[arg(long, default_value = DEFAULT_CONFIG)]
    pub config: String,

    /// Ad-hoc override for the AWS region
    #[arg(long)]
    pub region: Option<String>,

    /// Ad-hoc override for the SQS endpoint (e.g. LocalStack)
    #[arg(long)]
    pub endpoint_url: Option<String>,
}

/// Load config + env, then apply the command-line overrides.
pub fn merged_config(common: &CommonArgs) -> Result<AppConfig> {
    let required = common.config != DEFAULT_CONFIG;
    let mut cfg = AppConfig::load(&common.config, required)?;
    if let Some(region) = &common.region {
        cfg.runtime.region = Some(region.clone());
    }
    if let Some(endpoint) = &common.endpoint_url {
        cfg.sqs.endpoint_url = Some(endpoint.clone());
    }
    Ok(cfg)
}
