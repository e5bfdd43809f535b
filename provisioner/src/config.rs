use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use aws_config::BehaviorVersion;
use aws_credential_types::{Credentials, provider::SharedCredentialsProvider};
use aws_sdk_sqs as sqs;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::params::Parameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    /// LocalStack or another SQS-compatible emulator.
    Local,
    #[default]
    Aws,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub mode: RuntimeMode,
    /// Falls back to the default AWS region chain when unset.
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SqsConfig {
    pub endpoint_url: Option<String>,
    pub visibility_timeout_secs: Option<i32>,
    /// Force FIFO on or off. Inferred from a `.fifo` suffix when unset.
    pub fifo: Option<bool>,
    pub content_based_dedup: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct QueueClientConfig {
    /// Manifest used when neither `--file` nor queue names are given.
    pub queues_file: Option<String>,
    /// Values for `%name%` placeholders in manifests.
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub sqs: SqsConfig,
    #[serde(default)]
    pub queue_client: QueueClientConfig,
}

impl AppConfig {
    /// Load and MERGE:
    ///  - config_path (e.g., config.toml)      — optional unless `required`
    ///  - environment (APP_* with "__" nesting) — highest precedence
    pub fn load(config_path: &str, required: bool) -> Result<Self> {
        let mut builder = Config::builder();

        if Path::new(config_path).exists() {
            builder = builder.add_source(File::with_name(config_path));
        } else if required {
            return Err(anyhow!("Config not found at '{}'.", config_path));
        }

        // Environment overrides (e.g., APP_QUEUE_CLIENT__QUEUES_FILE=queues.yml)
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build().context("building merged config")?;
        let out: AppConfig = cfg.try_deserialize().context("deserializing AppConfig")?;
        Ok(out)
    }

    pub fn queues_file(&self) -> Option<&str> {
        self.queue_client
            .queues_file
            .as_deref()
            .filter(|path| !path.is_empty())
    }

    pub fn parameters(&self) -> Parameters {
        Parameters::new(self.queue_client.parameters.clone())
    }
}

pub async fn build_sqs_client(cfg: &AppConfig) -> Result<sqs::Client> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &cfg.runtime.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }

    // If we're on LocalStack (runtime=local) OR an explicit endpoint is provided,
    // use static dummy creds to bypass SSO/profile resolution.
    let using_localstack =
        matches!(cfg.runtime.mode, RuntimeMode::Local) || cfg.sqs.endpoint_url.is_some();

    if using_localstack {
        let creds = Credentials::new("test", "test", None, None, "localstack");
        loader = loader.credentials_provider(SharedCredentialsProvider::new(creds));
    }

    let shared_cfg = loader.load().await;
    if shared_cfg.region().is_none() {
        return Err(anyhow!(
            "No AWS region configured. Set [runtime].region, APP_RUNTIME__REGION or AWS_REGION."
        ));
    }

    let mut b = sqs::config::Builder::from(&shared_cfg);
    if let Some(ep) = &cfg.sqs.endpoint_url {
        b = b.endpoint_url(ep.clone());
    }
    Ok(sqs::Client::from_conf(b.build()))
}
