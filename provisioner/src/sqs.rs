use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use aws_sdk_sqs::Client;
use aws_sdk_sqs::types::QueueAttributeName;

use crate::backend::QueueBackend;
use crate::config::{AppConfig, SqsConfig, build_sqs_client};

/// Tag key prefix under which aliases are recorded on their target queue.
pub const ALIAS_TAG_PREFIX: &str = "alias:";

pub async fn get_queue_url(client: &Client, queue_name: &str) -> Result<String> {
    let out = client
        .get_queue_url()
        .queue_name(queue_name)
        .send()
        .await
        .with_context(|| format!("getting queue url for {queue_name}"))?;

    out.queue_url()
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("queue url missing in response"))
}

/// Attributes to send with CreateQueue for `name`.
pub fn queue_attributes(name: &str, sqs_cfg: &SqsConfig) -> Result<Vec<(QueueAttributeName, String)>> {
    let mut attrs = Vec::new();

    // FIFO handling: either explicitly set in config or inferred from name
    let name_is_fifo = name.ends_with(".fifo");
    let cfg_fifo = sqs_cfg.fifo.unwrap_or(name_is_fifo);
    if cfg_fifo {
        if !name_is_fifo {
            return Err(anyhow!(
                "fifo=true requires the queue name to end with .fifo (got: {})",
                name
            ));
        }
        attrs.push((QueueAttributeName::FifoQueue, "true".to_string()));
        if let Some(true) = sqs_cfg.content_based_dedup {
            attrs.push((QueueAttributeName::ContentBasedDeduplication, "true".to_string()));
        }
    } else if name_is_fifo {
        // Named *.fifo but FIFO explicitly disabled
        return Err(anyhow!(
            "Queue name {} ends with .fifo but fifo=false in config. Either set fifo=true or rename the queue.",
            name
        ));
    }

    if let Some(vt) = sqs_cfg.visibility_timeout_secs {
        attrs.push((QueueAttributeName::VisibilityTimeout, vt.to_string()));
    }

    Ok(attrs)
}

pub async fn create_queue(client: &Client, name: &str, sqs_cfg: &SqsConfig) -> Result<String> {
    let mut req = client.create_queue().queue_name(name);
    for (key, value) in queue_attributes(name, sqs_cfg)? {
        req = req.attributes(key, value);
    }

    let out = req
        .send()
        .await
        .with_context(|| format!("creating queue {name}"))?;

    out.queue_url()
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("queue url missing after create"))
}

pub async fn tag_alias(client: &Client, queue_url: &str, queue_name: &str, alias: &str) -> Result<()> {
    client
        .tag_queue()
        .queue_url(queue_url)
        .tags(format!("{ALIAS_TAG_PREFIX}{alias}"), queue_name)
        .send()
        .await
        .with_context(|| format!("tagging alias {alias} on {queue_name}"))?;
    Ok(())
}

/// [`QueueBackend`] over Amazon SQS (or LocalStack).
#[derive(Debug, Clone)]
pub struct SqsBackend {
    client: Client,
    settings: SqsConfig,
}

impl SqsBackend {
    pub fn new(client: Client, settings: SqsConfig) -> Self {
        Self { client, settings }
    }

    pub async fn connect(cfg: &AppConfig) -> Result<Self> {
        let client = build_sqs_client(cfg).await?;
        Ok(Self::new(client, cfg.sqs.clone()))
    }
}

#[async_trait]
impl QueueBackend for SqsBackend {
    async fn create_queue(&self, name: &str) -> Result<()> {
        let url = create_queue(&self.client, name, &self.settings).await?;
        tracing::debug!(queue = name, url = %url, "create_queue ok");
        Ok(())
    }

    async fn add_alias(&self, queue_name: &str, alias: &str) -> Result<()> {
        if alias.is_empty() {
            return Err(anyhow!("Alias is empty."));
        }
        let url = get_queue_url(&self.client, queue_name)
            .await
            .with_context(|| format!("Attempting to create alias on unknown queue {queue_name}."))?;
        tag_alias(&self.client, &url, queue_name, alias).await
    }
}
