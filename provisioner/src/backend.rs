use anyhow::Result;
use async_trait::async_trait;

/// The queue service the provisioner reconciles against.
///
/// Both operations are expected to be idempotent: creating an existing
/// queue or re-adding a known alias succeeds.
#[async_trait]
pub trait QueueBackend: Send + Sync {
    async fn create_queue(&self, name: &str) -> Result<()>;

    /// Record `alias` as another name for the existing queue `queue_name`.
    async fn add_alias(&self, queue_name: &str, alias: &str) -> Result<()>;
}

