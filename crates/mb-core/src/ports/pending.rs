use super::import::UploadFile;
use anyhow::Result;
use async_trait::async_trait;

/// Dropped-but-unprocessed file set carried as navigation state, replayed
/// when the user returns to the import view through history.
#[async_trait]
pub trait PendingBatchPort: Send + Sync {
    /// Take the stored batch, clearing it. A batch navigated back to
    /// repeatedly can therefore be replayed at most once.
    async fn take_pending(&self) -> Result<Option<Vec<UploadFile>>>;
}
