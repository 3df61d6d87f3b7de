use super::errors::TransportError;
use async_trait::async_trait;

/// Tag autocomplete service.
#[async_trait]
pub trait TagCompletePort: Send + Sync {
    /// Ordered candidate tags for a partial prefix.
    async fn complete(&self, prefix: &str) -> Result<Vec<String>, TransportError>;
}
