use crate::ItemId;
use anyhow::Result;
use async_trait::async_trait;

/// View transport: the rendered thumbnail surface the core drives but does
/// not implement.
#[async_trait]
pub trait ViewTransportPort: Send + Sync {
    /// Scroll the entry into view (smooth, centered).
    async fn scroll_into_view(&self, id: &ItemId) -> Result<()>;

    /// Flip the entry's checked flag. The flag itself is renderer state; the
    /// core only says which entry.
    async fn toggle_checked(&self, id: &ItemId) -> Result<()>;

    /// Open the entry.
    async fn activate(&self, id: &ItemId) -> Result<()>;
}
