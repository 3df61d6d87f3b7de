use super::errors::TransportError;
use crate::{entry::RenderFragment, ItemId};
use async_trait::async_trait;

/// Render-fragment service: resolves an item id to its thumbnail markup.
///
/// Idempotent and side-effect-free; safe to call repeatedly for the same id.
#[async_trait]
pub trait RenderFragmentPort: Send + Sync {
    async fn fetch(&self, id: &ItemId) -> Result<RenderFragment, TransportError>;
}
