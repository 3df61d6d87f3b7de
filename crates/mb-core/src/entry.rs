//! Grid entries and their render payload.

use crate::{ids::ItemId, media::MediaType};
use serde::{Deserialize, Serialize};

/// Opaque renderable markup for one thumbnail, produced by the server.
///
/// The core mounts this blob as-is and never parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderFragment(String);

impl RenderFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for RenderFragment {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One thumbnail in the grid.
///
/// Created when an ingestion event resolves its render fragment, destroyed
/// only by a full grid reset. Immutable once created; the grid appends or
/// clears, never edits in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: ItemId,
    /// Container type when the ingestion path reported one. The streamed
    /// import only carries ids; there the type stays embedded in the render
    /// fragment, which the core never parses.
    pub media_type: Option<MediaType>,
    pub render_fragment: RenderFragment,
}

impl Entry {
    pub fn new(id: ItemId, media_type: Option<MediaType>, render_fragment: RenderFragment) -> Self {
        Self {
            id,
            media_type,
            render_fragment,
        }
    }

    /// Source file name for this entry, e.g. `deadbeef….webm`, when the
    /// container type is known.
    pub fn source_name(&self) -> Option<String> {
        self.media_type
            .map(|t| format!("{}.{}", self.id, t.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_name_needs_a_known_type() {
        let with_type = Entry::new(
            ItemId::from("cafe01"),
            Some(MediaType::Webm),
            RenderFragment::from(String::new()),
        );
        assert_eq!(with_type.source_name().as_deref(), Some("cafe01.webm"));

        let untyped = Entry::new(ItemId::from("cafe01"), None, RenderFragment::from(String::new()));
        assert!(untyped.source_name().is_none());
    }
}
