//! Delimiter-framed progress stream reassembly and record decoding.
//!
//! The import service writes one JSON record per processed file, each
//! terminated by a single `-`. Chunk boundaries are not aligned with record
//! boundaries, so the splitter re-buffers the trailing partial segment of
//! every chunk and only yields delimiter-terminated segments, in arrival
//! order.

use bytes::{Bytes, BytesMut};
use serde::Deserialize;
use thiserror::Error;

/// Record delimiter on the import progress stream.
pub const RECORD_DELIMITER: u8 = b'-';

/// Malformed ingestion record. Fatal to the stream that produced it.
#[derive(Debug, Error)]
pub enum FramingError {
    #[error("malformed ingestion record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("ingestion record out of range: current {current} of {total}")]
    OutOfRange { current: u64, total: u64 },
}

/// One decoded unit of import progress.
///
/// Wire form: `{"SHA1": "…", "Current": n, "Total": m}` with
/// `1 <= Current <= Total`. Records arrive in non-decreasing `Current` order;
/// stream end, not `Current == Total`, is the authoritative completion
/// signal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestionRecord {
    #[serde(rename = "SHA1")]
    pub item_id: crate::ItemId,
    #[serde(rename = "Current")]
    pub current: u64,
    #[serde(rename = "Total")]
    pub total: u64,
}

impl IngestionRecord {
    /// Decode one delimiter-terminated segment.
    pub fn parse(segment: &[u8]) -> Result<Self, FramingError> {
        let record: Self = serde_json::from_slice(segment)?;
        if record.current < 1 || record.current > record.total {
            return Err(FramingError::OutOfRange {
                current: record.current,
                total: record.total,
            });
        }
        Ok(record)
    }

    /// Progress fraction of this record.
    pub fn fraction(&self) -> f64 {
        self.current as f64 / self.total as f64
    }
}

/// Reassembles complete record segments from raw chunks.
///
/// The only buffering is the single pending partial segment; everything
/// before the last delimiter of the accumulated input is yielded immediately.
#[derive(Debug, Default)]
pub struct RecordSplitter {
    pending: BytesMut,
}

impl RecordSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every newly completed segment, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Bytes> {
        self.pending.extend_from_slice(chunk);

        let mut segments = Vec::new();
        while let Some(at) = self
            .pending
            .iter()
            .position(|&b| b == RECORD_DELIMITER)
        {
            let segment = self.pending.split_to(at).freeze();
            // Drop the delimiter itself.
            let _ = self.pending.split_to(1);
            segments.push(segment);
        }
        segments
    }

    /// Unterminated leftover at end of input, if any.
    ///
    /// The sender is expected to terminate every record; a record still
    /// pending when the transport closes is discarded by the caller (legacy
    /// framing quirk), so surfacing it here is what makes the loss
    /// observable.
    pub fn finish(self) -> Option<Bytes> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.freeze())
        }
    }
}
