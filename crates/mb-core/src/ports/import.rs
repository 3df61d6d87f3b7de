use super::errors::TransportError;
use crate::ItemId;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// Raw chunk stream of a live import response. Chunk sizes and boundaries
/// carry no meaning; framing is reassembled by the consumer.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Parameters of a server-side path import.
#[derive(Debug, Clone, Default)]
pub struct PathImportRequest {
    /// Filesystem path on the server to import from.
    pub path: String,
    /// Delete source files after a successful import.
    pub delete_source: bool,
    /// Fetch tags for imported files from external sources.
    pub fetch_tags: bool,
    /// Store original file names as tags.
    pub store_name: bool,
    /// Tags to attach to every imported file.
    pub tags: String,
}

/// One dropped file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Bytes,
}

/// Per-upload flags.
#[derive(Debug, Clone, Copy)]
pub struct UploadFlags {
    pub fetch_tags: bool,
    pub store_name: bool,
}

impl Default for UploadFlags {
    fn default() -> Self {
        // The drag-drop client always asks for both.
        Self {
            fetch_tags: true,
            store_name: true,
        }
    }
}

/// Structured result of a single-file upload. The server answers with the
/// full item record; only the fields the client consumes are decoded.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UploadReceipt {
    pub sha1: ItemId,
    #[serde(rename = "type", default)]
    pub type_code: Option<u8>,
}

impl UploadReceipt {
    /// Container type, when the server reported a known code.
    pub fn media_type(&self) -> Option<crate::MediaType> {
        self.type_code.and_then(crate::MediaType::from_code)
    }
}

/// Streamed path-import service.
#[async_trait]
pub trait PathImportPort: Send + Sync {
    /// Submit import parameters and open the live progress stream.
    async fn open_stream(&self, request: &PathImportRequest)
        -> Result<ByteStream, TransportError>;
}

/// Single-file upload service.
#[async_trait]
pub trait FileUploadPort: Send + Sync {
    async fn upload(
        &self,
        file: &UploadFile,
        flags: &UploadFlags,
    ) -> Result<UploadReceipt, TransportError>;
}
