//! Import orchestration.
//!
//! Two ingestion modes feed the grid: a server-side path import consumed as
//! a delimiter-framed progress stream, and a client-driven batch upload of
//! dropped files. Both run as one sequential task: every record or file is
//! fully processed (fragment fetched, entry appended, progress rendered)
//! before the next one starts, which is what guarantees that grid order
//! matches source order.

use anyhow::Result;
use futures::StreamExt;
use mb_core::{
    ingest::{IngestionRecord, RecordSplitter},
    ports::{
        FileUploadPort, PathImportPort, PathImportRequest, PendingBatchPort, RenderFragmentPort,
        UiPort, UploadFile, UploadFlags,
    },
    progress::display_fraction,
    Entry, ItemId, MediaType,
};
use std::sync::Arc;
use tracing::warn;

use crate::grid::SharedGrid;

/// How a path import ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// User declined the confirmation prompt; nothing happened.
    Declined,
    /// Request rejected before any network call (empty path).
    Rejected,
    /// Stream consumed to its end.
    Completed { appended: usize },
    /// Stream abandoned after a transport or framing failure.
    /// Already-appended entries remain in the grid.
    Abandoned { appended: usize },
}

/// Result of a batch upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub appended: usize,
    pub failed: usize,
}

/// Drives both ingestion modes against the collaborator ports.
pub struct ImportOrchestrator {
    imports: Arc<dyn PathImportPort>,
    uploads: Arc<dyn FileUploadPort>,
    fragments: Arc<dyn RenderFragmentPort>,
    ui: Arc<dyn UiPort>,
    grid: SharedGrid,
}

impl ImportOrchestrator {
    pub fn new(
        imports: Arc<dyn PathImportPort>,
        uploads: Arc<dyn FileUploadPort>,
        fragments: Arc<dyn RenderFragmentPort>,
        ui: Arc<dyn UiPort>,
        grid: SharedGrid,
    ) -> Self {
        Self {
            imports,
            uploads,
            fragments,
            ui,
            grid,
        }
    }

    /// Streamed server-side path import.
    #[tracing::instrument(
        name = "usecase.import.path.execute",
        skip(self, request),
        fields(path = %request.path)
    )]
    pub async fn import_path(&self, request: &PathImportRequest) -> Result<ImportOutcome> {
        if !self.ui.confirm("Import all files under the given path?").await {
            return Ok(ImportOutcome::Declined);
        }
        if request.path.is_empty() {
            self.ui.notify("Must enter an import path.").await?;
            return Ok(ImportOutcome::Rejected);
        }

        // A failure to open the stream aborts the whole import.
        let mut stream = match self.imports.open_stream(request).await {
            Ok(stream) => stream,
            Err(err) => {
                self.ui.notify(&err.to_string()).await?;
                return Ok(ImportOutcome::Abandoned { appended: 0 });
            }
        };

        let mut splitter = RecordSplitter::new();
        let mut appended = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    self.ui.notify(&err.to_string()).await?;
                    return Ok(ImportOutcome::Abandoned { appended });
                }
            };

            for segment in splitter.push(&chunk) {
                // A malformed record is fatal to the rest of this stream.
                let record = match IngestionRecord::parse(&segment) {
                    Ok(record) => record,
                    Err(err) => {
                        warn!(error = %err, "abandoning import stream");
                        self.ui.notify(&err.to_string()).await?;
                        return Ok(ImportOutcome::Abandoned { appended });
                    }
                };

                // A transport failure on one record's fragment skips only
                // that record.
                if self.ingest_item(&record.item_id, None).await? {
                    appended += 1;
                }
                self.ui
                    .render_progress(display_fraction(record.fraction()))
                    .await?;
            }
        }

        // The sender terminates every record with the delimiter; anything
        // still pending at stream close is dropped. Kept observable here.
        if let Some(leftover) = splitter.finish() {
            warn!(
                bytes = leftover.len(),
                "discarding unterminated record at stream end"
            );
        }

        Ok(ImportOutcome::Completed { appended })
    }

    /// Client-driven upload of a dropped file batch. Replaces the view:
    /// clears the grid and the search input before the first upload.
    #[tracing::instrument(
        name = "usecase.import.upload_batch.execute",
        skip(self, files),
        fields(files = files.len())
    )]
    pub async fn upload_batch(&self, files: &[UploadFile]) -> Result<BatchSummary> {
        // An empty drop never replaces the view.
        if files.is_empty() {
            return Ok(BatchSummary {
                total: 0,
                appended: 0,
                failed: 0,
            });
        }
        self.grid.lock().await.clear();
        self.ui.reset_search().await?;
        self.run_batch(files).await
    }

    /// Replay a dropped-but-unprocessed batch carried as navigation state.
    /// The store is consumed, so a batch replays at most once. Does not
    /// reset the view: the import page is already showing.
    #[tracing::instrument(name = "usecase.import.resume_pending.execute", skip(self, store))]
    pub async fn resume_pending(
        &self,
        store: &dyn PendingBatchPort,
    ) -> Result<Option<BatchSummary>> {
        let Some(files) = store.take_pending().await? else {
            return Ok(None);
        };
        Ok(Some(self.run_batch(&files).await?))
    }

    /// Sequentially upload each file in drop order. Single-file failures are
    /// notified and the batch continues.
    async fn run_batch(&self, files: &[UploadFile]) -> Result<BatchSummary> {
        let flags = UploadFlags::default();
        let total = files.len();
        let mut done = 0usize;
        let mut appended = 0;

        for file in files {
            if self.process_file(file, &flags).await? {
                appended += 1;
            }
            // Progress tracks attempts, not successes, like the legacy
            // client: the denominator is the batch size.
            done += 1;
            self.ui
                .render_progress(display_fraction(done as f64 / total as f64))
                .await?;
        }

        Ok(BatchSummary {
            total,
            appended,
            failed: total - appended,
        })
    }

    async fn process_file(&self, file: &UploadFile, flags: &UploadFlags) -> Result<bool> {
        let receipt = match self.uploads.upload(file, flags).await {
            Ok(receipt) => receipt,
            Err(err) => {
                self.ui.notify(&err.to_string()).await?;
                return Ok(false);
            }
        };
        self.ingest_item(&receipt.sha1, receipt.media_type()).await
    }

    /// Fetch the render fragment for one item and append its entry. Returns
    /// whether the entry made it into the grid.
    async fn ingest_item(&self, id: &ItemId, media_type: Option<MediaType>) -> Result<bool> {
        let fragment = match self.fragments.fetch(id).await {
            Ok(fragment) => fragment,
            Err(err) => {
                self.ui.notify(&err.to_string()).await?;
                return Ok(false);
            }
        };
        self.grid
            .lock()
            .await
            .append(Entry::new(id.clone(), media_type, fragment));
        Ok(true)
    }
}

#[cfg(test)]
mod tests;
