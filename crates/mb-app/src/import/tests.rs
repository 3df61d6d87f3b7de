//! Orchestrator tests against scripted ports.

use super::*;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use mb_core::ports::{ByteStream, TransportError, UploadReceipt};
use mb_core::RenderFragment;
use std::sync::Mutex;

use crate::grid::shared_grid;

fn record_json(id: &str, current: u64, total: u64) -> String {
    format!(r#"{{"SHA1":"{id}","Current":{current},"Total":{total}}}"#)
}

fn status_error() -> TransportError {
    TransportError::Status {
        code: 500,
        body: "boom".to_string(),
    }
}

/// Path-import port replaying a scripted chunk sequence.
struct ScriptedImport {
    chunks: Mutex<Option<Vec<Result<Bytes, TransportError>>>>,
    fail_open: bool,
}

impl ScriptedImport {
    fn chunks(chunks: Vec<&str>) -> Self {
        Self {
            chunks: Mutex::new(Some(
                chunks
                    .into_iter()
                    .map(|c| Ok(Bytes::copy_from_slice(c.as_bytes())))
                    .collect(),
            )),
            fail_open: false,
        }
    }

    fn failing_open() -> Self {
        Self {
            chunks: Mutex::new(None),
            fail_open: true,
        }
    }

    fn with_results(chunks: Vec<Result<Bytes, TransportError>>) -> Self {
        Self {
            chunks: Mutex::new(Some(chunks)),
            fail_open: false,
        }
    }
}

#[async_trait]
impl PathImportPort for ScriptedImport {
    async fn open_stream(
        &self,
        _request: &PathImportRequest,
    ) -> Result<ByteStream, TransportError> {
        if self.fail_open {
            return Err(status_error());
        }
        let chunks = self
            .chunks
            .lock()
            .unwrap()
            .take()
            .expect("stream opened twice");
        Ok(Box::pin(stream::iter(chunks)))
    }
}

/// Upload port that fails for configured file names and records call order.
struct ScriptedUploads {
    fail_names: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedUploads {
    fn ok() -> Self {
        Self::failing(&[])
    }

    fn failing(names: &[&str]) -> Self {
        Self {
            fail_names: names.iter().map(|s| s.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl FileUploadPort for ScriptedUploads {
    async fn upload(
        &self,
        file: &UploadFile,
        _flags: &UploadFlags,
    ) -> Result<UploadReceipt, TransportError> {
        self.calls.lock().unwrap().push(file.name.clone());
        if self.fail_names.contains(&file.name) {
            return Err(status_error());
        }
        // Receipt id derived from the name, e.g. "A.jpg" -> "a1".
        let sha1 = match file.name.as_str() {
            "A.jpg" => "a1",
            "B.png" => "b2",
            "C.gif" => "c3",
            other => other,
        };
        Ok(UploadReceipt {
            sha1: ItemId::from(sha1),
            type_code: Some(0),
        })
    }
}

/// Fragment port that fails for configured ids and records fetch order.
struct ScriptedFragments {
    fail_ids: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFragments {
    fn ok() -> Self {
        Self::failing(&[])
    }

    fn failing(ids: &[&str]) -> Self {
        Self {
            fail_ids: ids.iter().map(|s| s.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RenderFragmentPort for ScriptedFragments {
    async fn fetch(&self, id: &ItemId) -> Result<RenderFragment, TransportError> {
        self.calls.lock().unwrap().push(id.to_string());
        if self.fail_ids.contains(&id.to_string()) {
            return Err(status_error());
        }
        Ok(RenderFragment::from(format!("<article>{id}</article>")))
    }
}

/// UI port recording everything it is asked to do.
#[derive(Default)]
struct RecordingUi {
    decline: bool,
    notices: Mutex<Vec<String>>,
    progress: Mutex<Vec<f64>>,
    search_resets: Mutex<usize>,
}

impl RecordingUi {
    fn accepting() -> Self {
        Self::default()
    }

    fn declining() -> Self {
        Self {
            decline: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl UiPort for RecordingUi {
    async fn confirm(&self, _message: &str) -> bool {
        !self.decline
    }

    async fn notify(&self, message: &str) -> Result<()> {
        self.notices.lock().unwrap().push(message.to_string());
        Ok(())
    }

    async fn render_progress(&self, fraction: f64) -> Result<()> {
        self.progress.lock().unwrap().push(fraction);
        Ok(())
    }

    async fn reset_search(&self) -> Result<()> {
        *self.search_resets.lock().unwrap() += 1;
        Ok(())
    }
}

struct Harness {
    orchestrator: ImportOrchestrator,
    uploads: Arc<ScriptedUploads>,
    fragments: Arc<ScriptedFragments>,
    ui: Arc<RecordingUi>,
    grid: SharedGrid,
}

fn harness(
    imports: ScriptedImport,
    uploads: ScriptedUploads,
    fragments: ScriptedFragments,
    ui: RecordingUi,
) -> Harness {
    let uploads = Arc::new(uploads);
    let fragments = Arc::new(fragments);
    let ui = Arc::new(ui);
    let grid = shared_grid();
    let orchestrator = ImportOrchestrator::new(
        Arc::new(imports),
        uploads.clone(),
        fragments.clone(),
        ui.clone(),
        grid.clone(),
    );
    Harness {
        orchestrator,
        uploads,
        fragments,
        ui,
        grid,
    }
}

fn path_request() -> PathImportRequest {
    PathImportRequest {
        path: "/mnt/media".to_string(),
        ..Default::default()
    }
}

fn file(name: &str) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        bytes: Bytes::from_static(b"payload"),
    }
}

async fn grid_ids(grid: &SharedGrid) -> Vec<String> {
    grid.lock()
        .await
        .entries()
        .iter()
        .map(|e| e.id.to_string())
        .collect()
}

#[tokio::test]
async fn test_streamed_import_appends_in_record_order() {
    // Two records split across chunk boundaries, final delimiter included.
    let body = format!("{}-{}-", record_json("x1", 1, 2), record_json("x2", 2, 2));
    let (head, tail) = body.split_at(17);
    let h = harness(
        ScriptedImport::chunks(vec![head, tail]),
        ScriptedUploads::ok(),
        ScriptedFragments::ok(),
        RecordingUi::accepting(),
    );

    let outcome = h.orchestrator.import_path(&path_request()).await.unwrap();
    assert_eq!(outcome, ImportOutcome::Completed { appended: 2 });
    assert_eq!(grid_ids(&h.grid).await, ["x1", "x2"]);
    assert_eq!(*h.fragments.calls.lock().unwrap(), ["x1", "x2"]);
    // Displayed progress: 0.5 then the modulo-complete reset to 0.
    assert_eq!(*h.ui.progress.lock().unwrap(), [0.5, 0.0]);
}

#[tokio::test]
async fn test_declined_confirmation_is_a_quiet_early_return() {
    let h = harness(
        ScriptedImport::chunks(vec!["never read"]),
        ScriptedUploads::ok(),
        ScriptedFragments::ok(),
        RecordingUi::declining(),
    );

    let outcome = h.orchestrator.import_path(&path_request()).await.unwrap();
    assert_eq!(outcome, ImportOutcome::Declined);
    assert!(h.ui.notices.lock().unwrap().is_empty());
    assert!(grid_ids(&h.grid).await.is_empty());
}

#[tokio::test]
async fn test_empty_path_is_rejected_before_any_network_call() {
    let h = harness(
        ScriptedImport::chunks(vec!["never read"]),
        ScriptedUploads::ok(),
        ScriptedFragments::ok(),
        RecordingUi::accepting(),
    );

    let outcome = h
        .orchestrator
        .import_path(&PathImportRequest::default())
        .await
        .unwrap();
    assert_eq!(outcome, ImportOutcome::Rejected);
    assert_eq!(*h.ui.notices.lock().unwrap(), ["Must enter an import path."]);
    // The scripted chunks were never taken.
    assert!(h.grid.lock().await.is_empty());
}

#[tokio::test]
async fn test_failure_to_open_stream_aborts_whole_import() {
    let h = harness(
        ScriptedImport::failing_open(),
        ScriptedUploads::ok(),
        ScriptedFragments::ok(),
        RecordingUi::accepting(),
    );

    let outcome = h.orchestrator.import_path(&path_request()).await.unwrap();
    assert_eq!(outcome, ImportOutcome::Abandoned { appended: 0 });
    assert_eq!(h.ui.notices.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_record_abandons_rest_of_stream() {
    let body = format!("{}-garbage-{}-", record_json("x1", 1, 3), record_json("x3", 3, 3));
    let h = harness(
        ScriptedImport::chunks(vec![&body]),
        ScriptedUploads::ok(),
        ScriptedFragments::ok(),
        RecordingUi::accepting(),
    );

    let outcome = h.orchestrator.import_path(&path_request()).await.unwrap();
    // The first record made it in and stays; x3 is never processed.
    assert_eq!(outcome, ImportOutcome::Abandoned { appended: 1 });
    assert_eq!(grid_ids(&h.grid).await, ["x1"]);
    assert_eq!(h.ui.notices.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_mid_stream_transport_error_keeps_prior_entries() {
    let h = harness(
        ScriptedImport::with_results(vec![
            Ok(Bytes::from(format!("{}-", record_json("x1", 1, 2)))),
            Err(TransportError::Network("connection reset".to_string())),
        ]),
        ScriptedUploads::ok(),
        ScriptedFragments::ok(),
        RecordingUi::accepting(),
    );

    let outcome = h.orchestrator.import_path(&path_request()).await.unwrap();
    assert_eq!(outcome, ImportOutcome::Abandoned { appended: 1 });
    assert_eq!(grid_ids(&h.grid).await, ["x1"]);
}

#[tokio::test]
async fn test_fragment_failure_skips_only_that_record() {
    let body = format!(
        "{}-{}-{}-",
        record_json("a", 1, 3),
        record_json("b", 2, 3),
        record_json("c", 3, 3)
    );
    let h = harness(
        ScriptedImport::chunks(vec![&body]),
        ScriptedUploads::ok(),
        ScriptedFragments::failing(&["b"]),
        RecordingUi::accepting(),
    );

    let outcome = h.orchestrator.import_path(&path_request()).await.unwrap();
    assert_eq!(outcome, ImportOutcome::Completed { appended: 2 });
    assert_eq!(grid_ids(&h.grid).await, ["a", "c"]);
    assert_eq!(h.ui.notices.lock().unwrap().len(), 1);
    // Progress still advanced with the record counter for all three.
    assert_eq!(h.ui.progress.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_upload_batch_appends_in_drop_order_with_progress() {
    let h = harness(
        ScriptedImport::chunks(vec![]),
        ScriptedUploads::ok(),
        ScriptedFragments::ok(),
        RecordingUi::accepting(),
    );

    let summary = h
        .orchestrator
        .upload_batch(&[file("A.jpg"), file("B.png"), file("C.gif")])
        .await
        .unwrap();
    assert_eq!(
        summary,
        BatchSummary {
            total: 3,
            appended: 3,
            failed: 0
        }
    );
    assert_eq!(grid_ids(&h.grid).await, ["a1", "b2", "c3"]);
    assert_eq!(*h.uploads.calls.lock().unwrap(), ["A.jpg", "B.png", "C.gif"]);
    assert_eq!(
        *h.ui.progress.lock().unwrap(),
        [1.0 / 3.0, 2.0 / 3.0, 0.0]
    );
    assert_eq!(*h.ui.search_resets.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_upload_batch_replaces_the_view() {
    let h = harness(
        ScriptedImport::chunks(vec![]),
        ScriptedUploads::ok(),
        ScriptedFragments::ok(),
        RecordingUi::accepting(),
    );
    {
        let mut grid = h.grid.lock().await;
        grid.append(Entry::new(
            ItemId::from("stale"),
            None,
            RenderFragment::from(String::new()),
        ));
        grid.highlight(&ItemId::from("stale"));
    }

    h.orchestrator.upload_batch(&[file("A.jpg")]).await.unwrap();
    assert_eq!(grid_ids(&h.grid).await, ["a1"]);
    assert!(h.grid.lock().await.highlighted().is_none());
}

#[tokio::test]
async fn test_empty_drop_leaves_the_view_alone() {
    let h = harness(
        ScriptedImport::chunks(vec![]),
        ScriptedUploads::ok(),
        ScriptedFragments::ok(),
        RecordingUi::accepting(),
    );
    {
        let mut grid = h.grid.lock().await;
        grid.append(Entry::new(
            ItemId::from("kept"),
            None,
            RenderFragment::from(String::new()),
        ));
        grid.highlight(&ItemId::from("kept"));
    }

    let summary = h.orchestrator.upload_batch(&[]).await.unwrap();
    assert_eq!(
        summary,
        BatchSummary {
            total: 0,
            appended: 0,
            failed: 0
        }
    );
    assert_eq!(grid_ids(&h.grid).await, ["kept"]);
    assert!(h.grid.lock().await.highlighted().is_some());
    assert_eq!(*h.ui.search_resets.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_single_file_failure_does_not_abort_siblings() {
    let h = harness(
        ScriptedImport::chunks(vec![]),
        ScriptedUploads::failing(&["B.png"]),
        ScriptedFragments::ok(),
        RecordingUi::accepting(),
    );

    let summary = h
        .orchestrator
        .upload_batch(&[file("A.jpg"), file("B.png"), file("C.gif")])
        .await
        .unwrap();
    assert_eq!(summary.appended, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(grid_ids(&h.grid).await, ["a1", "c3"]);
    // Exactly one notification for the one failure.
    assert_eq!(h.ui.notices.lock().unwrap().len(), 1);
    assert_eq!(h.ui.progress.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_upload_receipt_carries_media_type() {
    let h = harness(
        ScriptedImport::chunks(vec![]),
        ScriptedUploads::ok(),
        ScriptedFragments::ok(),
        RecordingUi::accepting(),
    );

    h.orchestrator.upload_batch(&[file("A.jpg")]).await.unwrap();
    let grid = h.grid.lock().await;
    assert_eq!(grid.entry(0).unwrap().media_type, Some(MediaType::Jpeg));
}

/// Pending store that hands out its batch exactly once.
struct OnceStore {
    files: Mutex<Option<Vec<UploadFile>>>,
}

#[async_trait]
impl PendingBatchPort for OnceStore {
    async fn take_pending(&self) -> Result<Option<Vec<UploadFile>>> {
        Ok(self.files.lock().unwrap().take())
    }
}

#[tokio::test]
async fn test_resume_pending_replays_at_most_once() {
    let h = harness(
        ScriptedImport::chunks(vec![]),
        ScriptedUploads::ok(),
        ScriptedFragments::ok(),
        RecordingUi::accepting(),
    );
    let store = OnceStore {
        files: Mutex::new(Some(vec![file("A.jpg"), file("B.png")])),
    };

    let summary = h.orchestrator.resume_pending(&store).await.unwrap();
    assert_eq!(summary.unwrap().appended, 2);
    assert_eq!(grid_ids(&h.grid).await, ["a1", "b2"]);
    // Resume does not reset the view.
    assert_eq!(*h.ui.search_resets.lock().unwrap(), 0);

    // Navigating back again finds nothing to replay.
    let second = h.orchestrator.resume_pending(&store).await.unwrap();
    assert!(second.is_none());
    assert_eq!(grid_ids(&h.grid).await, ["a1", "b2"]);
}
