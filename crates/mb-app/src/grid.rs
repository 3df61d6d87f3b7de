//! Shared handle to the grid model.
//!
//! There is no true parallelism in the client design; the mutex exists so
//! that an active import task and the UI event task serialize their
//! mutations, which is what preserves the append-order guarantee.

use mb_core::GridModel;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Grid model shared between the import orchestrator and the navigation
/// controller.
pub type SharedGrid = Arc<Mutex<GridModel>>;

/// Fresh empty shared grid.
pub fn shared_grid() -> SharedGrid {
    Arc::new(Mutex::new(GridModel::new()))
}
