//! # mb-app
//!
//! Application layer of the mediaboard client: the import orchestrator, the
//! grid navigation controller, and tag completion. Use cases receive their
//! collaborator ports explicitly and mutate the shared grid from one logical
//! task at a time, so append order always matches source order.

pub mod grid;
pub mod import;
pub mod navigation;
pub mod tags;

pub use grid::SharedGrid;
pub use import::ImportOrchestrator;
pub use navigation::NavigationController;
pub use tags::CompleteTagUseCase;
