//! # mb-core
//!
//! Core domain models and business logic for the mediaboard client.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the grid of ingested entries, navigation planning over it,
//! the progress-stream framing, and the port traits the outer layers
//! implement.

// Public module exports
pub mod entry;
pub mod grid;
pub mod ids;
pub mod ingest;
pub mod media;
pub mod nav;
pub mod ports;
pub mod progress;
pub mod tags;

// Re-export commonly used types at the crate root
pub use entry::{Entry, RenderFragment};
pub use grid::{GridLayout, GridModel};
pub use ids::ItemId;
pub use ingest::{FramingError, IngestionRecord, RecordSplitter};
pub use media::MediaType;
pub use nav::NavCommand;
