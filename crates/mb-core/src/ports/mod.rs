//! Port interfaces for the application layer.
//!
//! Ports define the contract between the use cases and their collaborators
//! (the server API, the view transport, the surrounding UI). The core keeps
//! no ambient singletons; every use case receives the ports it needs as
//! constructor parameters.

pub mod errors;
pub mod import;
pub mod pending;
pub mod render;
pub mod tags;
pub mod ui;
pub mod view;

pub use errors::TransportError;
pub use import::{
    ByteStream, FileUploadPort, PathImportPort, PathImportRequest, UploadFile, UploadFlags,
    UploadReceipt,
};
pub use pending::PendingBatchPort;
pub use render::RenderFragmentPort;
pub use tags::TagCompletePort;
pub use ui::UiPort;
pub use view::ViewTransportPort;
