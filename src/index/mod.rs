pub mod build;
pub mod error;
pub mod reader;
pub mod snapshot;
pub mod stats;
pub mod sync;
pub mod types;
pub mod writer;

pub use error::CodecError;
pub use snapshot::Snapshot;
pub use sync::SyncReport;
pub use types::*;
