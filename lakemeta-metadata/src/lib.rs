pub mod config;
pub mod discovery;
pub mod error;
pub mod file_system;
pub mod index;
pub mod listing;
pub mod table_metadata;

pub use config::MetadataConfig;
pub use error::{MetadataError, MetadataResult};
pub use file_system::FileSystemBackedTableMetadata;
pub use table_metadata::TableMetadata;

pub use lakemeta_storage::FileEntry;

/// Component name used when reporting job status to the engine.
pub(crate) const COMPONENT: &str = "FileSystemBackedTableMetadata";
