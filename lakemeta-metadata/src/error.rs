use lakemeta_engine::EngineError;
use lakemeta_storage::StorageError;

pub type MetadataResult<T> = Result<T, MetadataError>;

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Storage failed while listing below `prefix`. Nothing partial is returned.
    #[error("Failed to list '{prefix}': {source}")]
    Listing {
        prefix: String,
        #[source]
        source: StorageError,
    },
    /// The operation needs the metadata index, which this provider does not have.
    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: &'static str },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("Failed to open table: {0}")]
    TableOpen(#[source] StorageError),
    #[error("Path {path} is outside of the table root")]
    InvalidPath { path: String },
}

impl MetadataError {
    pub(crate) fn listing(prefix: impl Into<String>, source: StorageError) -> Self {
        Self::Listing {
            prefix: prefix.into(),
            source,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
