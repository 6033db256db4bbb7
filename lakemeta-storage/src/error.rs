use object_store::path::Path;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("Failed to list {path}: {source}")]
    Listing {
        path: Path,
        #[source]
        source: object_store::Error,
    },
    #[error("Failed to check partition marker in {path}: {source}")]
    MarkerCheck {
        path: Path,
        #[source]
        source: object_store::Error,
    },
    #[error("Directory does not exist: {0}")]
    NotFound(Path),
    #[error("Initialization error: {0}")]
    Initialization(String),
}
