use std::{fmt::Debug, sync::Arc};

use object_store::{
    aws::{AmazonS3, AmazonS3Builder},
    local::LocalFileSystem,
    path::Path,
    ObjectStore,
};

pub mod error;
pub mod file_entry;
pub mod layout;
pub mod object_store_storage;

pub use error::{StorageError, StorageResult};
pub use file_entry::FileEntry;
pub use object_store_storage::ObjectStoreStorage;

/// Predicate over the name of a child directory. Returning `true` drops it.
pub type DirectoryFilter = dyn Fn(&str) -> bool + Send + Sync;

/// The storage operations the metadata layer relies on.
///
/// Every path handed in or out is absolute within the backing store.
#[async_trait::async_trait]
pub trait TableStorage: Debug + Send + Sync {
    /// Immediate child directories of `path`, minus those rejected by `exclude`.
    async fn list_directories(
        &self,
        path: &Path,
        exclude: &DirectoryFilter,
    ) -> StorageResult<Vec<Path>>;

    /// Whether `path` carries a partition marker file.
    async fn has_partition_marker(&self, path: &Path) -> StorageResult<bool>;

    /// Data files directly inside `path`. A missing directory lists as empty.
    async fn list_data_files(&self, path: &Path) -> StorageResult<Vec<FileEntry>>;

    async fn directory_exists(&self, path: &Path) -> StorageResult<bool>;
}

/// A table's backing store together with the location of its root.
#[derive(Debug, Clone)]
pub struct TableStore {
    pub store: Arc<dyn ObjectStore>,
    pub root: Path,
}

/// Opens the store holding the configured table.
///
/// With `s3_table` the table lives under `table_path` inside the configured
/// bucket. Otherwise `table_path` is a local directory that becomes the root.
pub fn open_table_store(config: &lakemeta_config::Config) -> StorageResult<TableStore> {
    if config.s3_table {
        tracing::info!("Using S3 object store for table {}", config.table_path);
        let store: Arc<dyn ObjectStore> = Arc::new(s3_object_store(config)?);
        Ok(TableStore {
            store,
            root: layout::resolve_prefix(&Path::from(""), &config.table_path),
        })
    } else {
        tracing::info!("Using LocalFileSystem object store for table {}", config.table_path);
        let store = LocalFileSystem::new_with_prefix(config.table_dir()).map_err(|e| {
            StorageError::Initialization(format!(
                "Failed to open table directory {}: {}",
                config.table_path, e
            ))
        })?;
        Ok(TableStore {
            store: Arc::new(store),
            root: Path::from(""),
        })
    }
}

fn s3_object_store(config: &lakemeta_config::Config) -> StorageResult<AmazonS3> {
    let bucket_name = config.s3_bucket.as_ref().ok_or_else(|| {
        StorageError::Initialization("S3 bucket name not configured".to_string())
    })?;
    AmazonS3Builder::from_env()
        .with_allow_http(true)
        .with_bucket_name(bucket_name)
        .build()
        .map_err(|e| StorageError::Initialization(format!("Failed to build S3 object store: {}", e)))
}
