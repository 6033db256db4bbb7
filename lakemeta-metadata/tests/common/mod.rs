#![allow(dead_code)]

use std::sync::Arc;

use lakemeta_engine::LocalEngineContext;
use lakemeta_metadata::{FileSystemBackedTableMetadata, MetadataConfig};
use lakemeta_storage::{
    DirectoryFilter, FileEntry, ObjectStoreStorage, StorageError,
    StorageResult, TableStorage,
};
use object_store::{memory::InMemory, path::Path, ObjectStore, PutPayload};
use parking_lot::Mutex;

pub const TABLE_ROOT: &str = "lake/trips";

pub fn root() -> Path {
    Path::from(TABLE_ROOT)
}

/// In-memory table holding the bookkeeping directory and `files`, given
/// relative to the table root.
pub async fn table_store(files: &[&str]) -> Arc<dyn ObjectStore> {
    let store = InMemory::new();
    let root = root();
    for file in [".hoodie/hoodie.properties"].iter().chain(files) {
        let path = file.split('/').fold(root.clone(), |p, part| p.child(part));
        store
            .put(&path, PutPayload::from_static(b"0123456789"))
            .await
            .unwrap();
    }
    Arc::new(store)
}

#[derive(Debug, Default)]
pub struct Calls {
    pub listed_directories: Vec<Path>,
    pub marker_checks: Vec<Path>,
    pub file_listings: Vec<Path>,
    pub existence_checks: Vec<Path>,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.listed_directories.len()
            + self.marker_checks.len()
            + self.file_listings.len()
            + self.existence_checks.len()
    }
}

/// Records every storage call and optionally fails the calls made for one
/// directory.
#[derive(Debug)]
pub struct RecordingStorage {
    inner: ObjectStoreStorage,
    fail_listing_on: Option<Path>,
    fail_marker_check_on: Option<Path>,
    pub calls: Mutex<Calls>,
}

impl RecordingStorage {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            inner: ObjectStoreStorage::new(store),
            fail_listing_on: None,
            fail_marker_check_on: None,
            calls: Mutex::new(Calls::default()),
        }
    }

    /// Directory and file listings of `path` fail.
    pub fn failing_on(mut self, path: Path) -> Self {
        self.fail_listing_on = Some(path);
        self
    }

    /// Marker checks of `path` fail.
    pub fn failing_marker_check_on(mut self, path: Path) -> Self {
        self.fail_marker_check_on = Some(path);
        self
    }

    fn check_listing(&self, path: &Path) -> StorageResult<()> {
        if self.fail_listing_on.as_ref() == Some(path) {
            return Err(StorageError::Listing {
                path: path.clone(),
                source: injected_failure(),
            });
        }
        Ok(())
    }

    fn check_marker(&self, path: &Path) -> StorageResult<()> {
        if self.fail_marker_check_on.as_ref() == Some(path) {
            return Err(StorageError::MarkerCheck {
                path: path.clone(),
                source: injected_failure(),
            });
        }
        Ok(())
    }
}

fn injected_failure() -> object_store::Error {
    object_store::Error::Generic {
        store: "recording",
        source: "injected failure".into(),
    }
}

#[async_trait::async_trait]
impl TableStorage for RecordingStorage {
    async fn list_directories(
        &self,
        path: &Path,
        exclude: &DirectoryFilter,
    ) -> StorageResult<Vec<Path>> {
        self.calls.lock().listed_directories.push(path.clone());
        self.check_listing(path)?;
        self.inner.list_directories(path, exclude).await
    }

    async fn has_partition_marker(&self, path: &Path) -> StorageResult<bool> {
        self.calls.lock().marker_checks.push(path.clone());
        self.check_marker(path)?;
        self.inner.has_partition_marker(path).await
    }

    async fn list_data_files(&self, path: &Path) -> StorageResult<Vec<FileEntry>> {
        self.calls.lock().file_listings.push(path.clone());
        self.check_listing(path)?;
        self.inner.list_data_files(path).await
    }

    async fn directory_exists(&self, path: &Path) -> StorageResult<bool> {
        self.calls.lock().existence_checks.push(path.clone());
        self.inner.directory_exists(path).await
    }
}

pub fn metadata(
    storage: Arc<dyn TableStorage>,
    config: MetadataConfig,
) -> (
    Arc<LocalEngineContext>,
    FileSystemBackedTableMetadata<LocalEngineContext>,
) {
    let context = Arc::new(LocalEngineContext::new());
    let metadata = FileSystemBackedTableMetadata::new(context.clone(), storage, root(), config);
    (context, metadata)
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
