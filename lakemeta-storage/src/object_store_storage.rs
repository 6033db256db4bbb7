use std::sync::Arc;

use object_store::{path::Path, ListResult, ObjectStore};

use crate::{
    error::{StorageError, StorageResult},
    layout, DirectoryFilter, FileEntry, TableStorage,
};

/// [`TableStorage`] on top of any [`ObjectStore`].
///
/// Directories are the common prefixes returned by a delimited listing. Stores
/// without real directories only report one while something is stored below
/// it; file system backed stores also report empty directories.
#[derive(Debug, Clone)]
pub struct ObjectStoreStorage {
    inner: Arc<dyn ObjectStore>,
}

impl ObjectStoreStorage {
    pub fn new(inner: Arc<dyn ObjectStore>) -> Self {
        Self { inner }
    }

    async fn list_level(&self, path: &Path) -> StorageResult<ListResult> {
        // The store root is addressed by an absent prefix.
        let prefix = (!path.as_ref().is_empty()).then_some(path);
        self.inner
            .list_with_delimiter(prefix)
            .await
            .map_err(|source| StorageError::Listing {
                path: path.clone(),
                source,
            })
    }
}

#[async_trait::async_trait]
impl TableStorage for ObjectStoreStorage {
    async fn list_directories(
        &self,
        path: &Path,
        exclude: &DirectoryFilter,
    ) -> StorageResult<Vec<Path>> {
        let listing = self.list_level(path).await?;
        Ok(listing
            .common_prefixes
            .into_iter()
            .filter(|dir| !exclude(dir.filename().unwrap_or_default()))
            .collect())
    }

    async fn has_partition_marker(&self, path: &Path) -> StorageResult<bool> {
        for marker in layout::PARTITION_MARKER_FILES {
            match self.inner.head(&path.child(marker)).await {
                Ok(_) => return Ok(true),
                Err(object_store::Error::NotFound { .. }) => continue,
                Err(source) => {
                    return Err(StorageError::MarkerCheck {
                        path: path.clone(),
                        source,
                    })
                }
            }
        }
        Ok(false)
    }

    async fn list_data_files(&self, path: &Path) -> StorageResult<Vec<FileEntry>> {
        let listing = match self.list_level(path).await {
            Ok(listing) => listing,
            Err(StorageError::Listing {
                source: object_store::Error::NotFound { .. },
                ..
            }) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        Ok(listing
            .objects
            .into_iter()
            .filter(|meta| layout::is_data_file(meta.location.filename().unwrap_or_default()))
            .map(FileEntry::from)
            .collect())
    }

    async fn directory_exists(&self, path: &Path) -> StorageResult<bool> {
        if path.as_ref().is_empty() {
            return Ok(true);
        }
        match self.list_level(path).await {
            Ok(listing) if !listing.objects.is_empty() || !listing.common_prefixes.is_empty() => {
                return Ok(true)
            }
            Ok(_)
            | Err(StorageError::Listing {
                source: object_store::Error::NotFound { .. },
                ..
            }) => {}
            Err(e) => return Err(e),
        }

        // An empty directory only shows up in the listing of its parent.
        match self.list_level(&parent_of(path)).await {
            Ok(listing) => Ok(listing.common_prefixes.contains(path)),
            Err(StorageError::Listing {
                source: object_store::Error::NotFound { .. },
                ..
            }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn parent_of(path: &Path) -> Path {
    let mut parts = path.parts().collect::<Vec<_>>();
    parts.pop();
    parts.into_iter().collect()
}
