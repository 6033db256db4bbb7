use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use lakemeta_engine::EngineContext;
use lakemeta_storage::{layout::resolve_prefix, FileEntry, TableStorage};
use object_store::path::Path;

use crate::{
    config::MetadataConfig,
    error::{MetadataError, MetadataResult},
    COMPONENT,
};

/// Enumerates the data files of partitions.
#[derive(Debug)]
pub struct FileListing<'a, C: EngineContext> {
    context: &'a C,
    storage: Arc<dyn TableStorage>,
    root: &'a Path,
    config: &'a MetadataConfig,
}

impl<'a, C: EngineContext> FileListing<'a, C> {
    pub fn new(
        context: &'a C,
        storage: Arc<dyn TableStorage>,
        root: &'a Path,
        config: &'a MetadataConfig,
    ) -> Self {
        Self {
            context,
            storage,
            root,
            config,
        }
    }

    /// Data files of one partition. A partition that does not exist has none.
    pub async fn list_files(&self, partition_path: &str) -> MetadataResult<Vec<FileEntry>> {
        list_partition(self.storage.as_ref(), self.root, partition_path).await
    }

    /// Data files of several partitions, listed in one parallel round.
    pub async fn list_files_batch(
        &self,
        partition_paths: &[String],
    ) -> MetadataResult<HashMap<String, Vec<FileEntry>>> {
        let partitions = partition_paths
            .iter()
            .cloned()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        if partitions.is_empty() {
            return Ok(HashMap::new());
        }

        let parallelism = self.config.parallelism_for(partitions.len());
        self.context.set_job_status(
            COMPONENT,
            &format!("Listing all files in {} partitions", partitions.len()),
        );

        let listed = self
            .context
            .map(
                partitions,
                |partition| {
                    let storage = self.storage.clone();
                    let root = self.root.clone();
                    async move {
                        let files = list_partition(storage.as_ref(), &root, &partition).await?;
                        Ok::<_, MetadataError>((partition, files))
                    }
                },
                parallelism,
            )
            .await?;

        Ok(listed.into_iter().collect())
    }
}

async fn list_partition(
    storage: &dyn TableStorage,
    root: &Path,
    partition_path: &str,
) -> MetadataResult<Vec<FileEntry>> {
    let directory = resolve_prefix(root, partition_path);
    storage
        .list_data_files(&directory)
        .await
        .map_err(|e| MetadataError::listing(partition_path, e))
}
