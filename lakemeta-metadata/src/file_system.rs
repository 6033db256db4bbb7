use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use lakemeta_engine::EngineContext;
use lakemeta_storage::{open_table_store, FileEntry, ObjectStoreStorage, TableStorage};
use object_store::{path::Path, ObjectStore};

use crate::{
    config::MetadataConfig,
    discovery::PartitionDiscovery,
    error::{MetadataError, MetadataResult},
    index::{
        BloomFilter, ColumnStats, MetadataPartitionType, MetadataRecord, PartitionFileKey,
        RecordLocation,
    },
    listing::FileListing,
    table_metadata::TableMetadata,
};

/// [`TableMetadata`] answered by listing the table's storage directly.
///
/// Holds no cache and no open handle; every call reflects the storage as it
/// is at that moment. Index queries are not supported.
#[derive(Debug)]
pub struct FileSystemBackedTableMetadata<C: EngineContext> {
    context: Arc<C>,
    storage: Arc<dyn TableStorage>,
    table_root: Path,
    config: MetadataConfig,
}

impl<C: EngineContext> FileSystemBackedTableMetadata<C> {
    pub fn new(
        context: Arc<C>,
        storage: Arc<dyn TableStorage>,
        table_root: Path,
        config: MetadataConfig,
    ) -> Self {
        Self {
            context,
            storage,
            table_root,
            config,
        }
    }

    pub fn from_object_store(
        context: Arc<C>,
        store: Arc<dyn ObjectStore>,
        table_root: Path,
        config: MetadataConfig,
    ) -> Self {
        Self::new(
            context,
            Arc::new(ObjectStoreStorage::new(store)),
            table_root,
            config,
        )
    }

    /// Opens the table described by the process configuration.
    pub fn open(context: Arc<C>, config: &lakemeta_config::Config) -> MetadataResult<Self> {
        let table = open_table_store(config).map_err(MetadataError::TableOpen)?;
        Ok(Self::from_object_store(
            context,
            table.store,
            table.root,
            MetadataConfig::from(config),
        ))
    }

    pub fn with_metadata_config(mut self, config: MetadataConfig) -> Self {
        self.config = config;
        self
    }

    pub fn table_root(&self) -> &Path {
        &self.table_root
    }

    pub fn config(&self) -> &MetadataConfig {
        &self.config
    }

    fn discovery(&self) -> PartitionDiscovery<'_, C> {
        PartitionDiscovery::new(
            self.context.as_ref(),
            self.storage.clone(),
            &self.table_root,
            &self.config,
        )
    }

    fn listing(&self) -> FileListing<'_, C> {
        FileListing::new(
            self.context.as_ref(),
            self.storage.clone(),
            &self.table_root,
            &self.config,
        )
    }
}

#[async_trait::async_trait]
impl<C: EngineContext> TableMetadata for FileSystemBackedTableMetadata<C> {
    async fn get_all_partition_paths(&self) -> MetadataResult<HashSet<String>> {
        if self.config.assume_date_partitioning {
            return self.discovery().discover_fixed_depth().await;
        }
        self.get_partition_paths_with_prefixes(&[String::new()]).await
    }

    async fn get_partition_paths_with_prefixes(
        &self,
        prefixes: &[String],
    ) -> MetadataResult<HashSet<String>> {
        self.discovery().discover(prefixes).await
    }

    async fn get_all_files_in_partition(
        &self,
        partition_path: &str,
    ) -> MetadataResult<Vec<FileEntry>> {
        self.listing().list_files(partition_path).await
    }

    async fn get_all_files_in_partitions(
        &self,
        partition_paths: &[String],
    ) -> MetadataResult<HashMap<String, Vec<FileEntry>>> {
        self.listing().list_files_batch(partition_paths).await
    }

    async fn get_bloom_filter(
        &self,
        _partition_name: &str,
        _file_name: &str,
    ) -> MetadataResult<Option<BloomFilter>> {
        Err(MetadataError::Unsupported {
            operation: "get_bloom_filter",
        })
    }

    async fn get_bloom_filters(
        &self,
        _partition_file_names: &[PartitionFileKey],
    ) -> MetadataResult<HashMap<PartitionFileKey, BloomFilter>> {
        Err(MetadataError::Unsupported {
            operation: "get_bloom_filters",
        })
    }

    async fn get_column_stats(
        &self,
        _partition_file_names: &[PartitionFileKey],
        _column_name: &str,
    ) -> MetadataResult<HashMap<PartitionFileKey, ColumnStats>> {
        Err(MetadataError::Unsupported {
            operation: "get_column_stats",
        })
    }

    async fn get_records_by_key_prefixes(
        &self,
        _key_prefixes: &[String],
        _partition_name: &str,
        _load_in_memory: bool,
    ) -> MetadataResult<Vec<MetadataRecord>> {
        Err(MetadataError::Unsupported {
            operation: "get_records_by_key_prefixes",
        })
    }

    async fn read_record_index(
        &self,
        _record_keys: &[String],
    ) -> MetadataResult<HashMap<String, RecordLocation>> {
        Err(MetadataError::Unsupported {
            operation: "read_record_index",
        })
    }

    fn get_num_file_groups_for_partition(
        &self,
        _partition: MetadataPartitionType,
    ) -> MetadataResult<usize> {
        Err(MetadataError::Unsupported {
            operation: "get_num_file_groups_for_partition",
        })
    }

    fn get_synced_instant_time(&self) -> MetadataResult<Option<String>> {
        Err(MetadataError::Unsupported {
            operation: "get_synced_instant_time",
        })
    }

    fn get_latest_compaction_time(&self) -> MetadataResult<Option<String>> {
        Err(MetadataError::Unsupported {
            operation: "get_latest_compaction_time",
        })
    }

    fn supports_index_queries(&self) -> bool {
        false
    }

    fn reset(&self) {}

    async fn close(&self) -> MetadataResult<()> {
        Ok(())
    }
}
