use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
};

use lakemeta_storage::FileEntry;

use crate::{
    error::MetadataResult,
    index::{
        BloomFilter, ColumnStats, MetadataPartitionType, MetadataRecord, PartitionFileKey,
        RecordLocation,
    },
};

/// Read access to a table's partitions, files and index.
///
/// Implemented by the file system backed provider and by index backed
/// providers. Providers without an index answer the index queries with
/// [`MetadataError::Unsupported`](crate::MetadataError::Unsupported) and
/// report `false` from [`TableMetadata::supports_index_queries`].
///
/// Partition paths are relative to the table root. Returned collections have
/// no defined order.
#[async_trait::async_trait]
pub trait TableMetadata: Debug + Send + Sync {
    async fn get_all_partition_paths(&self) -> MetadataResult<HashSet<String>>;

    /// Partitions below any of the given relative prefixes. `""` is the root.
    async fn get_partition_paths_with_prefixes(
        &self,
        prefixes: &[String],
    ) -> MetadataResult<HashSet<String>>;

    async fn get_all_files_in_partition(
        &self,
        partition_path: &str,
    ) -> MetadataResult<Vec<FileEntry>>;

    async fn get_all_files_in_partitions(
        &self,
        partition_paths: &[String],
    ) -> MetadataResult<HashMap<String, Vec<FileEntry>>>;

    async fn get_bloom_filter(
        &self,
        partition_name: &str,
        file_name: &str,
    ) -> MetadataResult<Option<BloomFilter>>;

    async fn get_bloom_filters(
        &self,
        partition_file_names: &[PartitionFileKey],
    ) -> MetadataResult<HashMap<PartitionFileKey, BloomFilter>>;

    async fn get_column_stats(
        &self,
        partition_file_names: &[PartitionFileKey],
        column_name: &str,
    ) -> MetadataResult<HashMap<PartitionFileKey, ColumnStats>>;

    async fn get_records_by_key_prefixes(
        &self,
        key_prefixes: &[String],
        partition_name: &str,
        load_in_memory: bool,
    ) -> MetadataResult<Vec<MetadataRecord>>;

    /// Location of each record key found in the record index.
    async fn read_record_index(
        &self,
        record_keys: &[String],
    ) -> MetadataResult<HashMap<String, RecordLocation>>;

    fn get_num_file_groups_for_partition(
        &self,
        partition: MetadataPartitionType,
    ) -> MetadataResult<usize>;

    /// Latest instant of the data table the index has caught up with.
    fn get_synced_instant_time(&self) -> MetadataResult<Option<String>>;

    fn get_latest_compaction_time(&self) -> MetadataResult<Option<String>>;

    /// Whether the index queries above can be answered.
    fn supports_index_queries(&self) -> bool;

    /// Drops whatever the provider caches.
    fn reset(&self);

    /// Releases open readers and handles.
    async fn close(&self) -> MetadataResult<()>;
}
