//! Values served by the metadata index.
//!
//! Only index backed providers produce these. They are part of the
//! [`TableMetadata`](crate::TableMetadata) signatures so every provider
//! exposes the same surface.

/// `(partition name, file name)` pair identifying a file in index lookups.
pub type PartitionFileKey = (String, String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    pub type_code: String,
    pub serialized: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStats {
    pub file_name: String,
    pub column_name: String,
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    pub null_count: u64,
    pub value_count: u64,
    pub total_size: u64,
    pub total_uncompressed_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    pub key: String,
    pub partition: String,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLocation {
    pub partition_path: String,
    pub file_id: String,
    pub instant_time: String,
}

/// Partitions of the metadata table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataPartitionType {
    Files,
    ColumnStats,
    BloomFilters,
    RecordIndex,
}
