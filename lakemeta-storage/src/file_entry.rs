use chrono::{DateTime, Utc};
use object_store::{path::Path, ObjectMeta};

/// A data file inside a partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub location: Path,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

impl FileEntry {
    /// Last segment of the location.
    pub fn file_name(&self) -> &str {
        self.location.filename().unwrap_or_default()
    }
}

impl From<ObjectMeta> for FileEntry {
    fn from(meta: ObjectMeta) -> Self {
        Self {
            location: meta.location,
            size: meta.size,
            last_modified: meta.last_modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn keeps_size_and_timestamp_from_object_meta() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let entry = FileEntry::from(ObjectMeta {
            location: Path::from("table/2024/03/01/f1_0-1-0_001.parquet"),
            size: 42,
            last_modified: dt,
            e_tag: None,
            version: None,
        });

        assert_eq!(entry.size, 42);
        assert_eq!(entry.last_modified, dt);
        assert_eq!(entry.file_name(), "f1_0-1-0_001.parquet");
    }
}
