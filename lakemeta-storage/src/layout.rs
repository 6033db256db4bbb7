//! Naming conventions of the table layout on storage.
//!
//! A table root holds the bookkeeping directory (`.hoodie`) next to the
//! partition directories. A partition is any directory carrying a partition
//! marker file; data files and delta log files live directly inside it.

use std::sync::LazyLock;

use object_store::path::Path;
use regex::Regex;

/// Reserved directory holding the table's timeline and internal index.
pub const BOOKKEEPING_DIR: &str = ".hoodie";

/// Name of the marker file that flags a directory as a partition.
pub const PARTITION_MARKER: &str = ".hoodie_partition_metadata";

/// Every accepted spelling of the marker. Newer writers store the marker in
/// the table's base file format.
pub const PARTITION_MARKER_FILES: [&str; 3] = [
    PARTITION_MARKER,
    ".hoodie_partition_metadata.parquet",
    ".hoodie_partition_metadata.orc",
];

/// `.<file id>_<base instant>.log.<version>[_<write token>][.cdc]`
static LOG_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.(.+)_(.*)\.(log|archive)\.(\d+)(_\d+-\d+-\d+)?(\.cdc)?$")
        .expect("Failed to compile log file pattern")
});

pub fn is_bookkeeping_dir(name: &str) -> bool {
    name == BOOKKEEPING_DIR
}

pub fn is_partition_marker(name: &str) -> bool {
    PARTITION_MARKER_FILES.contains(&name)
}

pub fn is_log_file(name: &str) -> bool {
    LOG_FILE_PATTERN.is_match(name)
}

/// Whether a file found in a partition directory holds table data.
///
/// Markers and hidden or underscore-prefixed sidecars (`.crc`, `_SUCCESS`)
/// are rejected. Delta log files are hidden by convention but are data.
pub fn is_data_file(name: &str) -> bool {
    if name.is_empty() || is_partition_marker(name) {
        return false;
    }
    if name.starts_with('.') {
        return is_log_file(name);
    }
    !name.starts_with('_')
}

/// Resolves a relative prefix such as `"2024/03"` or `"/2024/03/"` below `root`.
pub fn resolve_prefix(root: &Path, prefix: &str) -> Path {
    prefix
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(root.clone(), |path, part| path.child(part))
}

/// Path of `path` relative to `root`, joined with `/`.
///
/// Returns `None` when `path` does not live below `root`. The root itself maps
/// to the empty string.
pub fn relative_partition_path(root: &Path, path: &Path) -> Option<String> {
    let parts = path
        .prefix_match(root)?
        .map(|part| part.as_ref().to_string())
        .collect::<Vec<_>>();
    Some(parts.join("/"))
}
