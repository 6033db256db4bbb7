use std::path::PathBuf;

use envconfig::Envconfig;
use lazy_static::lazy_static;

/// Upper bound on the number of listing tasks scheduled in a single round.
pub const DEFAULT_LISTING_PARALLELISM: usize = 1500;

#[derive(Debug, Envconfig)]
pub struct Config {
    #[envconfig(from = "LAKEMETA_LOG_LEVEL", default = "info")]
    pub log_level: String,
    /// Root directory of the table on the local file system, or the key prefix
    /// of the table inside the bucket when `s3_table` is set.
    #[envconfig(from = "LAKEMETA_TABLE_PATH", default = "./data/table")]
    pub table_path: String,
    #[envconfig(from = "LAKEMETA_S3_TABLE", default = "false")]
    pub s3_table: bool,
    #[envconfig(from = "LAKEMETA_S3_BUCKET")]
    pub s3_bucket: Option<String>,
    /// Skip marker based discovery and treat every directory three levels
    /// below the root as a partition.
    #[envconfig(from = "LAKEMETA_ASSUME_DATE_PARTITIONING", default = "false")]
    pub assume_date_partitioning: bool,
    #[envconfig(from = "LAKEMETA_LISTING_PARALLELISM", default = "1500")]
    pub listing_parallelism: usize,
}

impl Config {
    pub fn init() -> Config {
        Config::init_from_env().expect("Failed to load config")
    }

    pub fn table_dir(&self) -> PathBuf {
        PathBuf::from(&self.table_path)
    }
}

lazy_static! {
    pub static ref CONFIG: Config = Config::init();
}
