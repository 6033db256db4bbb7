use lakemeta_config::DEFAULT_LISTING_PARALLELISM;

/// Per-table knobs of the file system backed provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataConfig {
    /// Treat every directory three levels below the root as a partition
    /// instead of looking for partition markers.
    pub assume_date_partitioning: bool,
    /// Cap on the tasks scheduled per listing round, for discovery and file
    /// listing alike.
    pub listing_parallelism: usize,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            assume_date_partitioning: false,
            listing_parallelism: DEFAULT_LISTING_PARALLELISM,
        }
    }
}

impl MetadataConfig {
    pub fn with_assume_date_partitioning(mut self, assume: bool) -> Self {
        self.assume_date_partitioning = assume;
        self
    }

    pub fn with_listing_parallelism(mut self, parallelism: usize) -> Self {
        self.listing_parallelism = parallelism;
        self
    }

    /// Fan-out for a round with `pending` tasks.
    pub fn parallelism_for(&self, pending: usize) -> usize {
        self.listing_parallelism.min(pending).max(1)
    }
}

impl From<&lakemeta_config::Config> for MetadataConfig {
    fn from(config: &lakemeta_config::Config) -> Self {
        Self {
            assume_date_partitioning: config.assume_date_partitioning,
            listing_parallelism: config.listing_parallelism,
        }
    }
}
