//! Partition discovery by walking the storage layout.
//!
//! The walk runs in rounds. Every directory of the current frontier is
//! classified in parallel: a directory holding a partition marker is reported
//! as a partition and not entered, any other directory contributes its child
//! directories to the next frontier. The walk ends when a round produces no
//! children, so tree depth is bounded by the storage only.

use std::{collections::HashSet, sync::Arc};

use lakemeta_engine::EngineContext;
use lakemeta_storage::{
    layout::{is_bookkeeping_dir, relative_partition_path, resolve_prefix},
    StorageError, TableStorage,
};
use object_store::path::Path;

use crate::{
    config::MetadataConfig,
    error::{MetadataError, MetadataResult},
    COMPONENT,
};

/// Number of directory levels below the root in date partitioned tables
/// (`yyyy/mm/dd`).
pub const DATE_PARTITION_DEPTH: usize = 3;

/// A directory waiting to be classified, tagged with the prefix it was
/// reached from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTask {
    pub directory: Path,
    pub prefix: Arc<str>,
}

/// What classifying one directory yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalOutcome {
    /// The directory is a partition, given relative to the table root.
    Discovered(String),
    /// A child directory still to be classified.
    Descend(ListingTask),
}

#[derive(Debug)]
pub struct PartitionDiscovery<'a, C: EngineContext> {
    context: &'a C,
    storage: Arc<dyn TableStorage>,
    root: &'a Path,
    config: &'a MetadataConfig,
}

impl<'a, C: EngineContext> PartitionDiscovery<'a, C> {
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

    /// Every partition below any of `prefixes`. An empty prefix is the root.
    ///
    /// Fails if a prefix does not name an existing directory or if storage
    /// fails anywhere during the walk. The table root always exists.
    pub async fn discover(&self, prefixes: &[String]) -> MetadataResult<HashSet<String>> {
        let seeds = prefixes
            .iter()
            .map(|prefix| ListingTask {
                directory: resolve_prefix(self.root, prefix),
                prefix: Arc::from(prefix.as_str()),
            })
            .collect::<Vec<_>>();
        if seeds.is_empty() {
            return Ok(HashSet::new());
        }
        self.check_seeds(&seeds).await?;

        let description = format!(
            "Listing all partitions with prefix {}",
            prefixes.join(", ")
        );
        let mut partitions = HashSet::new();
        let mut frontier = seeds;
        let mut round = 0usize;

        while !frontier.is_empty() {
            let parallelism = self.config.parallelism_for(frontier.len());
            tracing::debug!(
                round,
                pending = frontier.len(),
                parallelism,
                "Classifying directories"
            );
            self.context.set_job_status(COMPONENT, &description);

            let outcomes = self
                .context
                .flat_map(
                    frontier,
                    |task| classify(self.storage.clone(), self.root.clone(), task),
                    parallelism,
                )
                .await?;

            let mut next = Vec::new();
            for outcome in outcomes {
                match outcome {
                    TraversalOutcome::Discovered(partition) => {
                        partitions.insert(partition);
                    }
                    TraversalOutcome::Descend(task) => next.push(task),
                }
            }
            frontier = next;
            round += 1;
        }

        tracing::info!(
            partitions = partitions.len(),
            rounds = round,
            "Discovered partitions with prefix {}",
            prefixes.join(", ")
        );
        Ok(partitions)
    }

    /// Every directory exactly [`DATE_PARTITION_DEPTH`] levels below the root.
    /// Partition markers are not consulted.
    pub async fn discover_fixed_depth(&self) -> MetadataResult<HashSet<String>> {
        self.context
            .set_job_status(COMPONENT, "Listing date partitions three levels down");

        let mut frontier = vec![self.root.clone()];
        for level in 0..DATE_PARTITION_DEPTH {
            if frontier.is_empty() {
                break;
            }
            let parallelism = self.config.parallelism_for(frontier.len());
            tracing::debug!(level, pending = frontier.len(), parallelism, "Listing level");

            frontier = self
                .context
                .flat_map(
                    frontier,
                    |directory| {
                        let storage = self.storage.clone();
                        let root = self.root.clone();
                        async move {
                            storage
                                .list_directories(&directory, &is_bookkeeping_dir)
                                .await
                                .map_err(|e| {
                                    let relative = relative_partition_path(&root, &directory)
                                        .unwrap_or_else(|| directory.to_string());
                                    MetadataError::listing(relative, e)
                                })
                        }
                    },
                    parallelism,
                )
                .await?;
        }

        frontier
            .iter()
            .map(|directory| relative_to_root(self.root, directory))
            .collect()
    }

    async fn check_seeds(&self, seeds: &[ListingTask]) -> MetadataResult<()> {
        let parallelism = self.config.parallelism_for(seeds.len());
        self.context
            .map(
                seeds.to_vec(),
                |task| {
                    let storage = self.storage.clone();
                    let is_root = task.directory == *self.root;
                    async move {
                        if is_root {
                            return Ok(());
                        }
                        match storage.directory_exists(&task.directory).await {
                            Ok(true) => Ok(()),
                            Ok(false) => Err(MetadataError::listing(
                                task.prefix.as_ref(),
                                StorageError::NotFound(task.directory),
                            )),
                            Err(e) => Err(MetadataError::listing(task.prefix.as_ref(), e)),
                        }
                    }
                },
                parallelism,
            )
            .await?;
        Ok(())
    }
}

async fn classify(
    storage: Arc<dyn TableStorage>,
    root: Path,
    task: ListingTask,
) -> MetadataResult<Vec<TraversalOutcome>> {
    let is_partition = storage
        .has_partition_marker(&task.directory)
        .await
        .map_err(|e| MetadataError::listing(task.prefix.as_ref(), e))?;
    if is_partition {
        let partition = relative_to_root(&root, &task.directory)?;
        return Ok(vec![TraversalOutcome::Discovered(partition)]);
    }

    let children = storage
        .list_directories(&task.directory, &is_bookkeeping_dir)
        .await
        .map_err(|e| MetadataError::listing(task.prefix.as_ref(), e))?;
    Ok(children
        .into_iter()
        .map(|directory| {
            TraversalOutcome::Descend(ListingTask {
                directory,
                prefix: task.prefix.clone(),
            })
        })
        .collect())
}

fn relative_to_root(root: &Path, directory: &Path) -> MetadataResult<String> {
    relative_partition_path(root, directory).ok_or_else(|| MetadataError::InvalidPath {
        path: directory.to_string(),
    })
}
