use std::future::Future;

use parking_lot::Mutex;
use tokio::task::JoinSet;

use crate::{EngineContext, EngineError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub component: String,
    pub description: String,
}

/// Runs every task as a tokio task on the ambient runtime.
///
/// At most `parallelism` tasks are alive at once. When a task fails the
/// remaining ones are aborted as the join set is dropped.
#[derive(Debug, Default)]
pub struct LocalEngineContext {
    job_status: Mutex<Option<JobStatus>>,
}

impl LocalEngineContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The status last reported through [`EngineContext::set_job_status`].
    pub fn job_status(&self) -> Option<JobStatus> {
        self.job_status.lock().clone()
    }
}

#[async_trait::async_trait]
impl EngineContext for LocalEngineContext {
    fn set_job_status(&self, component: &str, description: &str) {
        tracing::info!(component, "{}", description);
        *self.job_status.lock() = Some(JobStatus {
            component: component.to_string(),
            description: description.to_string(),
        });
    }

    async fn map<I, O, E, F, Fut>(
        &self,
        items: Vec<I>,
        func: F,
        parallelism: usize,
    ) -> Result<Vec<O>, E>
    where
        I: Send + 'static,
        O: Send + 'static,
        E: From<EngineError> + Send + 'static,
        F: Fn(I) -> Fut + Send + Sync,
        Fut: Future<Output = Result<O, E>> + Send + 'static,
    {
        let mut results = Vec::with_capacity(items.len());
        let mut pending = items.into_iter();
        let mut running = JoinSet::new();

        for item in pending.by_ref().take(parallelism.max(1)) {
            running.spawn(func(item));
        }

        while let Some(joined) = running.join_next().await {
            let output = joined.map_err(EngineError::from)??;
            results.push(output);
            if let Some(item) = pending.next() {
                running.spawn(func(item));
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    use super::*;

    #[derive(Debug, thiserror::Error)]
    enum TestError {
        #[error("engine: {0}")]
        Engine(#[from] EngineError),
        #[error("task rejected {0}")]
        Rejected(usize),
    }

    #[tokio::test]
    async fn map_returns_every_output() {
        let context = LocalEngineContext::new();
        let mut doubled = context
            .map(
                (0..100).collect(),
                |n: usize| async move { Ok::<_, TestError>(n * 2) },
                7,
            )
            .await
            .unwrap();
        doubled.sort();

        assert_eq!(doubled, (0..100).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn flat_map_flattens_outputs() {
        let context = LocalEngineContext::new();
        let mut out = context
            .flat_map(
                vec![1usize, 2, 3],
                |n: usize| async move { Ok::<_, TestError>(vec![n; n]) },
                2,
            )
            .await
            .unwrap();
        out.sort();

        assert_eq!(out, vec![1, 2, 2, 3, 3, 3]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn never_exceeds_parallelism() {
        let context = LocalEngineContext::new();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        context
            .map(
                (0..40).collect::<Vec<usize>>(),
                |_| {
                    let in_flight = in_flight.clone();
                    let peak = peak.clone();
                    async move {
                        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(2)).await;
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                        Ok::<_, TestError>(())
                    }
                },
                3,
            )
            .await
            .unwrap();

        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn first_error_is_returned() {
        let context = LocalEngineContext::new();
        let result = context
            .map(
                (0..10).collect::<Vec<usize>>(),
                |n| async move {
                    if n == 4 {
                        Err(TestError::Rejected(n))
                    } else {
                        Ok(n)
                    }
                },
                10,
            )
            .await;

        assert!(matches!(result, Err(TestError::Rejected(4))));
    }

    #[tokio::test]
    async fn panicking_task_surfaces_as_engine_error() {
        let context = LocalEngineContext::new();
        let result = context
            .map(
                vec![0usize],
                |_| async move {
                    if true {
                        panic!("boom");
                    }
                    Ok::<usize, TestError>(0)
                },
                1,
            )
            .await;

        assert!(matches!(result, Err(TestError::Engine(EngineError::TaskFailed(_)))));
    }

    #[tokio::test]
    async fn empty_input_spawns_nothing() {
        let context = LocalEngineContext::new();
        let calls = AtomicUsize::new(0);
        let out = context
            .map(
                Vec::<usize>::new(),
                |n| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async move { Ok::<_, TestError>(n) }
                },
                0,
            )
            .await
            .unwrap();

        assert!(out.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn remembers_last_job_status() {
        let context = LocalEngineContext::new();
        assert!(context.job_status().is_none());

        context.set_job_status("Listing", "first");
        context.set_job_status("Listing", "second");

        assert_eq!(
            context.job_status(),
            Some(JobStatus {
                component: "Listing".to_string(),
                description: "second".to_string(),
            })
        );
    }
}
