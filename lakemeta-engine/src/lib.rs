//! Bulk parallel execution used by the metadata engines.
//!
//! Discovery and listing only ever talk to [`EngineContext`]. A deployment
//! can plug a distributed executor behind the same trait; [`LocalEngineContext`]
//! runs the work on the current tokio runtime.

use std::{fmt::Debug, future::Future};

pub mod error;
pub mod local;

pub use error::EngineError;
pub use local::{JobStatus, LocalEngineContext};

#[async_trait::async_trait]
pub trait EngineContext: Debug + Send + Sync {
    /// Describes the job currently running. Purely informational.
    fn set_job_status(&self, component: &str, description: &str);

    /// Applies `func` to every item with at most `parallelism` tasks in flight.
    ///
    /// Resolves once all tasks completed, or with the first error. Output order
    /// is unspecified.
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
        Fut: Future<Output = Result<O, E>> + Send + 'static;

    /// Like [`EngineContext::map`], with every task yielding many outputs.
    async fn flat_map<I, O, E, F, Fut>(
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
        Fut: Future<Output = Result<Vec<O>, E>> + Send + 'static,
    {
        let nested = self.map(items, func, parallelism).await?;
        Ok(nested.into_iter().flatten().collect())
    }
}
