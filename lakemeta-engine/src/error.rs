#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Engine task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
