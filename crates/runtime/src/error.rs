use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Game task is no longer running")]
    Closed,

    #[error("Game task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
