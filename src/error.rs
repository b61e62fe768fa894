use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Arguments must be positive integers. ({name} = {value})")]
    NonPositive { name: &'static str, value: i64 },

    #[error("failed to spawn worker {worker_id}: {source}")]
    Spawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },

    #[error("failed to join workers: {0}")]
    Join(#[from] tokio::task::JoinError),
}
