#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Task processing failed: {0}")]
    ProcessingError(String),

    #[error("Worker pool is at capacity: {0}")]
    CapacityError(String),

    #[error("Worker state error: {0}")]
    StateError(String),

    #[error(transparent)]
    SequencerError(#[from] crate::utils::SequencerError),
}

pub type WorkerResult<T> = Result<T, WorkerError>;

impl From<tokio::sync::AcquireError> for WorkerError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        WorkerError::CapacityError(format!("Failed to acquire worker: {}", err))
    }
}

impl From<tokio::task::JoinError> for WorkerError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            WorkerError::ProcessingError("Conversion task panicked".to_string())
        } else {
            WorkerError::StateError(format!("Conversion task was cancelled: {}", err))
        }
    }
}

// Pool failures surface to the CLI as sequencer errors; conversion errors pass through untouched.
impl From<WorkerError> for crate::utils::SequencerError {
    fn from(err: WorkerError) -> Self {
        match err {
            WorkerError::SequencerError(inner) => inner,
            other => crate::utils::SequencerError::worker(other.to_string()),
        }
    }
}
