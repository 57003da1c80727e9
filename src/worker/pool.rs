use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use crate::core::{ConversionResult, ConversionTask};
use crate::processing::ImageConverter;
use crate::worker::{WorkerError, WorkerResult};
use tracing::{debug, info, warn};

/// Worker count used when the CPU count cannot be determined.
const DEFAULT_WORKERS: usize = 4;

/// Outcome of one spawned task.
enum TaskOutcome {
    Converted(ConversionResult),
    Skipped,
}

/// Fixed-size pool running conversions on blocking threads.
///
/// The pool fails fast: after the first error no further task is started,
/// tasks already running are allowed to finish, and the first error is returned.
#[derive(Clone)]
pub struct WorkerPool {
    converter: Arc<dyn ImageConverter>,
    semaphore: Arc<Semaphore>,
    worker_count: usize,
}

impl WorkerPool {
    /// `None` means one worker per available CPU; `Some(0)` is treated as one.
    pub fn new(converter: Arc<dyn ImageConverter>, worker_count: Option<usize>) -> Self {
        let worker_count = worker_count
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(DEFAULT_WORKERS)
            })
            .max(1);
        Self {
            converter,
            semaphore: Arc::new(Semaphore::new(worker_count)),
            worker_count,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Converts every task, returning results ordered by output number.
    ///
    /// Only returns once all spawned tasks have finished.
    pub async fn process_batch(&self, tasks: Vec<ConversionTask>) -> WorkerResult<Vec<ConversionResult>> {
        let total = tasks.len();
        debug!("Processing batch of {} tasks on {} workers", total, self.worker_count);

        let cancelled = Arc::new(AtomicBool::new(false));
        let mut set = JoinSet::new();

        for task in tasks {
            let semaphore = Arc::clone(&self.semaphore);
            let converter = Arc::clone(&self.converter);
            let cancelled = Arc::clone(&cancelled);

            set.spawn(run_task(semaphore, converter, cancelled, task));
        }

        let mut results = Vec::with_capacity(total);
        let mut first_error: Option<WorkerError> = None;
        let mut skipped = 0;

        while let Some(joined) = set.join_next().await {
            let outcome = joined.map_err(WorkerError::from).and_then(|inner| inner);
            match outcome {
                Ok(TaskOutcome::Converted(result)) => results.push(result),
                Ok(TaskOutcome::Skipped) => skipped += 1,
                Err(e) => {
                    cancelled.store(true, Ordering::SeqCst);
                    if first_error.is_none() {
                        first_error = Some(e);
                    } else {
                        warn!("Additional conversion failure: {}", e);
                    }
                }
            }
        }

        if let Some(error) = first_error {
            warn!(
                "Batch aborted: {} converted, {} skipped, {} total",
                results.len(),
                skipped,
                total
            );
            return Err(error);
        }

        results.sort_by_key(|result| result.number);
        info!("Batch completed successfully: {} files converted", results.len());
        Ok(results)
    }
}

/// Waits for a worker slot, then converts `task` unless the batch was cancelled.
async fn run_task(
    semaphore: Arc<Semaphore>,
    converter: Arc<dyn ImageConverter>,
    cancelled: Arc<AtomicBool>,
    task: ConversionTask,
) -> WorkerResult<TaskOutcome> {
    let _permit = semaphore.acquire_owned().await?;
    if cancelled.load(Ordering::SeqCst) {
        debug!("Skipping {} after an earlier failure", task.source_name());
        return Ok(TaskOutcome::Skipped);
    }

    let joined = tokio::task::spawn_blocking(move || converter.convert(&task)).await;
    let result = joined
        .map_err(WorkerError::from)
        .and_then(|converted| converted.map_err(WorkerError::from));
    result.map(TaskOutcome::Converted).inspect_err(|_| {
        // Set before the permit is released so queued tasks see it.
        cancelled.store(true, Ordering::SeqCst);
    })
}
