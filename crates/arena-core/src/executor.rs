//! Tokio-backed implementation of the host scheduling seam.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use arena_traits::{ExecutorError, Task, TaskExecutor};
use tokio::runtime::Handle;
use tracing::debug;

/// Runs background chat work on a tokio runtime.
///
/// Background tasks go to the blocking pool because they call straight into
/// the host's synchronous event bus. Delayed tasks sleep on the runtime and
/// then run inline on a tokio worker, not on a host main thread. Hosts that
/// need main-thread affinity for delayed work supply their own executor.
pub struct TokioExecutor {
    handle: Handle,
    closed: AtomicBool,
}

impl TokioExecutor {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            closed: AtomicBool::new(false),
        }
    }

    /// Bind to the runtime of the calling context.
    pub fn current() -> Result<Self, ExecutorError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|err| ExecutorError::Rejected(err.to_string()))
    }

    /// Stop accepting new work. Already spawned tasks keep running.
    pub fn shutdown(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("Tokio executor shut down");
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), ExecutorError> {
        if self.is_shutdown() {
            return Err(ExecutorError::ShuttingDown);
        }
        Ok(())
    }
}

impl TaskExecutor for TokioExecutor {
    fn execute(&self, task: Task) -> Result<(), ExecutorError> {
        self.ensure_open()?;
        self.handle.spawn_blocking(task);
        Ok(())
    }

    fn schedule(&self, delay: Duration, task: Task) -> Result<(), ExecutorError> {
        self.ensure_open()?;
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::oneshot;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_execute_runs_task() {
        let executor = TokioExecutor::current().unwrap();
        let (tx, rx) = oneshot::channel();

        executor
            .execute(Box::new(move || {
                let _ = tx.send(42);
            }))
            .unwrap();

        assert_eq!(rx.await.unwrap(), 42);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_schedule_waits_for_delay() {
        let executor = TokioExecutor::current().unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel();

        let task_counter = counter.clone();
        let started = std::time::Instant::now();
        executor
            .schedule(
                Duration::from_millis(30),
                Box::new(move || {
                    task_counter.fetch_add(1, Ordering::SeqCst);
                    let _ = tx.send(());
                }),
            )
            .unwrap();

        rx.await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_schedule_runs_off_the_calling_thread() {
        let executor = TokioExecutor::current().unwrap();
        let caller = std::thread::current().id();
        let (tx, rx) = oneshot::channel();

        executor
            .schedule(
                Duration::from_millis(1),
                Box::new(move || {
                    let _ = tx.send(std::thread::current().id());
                }),
            )
            .unwrap();

        assert_ne!(rx.await.unwrap(), caller);
    }

    #[tokio::test]
    async fn test_shutdown_rejects_new_work() {
        let executor = TokioExecutor::current().unwrap();
        executor.shutdown();

        let result = executor.execute(Box::new(|| {}));
        assert!(matches!(result, Err(ExecutorError::ShuttingDown)));
        let result = executor.schedule(Duration::from_millis(1), Box::new(|| {}));
        assert!(matches!(result, Err(ExecutorError::ShuttingDown)));
    }
}
