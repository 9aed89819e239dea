//! Task submission seam between the chat core and the host scheduler.

use std::time::Duration;
use thiserror::Error;

/// Unit of work handed to an executor.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("executor is shutting down")]
    ShuttingDown,

    #[error("executor rejected task: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, ExecutorError>;

/// Host scheduling facilities.
pub trait TaskExecutor: Send + Sync {
    /// Run `task` on the shared background context as soon as possible.
    fn execute(&self, task: Task) -> Result<()>;

    /// Run `task` after `delay`.
    ///
    /// Hosts with a main thread should run it there so settings updates do not
    /// interleave with console output. Implementations without one may run it
    /// on any thread.
    fn schedule(&self, delay: Duration, task: Task) -> Result<()>;
}
