use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use arena_traits::{ExecutorError, Task, TaskExecutor};
use parking_lot::Mutex;

/// Executor that only runs work when the test asks it to.
#[derive(Default)]
pub struct ManualExecutor {
    immediate: Mutex<VecDeque<Task>>,
    delayed: Mutex<VecDeque<(Duration, Task)>>,
    delays: Mutex<Vec<Duration>>,
    rejecting: AtomicBool,
}

impl ManualExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse all submissions, as a host does while shutting down.
    pub fn reject_all(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    pub fn pending(&self) -> usize {
        self.immediate.lock().len()
    }

    pub fn pending_delayed(&self) -> usize {
        self.delayed.lock().len()
    }

    /// Delays of every delayed task ever scheduled.
    pub fn scheduled_delays(&self) -> Vec<Duration> {
        self.delays.lock().clone()
    }

    /// Run background tasks until none are left, including ones they enqueue.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let Some(task) = self.immediate.lock().pop_front() else {
                return ran;
            };
            task();
            ran += 1;
        }
    }

    /// Run delayed tasks as if their delay elapsed.
    pub fn run_delayed(&self) -> usize {
        let mut ran = 0;
        loop {
            let Some((_, task)) = self.delayed.lock().pop_front() else {
                return ran;
            };
            task();
            ran += 1;
        }
    }

    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        loop {
            let step = self.run_pending() + self.run_delayed();
            if step == 0 {
                return ran;
            }
            ran += step;
        }
    }

    fn ensure_accepting(&self) -> Result<(), ExecutorError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(ExecutorError::ShuttingDown);
        }
        Ok(())
    }
}

impl TaskExecutor for ManualExecutor {
    fn execute(&self, task: Task) -> Result<(), ExecutorError> {
        self.ensure_accepting()?;
        self.immediate.lock().push_back(task);
        Ok(())
    }

    fn schedule(&self, delay: Duration, task: Task) -> Result<(), ExecutorError> {
        self.ensure_accepting()?;
        self.delays.lock().push(delay);
        self.delayed.lock().push_back((delay, task));
        Ok(())
    }
}
