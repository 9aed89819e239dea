use arena_traits::ExecutorError;
use thiserror::Error;

/// Errors surfaced by the chat dispatcher.
///
/// Cancellation by another bus subscriber is not an error; it is reported
/// through [`crate::chat::DispatchState::Cancelled`].
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat dispatcher is closed")]
    Closed,

    #[error("failed to schedule chat work: {0}")]
    Executor(#[from] ExecutorError),
}

pub type Result<T> = std::result::Result<T, ChatError>;
