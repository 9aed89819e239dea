pub mod chat;
pub mod config;
pub mod error;
pub mod executor;
pub mod moderation;
pub mod telemetry;

pub use chat::{ChatChannel, ChatDispatcher, SendOutcome};
pub use config::{ArenaConfig, ChatConfig, LoggingConfig};
pub use error::ChatError;
pub use executor::TokioExecutor;
