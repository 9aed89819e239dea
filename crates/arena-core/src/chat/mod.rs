//! Match chat
//!
//! Channel routing, formatting and asynchronous delivery of chat lines, plus
//! the admin broadcast used by moderation tooling.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            ChatDispatcher               │
//! │  - monitor listener on the host bus     │
//! │  - owns the DispatchCache               │
//! └─────────────────────────────────────────┘
//!        │                │
//!        ▼                ▼
//!  ChannelRouter     format::{legacy_format, rich_message}
//!        │
//!        ▼
//!  global / team / admin  ──▶  RecipientFilter over the match roster
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use arena_core::chat::ChatDispatcher;
//!
//! let dispatcher = Arc::new(ChatDispatcher::new(
//!     config.chat,
//!     matches,
//!     Arc::new(TokioExecutor::current()?),
//!     console,
//!     translator,
//! ));
//! host_bus.subscribe(dispatcher.clone());
//!
//! // `/g` command
//! dispatcher.send_global(&match_, Some(&player), "gl hf", true)?;
//! ```

mod admin;
mod dedup;
mod dispatcher;
pub mod format;
mod router;
mod types;

pub use admin::{admin_chat_prefix, admin_chat_sound, broadcast_admin_chat, play_admin_sound};
pub use dedup::DispatchCache;
pub use dispatcher::ChatDispatcher;
pub use router::{ChannelRouter, Route, RouteContext};
pub use types::{
    ChatChannel, ChatMessage, DispatchState, DispatchStats, DispatchStatsSnapshot,
    RecipientFilter, SendOutcome,
};
