//! Arena Traits - Host abstractions for the match chat core.
//!
//! This crate provides the interfaces the game server implements so the chat
//! core can route messages without knowing the host:
//! - Identifiers (`PlayerId`, `PartyId`, `DispatchToken`)
//! - Rich text (`Text`, `NamedColor`, `NameStyle`, `Translator`)
//! - Player settings and sounds
//! - Match, party and player model traits, plus the freeze module
//! - Chat events and event bus listeners
//! - Task executors

pub mod event;
pub mod executor;
pub mod ids;
pub mod model;
pub mod settings;
pub mod sound;
pub mod text;

// ── Top-level re-exports ─────────────────────────────────────────────

pub use event::{ChatEvent, ChatListener, EventPriority};
pub use executor::{ExecutorError, Task, TaskExecutor};
pub use ids::{DispatchToken, PartyId, PlayerId};
pub use model::{
    Actor, Audience, FreezeModule, Match, MatchManager, MatchPlayer, Party, permissions,
};
pub use settings::{SettingKey, SettingValue};
pub use sound::{Sound, SoundSource};
pub use text::{NameStyle, NamedColor, Text, TextContent, Translator};
