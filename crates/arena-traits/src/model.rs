//! Match, party and player abstractions supplied by the host.
//!
//! These traits define what the chat core needs from the game server.
//! Implementations live in the host (or in `arena-testkit` for tests).

use std::sync::Arc;

use crate::event::ChatEvent;
use crate::ids::{PartyId, PlayerId};
use crate::settings::{SettingKey, SettingValue};
use crate::sound::Sound;
use crate::text::{NameStyle, NamedColor, Text};

// ── Permissions ──────────────────────────────────────────────────────

/// Permission nodes referenced by the chat and moderation modules.
pub mod permissions {
    /// Grants visibility into admin-only broadcasts and team chat while observing.
    pub const ADMIN_CHAT: &str = "arena.chat.admin";
    /// Grants access to the freeze commands.
    pub const FREEZE: &str = "arena.freeze";
}

// ── Audience ─────────────────────────────────────────────────────────

/// Anything that can receive chat: players and the console.
pub trait Audience: Send + Sync {
    /// Deliver a message, optionally attributed to the player that sent it.
    fn send_message(&self, source: Option<PlayerId>, message: Text);

    /// Deliver a highlighted warning.
    fn send_warning(&self, message: Text) {
        self.send_message(
            None,
            Text::colored("\u{26A0} ", NamedColor::Yellow).append(message.with_color(NamedColor::Red)),
        );
    }
}

// ── Party ────────────────────────────────────────────────────────────

pub trait Party: Send + Sync {
    fn id(&self) -> PartyId;

    /// Prefix shown in front of team chat, e.g. a colored `[Red] `.
    fn chat_prefix(&self) -> Text;

    /// Whether this is a free-for-all pool, which has no team channel.
    fn is_free_for_all(&self) -> bool;
}

// ── MatchPlayer ──────────────────────────────────────────────────────

pub trait MatchPlayer: Audience {
    fn id(&self) -> PlayerId;

    /// Username without decoration.
    fn plain_name(&self) -> String;

    fn styled_name(&self, style: NameStyle) -> Text;

    fn party(&self) -> Arc<dyn Party>;

    fn is_observing(&self) -> bool;

    fn has_permission(&self, permission: &str) -> bool;

    /// Hidden from other players (vanished moderators).
    fn is_invisible(&self) -> bool;

    /// Locale tag used to render translatable text for this player.
    fn locale(&self) -> String;

    fn setting(&self, key: SettingKey) -> SettingValue;

    fn play_sound(&self, sound: &Sound);

    /// Run a command as this player, as if typed in chat.
    fn perform_command(&self, command: &str);
}

// ── Match ────────────────────────────────────────────────────────────

pub trait Match: Send + Sync {
    fn id(&self) -> String;

    /// Full roster, observers included.
    fn players(&self) -> Vec<Arc<dyn MatchPlayer>>;

    fn player(&self, id: PlayerId) -> Option<Arc<dyn MatchPlayer>>;

    /// Party used for senders that have none (the console).
    fn default_party(&self) -> Arc<dyn Party>;

    fn is_finished(&self) -> bool;

    /// Freeze state for this match, when the module is loaded.
    fn freeze_module(&self) -> Option<Arc<dyn FreezeModule>>;

    /// Publish a chat event on the match event bus.
    ///
    /// Every subscriber runs before this returns, the dispatcher's own
    /// monitor-priority listener included.
    fn call_event(&self, event: &mut ChatEvent);
}

/// Maps live players to the match they are in.
pub trait MatchManager: Send + Sync {
    fn match_of(&self, player: PlayerId) -> Option<Arc<dyn Match>>;
}

// ── Moderation ───────────────────────────────────────────────────────

/// Who issued a command.
#[derive(Clone)]
pub enum Actor {
    Console,
    Player(Arc<dyn MatchPlayer>),
}

impl Actor {
    pub fn is_invisible(&self) -> bool {
        match self {
            Self::Console => false,
            Self::Player(player) => player.is_invisible(),
        }
    }

    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            Self::Console => None,
            Self::Player(player) => Some(player.id()),
        }
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Console => f.write_str("Console"),
            Self::Player(player) => f.debug_tuple("Player").field(&player.id()).finish(),
        }
    }
}

/// Per-match freeze state, owned by the host.
pub trait FreezeModule: Send + Sync {
    fn is_frozen(&self, player: PlayerId) -> bool;

    /// Store the frozen flag. `silent` suppresses the public announcement.
    fn set_frozen(&self, actor: &Actor, player: &Arc<dyn MatchPlayer>, frozen: bool, silent: bool);

    fn frozen_players(&self) -> Vec<Arc<dyn MatchPlayer>>;

    fn offline_frozen_count(&self) -> usize;

    fn offline_frozen_names(&self) -> Text;
}
