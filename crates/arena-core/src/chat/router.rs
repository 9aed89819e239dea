//! Channel Router - Picks the channel a chat line travels on.
//!
//! Routing only looks at a small snapshot of state ([`RouteContext`]), so the
//! decision is pure and can be tested without a live match.

use arena_traits::{Match, MatchPlayer, SettingKey, SettingValue};

use super::types::ChatChannel;

/// Resolved channel for a chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub channel: ChatChannel,
    /// Decorate with the `[SHOUT]` tag. Only ever set for global chat.
    pub shout: bool,
    /// Message text with any routing sigil removed.
    pub text: String,
}

impl Route {
    pub fn global(text: impl Into<String>, shout: bool) -> Self {
        Self {
            channel: ChatChannel::Global,
            shout,
            text: text.into(),
        }
    }

    pub fn team(text: impl Into<String>) -> Self {
        Self {
            channel: ChatChannel::Team,
            shout: false,
            text: text.into(),
        }
    }
}

/// State consulted when routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteContext {
    pub has_sender: bool,
    /// Sender's party (or the match default party for the console) is free-for-all.
    pub free_for_all: bool,
    pub match_finished: bool,
    /// Sender's stored chat channel preference.
    pub preference: SettingValue,
}

impl RouteContext {
    pub fn of(match_: &dyn Match, sender: Option<&dyn MatchPlayer>) -> Self {
        let party = match sender {
            Some(sender) => sender.party(),
            None => match_.default_party(),
        };
        Self {
            has_sender: sender.is_some(),
            free_for_all: party.is_free_for_all(),
            match_finished: match_.is_finished(),
            preference: sender
                .map(|sender| sender.setting(SettingKey::Chat))
                .unwrap_or(SettingValue::ChatGlobal),
        }
    }

    /// Team chat is unavailable in free-for-all and once the match is over.
    pub fn team_chat_unavailable(&self) -> bool {
        self.free_for_all || self.match_finished
    }
}

/// Routes chat lines according to the global sigil, party type, match state
/// and the sender's preference.
#[derive(Debug, Clone)]
pub struct ChannelRouter {
    global_sigil: String,
}

impl ChannelRouter {
    pub fn new(global_sigil: impl Into<String>) -> Self {
        Self {
            global_sigil: global_sigil.into(),
        }
    }

    pub fn global_sigil(&self) -> &str {
        &self.global_sigil
    }

    /// Route a line typed into chat.
    pub fn route(&self, ctx: &RouteContext, raw: &str) -> Route {
        if !ctx.has_sender {
            return Route::global(raw, false);
        }

        if let Some(stripped) = raw.strip_prefix(self.global_sigil.as_str()) {
            return Route::global(stripped, true);
        }

        self.route_default(ctx, raw)
    }

    /// Route to the sender's default channel, no sigil handling.
    pub fn route_default(&self, ctx: &RouteContext, text: &str) -> Route {
        if !ctx.has_sender {
            return Route::global(text, false);
        }

        if ctx.team_chat_unavailable() {
            return Route::global(text, ctx.free_for_all);
        }

        if ctx.preference == SettingValue::ChatTeam {
            Route::team(text)
        } else {
            Route::global(text, true)
        }
    }

    /// Route an explicit team chat request, falling back to global chat.
    pub fn route_team(&self, ctx: &RouteContext, text: &str) -> Route {
        if !ctx.has_sender {
            return Route::global(text, false);
        }

        if ctx.team_chat_unavailable() {
            return Route::global(text, ctx.free_for_all);
        }
        Route::team(text)
    }
}

impl Default for ChannelRouter {
    fn default() -> Self {
        Self::new("!")
    }
}
