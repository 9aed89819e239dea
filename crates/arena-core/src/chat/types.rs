//! Chat channel, recipient filter and dispatch bookkeeping types.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arena_traits::{DispatchToken, MatchPlayer, PartyId, SettingValue, Text, permissions};
use serde::Serialize;

/// Channel a message is carried on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatChannel {
    Global,
    Team,
}

impl ChatChannel {
    /// Chat setting value that selects this channel as a player's default.
    pub fn setting_value(&self) -> SettingValue {
        match self {
            Self::Global => SettingValue::ChatGlobal,
            Self::Team => SettingValue::ChatTeam,
        }
    }
}

impl std::fmt::Display for ChatChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Team => f.write_str("team"),
        }
    }
}

/// Who, out of a match roster, receives a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientFilter {
    Everyone,
    /// Members of the party, plus observers holding admin-chat.
    Party(PartyId),
    AdminChat,
}

impl RecipientFilter {
    pub fn accepts(&self, viewer: &dyn MatchPlayer) -> bool {
        match self {
            Self::Everyone => true,
            Self::Party(party) => {
                viewer.party().id() == *party
                    || (viewer.is_observing() && viewer.has_permission(permissions::ADMIN_CHAT))
            }
            Self::AdminChat => viewer.has_permission(permissions::ADMIN_CHAT),
        }
    }
}

/// Lifecycle of a single chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum DispatchState {
    Created,
    Scheduled,
    Cancelled,
    Delivered { recipients: usize },
    /// The background context refused the work. Counted in stats only; the
    /// refused task owns the message, so no transition leads here.
    Dropped,
}

impl DispatchState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::Delivered { .. } | Self::Dropped
        )
    }

    pub fn can_transition_to(&self, next: &DispatchState) -> bool {
        matches!(
            (self, next),
            (Self::Created, Self::Scheduled)
                | (Self::Scheduled, Self::Cancelled)
                | (Self::Scheduled, Self::Delivered { .. })
        )
    }
}

/// An outgoing chat message. Lives only until it is cancelled or delivered.
#[derive(Clone)]
pub struct ChatMessage {
    pub token: DispatchToken,
    /// `None` for the console.
    pub sender: Option<Arc<dyn MatchPlayer>>,
    pub text: String,
    pub channel: ChatChannel,
    pub legacy_format: String,
    /// Absent for console messages, which are rendered from the legacy format.
    pub rich: Option<Text>,
    pub filter: RecipientFilter,
    state: DispatchState,
}

impl ChatMessage {
    pub fn new(
        sender: Option<Arc<dyn MatchPlayer>>,
        text: impl Into<String>,
        channel: ChatChannel,
        legacy_format: impl Into<String>,
        rich: Option<Text>,
        filter: RecipientFilter,
    ) -> Self {
        Self {
            token: DispatchToken::new(),
            sender,
            text: text.into(),
            channel,
            legacy_format: legacy_format.into(),
            rich,
            filter,
            state: DispatchState::Created,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Move to `next`; invalid transitions are ignored and reported as `false`.
    pub fn transition(&mut self, next: DispatchState) -> bool {
        if !self.state.can_transition_to(&next) {
            tracing::warn!(
                "Ignoring invalid dispatch transition {:?} -> {:?} for {}",
                self.state,
                next,
                self.token
            );
            return false;
        }
        self.state = next;
        true
    }
}

impl std::fmt::Debug for ChatMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatMessage")
            .field("token", &self.token)
            .field("sender", &self.sender.as_ref().map(|s| s.id()))
            .field("text", &self.text)
            .field("channel", &self.channel)
            .field("state", &self.state)
            .finish()
    }
}

/// Result of handing a message to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty message: the sender's default channel switch was queued.
    ChannelSwitch(ChatChannel),
    /// Handed to the background context.
    Scheduled(DispatchToken),
    /// Nothing to send (empty console message).
    Ignored,
}

/// Running totals of dispatch outcomes.
#[derive(Debug, Default)]
pub struct DispatchStats {
    delivered: AtomicU64,
    cancelled: AtomicU64,
    dropped: AtomicU64,
    channel_switches: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DispatchStatsSnapshot {
    pub delivered: u64,
    pub cancelled: u64,
    pub dropped: u64,
    pub channel_switches: u64,
}

impl DispatchStats {
    pub(crate) fn record(&self, state: DispatchState) {
        let counter = match state {
            DispatchState::Delivered { .. } => &self.delivered,
            DispatchState::Cancelled => &self.cancelled,
            DispatchState::Dropped => &self.dropped,
            DispatchState::Created | DispatchState::Scheduled => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_channel_switch(&self) {
        self.channel_switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DispatchStatsSnapshot {
        DispatchStatsSnapshot {
            delivered: self.delivered.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            channel_switches: self.channel_switches.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_setting_values() {
        assert_eq!(ChatChannel::Global.setting_value(), SettingValue::ChatGlobal);
        assert_eq!(ChatChannel::Team.setting_value(), SettingValue::ChatTeam);
    }

    #[test]
    fn test_state_machine_transitions() {
        use DispatchState::*;

        assert!(Created.can_transition_to(&Scheduled));
        assert!(!Created.can_transition_to(&Dropped));
        assert!(!Scheduled.can_transition_to(&Dropped));
        assert!(Scheduled.can_transition_to(&Cancelled));
        assert!(Scheduled.can_transition_to(&Delivered { recipients: 3 }));

        assert!(!Created.can_transition_to(&Delivered { recipients: 0 }));
        assert!(!Cancelled.can_transition_to(&Delivered { recipients: 1 }));
        assert!(!Delivered { recipients: 1 }.can_transition_to(&Cancelled));
        assert!(!Scheduled.can_transition_to(&Scheduled));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!DispatchState::Created.is_terminal());
        assert!(!DispatchState::Scheduled.is_terminal());
        assert!(DispatchState::Cancelled.is_terminal());
        assert!(DispatchState::Dropped.is_terminal());
        assert!(DispatchState::Delivered { recipients: 0 }.is_terminal());
    }

    #[test]
    fn test_message_rejects_skipping_schedule() {
        let mut message = ChatMessage::new(
            None,
            "hi",
            ChatChannel::Global,
            "%s: %s",
            None,
            RecipientFilter::Everyone,
        );

        assert!(!message.transition(DispatchState::Cancelled));
        assert_eq!(message.state(), DispatchState::Created);
        assert!(message.transition(DispatchState::Scheduled));
        assert!(message.transition(DispatchState::Delivered { recipients: 2 }));
        assert_eq!(message.state(), DispatchState::Delivered { recipients: 2 });
    }

    #[test]
    fn test_stats_ignore_non_terminal_states() {
        let stats = DispatchStats::default();
        stats.record(DispatchState::Scheduled);
        stats.record(DispatchState::Cancelled);
        stats.record(DispatchState::Delivered { recipients: 4 });
        stats.record_channel_switch();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.cancelled, 1);
        assert_eq!(snapshot.delivered, 1);
        assert_eq!(snapshot.dropped, 0);
        assert_eq!(snapshot.channel_switches, 1);
    }
}
