//! Chat events published on the host event bus.

use crate::ids::{DispatchToken, PlayerId};

/// Stage at which a listener observes an event.
///
/// Listeners run in ascending order; `Monitor` sees the final outcome after
/// every other subscriber had a chance to cancel or rewrite the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventPriority {
    Lowest,
    Low,
    Normal,
    High,
    Highest,
    Monitor,
}

/// A cancellable chat action.
///
/// Raised by the host for every chat line a player types, and re-raised by
/// the dispatcher for every message it is about to deliver.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    token: DispatchToken,
    sender: PlayerId,
    message: String,
    format: String,
    recipients: Vec<PlayerId>,
    cancelled: bool,
}

impl ChatEvent {
    /// Create an event carrying a fresh token.
    pub fn new(sender: PlayerId, message: impl Into<String>, recipients: Vec<PlayerId>) -> Self {
        Self::with_token(DispatchToken::new(), sender, message, recipients)
    }

    pub fn with_token(
        token: DispatchToken,
        sender: PlayerId,
        message: impl Into<String>,
        recipients: Vec<PlayerId>,
    ) -> Self {
        Self {
            token,
            sender,
            message: message.into(),
            format: "<%s> %s".to_string(),
            recipients,
            cancelled: false,
        }
    }

    pub fn token(&self) -> DispatchToken {
        self.token
    }

    pub fn sender(&self) -> PlayerId {
        self.sender
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Legacy format with two `%s` placeholders: sender name, then message.
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = format.into();
    }

    pub fn recipients(&self) -> &[PlayerId] {
        &self.recipients
    }

    pub fn recipients_mut(&mut self) -> &mut Vec<PlayerId> {
        &mut self.recipients
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// Subscriber on the host event bus.
pub trait ChatListener: Send + Sync {
    fn priority(&self) -> EventPriority {
        EventPriority::Normal
    }

    /// Whether the bus should skip this listener for already-cancelled events.
    fn ignore_cancelled(&self) -> bool {
        false
    }

    fn on_chat(&self, event: &mut ChatEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_is_live() {
        let sender = PlayerId::random();
        let event = ChatEvent::new(sender, "hi", vec![sender]);
        assert!(!event.is_cancelled());
        assert_eq!(event.sender(), sender);
        assert_eq!(event.recipients(), &[sender]);
    }

    #[test]
    fn test_monitor_runs_last() {
        let mut stages = vec![
            EventPriority::Monitor,
            EventPriority::Lowest,
            EventPriority::Highest,
            EventPriority::Normal,
        ];
        stages.sort();
        assert_eq!(stages.first(), Some(&EventPriority::Lowest));
        assert_eq!(stages.last(), Some(&EventPriority::Monitor));
    }
}
