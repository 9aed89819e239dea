//! Identifier newtypes shared between the host and the chat core.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a connected player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for PlayerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a party (team, observers or free-for-all pool) within a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyId(String);

impl PartyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque token carried by every chat event.
///
/// The host mints a fresh token for each inbound chat action; the dispatcher
/// mints one for every event it re-emits. Tokens are never reused, which lets
/// the dispatcher tell its own events apart from externally sourced ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchToken(Uuid);

impl DispatchToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DispatchToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DispatchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_tokens_are_unique() {
        let a = DispatchToken::new();
        let b = DispatchToken::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_player_id_roundtrips_uuid() {
        let uuid = Uuid::new_v4();
        let id = PlayerId::from(uuid);
        assert_eq!(id.as_uuid(), uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }
}
