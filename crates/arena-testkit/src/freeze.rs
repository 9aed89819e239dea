use std::sync::Arc;

use arena_traits::{Actor, FreezeModule, MatchPlayer, NamedColor, PlayerId, Text};
use parking_lot::Mutex;

/// One `set_frozen` call as seen by the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreezeCall {
    pub actor: Option<PlayerId>,
    pub target: PlayerId,
    pub frozen: bool,
    pub silent: bool,
}

#[derive(Default)]
pub struct MockFreezeModule {
    frozen: Mutex<Vec<Arc<dyn MatchPlayer>>>,
    offline: Mutex<Vec<String>>,
    calls: Mutex<Vec<FreezeCall>>,
}

impl MockFreezeModule {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Players frozen before they logged out.
    pub fn set_offline(&self, names: &[&str]) {
        *self.offline.lock() = names.iter().map(|name| name.to_string()).collect();
    }

    pub fn calls(&self) -> Vec<FreezeCall> {
        self.calls.lock().clone()
    }
}

impl FreezeModule for MockFreezeModule {
    fn is_frozen(&self, player: PlayerId) -> bool {
        self.frozen.lock().iter().any(|p| p.id() == player)
    }

    fn set_frozen(&self, actor: &Actor, player: &Arc<dyn MatchPlayer>, frozen: bool, silent: bool) {
        self.calls.lock().push(FreezeCall {
            actor: actor.player_id(),
            target: player.id(),
            frozen,
            silent,
        });

        let mut list = self.frozen.lock();
        list.retain(|p| p.id() != player.id());
        if frozen {
            list.push(player.clone());
        }
    }

    fn frozen_players(&self) -> Vec<Arc<dyn MatchPlayer>> {
        self.frozen.lock().clone()
    }

    fn offline_frozen_count(&self) -> usize {
        self.offline.lock().len()
    }

    fn offline_frozen_names(&self) -> Text {
        Text::join(
            Text::colored(", ", NamedColor::Gray),
            self.offline
                .lock()
                .iter()
                .map(|name| Text::colored(name.clone(), NamedColor::DarkAqua)),
        )
    }
}
