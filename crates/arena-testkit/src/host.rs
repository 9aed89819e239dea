use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use arena_traits::{
    Audience, ChatEvent, ChatListener, EventPriority, FreezeModule, Match, MatchManager,
    MatchPlayer, NameStyle, NamedColor, Party, PartyId, PlayerId, SettingKey, SettingValue,
    Sound, Text, Translator,
};
use parking_lot::{Mutex, RwLock};

use crate::freeze::MockFreezeModule;

/// A message received by a player or the console.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub source: Option<PlayerId>,
    pub message: Text,
}

impl Delivery {
    pub fn plain(&self) -> String {
        self.message.to_plain()
    }
}

// ── Console ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingAudience {
    received: Mutex<Vec<Delivery>>,
}

impl RecordingAudience {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn received(&self) -> Vec<Delivery> {
        self.received.lock().clone()
    }

    pub fn received_plain(&self) -> Vec<String> {
        self.received.lock().iter().map(Delivery::plain).collect()
    }
}

impl Audience for RecordingAudience {
    fn send_message(&self, source: Option<PlayerId>, message: Text) {
        self.received.lock().push(Delivery { source, message });
    }
}

// ── Translator ───────────────────────────────────────────────────────

/// Fixed `(key, locale) -> text` table; unknown pairs render as the key.
#[derive(Default)]
pub struct StaticTranslator {
    entries: HashMap<(String, String), String>,
}

impl StaticTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, locale: &str, value: &str) -> Self {
        self.entries
            .insert((key.to_string(), locale.to_string()), value.to_string());
        self
    }
}

impl Translator for StaticTranslator {
    fn translate(&self, key: &str, locale: &str) -> String {
        self.entries
            .get(&(key.to_string(), locale.to_string()))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

// ── Party ────────────────────────────────────────────────────────────

pub struct MockParty {
    id: PartyId,
    prefix: Text,
    free_for_all: bool,
}

impl MockParty {
    /// A team with a `[Name] ` prefix in `color`.
    pub fn team(name: &str, color: NamedColor) -> Arc<Self> {
        Arc::new(Self {
            id: PartyId::new(name.to_lowercase()),
            prefix: Text::colored(format!("[{}] ", name), color),
            free_for_all: false,
        })
    }

    pub fn observers() -> Arc<Self> {
        Arc::new(Self {
            id: PartyId::new("observers"),
            prefix: Text::colored("[Obs] ", NamedColor::Aqua),
            free_for_all: false,
        })
    }

    pub fn free_for_all() -> Arc<Self> {
        Arc::new(Self {
            id: PartyId::new("tributes"),
            prefix: Text::empty(),
            free_for_all: true,
        })
    }
}

impl Party for MockParty {
    fn id(&self) -> PartyId {
        self.id.clone()
    }

    fn chat_prefix(&self) -> Text {
        self.prefix.clone()
    }

    fn is_free_for_all(&self) -> bool {
        self.free_for_all
    }
}

// ── Player ───────────────────────────────────────────────────────────

pub struct MockPlayer {
    id: PlayerId,
    name: String,
    party: RwLock<Arc<dyn Party>>,
    observing: AtomicBool,
    invisible: AtomicBool,
    permissions: Mutex<HashSet<String>>,
    settings: Mutex<HashMap<SettingKey, SettingValue>>,
    locale: Mutex<String>,
    inbox: Mutex<Vec<Delivery>>,
    sounds: Mutex<Vec<Sound>>,
    commands: Mutex<Vec<String>>,
}

impl MockPlayer {
    pub fn new(name: &str, party: Arc<dyn Party>) -> Arc<Self> {
        Arc::new(Self {
            id: PlayerId::random(),
            name: name.to_string(),
            party: RwLock::new(party),
            observing: AtomicBool::new(false),
            invisible: AtomicBool::new(false),
            permissions: Mutex::new(HashSet::new()),
            settings: Mutex::new(HashMap::new()),
            locale: Mutex::new("en_US".to_string()),
            inbox: Mutex::new(Vec::new()),
            sounds: Mutex::new(Vec::new()),
            commands: Mutex::new(Vec::new()),
        })
    }

    /// An observer, optionally holding `permission`.
    pub fn observer(name: &str, party: Arc<dyn Party>, permission: Option<&str>) -> Arc<Self> {
        let player = Self::new(name, party);
        player.set_observing(true);
        if let Some(permission) = permission {
            player.grant(permission);
        }
        player
    }

    pub fn set_party(&self, party: Arc<dyn Party>) {
        *self.party.write() = party;
    }

    pub fn set_observing(&self, observing: bool) {
        self.observing.store(observing, Ordering::SeqCst);
    }

    pub fn set_invisible(&self, invisible: bool) {
        self.invisible.store(invisible, Ordering::SeqCst);
    }

    pub fn grant(&self, permission: &str) {
        self.permissions.lock().insert(permission.to_string());
    }

    pub fn set_setting(&self, value: SettingValue) {
        self.settings.lock().insert(value.key(), value);
    }

    pub fn set_locale(&self, locale: &str) {
        *self.locale.lock() = locale.to_string();
    }

    pub fn inbox(&self) -> Vec<Delivery> {
        self.inbox.lock().clone()
    }

    pub fn inbox_plain(&self) -> Vec<String> {
        self.inbox.lock().iter().map(Delivery::plain).collect()
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.sounds.lock().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().clone()
    }
}

impl Audience for MockPlayer {
    fn send_message(&self, source: Option<PlayerId>, message: Text) {
        self.inbox.lock().push(Delivery { source, message });
    }
}

impl MatchPlayer for MockPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn plain_name(&self) -> String {
        self.name.clone()
    }

    fn styled_name(&self, style: NameStyle) -> Text {
        match style {
            NameStyle::Plain => Text::literal(self.name.clone()),
            NameStyle::Fancy | NameStyle::Verbose => {
                let color = self.party.read().chat_prefix().color;
                let name = Text::literal(self.name.clone());
                match color {
                    Some(color) => name.with_color(color),
                    None => name,
                }
            }
        }
    }

    fn party(&self) -> Arc<dyn Party> {
        self.party.read().clone()
    }

    fn is_observing(&self) -> bool {
        self.observing.load(Ordering::SeqCst)
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.lock().contains(permission)
    }

    fn is_invisible(&self) -> bool {
        self.invisible.load(Ordering::SeqCst)
    }

    fn locale(&self) -> String {
        self.locale.lock().clone()
    }

    fn setting(&self, key: SettingKey) -> SettingValue {
        self.settings
            .lock()
            .get(&key)
            .copied()
            .unwrap_or_else(|| SettingValue::default_for(key))
    }

    fn play_sound(&self, sound: &Sound) {
        self.sounds.lock().push(sound.clone());
    }

    fn perform_command(&self, command: &str) {
        self.commands.lock().push(command.to_string());
    }
}

// ── Match ────────────────────────────────────────────────────────────

type Hook = Arc<dyn Fn(&mut ChatEvent) + Send + Sync>;

#[derive(Clone)]
enum Subscriber {
    /// Held weakly so a dispatcher subscribed to its own match can be dropped.
    Listener(Weak<dyn ChatListener>),
    Hook(EventPriority, bool, Hook),
}

/// A match with an in-memory roster and event bus.
pub struct MockMatch {
    id: String,
    default_party: Arc<dyn Party>,
    players: RwLock<Vec<Arc<MockPlayer>>>,
    finished: AtomicBool,
    freeze: RwLock<Option<Arc<MockFreezeModule>>>,
    subscribers: RwLock<Vec<Subscriber>>,
    published: Mutex<Vec<ChatEvent>>,
}

impl MockMatch {
    pub fn new(id: &str, default_party: Arc<dyn Party>) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            default_party,
            players: RwLock::new(Vec::new()),
            finished: AtomicBool::new(false),
            freeze: RwLock::new(None),
            subscribers: RwLock::new(Vec::new()),
            published: Mutex::new(Vec::new()),
        })
    }

    pub fn add_player(&self, player: Arc<MockPlayer>) {
        self.players.write().push(player);
    }

    pub fn remove_player(&self, id: PlayerId) {
        self.players.write().retain(|player| player.id != id);
    }

    pub fn set_finished(&self, finished: bool) {
        self.finished.store(finished, Ordering::SeqCst);
    }

    pub fn install_freeze_module(&self, module: Arc<MockFreezeModule>) {
        *self.freeze.write() = Some(module);
    }

    pub fn subscribe<L: ChatListener + 'static>(&self, listener: &Arc<L>) {
        let weak: Weak<dyn ChatListener> = Arc::downgrade(listener) as Weak<dyn ChatListener>;
        self.subscribers.write().push(Subscriber::Listener(weak));
    }

    /// Register a plain callback, e.g. a mute filter that cancels events.
    pub fn on_chat<F>(&self, priority: EventPriority, ignore_cancelled: bool, hook: F)
    where
        F: Fn(&mut ChatEvent) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .push(Subscriber::Hook(priority, ignore_cancelled, Arc::new(hook)));
    }

    /// Publish a chat line as the host would for a typed message.
    pub fn player_chat(&self, player: PlayerId, message: &str) -> ChatEvent {
        let recipients = self.players.read().iter().map(|p| p.id).collect();
        let mut event = ChatEvent::new(player, message, recipients);
        self.call_event(&mut event);
        event
    }

    /// Snapshots of every event after all subscribers ran.
    pub fn published(&self) -> Vec<ChatEvent> {
        self.published.lock().clone()
    }
}

impl Match for MockMatch {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn players(&self) -> Vec<Arc<dyn MatchPlayer>> {
        self.players
            .read()
            .iter()
            .map(|player| player.clone() as Arc<dyn MatchPlayer>)
            .collect()
    }

    fn player(&self, id: PlayerId) -> Option<Arc<dyn MatchPlayer>> {
        self.players
            .read()
            .iter()
            .find(|player| player.id == id)
            .map(|player| player.clone() as Arc<dyn MatchPlayer>)
    }

    fn default_party(&self) -> Arc<dyn Party> {
        self.default_party.clone()
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    fn freeze_module(&self) -> Option<Arc<dyn FreezeModule>> {
        self.freeze
            .read()
            .clone()
            .map(|module| module as Arc<dyn FreezeModule>)
    }

    fn call_event(&self, event: &mut ChatEvent) {
        let mut subscribers: Vec<(EventPriority, bool, Subscriber)> = self
            .subscribers
            .read()
            .iter()
            .filter_map(|subscriber| match subscriber {
                Subscriber::Listener(weak) => {
                    let listener = weak.upgrade()?;
                    Some((
                        listener.priority(),
                        listener.ignore_cancelled(),
                        subscriber.clone(),
                    ))
                }
                Subscriber::Hook(priority, ignore_cancelled, _) => {
                    Some((*priority, *ignore_cancelled, subscriber.clone()))
                }
            })
            .collect();
        subscribers.sort_by_key(|(priority, _, _)| *priority);

        for (_, ignore_cancelled, subscriber) in subscribers {
            if ignore_cancelled && event.is_cancelled() {
                continue;
            }
            match subscriber {
                Subscriber::Listener(weak) => {
                    if let Some(listener) = weak.upgrade() {
                        listener.on_chat(event);
                    }
                }
                Subscriber::Hook(_, _, hook) => hook(event),
            }
        }

        self.published.lock().push(event.clone());
    }
}

// ── Match manager ────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockMatchManager {
    matches: RwLock<Vec<Arc<MockMatch>>>,
}

impl MockMatchManager {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_match(&self, match_: Arc<MockMatch>) {
        self.matches.write().push(match_);
    }
}

impl MatchManager for MockMatchManager {
    fn match_of(&self, player: PlayerId) -> Option<Arc<dyn Match>> {
        self.matches
            .read()
            .iter()
            .find(|match_| match_.player(player).is_some())
            .map(|match_| match_.clone() as Arc<dyn Match>)
    }
}
