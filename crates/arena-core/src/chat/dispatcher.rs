//! Chat Dispatcher - Routes chat lines to global, team and admin channels.
//!
//! Every chat line runs through the same pipeline:
//!
//! ```text
//!  inbound ChatEvent ──▶ on_chat (monitor) ──▶ ChannelRouter ──▶ format
//!        ▲                   │ token marked?                      │
//!        │                   └── yes: consume, step aside         ▼
//!        │                                                   TaskExecutor
//!        └──────────── call_event (token marked) ◀────────── background task
//!                                                                 │
//!                                            cancelled? ──▶ stop  ▼
//!                                                          deliver rich text
//! ```
//!
//! The dispatcher is an ordinary service: construct it once per session,
//! subscribe it to the host bus as a [`ChatListener`], and call
//! [`ChatDispatcher::close`] on shutdown.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arena_traits::{
    Audience, ChatEvent, ChatListener, EventPriority, Match, MatchManager, MatchPlayer,
    NameStyle, PlayerId, SettingKey, Sound, TaskExecutor, Text, Translator,
};
use tracing::{debug, info, warn};

use crate::config::ChatConfig;
use crate::error::{ChatError, Result};

use super::admin::broadcast_admin_chat;
use super::dedup::DispatchCache;
use super::format::{CONSOLE_NAME_KEY, fill_legacy, legacy_format, rich_message};
use super::router::{ChannelRouter, Route, RouteContext};
use super::types::{
    ChatChannel, ChatMessage, DispatchState, DispatchStats, DispatchStatsSnapshot,
    RecipientFilter, SendOutcome,
};

/// Dispatches chat for every match on the server.
pub struct ChatDispatcher {
    config: ChatConfig,
    router: ChannelRouter,
    matches: Arc<dyn MatchManager>,
    executor: Arc<dyn TaskExecutor>,
    console: Arc<dyn Audience>,
    translator: Arc<dyn Translator>,
    cache: Arc<DispatchCache>,
    stats: Arc<DispatchStats>,
    closed: AtomicBool,
}

impl ChatDispatcher {
    pub fn new(
        config: ChatConfig,
        matches: Arc<dyn MatchManager>,
        executor: Arc<dyn TaskExecutor>,
        console: Arc<dyn Audience>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        info!(
            "Starting chat dispatcher (sigil={:?}, dedup_ttl={:?})",
            config.global_sigil,
            config.dedup_ttl()
        );
        Self {
            router: ChannelRouter::new(config.global_sigil.clone()),
            cache: Arc::new(DispatchCache::new(config.dedup_ttl())),
            stats: Arc::new(DispatchStats::default()),
            closed: AtomicBool::new(false),
            config,
            matches,
            executor,
            console,
            translator,
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn router(&self) -> &ChannelRouter {
        &self.router
    }

    pub fn cache(&self) -> &DispatchCache {
        &self.cache
    }

    pub fn stats(&self) -> DispatchStatsSnapshot {
        self.stats.snapshot()
    }

    /// Stop accepting chat. Inbound events are left to the host afterwards.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.cache.clear();
            info!("Chat dispatcher closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Resolve the channel for a line typed into chat.
    pub fn route(&self, match_: &dyn Match, sender: Option<&dyn MatchPlayer>, raw: &str) -> Route {
        self.router.route(&RouteContext::of(match_, sender), raw)
    }

    /// Send to everyone in the match. The `/g` command always shouts.
    ///
    /// The console never shouts.
    pub fn send_global(
        &self,
        match_: &Arc<dyn Match>,
        sender: Option<&Arc<dyn MatchPlayer>>,
        text: &str,
        shout: bool,
    ) -> Result<SendOutcome> {
        let shout = shout && sender.is_some();
        self.dispatch(match_, sender, Route::global(text, shout))
    }

    /// Send to the sender's team, or to everyone when team chat is unavailable.
    pub fn send_team(
        &self,
        match_: &Arc<dyn Match>,
        sender: Option<&Arc<dyn MatchPlayer>>,
        text: &str,
    ) -> Result<SendOutcome> {
        let ctx = RouteContext::of(match_.as_ref(), sender.map(|s| s.as_ref()));
        self.dispatch(match_, sender, self.router.route_team(&ctx, text))
    }

    /// Send on the sender's preferred channel.
    pub fn send_default(
        &self,
        match_: &Arc<dyn Match>,
        sender: Option<&Arc<dyn MatchPlayer>>,
        text: &str,
    ) -> Result<SendOutcome> {
        let ctx = RouteContext::of(match_.as_ref(), sender.map(|s| s.as_ref()));
        self.dispatch(match_, sender, self.router.route_default(&ctx, text))
    }

    /// Route a raw chat line (sigil included) and send it.
    pub fn send(
        &self,
        match_: &Arc<dyn Match>,
        sender: Option<&Arc<dyn MatchPlayer>>,
        raw: &str,
    ) -> Result<SendOutcome> {
        let route = self.route(match_.as_ref(), sender.map(|s| s.as_ref()), raw);
        self.dispatch(match_, sender, route)
    }

    /// Broadcast to admin-chat holders and the console.
    pub fn broadcast_admin(&self, match_: &dyn Match, message: Text, sound: Option<&Sound>) -> usize {
        broadcast_admin_chat(self.console.as_ref(), match_, message, sound)
    }

    fn dispatch(
        &self,
        match_: &Arc<dyn Match>,
        sender: Option<&Arc<dyn MatchPlayer>>,
        route: Route,
    ) -> Result<SendOutcome> {
        if self.is_closed() {
            return Err(ChatError::Closed);
        }

        let text = route.text.trim();
        if text.is_empty() {
            return match sender {
                Some(sender) => self.schedule_channel_switch(sender, route.channel),
                None => {
                    debug!("Ignoring empty console message in match {}", match_.id());
                    Ok(SendOutcome::Ignored)
                }
            };
        }

        let party = match sender {
            Some(sender) => sender.party(),
            None => match_.default_party(),
        };
        let prefix = party.chat_prefix();
        let filter = match route.channel {
            ChatChannel::Global => RecipientFilter::Everyone,
            ChatChannel::Team => RecipientFilter::Party(party.id()),
        };
        let format = legacy_format(route.channel, route.shout, &prefix);
        let rich = sender.map(|sender| {
            rich_message(
                route.channel,
                route.shout,
                &prefix,
                sender.styled_name(NameStyle::Verbose),
                text,
            )
        });

        let message = ChatMessage::new(sender.cloned(), text, route.channel, format, rich, filter);
        self.submit(match_.clone(), message)
    }

    fn submit(&self, match_: Arc<dyn Match>, mut message: ChatMessage) -> Result<SendOutcome> {
        let token = message.token;
        message.transition(DispatchState::Scheduled);
        debug!(
            "Scheduling {} message {} in match {}",
            message.channel,
            token,
            match_.id()
        );

        let cache = self.cache.clone();
        let stats = self.stats.clone();
        let translator = self.translator.clone();
        let result = self.executor.execute(Box::new(move || {
            let state = if message.sender.is_some() {
                deliver_player_message(match_.as_ref(), &cache, &mut message)
            } else {
                deliver_console_message(match_.as_ref(), translator.as_ref(), &mut message)
            };
            stats.record(state);
        }));

        if let Err(err) = result {
            warn!("Dropping chat message {}: {}", token, err);
            self.stats.record(DispatchState::Dropped);
            return Err(err.into());
        }
        Ok(SendOutcome::Scheduled(token))
    }

    fn schedule_channel_switch(
        &self,
        sender: &Arc<dyn MatchPlayer>,
        channel: ChatChannel,
    ) -> Result<SendOutcome> {
        let command = format!("set {} {}", SettingKey::Chat, channel.setting_value());
        debug!(
            "Empty message from {}, switching default chat to {}",
            sender.id(),
            channel
        );

        let player = sender.clone();
        self.executor.schedule(
            self.config.channel_switch_delay(),
            Box::new(move || player.perform_command(&command)),
        )?;
        self.stats.record_channel_switch();
        Ok(SendOutcome::ChannelSwitch(channel))
    }

    fn handle_inbound(&self, event: &ChatEvent) {
        let player_id = event.sender();
        let Some(match_) = self.matches.match_of(player_id) else {
            debug!("Chat from {} outside any match, dropping", player_id);
            return;
        };
        let Some(player) = match_.player(player_id) else {
            debug!("Chat from {} who left match {}", player_id, match_.id());
            return;
        };

        if let Err(err) = self.send(&match_, Some(&player), event.message()) {
            warn!("Failed to dispatch chat from {}: {}", player_id, err);
        }
    }
}

impl ChatListener for ChatDispatcher {
    fn priority(&self) -> EventPriority {
        EventPriority::Monitor
    }

    fn ignore_cancelled(&self) -> bool {
        true
    }

    fn on_chat(&self, event: &mut ChatEvent) {
        if event.is_cancelled() || self.is_closed() {
            return;
        }

        if self.cache.consume(event.token()) {
            return;
        }

        // Externally sourced: take it over so the host does not print it too.
        event.set_cancelled(true);
        self.handle_inbound(event);
    }
}

/// Publish the message on the match bus and deliver it unless cancelled.
fn deliver_player_message(
    match_: &dyn Match,
    cache: &DispatchCache,
    message: &mut ChatMessage,
) -> DispatchState {
    let Some(sender) = message.sender.clone() else {
        return message.state();
    };
    let sender_id = sender.id();

    let recipients: Vec<PlayerId> = match_
        .players()
        .iter()
        .filter(|viewer| message.filter.accepts(viewer.as_ref()))
        .map(|viewer| viewer.id())
        .collect();

    let mut event =
        ChatEvent::with_token(message.token, sender_id, message.text.clone(), recipients);
    event.set_format(message.legacy_format.clone());

    cache.mark(message.token);
    match_.call_event(&mut event);
    if cache.consume(message.token) {
        debug!("Chat event {} was not observed by the dispatcher", message.token);
    }

    if event.is_cancelled() {
        debug!("Chat message {} from {} was cancelled", message.token, sender_id);
        message.transition(DispatchState::Cancelled);
        return message.state();
    }

    let rich = message
        .rich
        .clone()
        .unwrap_or_else(|| Text::literal(message.text.clone()));
    let mut delivered = 0;
    for id in event.recipients() {
        if let Some(viewer) = match_.player(*id) {
            viewer.send_message(Some(sender_id), rich.clone());
            delivered += 1;
        }
    }

    // TODO: tell the sender when nobody received the message.
    debug!(
        "Delivered {} message {} to {} players",
        message.channel, message.token, delivered
    );
    message.transition(DispatchState::Delivered {
        recipients: delivered,
    });
    message.state()
}

/// Deliver a console message, naming the console in each viewer's locale.
fn deliver_console_message(
    match_: &dyn Match,
    translator: &dyn Translator,
    message: &mut ChatMessage,
) -> DispatchState {
    let mut delivered = 0;
    for viewer in match_.players() {
        if !message.filter.accepts(viewer.as_ref()) {
            continue;
        }
        let console_name = translator.translate(CONSOLE_NAME_KEY, &viewer.locale());
        let line = fill_legacy(&message.legacy_format, &console_name, &message.text);
        viewer.send_message(None, Text::literal(line));
        delivered += 1;
    }

    message.transition(DispatchState::Delivered {
        recipients: delivered,
    });
    message.state()
}
