//! Freeze toggling and the frozen player list against the in-memory host.

use std::sync::Arc;

use arena_core::moderation::{FreezeOutcome, frozen_list, toggle_freeze};
use arena_testkit::{FreezeCall, MockFreezeModule, MockMatch, MockParty, MockPlayer, RecordingAudience};
use arena_traits::{
    Actor, FreezeModule, MatchPlayer, NamedColor, PlayerId, Text, TextContent, permissions,
};

fn setup() -> (Arc<MockMatch>, Arc<MockFreezeModule>, Arc<MockPlayer>, Arc<MockPlayer>) {
    let red = MockParty::team("Red", NamedColor::Red);
    let mock = MockMatch::new("match-1", MockParty::observers());
    let moderator = MockPlayer::observer("mod", MockParty::observers(), Some(permissions::FREEZE));
    let target = MockPlayer::new("griefer", red);
    mock.add_player(moderator.clone());
    mock.add_player(target.clone());

    let module = MockFreezeModule::new();
    mock.install_freeze_module(module.clone());
    (mock, module, moderator, target)
}

fn translatable_key(text: &Text) -> Option<&str> {
    match &text.content {
        TextContent::Translatable { key, .. } => Some(key.as_str()),
        TextContent::Literal(_) => None,
    }
}

// ── toggle_freeze ───────────────────────────────────────────────────────────

#[test]
fn test_toggle_freezes_then_thaws() {
    let (mock, module, moderator, target) = setup();
    let actor = Actor::Player(moderator.clone());

    let outcome = toggle_freeze(&actor, mock.as_ref(), target.id(), false);
    assert_eq!(outcome, FreezeOutcome::Frozen);
    assert!(module.is_frozen(target.id()));

    let outcome = toggle_freeze(&actor, mock.as_ref(), target.id(), false);
    assert_eq!(outcome, FreezeOutcome::Thawed);
    assert!(!module.is_frozen(target.id()));

    assert_eq!(
        module.calls(),
        vec![
            FreezeCall {
                actor: Some(moderator.id()),
                target: target.id(),
                frozen: true,
                silent: false,
            },
            FreezeCall {
                actor: Some(moderator.id()),
                target: target.id(),
                frozen: false,
                silent: false,
            },
        ]
    );
}

#[test]
fn test_invisible_actor_always_freezes_silently() {
    let (mock, module, moderator, target) = setup();
    moderator.set_invisible(true);

    toggle_freeze(&Actor::Player(moderator), mock.as_ref(), target.id(), false);

    assert!(module.calls()[0].silent);
}

#[test]
fn test_console_keeps_requested_silence() {
    let (mock, module, _, target) = setup();

    toggle_freeze(&Actor::Console, mock.as_ref(), target.id(), true);
    toggle_freeze(&Actor::Console, mock.as_ref(), target.id(), false);

    let calls = module.calls();
    assert_eq!(calls[0].actor, None);
    assert!(calls[0].silent);
    assert!(!calls[1].silent);
}

#[test]
fn test_target_outside_match_is_reported() {
    let (mock, module, moderator, _) = setup();

    let outcome = toggle_freeze(
        &Actor::Player(moderator),
        mock.as_ref(),
        PlayerId::random(),
        false,
    );

    assert_eq!(outcome, FreezeOutcome::TargetNotInMatch);
    assert!(module.calls().is_empty());
}

#[test]
fn test_missing_module_is_reported() {
    let mock = MockMatch::new("no-freeze", MockParty::observers());
    let target = MockPlayer::new("griefer", MockParty::team("Red", NamedColor::Red));
    mock.add_player(target.clone());

    let outcome = toggle_freeze(&Actor::Console, mock.as_ref(), target.id(), false);

    assert_eq!(outcome, FreezeOutcome::ModuleUnavailable);
}

// ── frozen_list ─────────────────────────────────────────────────────────────

#[test]
fn test_frozen_list_warns_when_nobody_is_frozen() {
    let (mock, _, _, _) = setup();
    let console = RecordingAudience::new();

    assert_eq!(frozen_list(console.as_ref(), mock.as_ref()), 1);

    let received = console.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].plain(), "\u{26A0} moderation.freeze.frozenList.none");
}

#[test]
fn test_frozen_list_without_module_reads_as_empty() {
    let mock = MockMatch::new("no-freeze", MockParty::observers());
    let console = RecordingAudience::new();

    assert_eq!(frozen_list(console.as_ref(), mock.as_ref()), 1);
    assert!(console.received_plain()[0].ends_with("frozenList.none"));
}

#[test]
fn test_frozen_list_reports_online_and_offline() {
    let (mock, module, moderator, target) = setup();
    let second = MockPlayer::new("camper", MockParty::team("Blue", NamedColor::Blue));
    mock.add_player(second.clone());
    let actor = Actor::Player(moderator.clone());
    toggle_freeze(&actor, mock.as_ref(), target.id(), false);
    toggle_freeze(&actor, mock.as_ref(), second.id(), false);
    module.set_offline(&["runner"]);

    let audience = RecordingAudience::new();
    assert_eq!(frozen_list(audience.as_ref(), mock.as_ref()), 2);

    let received = audience.received();
    let online = &received[0].message;
    assert_eq!(translatable_key(online), Some("moderation.freeze.frozenList.online"));
    assert_eq!(online.color, Some(NamedColor::Gray));
    let TextContent::Translatable { args, .. } = &online.content else {
        panic!("online line is not translatable");
    };
    assert_eq!(args[0], Text::colored("2", NamedColor::Aqua));
    assert_eq!(args[1].to_plain(), "griefer, camper");

    let offline = &received[1].message;
    assert_eq!(translatable_key(offline), Some("moderation.freeze.frozenList.offline"));
    let TextContent::Translatable { args, .. } = &offline.content else {
        panic!("offline line is not translatable");
    };
    assert_eq!(args[0], Text::colored("1", NamedColor::Aqua));
    assert_eq!(args[1].to_plain(), "runner");
}

#[test]
fn test_frozen_list_offline_only() {
    let (mock, module, _, _) = setup();
    module.set_offline(&["runner", "logger"]);
    let audience = RecordingAudience::new();

    assert_eq!(frozen_list(audience.as_ref(), mock.as_ref()), 1);
    assert_eq!(
        translatable_key(&audience.received()[0].message),
        Some("moderation.freeze.frozenList.offline")
    );
}

#[test]
fn test_frozen_players_keep_styled_names() {
    let (mock, _, moderator, target) = setup();
    toggle_freeze(&Actor::Player(moderator), mock.as_ref(), target.id(), true);
    let audience = RecordingAudience::new();

    frozen_list(audience.as_ref(), mock.as_ref());

    let received = audience.received();
    let TextContent::Translatable { args, .. } = &received[0].message.content else {
        panic!("online line is not translatable");
    };
    assert!(args[1].to_legacy().contains("\u{a7}cgriefer"));
}
