//! Freeze toggle and frozen player listing.

use arena_traits::{Actor, Audience, Match, NameStyle, NamedColor, PlayerId, Text};
use tracing::{debug, info};

const FROZEN_LIST_NONE: &str = "moderation.freeze.frozenList.none";
const FROZEN_LIST_ONLINE: &str = "moderation.freeze.frozenList.online";
const FROZEN_LIST_OFFLINE: &str = "moderation.freeze.frozenList.offline";

/// What a freeze toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreezeOutcome {
    Frozen,
    Thawed,
    TargetNotInMatch,
    ModuleUnavailable,
}

/// Invisible actors always act silently so they are not revealed.
pub fn effective_silent(actor: &Actor, silent: bool) -> bool {
    silent || actor.is_invisible()
}

/// Flip the frozen state of `target`.
pub fn toggle_freeze(
    actor: &Actor,
    match_: &dyn Match,
    target: PlayerId,
    silent: bool,
) -> FreezeOutcome {
    let Some(player) = match_.player(target) else {
        debug!("Freeze target {} is not in match {}", target, match_.id());
        return FreezeOutcome::TargetNotInMatch;
    };
    let Some(module) = match_.freeze_module() else {
        debug!("Match {} has no freeze module", match_.id());
        return FreezeOutcome::ModuleUnavailable;
    };

    let silent = effective_silent(actor, silent);
    let frozen = !module.is_frozen(target);
    module.set_frozen(actor, &player, frozen, silent);

    info!(
        "{:?} {} {} (silent={})",
        actor,
        if frozen { "froze" } else { "thawed" },
        target,
        silent
    );
    if frozen {
        FreezeOutcome::Frozen
    } else {
        FreezeOutcome::Thawed
    }
}

fn format_frozen_list(key: &str, count: usize, names: Text) -> Text {
    Text::translatable(
        key,
        vec![Text::colored(count.to_string(), NamedColor::Aqua), names],
    )
    .with_color(NamedColor::Gray)
}

/// Send the frozen player list to `audience`. Returns the lines sent.
pub fn frozen_list(audience: &dyn Audience, match_: &dyn Match) -> usize {
    let module = match_.freeze_module();
    let online = module
        .as_ref()
        .map(|module| module.frozen_players())
        .unwrap_or_default();
    let offline_count = module
        .as_ref()
        .map(|module| module.offline_frozen_count())
        .unwrap_or(0);

    if online.is_empty() && offline_count == 0 {
        audience.send_warning(Text::translatable(FROZEN_LIST_NONE, vec![]));
        return 1;
    }

    let mut lines = 0;
    if !online.is_empty() {
        let count = online.len();
        let names = Text::join(
            Text::colored(", ", NamedColor::Gray),
            online.iter().map(|player| player.styled_name(NameStyle::Fancy)),
        );
        audience.send_message(None, format_frozen_list(FROZEN_LIST_ONLINE, count, names));
        lines += 1;
    }

    if offline_count > 0
        && let Some(module) = &module
    {
        let names = module.offline_frozen_names();
        audience.send_message(
            None,
            format_frozen_list(FROZEN_LIST_OFFLINE, offline_count, names),
        );
        lines += 1;
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_keeps_requested_silence() {
        assert!(!effective_silent(&Actor::Console, false));
        assert!(effective_silent(&Actor::Console, true));
    }

    #[test]
    fn test_frozen_list_line_shape() {
        let line = format_frozen_list(FROZEN_LIST_ONLINE, 2, Text::literal("a, b"));
        assert_eq!(line.color, Some(NamedColor::Gray));
        match line.content {
            arena_traits::TextContent::Translatable { key, args } => {
                assert_eq!(key, FROZEN_LIST_ONLINE);
                assert_eq!(args[0], Text::colored("2", NamedColor::Aqua));
                assert_eq!(args[1], Text::literal("a, b"));
            }
            other => panic!("unexpected content {:?}", other),
        }
    }
}
