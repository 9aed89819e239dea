//! Format Builder - Legacy format strings and rich chat components.

use arena_traits::{NamedColor, Text, Translator};

use super::types::ChatChannel;

pub const SHOUT_TAG: &str = "[SHOUT] ";
pub const NAME_SEPARATOR: &str = ": ";
pub const PLACEHOLDER: &str = "%s";

/// Translation key for the console's display name.
pub const CONSOLE_NAME_KEY: &str = "misc.console";

fn shout_tag() -> Text {
    Text::colored(SHOUT_TAG, NamedColor::Gold)
}

fn decorates_shout(channel: ChatChannel, shout: bool) -> bool {
    shout && channel == ChatChannel::Global
}

/// Legacy format `<team prefix | shout tag>%s: %s`.
///
/// The placeholders take the sender's plain name and the message text. Only
/// team lines carry the party prefix; only shouted global lines carry the tag.
pub fn legacy_format(channel: ChatChannel, shout: bool, prefix: &Text) -> String {
    let mut format = String::new();
    if decorates_shout(channel, shout) {
        format.push_str(&shout_tag().to_legacy());
    } else if channel == ChatChannel::Team {
        format.push_str(&prefix.to_legacy());
    }
    format.push_str(PLACEHOLDER);
    format.push_str(NAME_SEPARATOR);
    format.push_str(PLACEHOLDER);
    format
}

/// Rich chat line for in-game recipients.
///
/// Global lines may carry the shout tag, team lines carry the party prefix;
/// never both. The body is literal text.
pub fn rich_message(
    channel: ChatChannel,
    shout: bool,
    prefix: &Text,
    sender_name: Text,
    body: &str,
) -> Text {
    let mut message = Text::empty();
    if decorates_shout(channel, shout) {
        message = message.append(shout_tag());
    } else if channel == ChatChannel::Team {
        message = message.append(prefix.clone());
    }
    message
        .append(sender_name)
        .append(Text::colored(NAME_SEPARATOR, NamedColor::White))
        .append(Text::literal(body))
}

/// Fill the two placeholders of a legacy format.
///
/// Substituted values are never rescanned, so `%s` inside a name or message
/// stays literal.
pub fn fill_legacy(format: &str, name: &str, message: &str) -> String {
    let mut parts = format.splitn(3, PLACEHOLDER);
    let mut out = String::with_capacity(format.len() + name.len() + message.len());
    out.push_str(parts.next().unwrap_or_default());
    if let Some(between) = parts.next() {
        out.push_str(name);
        out.push_str(between);
        if let Some(rest) = parts.next() {
            out.push_str(message);
            out.push_str(rest);
        }
    }
    out
}

/// Translator used when the host does not provide one.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackTranslator;

impl Translator for FallbackTranslator {
    fn translate(&self, key: &str, _locale: &str) -> String {
        match key {
            CONSOLE_NAME_KEY => "Console".to_string(),
            other => other.to_string(),
        }
    }
}
