//! Admin Broadcast - Staff-only announcements.

use arena_traits::{
    Audience, Match, MatchPlayer, NamedColor, SettingKey, SettingValue, Sound, SoundSource, Text,
};
use tracing::debug;

use super::types::RecipientFilter;

/// `[A] ` in white and gold.
pub fn admin_chat_prefix() -> Text {
    Text::empty()
        .append(Text::colored("[", NamedColor::White))
        .append(Text::colored("A", NamedColor::Gold))
        .append(Text::colored("] ", NamedColor::White))
}

/// Chime played to staff on admin chat.
pub fn admin_chat_sound() -> Sound {
    Sound::new("random.orb", SoundSource::Master, 1.0, 0.7)
}

fn can_play_sound(viewer: &dyn MatchPlayer) -> bool {
    viewer.setting(SettingKey::Sounds) == SettingValue::SoundsAll
}

/// Play the admin chat chime to a viewer who opted into all sounds.
///
/// Any other sound is ignored.
pub fn play_admin_sound(viewer: &dyn MatchPlayer, sound: &Sound) {
    if *sound == admin_chat_sound() && can_play_sound(viewer) {
        viewer.play_sound(sound);
    }
}

/// Send `message` to every admin-chat holder in the match, then to the console.
///
/// Returns how many players received it.
pub fn broadcast_admin_chat(
    console: &dyn Audience,
    match_: &dyn Match,
    message: Text,
    sound: Option<&Sound>,
) -> usize {
    let formatted = admin_chat_prefix().append(message);
    let filter = RecipientFilter::AdminChat;
    let mut recipients = 0;

    for viewer in match_.players() {
        if !filter.accepts(viewer.as_ref()) {
            continue;
        }
        if let Some(sound) = sound
            && can_play_sound(viewer.as_ref())
        {
            viewer.play_sound(sound);
        }
        viewer.send_message(None, formatted.clone());
        recipients += 1;
    }

    console.send_message(None, formatted);
    debug!(
        "Admin broadcast in match {} reached {} players",
        match_.id(),
        recipients
    );
    recipients
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_rendering() {
        assert_eq!(admin_chat_prefix().to_plain(), "[A] ");
        assert_eq!(admin_chat_prefix().to_legacy(), "§f[§6A§f] ");
    }

    #[test]
    fn test_admin_sound_shape() {
        let sound = admin_chat_sound();
        assert_eq!(sound.key, "random.orb");
        assert_eq!(sound.source, SoundSource::Master);
        assert_eq!(sound.pitch, 0.7);
    }
}
