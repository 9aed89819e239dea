//! Per-player setting keys and values read from the host settings store.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    /// Default chat channel.
    Chat,
    /// Which sound effects the player wants to hear.
    Sounds,
}

impl SettingKey {
    /// Name used by the host `set` command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Sounds => "sounds",
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingValue {
    ChatTeam,
    ChatGlobal,
    ChatAdmin,
    SoundsAll,
    SoundsChat,
    SoundsNone,
}

impl SettingValue {
    pub fn key(&self) -> SettingKey {
        match self {
            Self::ChatTeam | Self::ChatGlobal | Self::ChatAdmin => SettingKey::Chat,
            Self::SoundsAll | Self::SoundsChat | Self::SoundsNone => SettingKey::Sounds,
        }
    }

    /// Value name used by the host `set` command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChatTeam => "team",
            Self::ChatGlobal => "global",
            Self::ChatAdmin => "admin",
            Self::SoundsAll => "all",
            Self::SoundsChat => "chat",
            Self::SoundsNone => "none",
        }
    }

    /// Value a player gets before touching the setting.
    pub fn default_for(key: SettingKey) -> Self {
        match key {
            SettingKey::Chat => Self::ChatTeam,
            SettingKey::Sounds => Self::SoundsAll,
        }
    }
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
