use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundSource {
    Master,
    Music,
    Ambient,
    Players,
}

/// A sound effect the host can play to a single player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sound {
    pub key: String,
    pub source: SoundSource,
    pub volume: f32,
    pub pitch: f32,
}

impl Sound {
    pub fn new(key: impl Into<String>, source: SoundSource, volume: f32, pitch: f32) -> Self {
        Self {
            key: key.into(),
            source,
            volume,
            pitch,
        }
    }
}
