use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};

const CONFIG_ENV: &str = "ARENA_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "arena.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArenaConfig {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tunables for the chat dispatcher.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Leading marker that forces a message into global chat.
    #[serde(default = "default_global_sigil")]
    pub global_sigil: String,
    /// How long a self-dispatched event stays marked in the dedup cache.
    #[serde(default = "default_dedup_ttl_secs")]
    pub dedup_ttl_secs: u64,
    /// Delay before a channel-switch settings update runs.
    #[serde(default = "default_channel_switch_delay_ms")]
    pub channel_switch_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            global_sigil: default_global_sigil(),
            dedup_ttl_secs: default_dedup_ttl_secs(),
            channel_switch_delay_ms: default_channel_switch_delay_ms(),
        }
    }
}

impl ChatConfig {
    pub fn dedup_ttl(&self) -> Duration {
        Duration::from_secs(self.dedup_ttl_secs)
    }

    pub fn channel_switch_delay(&self) -> Duration {
        Duration::from_millis(self.channel_switch_delay_ms)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.global_sigil.is_empty() {
            bail!("chat.global_sigil must not be empty");
        }
        if self.dedup_ttl_secs == 0 {
            bail!("chat.dedup_ttl_secs must be greater than zero");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_global_sigil() -> String {
    "!".to_string()
}

fn default_dedup_ttl_secs() -> u64 {
    15
}

fn default_channel_switch_delay_ms() -> u64 {
    50
}

fn default_log_filter() -> String {
    "info,arena_core=debug".to_string()
}

impl ArenaConfig {
    /// Load from `ARENA_CONFIG`, then `arena.toml`, then the environment.
    pub fn load() -> anyhow::Result<Self> {
        let config = match load_from_file()? {
            Some(config) => config,
            None => Self::from_env(),
        };
        config.chat.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse arena config")?;
        config.chat.validate()?;
        Ok(config)
    }

    fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(sigil) = env::var("ARENA_GLOBAL_SIGIL") {
            config.chat.global_sigil = sigil;
        }
        if let Some(ttl) = env::var("ARENA_DEDUP_TTL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
        {
            config.chat.dedup_ttl_secs = ttl;
        }
        if let Some(delay) = env::var("ARENA_CHANNEL_SWITCH_DELAY_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
        {
            config.chat.channel_switch_delay_ms = delay;
        }
        if let Ok(filter) = env::var("ARENA_LOG_FILTER") {
            config.logging.filter = filter;
        }
        config
    }
}

fn load_from_file() -> anyhow::Result<Option<ArenaConfig>> {
    let path = if let Ok(path) = env::var(CONFIG_ENV) {
        Some(path)
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        Some(DEFAULT_CONFIG_FILE.to_string())
    } else {
        None
    };

    let Some(path) = path else {
        return Ok(None);
    };

    read_config_file(Path::new(&path)).map(Some)
}

pub fn read_config_file(path: &Path) -> anyhow::Result<ArenaConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let parsed: ArenaConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    parsed.chat.validate()?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ArenaConfig::default();
        assert_eq!(config.chat.global_sigil, "!");
        assert_eq!(config.chat.dedup_ttl(), Duration::from_secs(15));
        assert_eq!(config.chat.channel_switch_delay(), Duration::from_millis(50));
        assert!(!config.logging.json);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ArenaConfig::from_toml_str(
            r#"
            [chat]
            global_sigil = "@"
            "#,
        )
        .unwrap();
        assert_eq!(config.chat.global_sigil, "@");
        assert_eq!(config.chat.dedup_ttl_secs, 15);
        assert_eq!(config.logging.filter, "info,arena_core=debug");
    }

    #[test]
    fn test_rejects_empty_sigil() {
        let err = ArenaConfig::from_toml_str(
            r#"
            [chat]
            global_sigil = ""
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("global_sigil"));
    }

    #[test]
    fn test_rejects_zero_ttl() {
        assert!(ArenaConfig::from_toml_str("[chat]\ndedup_ttl_secs = 0\n").is_err());
    }

    #[test]
    fn test_read_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[chat]\nchannel_switch_delay_ms = 10\n\n[logging]\njson = true"
        )
        .unwrap();

        let config = read_config_file(file.path()).unwrap();
        assert_eq!(config.chat.channel_switch_delay_ms, 10);
        assert!(config.logging.json);
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
