use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::session::PlayerTwoMode;

const MAX_NAME_LEN: usize = 24;
const MAX_MOVE_DELAY_MS: u64 = 10_000;
const MAX_NOTICE_MS: u64 = 60_000;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub players: PlayersConfig,
    pub ai: AiConfig,
    pub ui: UiConfig,
}

/// Display names and who controls Player 2.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub player_one_name: String,
    pub player_two_name: String,
    pub player_two: PlayerTwoMode,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            player_one_name: "Player 1".into(),
            player_two_name: "Player 2".into(),
            player_two: PlayerTwoMode::Human,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Fixed seed for the random fallback; drawn from the OS when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Pause before the computer answers a human move.
    pub move_delay_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            seed: None,
            move_delay_ms: 400,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long transient notices stay on screen.
    pub notice_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { notice_ms: 2500 }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.player_one_name.chars().count() > MAX_NAME_LEN {
            return Err(ConfigError::Validation(format!(
                "players.player_one_name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        if self.players.player_two_name.chars().count() > MAX_NAME_LEN {
            return Err(ConfigError::Validation(format!(
                "players.player_two_name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        if self.ai.move_delay_ms > MAX_MOVE_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "ai.move_delay_ms must be <= {MAX_MOVE_DELAY_MS}"
            )));
        }
        if self.ui.notice_ms == 0 || self.ui.notice_ms > MAX_NOTICE_MS {
            return Err(ConfigError::Validation(format!(
                "ui.notice_ms must be in [1, {MAX_NOTICE_MS}]"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.players.player_two, PlayerTwoMode::Human);
        assert_eq!(config.ai.move_delay_ms, 400);
        assert_eq!(config.ui.notice_ms, 2500);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[players]
player_two = "computer"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.players.player_two, PlayerTwoMode::Computer);
        assert_eq!(config.players.player_one_name, "Player 1");
        assert_eq!(config.ai.seed, None);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.players.player_two_name, "Player 2");
        assert_eq!(config.ui.notice_ms, UiConfig::default().notice_ms);
    }

    #[test]
    fn test_unknown_mode_is_a_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str("[players]\nplayer_two = \"robot\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_long_name() {
        let mut config = AppConfig::default();
        config.players.player_one_name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_notice() {
        let mut config = AppConfig::default();
        config.ui.notice_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_long_move_delay() {
        let mut config = AppConfig::default();
        config.ai.move_delay_ms = MAX_MOVE_DELAY_MS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.ai.move_delay_ms, 400);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect_four.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[players]
player_one_name = "Ana"

[ai]
seed = 42
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.players.player_one_name, "Ana");
        assert_eq!(config.ai.seed, Some(42));
        // Others are defaults
        assert_eq!(config.ai.move_delay_ms, 400);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[ui]\nnotice_ms = 0\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
