use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "emberdeck";

pub const DEFAULT_FULLSCREEN_DELAY_MS: u64 = 1000;
pub const DEFAULT_ORIENTATION_SETTLE_MS: u64 = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<PromptsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<GateConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Theme used when none has been stored yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// 1-indexed slide used when no position has been stored yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullscreen_delay_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation_settle_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// Extra text shown under the wrong-password message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `emberdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# Emberdeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn default_theme(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.theme.as_deref())
    }

    pub fn start_slide(&self) -> Option<usize> {
        self.defaults.as_ref().and_then(|d| d.start_slide)
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn fullscreen_delay(&self) -> Duration {
        let ms = self
            .prompts
            .as_ref()
            .and_then(|p| p.fullscreen_delay_ms)
            .unwrap_or(DEFAULT_FULLSCREEN_DELAY_MS);
        Duration::from_millis(ms)
    }

    pub fn orientation_settle(&self) -> Duration {
        let ms = self
            .prompts
            .as_ref()
            .and_then(|p| p.orientation_settle_ms)
            .unwrap_or(DEFAULT_ORIENTATION_SETTLE_MS);
        Duration::from_millis(ms)
    }

    pub fn gate_hint(&self) -> Option<&str> {
        self.gate.as_ref().and_then(|g| g.hint.as_deref())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.start_slide" => {
                let slide = match value.parse::<usize>() {
                    Ok(n) if n >= 1 => n,
                    _ => anyhow::bail!(
                        "Invalid start_slide: {value}. Must be a slide number starting at 1."
                    ),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_slide = Some(slide);
            }
            "defaults.windowed" => {
                let windowed = match value {
                    "true" => true,
                    "false" => false,
                    _ => anyhow::bail!("Invalid windowed: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(windowed);
            }
            "prompts.fullscreen_delay_ms" | "prompts.orientation_settle_ms" => {
                let Ok(ms) = value.parse::<u64>() else {
                    anyhow::bail!("Invalid {key}: {value}. Must be a number of milliseconds.");
                };
                let prompts = self.prompts.get_or_insert_with(PromptsConfig::default);
                if key == "prompts.fullscreen_delay_ms" {
                    prompts.fullscreen_delay_ms = Some(ms);
                } else {
                    prompts.orientation_settle_ms = Some(ms);
                }
            }
            "gate.hint" => {
                self.gate.get_or_insert_with(GateConfig::default).hint = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, \
                 defaults.start_slide, defaults.windowed, prompts.fullscreen_delay_ms, \
                 prompts.orientation_settle_ms, gate.hint"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = Config::default();
        assert_eq!(config.fullscreen_delay(), Duration::from_millis(1000));
        assert_eq!(config.orientation_settle(), Duration::from_millis(100));
        assert_eq!(config.default_theme(), None);
        assert!(!config.windowed());
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "sepia").is_err());
        assert!(config.set("defaults.start_slide", "0").is_err());
        assert!(config.set("defaults.start_slide", "two").is_err());
        assert!(config.set("prompts.fullscreen_delay_ms", "-5").is_err());
        assert!(config.set("nonsense", "1").is_err());

        config.set("defaults.theme", "light").unwrap();
        config.set("defaults.start_slide", "3").unwrap();
        config.set("prompts.orientation_settle_ms", "250").unwrap();
        config.set("gate.hint", "ask the speaker").unwrap();

        assert_eq!(config.default_theme(), Some("light"));
        assert_eq!(config.start_slide(), Some(3));
        assert_eq!(config.orientation_settle(), Duration::from_millis(250));
        assert_eq!(config.gate_hint(), Some("ask the speaker"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);

        let mut config = Config::default();
        config.set("defaults.windowed", "true").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.windowed());
        assert!(loaded.prompts.is_none());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join(FILENAME)).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }
}
