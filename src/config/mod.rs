use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// Largest accepted `dropdown_cap`; a panel taller than this never fits a terminal
pub const MAX_DROPDOWN_CAP: usize = 200;

/// Timing and sizing knobs of the overlay framework
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Length of the dialog closing transition
    pub close_delay_ms: u64,

    /// Grace period between a picker losing focus and its panel closing
    pub blur_grace_ms: u64,

    /// Maximum candidates shown by viewport-anchored pickers
    pub dropdown_cap: usize,

    /// Maximum candidates shown by compact in-flow pickers
    pub compact_cap: usize,

    /// Narrowest dropdown panel, in cells
    pub min_panel_width: u16,

    /// Rows between a picker and its panel
    pub panel_gap: u16,

    /// UI tick interval
    pub tick_rate_ms: u64,

    /// Enable mouse support
    pub mouse_enabled: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            close_delay_ms: 200,
            blur_grace_ms: 150,
            dropdown_cap: 20,
            compact_cap: 4,
            min_panel_width: 24,
            panel_gap: 0,
            tick_rate_ms: 50,
            mouse_enabled: true,
        }
    }
}

impl UiSettings {
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data directory for logs
    pub data_dir: PathBuf,

    /// Overlay framework settings
    pub ui: UiSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_local_dir()
                .map(|dir| dir.join("folio"))
                .unwrap_or_else(|| PathBuf::from("./data")),
            ui: UiSettings::default(),
        }
    }
}

impl Config {
    /// Initialize configuration from file and environment.
    ///
    /// An explicit path must exist; otherwise the first of the default
    /// locations that exists is used. Environment variables win over both.
    pub async fn init(explicit: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match explicit {
            Some(path) => Self::load_from_path(path).await?,
            None => match Self::find_config_file() {
                Some(path) => Self::load_from_path(&path).await?,
                None => Self::default(),
            },
        };

        config.load_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Default configuration file locations, in priority order
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./.folio.json"), PathBuf::from("./folio.json")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("folio").join("folio.json"));
        }
        paths
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|path| path.exists())
    }

    /// Load configuration from a JSON file
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Parse configuration JSON; missing fields keep their defaults
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        if let Ok(data_dir) = std::env::var("FOLIO_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }

        let ui = &mut self.ui;
        if let Some(value) = env_parse("FOLIO_CLOSE_DELAY_MS") {
            ui.close_delay_ms = value;
        }
        if let Some(value) = env_parse("FOLIO_BLUR_GRACE_MS") {
            ui.blur_grace_ms = value;
        }
        if let Some(value) = env_parse("FOLIO_DROPDOWN_CAP") {
            ui.dropdown_cap = value;
        }
        if let Some(value) = env_parse("FOLIO_COMPACT_CAP") {
            ui.compact_cap = value;
        }
        if let Some(value) = env_parse("FOLIO_MIN_PANEL_WIDTH") {
            ui.min_panel_width = value;
        }
        if let Some(value) = env_parse("FOLIO_PANEL_GAP") {
            ui.panel_gap = value;
        }
        if let Some(value) = env_parse("FOLIO_TICK_MS") {
            ui.tick_rate_ms = value;
        }
        if let Ok(mouse) = std::env::var("FOLIO_MOUSE") {
            ui.mouse_enabled = mouse.to_lowercase() == "true";
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.ui.dropdown_cap == 0 || self.ui.compact_cap == 0 {
            return Err(anyhow::anyhow!("dropdown caps must be greater than 0"));
        }
        if self.ui.dropdown_cap > MAX_DROPDOWN_CAP {
            return Err(anyhow::anyhow!(
                "dropdown_cap ({}) must not exceed {}",
                self.ui.dropdown_cap,
                MAX_DROPDOWN_CAP
            ));
        }
        if self.ui.compact_cap > self.ui.dropdown_cap {
            return Err(anyhow::anyhow!(
                "compact_cap ({}) must not exceed dropdown_cap ({})",
                self.ui.compact_cap,
                self.ui.dropdown_cap
            ));
        }
        if self.ui.close_delay_ms == 0 {
            return Err(anyhow::anyhow!("close_delay_ms must be greater than 0"));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(anyhow::anyhow!("tick_rate_ms must be greater than 0"));
        }
        Ok(())
    }

    /// Log file used while the terminal is in raw mode
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("folio.log")
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: '{}' is not a valid value", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ui.close_delay(), Duration::from_millis(200));
        assert_eq!(config.ui.blur_grace(), Duration::from_millis(150));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "ui": { "dropdown_cap": 8 } }"#).unwrap();
        assert_eq!(config.ui.dropdown_cap, 8);
        assert_eq!(config.ui.compact_cap, 4);
        assert_eq!(config.ui.close_delay_ms, 200);
    }

    #[test]
    fn test_validate_rejects_bad_caps() {
        let mut config = Config::default();
        config.ui.dropdown_cap = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ui.compact_cap = 30;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ui.dropdown_cap = MAX_DROPDOWN_CAP + 1;
        assert!(config.validate().is_err());
        config.ui.dropdown_cap = MAX_DROPDOWN_CAP;
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_log_path_follows_configured_data_dir() {
        let dir = std::env::temp_dir().join(format!("folio-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let file = dir.join("folio.json");
        tokio::fs::write(&file, r#"{ "data_dir": "/srv/folio-data" }"#)
            .await
            .unwrap();

        let config = Config::load_from_path(&file).await.unwrap();
        assert_eq!(config.log_path(), PathBuf::from("/srv/folio-data/folio.log"));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Config::from_json("{ not json").is_err());
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_an_error() {
        let result = Config::init(Some(Path::new("./does-not-exist/folio.json"))).await;
        assert!(result.is_err());
    }
}
