//! Console configuration
//!
//! Layered from `config/default`, `config/local`, an optional `--config`
//! file and `AUTOPAY__`-prefixed environment variables
//! (`AUTOPAY__STATE__SIMULATION_DELAY_MS=0`), later sources winning.
//! Every field has a default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use autopay_state::StateConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Delays and bounds of the in-memory stores
    #[serde(default)]
    pub state: StateConfig,

    /// Terminal dashboard settings
    #[serde(default)]
    pub tui: TuiSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiSettings {
    /// Input poll interval in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Where `x` on the logs view writes its JSON
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            export_dir: default_export_dir(),
        }
    }
}

impl TuiSettings {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty, compact)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Log file used while the dashboard owns the terminal; none disables
    /// logging in that mode
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

fn default_tick_rate_ms() -> u64 {
    150
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl AppConfig {
    /// Load configuration from files and the environment
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        Self::load_from(Path::new("."), config_path)
    }

    /// Load with `config/default` and `config/local` resolved against `base`
    pub fn load_from(base: &Path, config_path: Option<&str>) -> anyhow::Result<Self> {
        let layer = |name: &str| base.join(name).to_string_lossy().into_owned();

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(&layer("config/default")).required(false))
            .add_source(config::File::with_name(&layer("config/local")).required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("AUTOPAY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("failed to read configuration")?;
        config
            .try_deserialize()
            .context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.state.simulation_delay_ms, 2000);
        assert_eq!(config.state.wallet_connect_delay_ms, 1500);
        assert_eq!(config.tui.tick_rate(), Duration::from_millis(150));
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = std::env::temp_dir().join(format!("autopay-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("console.toml");
        std::fs::write(
            &path,
            "[state]\nsimulation_delay_ms = 10\n\n[logging]\nlevel = \"debug\"\nfile = \"autopay.log\"\n",
        )
        .unwrap();

        let config = AppConfig::load(path.to_str()).unwrap();
        assert_eq!(config.state.simulation_delay_ms, 10);
        assert_eq!(config.state.notice_capacity, 100);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("autopay.log")));
        assert_eq!(config.tui.export_dir, PathBuf::from("out"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_explicit_file_overrides_shipped_defaults() {
        let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        assert!(workspace_root.join("config/default.toml").exists());

        let dir = std::env::temp_dir().join(format!("autopay-override-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("override.toml");
        std::fs::write(
            &path,
            "[state]\nsimulation_delay_ms = 10\n\n[tui]\ntick_rate_ms = 50\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&workspace_root, path.to_str()).unwrap();
        assert_eq!(config.state.simulation_delay_ms, 10);
        assert_eq!(config.tui.tick_rate_ms, 50);
        assert_eq!(config.logging.level, "debug");
        // untouched keys still come from config/default.toml
        assert_eq!(config.state.wallet_connect_delay_ms, 1500);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(AppConfig::load(Some("/nonexistent/autopay-console.toml")).is_err());
    }
}
