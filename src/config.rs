// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::View;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;

fn default_max_pages() -> usize {
    crate::text::DEFAULT_MAX_PAGES
}

fn default_min_text_chars() -> usize {
    50
}

fn default_preview_chars() -> usize {
    1500
}

fn default_fetch_limit() -> usize {
    crate::store::DEFAULT_FETCH_LIMIT
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// PDF pages read per upload.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    /// Below this many non-blank characters a document counts as unreadable.
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    #[serde(default)]
    pub default_view: View,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Match the serde defaults
            max_pages: default_max_pages(),
            min_text_chars: default_min_text_chars(),
            preview_chars: default_preview_chars(),
            fetch_limit: default_fetch_limit(),
            default_view: View::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers can fall back to defaults.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Defaults when no file exists yet; any other failure is reported.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    ///  - Fast path: our explicit "Config file not found" message
    ///  - Otherwise an underlying IO NotFound anywhere in the error chain
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// `log_level` as a filter; unknown values fall back to `Info`.
    pub fn log_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.log_level.trim()).unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_missing_file_gives_defaults() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
        assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "default_view = \"month\"\nmin_text_chars = 80\n").unwrap();

        let cfg = Config::load(&ctx).unwrap();
        assert_eq!(cfg.default_view, View::Month);
        assert_eq!(cfg.min_text_chars, 80);
        assert_eq!(cfg.max_pages, 5);
        assert_eq!(cfg.preview_chars, 1500);
        assert_eq!(cfg.fetch_limit, 500);
    }

    #[test]
    fn test_broken_file_is_not_treated_as_missing() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "max_pages = \"lots\"").unwrap();

        let err = Config::load_or_default(&ctx).unwrap_err();
        assert!(!Config::is_missing_config_error(&err));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_save_then_load() {
        let ctx = TestContext::new();
        let cfg = Config {
            default_view: View::All,
            log_level: "debug".to_string(),
            ..Config::default()
        };
        cfg.save(&ctx).unwrap();
        let loaded = Config::load(&ctx).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.log_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let cfg = Config {
            log_level: "chatty".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.log_filter(), LevelFilter::Info);
    }
}
