//! Viewer configuration model.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{ProcmonError, Result};

/// Root configuration for the event viewer.
///
/// Every field has a default, so a partial JSON file only overrides what it
/// names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Delay before a follow trigger scrolls the newest row into view.
    pub follow_delay_ms: u64,
    /// Pointer dwell time before a tooltip shows.
    pub hover_show_ms: u64,
    /// Time a tooltip lingers after the pointer leaves.
    pub hover_hide_ms: u64,
    /// Skeleton rows rendered while loading.
    pub placeholder_rows: usize,
    /// UI tick interval.
    pub tick_rate_ms: u64,
    /// Feed refresh interval.
    pub refresh_interval_ms: u64,
    /// Whether follow mode is active on startup.
    pub follow: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            follow_delay_ms: constants::FOLLOW_DELAY_MS,
            hover_show_ms: constants::HOVER_SHOW_DELAY_MS,
            hover_hide_ms: constants::HOVER_HIDE_DELAY_MS,
            placeholder_rows: constants::PLACEHOLDER_ROWS,
            tick_rate_ms: constants::TICK_RATE_MS,
            refresh_interval_ms: constants::REFRESH_INTERVAL_MS,
            follow: true,
        }
    }
}

impl ViewerConfig {
    /// Loads the configuration from a JSON file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is not valid
    /// JSON, or carries a zero tick rate.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ProcmonError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| ProcmonError::Config {
            message: format!("{}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            return Err(ProcmonError::Config {
                message: "tick_rate_ms must be greater than zero".into(),
            });
        }
        if self.refresh_interval_ms == 0 {
            return Err(ProcmonError::Config {
                message: "refresh_interval_ms must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Follow delay as a [`Duration`].
    #[must_use]
    pub const fn follow_delay(&self) -> Duration {
        Duration::from_millis(self.follow_delay_ms)
    }

    /// Hover show delay as a [`Duration`].
    #[must_use]
    pub const fn hover_show(&self) -> Duration {
        Duration::from_millis(self.hover_show_ms)
    }

    /// Hover hide delay as a [`Duration`].
    #[must_use]
    pub const fn hover_hide(&self) -> Duration {
        Duration::from_millis(self.hover_hide_ms)
    }

    /// Tick interval as a [`Duration`].
    #[must_use]
    pub const fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Feed refresh interval as a [`Duration`].
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = ViewerConfig::default();
        assert_eq!(config.follow_delay(), Duration::from_millis(500));
        assert_eq!(config.hover_show(), Duration::from_millis(250));
        assert_eq!(config.hover_hide(), Duration::from_millis(400));
        assert_eq!(config.placeholder_rows, 10);
        assert!(config.follow);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ViewerConfig::load(&dir.path().join("absent.json")).expect("load");
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("viewer.json");
        std::fs::write(&path, r#"{"follow": false, "placeholder_rows": 4}"#).expect("write");

        let config = ViewerConfig::load(&path).expect("load");
        assert!(!config.follow);
        assert_eq!(config.placeholder_rows, 4);
        assert_eq!(config.follow_delay_ms, 500);
    }

    #[test]
    fn invalid_json_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("viewer.json");
        std::fs::write(&path, "{not json").expect("write");

        let err = ViewerConfig::load(&path).expect_err("should fail");
        assert!(matches!(err, ProcmonError::Config { .. }));
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("viewer.json");
        std::fs::write(&path, r#"{"tick_rate_ms": 0}"#).expect("write");

        assert!(ViewerConfig::load(&path).is_err());
    }
}
