use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// Application-level constants
pub const APP_NAME: &str = "clinic-calendar";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "clinic_calendar=info,warn"
}

/// Grid layout settings. Missing fields in a config file take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// First hour shown (`08:00`).
    pub start_hour: u32,
    /// Last hour shown; its slots run to the end of the hour (`19:30`).
    pub end_hour: u32,
    pub step_minutes: u32,
    /// Entries drawn in a day-view cell before the `+K` marker.
    pub max_visible_per_cell: usize,
    pub use_color: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            start_hour: 8,
            end_hour: 19,
            step_minutes: 30,
            max_visible_per_cell: 4,
            use_color: true,
        }
    }
}

impl GridConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| CalendarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), "Loaded grid configuration");
        Ok(config)
    }

    /// Reject settings the slot generator would silently turn into an empty grid.
    pub fn validate(&self) -> Result<()> {
        if self.step_minutes == 0 {
            return Err(CalendarError::Config("step_minutes must be positive".into()));
        }
        if self.start_hour > 23 || self.end_hour > 23 {
            return Err(CalendarError::Config("hours must be between 0 and 23".into()));
        }
        if self.end_hour < self.start_hour {
            return Err(CalendarError::Config(
                "end_hour must not be before start_hour".into(),
            ));
        }
        if self.max_visible_per_cell == 0 {
            return Err(CalendarError::Config(
                "max_visible_per_cell must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_clinic_day() {
        let config = GridConfig::default();
        assert_eq!(config.start_hour, 8);
        assert_eq!(config.end_hour, 19);
        assert_eq!(config.step_minutes, 30);
        assert_eq!(config.max_visible_per_cell, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GridConfig::from_json_str(r#"{"step_minutes": 15}"#).unwrap();
        assert_eq!(config.step_minutes, 15);
        assert_eq!(config.start_hour, 8);
    }

    #[test]
    fn zero_step_is_rejected() {
        let err = GridConfig::from_json_str(r#"{"step_minutes": 0}"#).unwrap_err();
        assert!(matches!(err, CalendarError::Config(_)));
    }

    #[test]
    fn reversed_hours_are_rejected() {
        let config = GridConfig {
            start_hour: 18,
            end_hour: 9,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GridConfig::load(Path::new("/nonexistent/grid.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/grid.json"));
    }

    #[test]
    fn app_name_is_set() {
        assert_eq!(APP_NAME, "clinic-calendar");
    }
}
