//! Scheduler settings.
//!
//! # Responsibility
//! - Describe tunables for generation, grid layout, paging and logging.
//! - Load them from JSON with defaults for every omitted field.
//!
//! # Invariants
//! - A `SchedulerSettings` returned by `load`/`from_json_str` has passed
//!   `validate()`.

use crate::board::roster::DEFAULT_OR_PAGE_SIZE;
use crate::board::time_grid::DEFAULT_HOUR_HEIGHT_PX;
use crate::logging::{default_log_level, normalize_level};
use crate::service::schedule_service::DEFAULT_SLOT_HOURS;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read settings: {err}"),
            Self::Parse(err) => write!(f, "failed to parse settings: {err}"),
            Self::Invalid(message) => write!(f, "invalid settings: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerSettings {
    /// Length of every generated assignment slot.
    pub slot_hours: u32,
    pub hour_height_px: u32,
    pub or_page_size: usize,
    /// Fixed seed for reproducible generation; entropy-seeded when absent.
    pub rng_seed: Option<u64>,
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when absent.
    pub log_dir: Option<String>,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            slot_hours: DEFAULT_SLOT_HOURS,
            hour_height_px: DEFAULT_HOUR_HEIGHT_PX,
            or_page_size: DEFAULT_OR_PAGE_SIZE,
            rng_seed: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl SchedulerSettings {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=23).contains(&self.slot_hours) {
            return Err(ConfigError::Invalid(format!(
                "slot_hours must be within 1..=23, got {}",
                self.slot_hours
            )));
        }
        if self.hour_height_px == 0 {
            return Err(ConfigError::Invalid(
                "hour_height_px must be positive".to_string(),
            ));
        }
        if self.or_page_size == 0 {
            return Err(ConfigError::Invalid(
                "or_page_size must be positive".to_string(),
            ));
        }
        normalize_level(&self.log_level).map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SchedulerSettings};

    #[test]
    fn empty_object_yields_defaults() {
        let settings = SchedulerSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, SchedulerSettings::default());
        assert_eq!(settings.slot_hours, 2);
        assert_eq!(settings.hour_height_px, 120);
        assert_eq!(settings.or_page_size, 10);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let settings =
            SchedulerSettings::from_json_str(r#"{"slot_hours": 3, "rng_seed": 7}"#).unwrap();
        assert_eq!(settings.slot_hours, 3);
        assert_eq!(settings.rng_seed, Some(7));
        assert_eq!(settings.or_page_size, 10);
    }

    #[test]
    fn out_of_range_and_unknown_fields_are_rejected() {
        let err = SchedulerSettings::from_json_str(r#"{"slot_hours": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SchedulerSettings::from_json_str(r#"{"log_level": "loud"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SchedulerSettings::from_json_str(r#"{"slots": 2}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"hour_height_px": 60, "or_page_size": 5}"#).unwrap();

        let settings = SchedulerSettings::load(&path).unwrap();
        assert_eq!(settings.hour_height_px, 60);
        assert_eq!(settings.or_page_size, 5);

        let err = SchedulerSettings::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
