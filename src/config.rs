//! Configuration management for the `Tripsmith` pipeline
//!
//! Handles loading configuration from files and environment variables,
//! and validates every setting before the pipeline is built.

use crate::PlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripsmithConfig {
    /// Pipeline tuning
    #[serde(default)]
    pub planner: PlannerSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pipeline tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerSettings {
    /// Days between today and the first day of the generated trip
    #[serde(default = "default_trip_start_offset")]
    pub trip_start_offset_days: u32,
    /// Trip length used when the request names none
    #[serde(default = "default_duration_days")]
    pub default_duration_days: u32,
    /// Longest trip that will be planned; longer requested durations are ignored
    #[serde(default = "default_max_duration_days")]
    pub max_duration_days: u32,
    /// Result bound passed to every search call
    #[serde(default = "default_search_results")]
    pub search_results_per_query: u32,
    /// Upper bound on template queries built by the fallback path
    #[serde(default = "default_max_fallback_queries")]
    pub max_fallback_queries: u32,
    /// Preference values turned into queries, per preference list
    #[serde(default = "default_max_preference_queries")]
    pub max_preference_queries: u32,
    /// Screen requests with the guardrail before planning
    #[serde(default)]
    pub guardrail_enabled: bool,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_trip_start_offset() -> u32 {
    14
}

fn default_duration_days() -> u32 {
    3
}

fn default_max_duration_days() -> u32 {
    30
}

fn default_search_results() -> u32 {
    3
}

fn default_max_fallback_queries() -> u32 {
    6
}

fn default_max_preference_queries() -> u32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            trip_start_offset_days: default_trip_start_offset(),
            default_duration_days: default_duration_days(),
            max_duration_days: default_max_duration_days(),
            search_results_per_query: default_search_results(),
            max_fallback_queries: default_max_fallback_queries(),
            max_preference_queries: default_max_preference_queries(),
            guardrail_enabled: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for TripsmithConfig {
    fn default() -> Self {
        Self {
            planner: PlannerSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TripsmithConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRIPSMITH_PLANNER__DEFAULT_DURATION_DAYS=5 style overrides
        builder = builder.add_source(
            Environment::with_prefix("TRIPSMITH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripsmithConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripsmith").join("config.toml"))
    }

    /// Apply default values to zeroed or empty fields
    pub fn apply_defaults(&mut self) {
        if self.planner.default_duration_days == 0 {
            self.planner.default_duration_days = default_duration_days();
        }
        if self.planner.max_duration_days == 0 {
            self.planner.max_duration_days = default_max_duration_days();
        }
        if self.planner.search_results_per_query == 0 {
            self.planner.search_results_per_query = default_search_results();
        }
        if self.planner.max_fallback_queries == 0 {
            self.planner.max_fallback_queries = default_max_fallback_queries();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        let planner = &self.planner;

        if planner.trip_start_offset_days > 365 {
            return Err(
                PlannerError::config("Trip start offset cannot exceed 365 days").into(),
            );
        }

        if !(1..=60).contains(&planner.default_duration_days) {
            return Err(PlannerError::config(
                "Default trip duration must be between 1 and 60 days",
            )
            .into());
        }

        if !(1..=365).contains(&planner.max_duration_days) {
            return Err(PlannerError::config(
                "Maximum trip duration must be between 1 and 365 days",
            )
            .into());
        }

        if planner.default_duration_days > planner.max_duration_days {
            return Err(PlannerError::config(
                "Default trip duration cannot exceed the maximum trip duration",
            )
            .into());
        }

        if !(1..=10).contains(&planner.search_results_per_query) {
            return Err(PlannerError::config(
                "Search results per query must be between 1 and 10",
            )
            .into());
        }

        if !(1..=20).contains(&planner.max_fallback_queries) {
            return Err(PlannerError::config(
                "Maximum fallback queries must be between 1 and 20",
            )
            .into());
        }

        if planner.max_preference_queries > planner.max_fallback_queries {
            return Err(PlannerError::config(
                "Maximum preference queries cannot exceed maximum fallback queries",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TripsmithConfig::default();
        assert_eq!(config.planner.trip_start_offset_days, 14);
        assert_eq!(config.planner.default_duration_days, 3);
        assert_eq!(config.planner.search_results_per_query, 3);
        assert!(!config.planner.guardrail_enabled);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripsmithConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TripsmithConfig::default();
        config.planner.default_duration_days = 90;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("between 1 and 60 days")
        );
    }

    #[test]
    fn test_apply_defaults_fills_zeroed_fields() {
        let mut config = TripsmithConfig::default();
        config.planner.default_duration_days = 0;
        config.logging.format = String::new();
        config.apply_defaults();
        assert_eq!(config.planner.default_duration_days, 3);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[planner]\ndefault_duration_days = 5\ntrip_start_offset_days = 7\n\n\
             [logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = TripsmithConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.planner.default_duration_days, 5);
        assert_eq!(config.planner.trip_start_offset_days, 7);
        assert_eq!(config.planner.search_results_per_query, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[logging]\nformat = \"xml\"").unwrap();

        let result = TripsmithConfig::load_from_path(Some(file.path().to_path_buf()));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation_max_duration() {
        let mut config = TripsmithConfig::default();
        assert_eq!(config.planner.max_duration_days, 30);

        config.planner.max_duration_days = 400;
        assert!(config.validate().is_err());

        config.planner.max_duration_days = 2;
        let result = config.validate();
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("cannot exceed the maximum trip duration")
        );
    }

    #[test]
    fn test_environment_variable_override() {
        let file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();

        // SAFETY: Test environment, no other test reads this variable
        unsafe {
            env::set_var("TRIPSMITH_PLANNER__MAX_PREFERENCE_QUERIES", "4");
        }

        let result = TripsmithConfig::load_from_path(Some(file.path().to_path_buf()));

        // SAFETY: Test cleanup
        unsafe {
            env::remove_var("TRIPSMITH_PLANNER__MAX_PREFERENCE_QUERIES");
        }

        let config = result.unwrap();
        assert_eq!(config.planner.max_preference_queries, 4);
        assert_eq!(config.planner.default_duration_days, 3);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = TripsmithConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("tripsmith"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
