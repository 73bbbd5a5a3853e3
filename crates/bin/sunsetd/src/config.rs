//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `sunset.toml` in the working directory (or the path in
//! `SUNSET_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use serde::Deserialize;

use sunset_domain::error::SunsetError;
use sunset_domain::settings::Settings;

const DEFAULT_PATH: &str = "sunset.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Integration toggles.
    pub integrations: IntegrationsConfig,
    /// Day/evening/night schedule and levels.
    pub schedule: ScheduleConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Per-integration toggles.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    /// Enable the virtual/demo lights.
    pub virtual_enabled: bool,
}

/// Schedule keys; anything left out keeps the engine default.
///
/// `bed_time = "null"` disables brightness automation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub evening_time: Option<String>,
    pub night_time: Option<String>,
    pub morning_time: Option<String>,
    pub bed_time: Option<String>,
    pub day_color_temp: Option<i64>,
    pub night_color_temp: Option<i64>,
    pub night_brightness: Option<i64>,
}

impl ScheduleConfig {
    /// Parse and validate into engine [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unparseable time, a zero-length
    /// evening or a non-positive level.
    pub fn settings(&self) -> Result<Settings, SunsetError> {
        let mut builder = Settings::builder();
        if let Some(value) = &self.evening_time {
            builder = builder.evening_time(value.as_str());
        }
        if let Some(value) = &self.night_time {
            builder = builder.night_time(value.as_str());
        }
        if let Some(value) = &self.morning_time {
            builder = builder.morning_time(value.as_str());
        }
        if let Some(value) = &self.bed_time {
            builder = builder.bed_time(value.as_str());
        }
        if let Some(value) = self.day_color_temp {
            builder = builder.day_color_temp(value);
        }
        if let Some(value) = self.night_color_temp {
            builder = builder.night_color_temp(value);
        }
        if let Some(value) = self.night_brightness {
            builder = builder.night_brightness(value);
        }
        builder.build()
    }
}

impl Config {
    /// Load configuration from `sunset.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SUNSET_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SUNSET_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("SUNSET_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SUNSET_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("SUNSET_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        self.schedule.settings()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Engine settings from the `[schedule]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Schedule`] if the schedule is invalid.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        Ok(self.schedule.settings()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8123,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "sunsetd=info,sunset=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            virtual_enabled: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Invalid `[schedule]` section.
    #[error("invalid schedule: {0}")]
    Schedule(#[from] SunsetError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunset_domain::light::ColorTemp;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8123);
        assert_eq!(
            config.logging.filter,
            "sunsetd=info,sunset=info,tower_http=debug"
        );
        assert!(config.integrations.virtual_enabled);
    }

    #[test]
    fn should_use_engine_defaults_for_empty_schedule() {
        let config: Config = toml::from_str("").unwrap();
        let settings = config.settings().unwrap();
        assert_eq!(settings.color.day, ColorTemp::from_kelvin(6250));
        assert_eq!(settings.color.night, ColorTemp::from_kelvin(2500));
        assert_eq!(settings.brightness.night, 127);
        assert!(settings.schedule.bed.is_some());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [logging]
            filter = 'debug'

            [integrations]
            virtual_enabled = false

            [schedule]
            evening_time = '18:30'
            night_time = '22:00:00'
            morning_time = '07:00'
            bed_time = 'null'
            day_color_temp = 5500
            night_color_temp = 2700
            night_brightness = 80
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.filter, "debug");
        assert!(!config.integrations.virtual_enabled);

        let settings = config.settings().unwrap();
        assert_eq!(settings.schedule.evening.to_string(), "18:30:00");
        assert_eq!(settings.schedule.night.to_string(), "22:00:00");
        assert_eq!(settings.schedule.bed, None);
        assert_eq!(settings.color.day, ColorTemp::from_kelvin(5500));
        assert_eq!(settings.brightness.night, 80);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 8123);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_unparseable_time() {
        let config: Config = toml::from_str("[schedule]\nevening_time = 'dusk'").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Schedule(_))));
    }

    #[test]
    fn should_reject_zero_length_evening() {
        let config: Config =
            toml::from_str("[schedule]\nevening_time = '23:00'\nnight_time = '23:00'").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Schedule(_))));
    }

    #[test]
    fn should_reject_non_positive_levels() {
        for toml in [
            "[schedule]\nday_color_temp = 0",
            "[schedule]\nnight_color_temp = -2500",
            "[schedule]\nnight_brightness = 0",
        ] {
            let config: Config = toml::from_str(toml).unwrap();
            assert!(config.validate().is_err(), "{toml}");
        }
    }

    #[test]
    fn should_accept_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_format_custom_bind_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
