//! Application configuration loaded from environment variables.
//!
//! Everything has a sensible default so the library works out of the box;
//! deployments override the special mission zone and analysis limits via
//! env vars (a `.env` file is honored for local development).

use std::env;
use std::str::FromStr;

use validator::Validate;

use crate::models::GeoBounds;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Special mission zone rectangle
    pub zone_region: GeoBounds,
    /// Days of history used by a standard analysis
    pub default_analysis_days: u32,
    /// Upper bound on the analysis window
    pub max_analysis_days: u32,
    /// Smallest farm size accepted for analysis (hectares)
    pub min_farm_hectares: f64,
    /// Largest farm size accepted for analysis (hectares)
    pub max_farm_hectares: f64,
}

impl Default for Config {
    /// Defaults for tests and local development: the special mission zone
    /// covers the Sacramento Valley.
    fn default() -> Self {
        Self {
            zone_region: GeoBounds::new(40.0, 38.5, -121.0, -122.5),
            default_analysis_days: 30,
            max_analysis_days: 90,
            min_farm_hectares: 0.1,
            max_farm_hectares: 10_000.0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        let config = Self {
            zone_region: GeoBounds::new(
                parse_env("ZONE_NORTH", defaults.zone_region.north)?,
                parse_env("ZONE_SOUTH", defaults.zone_region.south)?,
                parse_env("ZONE_EAST", defaults.zone_region.east)?,
                parse_env("ZONE_WEST", defaults.zone_region.west)?,
            ),
            default_analysis_days: parse_env("DEFAULT_ANALYSIS_DAYS", defaults.default_analysis_days)?,
            max_analysis_days: parse_env("MAX_ANALYSIS_DAYS", defaults.max_analysis_days)?,
            min_farm_hectares: parse_env("MIN_FARM_HECTARES", defaults.min_farm_hectares)?,
            max_farm_hectares: parse_env("MAX_FARM_HECTARES", defaults.max_farm_hectares)?,
        };

        config.check()?;
        Ok(config)
    }

    /// Validate cross-field constraints.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.zone_region
            .validate()
            .map_err(|_| ConfigError::InvalidZone("coordinates out of range"))?;

        if !self.zone_region.is_well_formed() {
            return Err(ConfigError::InvalidZone(
                "north must be >= south and east must be >= west",
            ));
        }

        if self.max_analysis_days < self.default_analysis_days {
            return Err(ConfigError::InvalidLimit(
                "MAX_ANALYSIS_DAYS must be >= DEFAULT_ANALYSIS_DAYS",
            ));
        }

        if self.max_farm_hectares <= self.min_farm_hectares {
            return Err(ConfigError::InvalidLimit(
                "MAX_FARM_HECTARES must be greater than MIN_FARM_HECTARES",
            ));
        }

        Ok(())
    }
}

fn parse_env<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("Invalid zone region: {0}")]
    InvalidZone(&'static str),

    #[error("Invalid analysis limit: {0}")]
    InvalidLimit(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.check().is_ok());
        assert_eq!(config.default_analysis_days, 30);
        assert_eq!(config.max_analysis_days, 90);
        assert!(config.zone_region.is_well_formed());
    }

    #[test]
    fn test_inverted_zone_is_rejected() {
        let config = Config {
            zone_region: GeoBounds::new(38.5, 40.0, -121.0, -122.5),
            ..Config::default()
        };
        assert!(matches!(config.check(), Err(ConfigError::InvalidZone(_))));
    }

    #[test]
    fn test_out_of_range_zone_is_rejected() {
        let config = Config {
            zone_region: GeoBounds::new(95.0, 38.5, -121.0, -122.5),
            ..Config::default()
        };
        assert!(matches!(config.check(), Err(ConfigError::InvalidZone(_))));
    }

    #[test]
    fn test_farm_size_limits_must_be_ordered() {
        let config = Config {
            min_farm_hectares: 100.0,
            max_farm_hectares: 10.0,
            ..Config::default()
        };
        assert!(matches!(config.check(), Err(ConfigError::InvalidLimit(_))));
    }
}
