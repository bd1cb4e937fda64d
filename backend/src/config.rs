//! Configuration management for the StockLens platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with STOCKLENS_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT authentication configuration
    pub jwt: JwtConfig,

    /// Report engine thresholds and default windows
    pub reports: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWT tokens
    pub secret: String,

    /// Access token expiration in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiration in seconds
    pub refresh_token_expiry: i64,
}

/// Classification thresholds and default report windows
///
/// Passed into the reporting engines explicitly so tenants can override
/// them without process-wide state.
#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Cumulative-percentage ceiling for class A
    pub abc_class_a_threshold: f64,
    /// Cumulative-percentage ceiling for class B (class C above)
    pub abc_class_b_threshold: f64,
    /// CV ceiling for class X
    pub xyz_class_x_threshold: f64,
    /// CV ceiling for class Y (class Z above)
    pub xyz_class_y_threshold: f64,
    /// Default ABC window in days
    pub abc_default_days: i64,
    /// Default XYZ window in weeks
    pub xyz_default_weeks: i64,
    /// Default turnover window in days
    pub turnover_default_days: i64,
    /// Default forecast window in days
    pub forecast_default_days: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            abc_class_a_threshold: 80.0,
            abc_class_b_threshold: 95.0,
            xyz_class_x_threshold: 0.5,
            xyz_class_y_threshold: 1.0,
            abc_default_days: 90,
            xyz_default_weeks: 12,
            turnover_default_days: 30,
            forecast_default_days: 30,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("STOCKLENS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("jwt.access_token_expiry", 3600)?
            .set_default("jwt.refresh_token_expiry", 604800)?
            .set_default("reports.abc_class_a_threshold", 80.0)?
            .set_default("reports.abc_class_b_threshold", 95.0)?
            .set_default("reports.xyz_class_x_threshold", 0.5)?
            .set_default("reports.xyz_class_y_threshold", 1.0)?
            .set_default("reports.abc_default_days", 90)?
            .set_default("reports.xyz_default_weeks", 12)?
            .set_default("reports.turnover_default_days", 30)?
            .set_default("reports.forecast_default_days", 30)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (STOCKLENS_ prefix)
            .add_source(
                Environment::with_prefix("STOCKLENS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
