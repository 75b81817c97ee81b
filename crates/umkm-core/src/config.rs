use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const MAX_MAP_ZOOM: u8 = 28;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("UMKM_ENV", "development"))?;
    let data_path = PathBuf::from(or_default("UMKM_DATA_PATH", "./config/umkm.yaml"));
    let log_level = or_default("UMKM_LOG_LEVEL", "info");

    let raw_page_size = or_default("UMKM_PAGE_SIZE", "10");
    let page_size = raw_page_size
        .parse::<NonZeroUsize>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "UMKM_PAGE_SIZE".to_string(),
            reason: e.to_string(),
        })?;

    let raw_zoom = or_default("UMKM_MAP_ZOOM", "16");
    let map_zoom = raw_zoom
        .parse::<u8>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "UMKM_MAP_ZOOM".to_string(),
            reason: e.to_string(),
        })?;
    if map_zoom > MAX_MAP_ZOOM {
        return Err(ConfigError::InvalidEnvVar {
            var: "UMKM_MAP_ZOOM".to_string(),
            reason: format!("zoom {map_zoom} exceeds maximum {MAX_MAP_ZOOM}"),
        });
    }

    Ok(AppConfig {
        env,
        data_path,
        log_level,
        page_size,
        map_zoom,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "UMKM_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
