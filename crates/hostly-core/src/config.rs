use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_USER_AGENT: &str = "hostly/0.1 (local-discovery)";
pub const DEFAULT_STAR_LINES: &str = "20,55,72,10";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty values count as unset so `.env` templates can leave keys blank.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("HOSTLY_ENV", "development"))?;
    let log_level = or_default("HOSTLY_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("HOSTLY_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("HOSTLY_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("HOSTLY_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let google_maps_api_key = optional("GOOGLE_MAPS_API_KEY");
    let foursquare_api_key = optional("FOURSQUARE_API_KEY");
    let overpass_url = or_default("HOSTLY_OVERPASS_URL", DEFAULT_OVERPASS_URL);
    let provider_timeout_secs = parse_u64("HOSTLY_PROVIDER_TIMEOUT_SECS", "10")?;
    if provider_timeout_secs == 0 {
        return Err(invalid(
            "HOSTLY_PROVIDER_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("HOSTLY_USER_AGENT", DEFAULT_USER_AGENT);

    let radius_raw = or_default("HOSTLY_TRANSIT_RADIUS_METERS", "500");
    let transit_radius_meters = radius_raw
        .parse::<f64>()
        .map_err(|e| invalid("HOSTLY_TRANSIT_RADIUS_METERS", e.to_string()))?;
    if !transit_radius_meters.is_finite() || transit_radius_meters <= 0.0 {
        return Err(invalid(
            "HOSTLY_TRANSIT_RADIUS_METERS",
            format!("must be a positive number of meters, got {radius_raw}"),
        ));
    }

    let transit_star_lines =
        parse_star_lines(&or_default("HOSTLY_TRANSIT_STAR_LINES", DEFAULT_STAR_LINES));

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        google_maps_api_key,
        foursquare_api_key,
        overpass_url,
        provider_timeout_secs,
        user_agent,
        transit_radius_meters,
        transit_star_lines,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HOSTLY_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Split a comma-separated list, dropping blanks and keeping order.
fn parse_star_lines(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
