use crate::app_config::{AddToCartMode, AppConfig, Environment};
use crate::ConfigError;

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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let base_url = require("SHOPFRONT_BASE_URL")?;
    let env = parse_environment(&or_default("SHOPFRONT_ENV", "development"))?;
    let log_level = or_default("SHOPFRONT_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("SHOPFRONT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPFRONT_USER_AGENT", "shopfront/0.1 (storefront-client)");
    let csrf_token = lookup("SHOPFRONT_CSRF_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());
    let session_id = lookup("SHOPFRONT_SESSION_ID")
        .ok()
        .filter(|t| !t.trim().is_empty());

    let search_debounce_ms = parse_u64("SHOPFRONT_SEARCH_DEBOUNCE_MS", "300")?;
    let currency_label = or_default("SHOPFRONT_CURRENCY_LABEL", crate::DEFAULT_CURRENCY_LABEL);
    let price_fallback = parse_bool(&or_default("SHOPFRONT_PRICE_FALLBACK", "true"))
        .ok_or_else(|| invalid("SHOPFRONT_PRICE_FALLBACK", "expected true or false".into()))?;
    let add_to_cart_mode = parse_add_to_cart_mode(&or_default("SHOPFRONT_ADD_TO_CART_MODE", "inline"))?;

    let otp_length = parse_usize("SHOPFRONT_OTP_LENGTH", "6")?;
    if otp_length == 0 {
        return Err(invalid("SHOPFRONT_OTP_LENGTH", "must be at least 1".into()));
    }

    Ok(AppConfig {
        base_url,
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        csrf_token,
        session_id,
        search_debounce_ms,
        currency_label,
        price_fallback,
        add_to_cart_mode,
        otp_length,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_add_to_cart_mode(s: &str) -> Result<AddToCartMode, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "inline" => Ok(AddToCartMode::Inline),
        "modal" => Ok(AddToCartMode::Modal),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_ADD_TO_CART_MODE".to_string(),
            reason: format!("expected inline or modal, got \"{other}\""),
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
