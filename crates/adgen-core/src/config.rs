use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Job deadline bounds: anything under 60 s aborts healthy backend jobs;
/// observed jobs run up to about 20 minutes, so that is the hard ceiling.
const JOB_DEADLINE_MIN_SECS: u64 = 60;
const JOB_DEADLINE_MAX_SECS: u64 = 1_200;

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

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
pub(crate) fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let completion_base_url = require("ADGEN_COMPLETION_URL")?;
    let completion_api_key = lookup("ADGEN_COMPLETION_API_KEY").ok();
    let completion_model = or_default("ADGEN_COMPLETION_MODEL", "creative-writer-1");

    let env = parse_environment(&or_default("ADGEN_ENV", "development"));
    let bind_addr = parse_addr("ADGEN_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ADGEN_LOG_LEVEL", "info");

    let completion_timeout_secs = parse_u64("ADGEN_COMPLETION_TIMEOUT_SECS", "30")?;
    let completion_max_retries = parse_u32("ADGEN_COMPLETION_MAX_RETRIES", "3")?;
    let completion_backoff_base_ms = parse_u64("ADGEN_COMPLETION_BACKOFF_BASE_MS", "1000")?;

    let poll_base_delay_ms = parse_u64("ADGEN_POLL_BASE_DELAY_MS", "2000")?;
    let poll_delay_step_ms = parse_u64("ADGEN_POLL_DELAY_STEP_MS", "500")?;
    let poll_max_delay_ms = parse_u64("ADGEN_POLL_MAX_DELAY_MS", "6000")?;
    let poll_jitter_ms = parse_u64("ADGEN_POLL_JITTER_MS", "400")?;

    let job_deadline_secs = parse_u64("ADGEN_JOB_DEADLINE_SECS", "120")?;
    if !(JOB_DEADLINE_MIN_SECS..=JOB_DEADLINE_MAX_SECS).contains(&job_deadline_secs) {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADGEN_JOB_DEADLINE_SECS".to_string(),
            reason: format!(
                "must be between {JOB_DEADLINE_MIN_SECS} and {JOB_DEADLINE_MAX_SECS} seconds"
            ),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        completion_base_url,
        completion_api_key,
        completion_model,
        completion_timeout_secs,
        completion_max_retries,
        completion_backoff_base_ms,
        poll_base_delay_ms,
        poll_delay_step_ms,
        poll_max_delay_ms,
        poll_jitter_ms,
        job_deadline_secs,
    })
}

fn parse_environment(raw: &str) -> Environment {
    match raw.trim().to_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
