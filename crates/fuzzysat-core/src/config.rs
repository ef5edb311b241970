use crate::app_config::{AppConfig, Defuzzification, Environment, GridSteps, InputPolicy};
use crate::reviews::LabelThresholds;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
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
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_step = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let step = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !step.is_finite() || step <= 0.0 {
            return Err(invalid(var, format!("step must be positive, got {raw}")));
        }
        Ok(step)
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !value.is_finite() {
            return Err(invalid(var, format!("value must be finite, got {raw}")));
        }
        Ok(value)
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let env = parse_environment(&or_default("FUZZYSAT_ENV", "development"))?;
    let log_level = or_default("FUZZYSAT_LOG_LEVEL", "info");
    let system_path = lookup("FUZZYSAT_SYSTEM_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let grid_steps = GridSteps {
        sentiment: parse_step("FUZZYSAT_SENTIMENT_STEP", "0.1")?,
        review_length: parse_step("FUZZYSAT_LENGTH_STEP", "1")?,
        satisfaction: parse_step("FUZZYSAT_SATISFACTION_STEP", "1")?,
    };

    let defuzz_raw = or_default("FUZZYSAT_DEFUZZIFY", "centroid");
    let defuzzification = Defuzzification::parse(&defuzz_raw).ok_or_else(|| {
        invalid(
            "FUZZYSAT_DEFUZZIFY",
            format!("unknown method '{defuzz_raw}'; expected centroid, bisector, mom, som or lom"),
        )
    })?;

    let policy_raw = or_default("FUZZYSAT_OUT_OF_RANGE", "clip");
    let input_policy = InputPolicy::parse(&policy_raw).ok_or_else(|| {
        invalid(
            "FUZZYSAT_OUT_OF_RANGE",
            format!("unknown policy '{policy_raw}'; expected clip or reject"),
        )
    })?;

    let low_max = parse_f64("FUZZYSAT_LOW_MAX", "4")?;
    let medium_max = parse_f64("FUZZYSAT_MEDIUM_MAX", "7")?;
    if low_max >= medium_max {
        return Err(invalid(
            "FUZZYSAT_MEDIUM_MAX",
            format!("must be greater than FUZZYSAT_LOW_MAX ({low_max}), got {medium_max}"),
        ));
    }

    let parallel = parse_bool("FUZZYSAT_PARALLEL", "false")?;

    Ok(AppConfig {
        env,
        log_level,
        system_path,
        grid_steps,
        defuzzification,
        input_policy,
        label_thresholds: LabelThresholds {
            low_max,
            medium_max,
        },
        parallel,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FUZZYSAT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
