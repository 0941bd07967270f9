//! Configuration validation.
//!
//! Validates the INI sections before any command runs.

use crate::domain::engine::EngineType;
use crate::domain::error::ThrustError;
use crate::domain::projection::MAX_PROJECTION_YEARS;
use crate::domain::timeline::TimePeriod;
use crate::ports::config_port::ConfigPort;

pub const MAX_YEARS_LIMIT: i64 = MAX_PROJECTION_YEARS as i64;

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), ThrustError> {
    validate_data_path(config)?;
    validate_cache_ttl(config)?;
    Ok(())
}

pub fn validate_projection_config(config: &dyn ConfigPort) -> Result<(), ThrustError> {
    validate_non_negative(config, "projection", "initial_investment")?;
    validate_non_negative(config, "projection", "monthly_investment")?;
    validate_non_negative(config, "projection", "desired_goal")?;
    validate_max_years(config)?;
    validate_engine_type(config)?;
    Ok(())
}

pub fn validate_timeline_config(config: &dyn ConfigPort) -> Result<(), ThrustError> {
    match config.get_string("timeline", "period") {
        None => Ok(()),
        Some(p) if TimePeriod::ALL.iter().any(|t| t.key().eq_ignore_ascii_case(p.trim())) => {
            Ok(())
        }
        Some(p) => Err(ThrustError::ConfigInvalid {
            section: "timeline".to_string(),
            key: "period".to_string(),
            reason: format!("unknown period '{p}', expected 1month, 6months, 1year, 5years or alltime"),
        }),
    }
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), ThrustError> {
    match config.get_string("data", "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(ThrustError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}

fn validate_cache_ttl(config: &dyn ConfigPort) -> Result<(), ThrustError> {
    let value = config.get_int("data", "cache_ttl_secs", 0);
    if value < 0 {
        return Err(ThrustError::ConfigInvalid {
            section: "data".to_string(),
            key: "cache_ttl_secs".to_string(),
            reason: "cache_ttl_secs must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_non_negative(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), ThrustError> {
    let value = config.get_double(section, key, 0.0);
    if value < 0.0 || !value.is_finite() {
        return Err(ThrustError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{key} must be a non-negative number"),
        });
    }
    Ok(())
}

fn validate_max_years(config: &dyn ConfigPort) -> Result<(), ThrustError> {
    let value = config.get_int("projection", "max_years", 50);
    if !(1..=MAX_YEARS_LIMIT).contains(&value) {
        return Err(ThrustError::ConfigInvalid {
            section: "projection".to_string(),
            key: "max_years".to_string(),
            reason: format!("max_years must be between 1 and {MAX_YEARS_LIMIT}"),
        });
    }
    Ok(())
}

fn validate_engine_type(config: &dyn ConfigPort) -> Result<(), ThrustError> {
    match config.get_string("projection", "engine_type") {
        None => Ok(()),
        Some(s) => s.parse::<EngineType>().map(|_| ()).map_err(|_| ThrustError::ConfigInvalid {
            section: "projection".to_string(),
            key: "engine_type".to_string(),
            reason: format!("unknown engine type '{s}'"),
        }),
    }
}
