//! Run settings resolved from configuration.
//!
//! Shared by every front end so the CLI and the web adapter agree on
//! defaults and horizon limits.

use crate::domain::config_validation::{MAX_YEARS_LIMIT, validate_projection_config};
use crate::domain::engine::EngineType;
use crate::domain::error::ThrustError;
use crate::domain::projection::{DEFAULT_MAX_YEARS, ProjectionRequest};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_INITIAL_INVESTMENT: f64 = 10_000.0;
pub const DEFAULT_MONTHLY_INVESTMENT: f64 = 500.0;
pub const DEFAULT_DESIRED_GOAL: f64 = 100_000.0;
pub const DEFAULT_ENGINE_TYPE: EngineType = EngineType::Elite;

/// Projection inputs from the `[projection]` section, defaults filled in.
pub fn build_projection_request(config: &dyn ConfigPort) -> Result<ProjectionRequest, ThrustError> {
    validate_projection_config(config)?;
    let engine_type = match config.get_string("projection", "engine_type") {
        Some(s) => s.parse()?,
        None => DEFAULT_ENGINE_TYPE,
    };
    Ok(ProjectionRequest {
        initial_investment: config.get_double(
            "projection",
            "initial_investment",
            DEFAULT_INITIAL_INVESTMENT,
        ),
        monthly_investment: config.get_double(
            "projection",
            "monthly_investment",
            DEFAULT_MONTHLY_INVESTMENT,
        ),
        engine_type,
        desired_goal: config.get_double("projection", "desired_goal", DEFAULT_DESIRED_GOAL),
        max_years: config.get_int("projection", "max_years", i64::from(DEFAULT_MAX_YEARS)) as u32,
    })
}

/// Accept a horizon given outside the config file, in `1..=MAX_YEARS_LIMIT`.
pub fn check_horizon(section: &str, key: &str, years: u32) -> Result<u32, ThrustError> {
    if years == 0 || i64::from(years) > MAX_YEARS_LIMIT {
        return Err(ThrustError::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: format!("must be between 1 and {MAX_YEARS_LIMIT}"),
        });
    }
    Ok(years)
}
