//! Distribution income projection.
//!
//! Estimates capital from the current annual thrust and the engine's default
//! yield, then compounds reinvested distributions under NAV drag until the
//! annualized thrust reaches the goal or the horizon runs out.

use chrono::NaiveDate;

use crate::domain::calendar::{round1, shift_months};
use crate::domain::engine::{profile_of, EngineType};
use crate::domain::holding::Holding;
use crate::domain::projection::MAX_PROJECTION_YEARS;

pub const DEFAULT_INCOME_YEARS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct IncomePoint {
    pub date: NaiveDate,
    pub annual_thrust: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct IncomeProjection {
    pub current_thrust: f64,
    pub goal_thrust: f64,
    pub engine_type: Option<EngineType>,
    /// Percent.
    pub default_yield: f64,
    pub default_nav_drag: f64,
    pub timeline: Vec<IncomePoint>,
    pub goal_reached: bool,
    /// Length of the timeline in years, one decimal.
    pub years_to_goal: f64,
}

pub fn project_income(
    current_thrust: f64,
    goal_thrust: f64,
    engine_type: Option<EngineType>,
    years: u32,
    anchor: NaiveDate,
) -> IncomeProjection {
    let profile = profile_of(engine_type);
    let yield_fraction = profile.yield_fraction();
    let monthly_yield = yield_fraction / 12.0;
    let monthly_drag = profile.default_nav_drag / 12.0;

    let mut capital = current_thrust / yield_fraction;
    let mut timeline = Vec::new();
    let mut goal_reached = false;

    for month in 0..=years.min(MAX_PROJECTION_YEARS) * 12 {
        let distribution = capital * monthly_yield;
        capital *= 1.0 - monthly_drag;
        capital += distribution;

        let annual_thrust = capital * monthly_yield * 12.0;
        timeline.push(IncomePoint {
            date: shift_months(anchor, i64::from(month)),
            annual_thrust,
        });

        // The opening point never counts as reaching the goal.
        if annual_thrust >= goal_thrust && timeline.len() > 1 {
            goal_reached = true;
            break;
        }
    }

    let years_to_goal = round1(timeline.len() as f64 / 12.0);

    IncomeProjection {
        current_thrust,
        goal_thrust,
        engine_type,
        default_yield: profile.default_yield,
        default_nav_drag: profile.default_nav_drag,
        timeline,
        goal_reached,
        years_to_goal,
    }
}

/// Engine type carrying the most current value, `None` if nothing is typed.
///
/// Ties resolve to the stronger engine type.
pub fn dominant_engine_type(holdings: &[Holding]) -> Option<EngineType> {
    let mut best: Option<(EngineType, f64)> = None;
    for t in EngineType::ALL {
        let mut typed = holdings.iter().filter(|h| h.engine_type == Some(t)).peekable();
        if typed.peek().is_none() {
            continue;
        }
        let value: f64 = typed.map(|h| h.current_value).sum();
        match best {
            Some((_, v)) if v >= value => {}
            _ => best = Some((t, value)),
        }
    }
    best.map(|(t, _)| t)
}
