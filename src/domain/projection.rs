//! Deterministic volatility projector.
//!
//! Simulates a monthly wealth trajectory under a regime-switching annual
//! return. The return is re-rolled once per simulated year from a pinned
//! linear-congruential draw keyed on the year index and the engine label, so
//! identical inputs always produce an identical timeline.
//!
//! Monthly step order is fixed: growth, then NAV drag, then contribution.

use chrono::NaiveDate;

use crate::domain::calendar::{round1, shift_months};
use crate::domain::engine::EngineType;

/// Annual return band shared by every engine type.
pub const BAND_LOW: f64 = 0.20;
pub const BAND_HIGH: f64 = 0.50;
/// Midpoint of the band, the return a zero draw produces.
pub const BASE_YIELD: f64 = (BAND_LOW + BAND_HIGH) / 2.0;
pub const DEFAULT_MAX_YEARS: u32 = 50;
/// Longest horizon the projectors simulate; longer requests are cut here.
pub const MAX_PROJECTION_YEARS: u32 = 100;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct ProjectionRequest {
    pub initial_investment: f64,
    pub monthly_investment: f64,
    pub engine_type: EngineType,
    pub desired_goal: f64,
    pub max_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
pub struct ProjectionPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// First month at which the simulated value met the goal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct GoalCrossing {
    pub month: u32,
    /// `month / 12` rounded to one decimal.
    pub years_to_goal: f64,
    pub value_at_goal: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct VolatileProjection {
    pub request: ProjectionRequest,
    pub timeline: Vec<ProjectionPoint>,
    pub goal: Option<GoalCrossing>,
    pub final_value: f64,
}

impl VolatileProjection {
    pub fn years_to_goal(&self) -> Option<f64> {
        self.goal.map(|g| g.years_to_goal)
    }

    pub fn value_at_goal(&self) -> Option<f64> {
        self.goal.map(|g| g.value_at_goal)
    }

    /// Timeline cut at the goal crossing and thinned to about `max_points`.
    ///
    /// The crossing point and the final point of the window are always kept.
    pub fn chart_window(&self, max_points: usize) -> Vec<ProjectionPoint> {
        let window = match self.goal {
            Some(g) => &self.timeline[..self.timeline.len().min(g.month as usize + 1)],
            None => &self.timeline[..],
        };
        let stride = (window.len() / max_points.max(1)).max(1);
        let last = window.len().saturating_sub(1);
        window
            .iter()
            .enumerate()
            .filter(|(i, _)| i % stride == 0 || *i == last)
            .map(|(_, p)| *p)
            .collect()
    }
}

/// Sum of UTF-16 code units of the engine's display label.
pub fn type_hash(engine_type: EngineType) -> u64 {
    engine_type.label().encode_utf16().map(u64::from).sum()
}

/// Pseudo-random draw in `[-1, 1)` for a simulated year.
pub fn year_draw(year_index: u64, type_hash: u64) -> f64 {
    let seed = year_index * 1000 + type_hash;
    let state = (seed * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
    2.0 * (state as f64 / LCG_MODULUS as f64) - 1.0
}

/// Annual return for `year_index`, clamped to the band.
pub fn annual_return(engine_type: EngineType, year_index: u64) -> f64 {
    let volatility = (BAND_HIGH - BAND_LOW) * engine_type.profile().consistency_factor;
    let target = BASE_YIELD + year_draw(year_index, type_hash(engine_type)) * volatility;
    target.clamp(BAND_LOW, BAND_HIGH)
}

/// Run the projector. `anchor` only dates the points; values never depend on it.
///
/// `max_years` is capped at [`MAX_PROJECTION_YEARS`].
pub fn project(request: &ProjectionRequest, anchor: NaiveDate) -> VolatileProjection {
    let monthly_drag = request.engine_type.profile().default_nav_drag / 12.0;
    let total_months = request.max_years.min(MAX_PROJECTION_YEARS) * 12;

    let mut timeline = Vec::with_capacity(total_months as usize + 1);
    let mut value = request.initial_investment;
    let mut year_return = BASE_YIELD;
    let mut goal: Option<GoalCrossing> = None;

    for month in 0..=total_months {
        if month % 12 == 0 {
            year_return = annual_return(request.engine_type, u64::from(month / 12));
        }

        value *= 1.0 + year_return / 12.0;
        value *= 1.0 - monthly_drag;
        value += request.monthly_investment;

        timeline.push(ProjectionPoint {
            date: shift_months(anchor, i64::from(month)),
            value,
        });

        if goal.is_none() && value >= request.desired_goal {
            goal = Some(GoalCrossing {
                month,
                years_to_goal: round1(f64::from(month) / 12.0),
                value_at_goal: value,
            });
        }
    }

    VolatileProjection {
        request: request.clone(),
        timeline,
        goal,
        final_value: value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn scenario_a() -> ProjectionRequest {
        ProjectionRequest {
            initial_investment: 10_000.0,
            monthly_investment: 500.0,
            engine_type: EngineType::Elite,
            desired_goal: 100_000.0,
            max_years: 50,
        }
    }

    #[test]
    fn type_hashes_match_label_code_sums() {
        assert_eq!(type_hash(EngineType::Elite), 1614);
        assert_eq!(type_hash(EngineType::Baseline), 1918);
        assert_eq!(type_hash(EngineType::WindDependent), 1366);
    }

    #[test]
    fn year_draw_is_pinned() {
        // seed 1614: (1614*9301 + 49297) % 233280 = 131191
        assert_relative_eq!(year_draw(0, 1614), 2.0 * 131_191.0 / 233_280.0 - 1.0);
        assert!((-1.0..1.0).contains(&year_draw(7, 1918)));
    }

    #[test]
    fn annual_returns_follow_draws() {
        assert_relative_eq!(
            annual_return(EngineType::Elite, 0),
            0.37245524691358023,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            annual_return(EngineType::Elite, 1),
            0.3258503086419753,
            epsilon = 1e-12
        );
    }

    #[test]
    fn annual_returns_stay_in_band() {
        for t in EngineType::ALL {
            for year in 0..60 {
                let r = annual_return(t, year);
                assert!((BAND_LOW..=BAND_HIGH).contains(&r), "{t} year {year}: {r}");
            }
        }
    }

    #[test]
    fn nuclear_draws_clip_to_band() {
        assert_eq!(annual_return(EngineType::Nuclear, 0), BAND_LOW);
        assert_eq!(annual_return(EngineType::Nuclear, 2), BAND_HIGH);
    }

    #[test]
    fn scenario_a_length_and_goal() {
        let p = project(&scenario_a(), anchor());
        assert_eq!(p.timeline.len(), 601);

        let goal = p.goal.expect("goal should be reached");
        assert_eq!(goal.month, 67);
        assert_eq!(goal.years_to_goal, 5.6);
        assert!(goal.value_at_goal >= 100_000.0);
        assert_relative_eq!(goal.value_at_goal, 101_345.4539035781, max_relative = 1e-9);
        assert_eq!(p.years_to_goal(), Some(5.6));
        assert_eq!(p.final_value, p.timeline[600].value);
    }

    #[test]
    fn goal_latches_first_crossing() {
        let p = project(&scenario_a(), anchor());
        let goal = p.goal.unwrap();
        let first = p
            .timeline
            .iter()
            .position(|pt| pt.value >= 100_000.0)
            .unwrap();
        assert_eq!(goal.month as usize, first);
        assert_eq!(goal.value_at_goal, p.timeline[first].value);
    }

    #[test]
    fn identical_inputs_identical_timelines() {
        let a = project(&scenario_a(), anchor());
        let b = project(&scenario_a(), anchor());
        assert_eq!(a, b);
    }

    #[test]
    fn anchor_only_moves_dates() {
        let a = project(&scenario_a(), anchor());
        let b = project(&scenario_a(), NaiveDate::from_ymd_opt(1999, 6, 1).unwrap());
        let va: Vec<f64> = a.timeline.iter().map(|p| p.value).collect();
        let vb: Vec<f64> = b.timeline.iter().map(|p| p.value).collect();
        assert_eq!(va, vb);
        assert_eq!(a.timeline[12].date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn unreachable_goal_stays_none() {
        let req = ProjectionRequest {
            initial_investment: 1_000.0,
            monthly_investment: 0.0,
            engine_type: EngineType::Baseline,
            desired_goal: 1e18,
            max_years: 1,
        };
        let p = project(&req, anchor());
        assert_eq!(p.timeline.len(), 13);
        assert_eq!(p.goal, None);
        assert_eq!(p.value_at_goal(), None);
        assert_relative_eq!(p.final_value, 1437.6115527136724, max_relative = 1e-9);
    }

    #[test]
    fn zero_inputs_produce_flat_timeline() {
        let req = ProjectionRequest {
            initial_investment: 0.0,
            monthly_investment: 0.0,
            engine_type: EngineType::Stabilized,
            desired_goal: 1.0,
            max_years: 2,
        };
        let p = project(&req, anchor());
        assert_eq!(p.timeline.len(), 25);
        assert!(p.timeline.iter().all(|pt| pt.value == 0.0));
        assert_eq!(p.goal, None);
    }

    #[test]
    fn goal_met_immediately_is_month_zero() {
        let req = ProjectionRequest {
            desired_goal: 0.0,
            ..scenario_a()
        };
        let p = project(&req, anchor());
        assert_eq!(p.goal.unwrap().month, 0);
        assert_eq!(p.years_to_goal(), Some(0.0));
    }

    #[test]
    fn zero_horizon_has_single_point() {
        let req = ProjectionRequest {
            max_years: 0,
            ..scenario_a()
        };
        assert_eq!(project(&req, anchor()).timeline.len(), 1);
    }

    #[test]
    fn chart_window_truncates_at_goal() {
        let p = project(&scenario_a(), anchor());
        let window = p.chart_window(200);
        assert_eq!(window.len(), 68);
        assert_eq!(window.last().unwrap().value, p.value_at_goal().unwrap());
    }

    #[test]
    fn chart_window_samples_long_timelines() {
        let req = ProjectionRequest {
            desired_goal: f64::INFINITY,
            ..scenario_a()
        };
        let p = project(&req, anchor());
        let window = p.chart_window(200);
        // 601 / 200 = stride 3 -> indices 0,3,...,600 = 201 points
        assert_eq!(window.len(), 201);
        assert_eq!(window[1], p.timeline[3]);
        assert_eq!(window.last().unwrap(), p.timeline.last().unwrap());
    }

    #[test]
    fn chart_window_keeps_last_point_on_stride() {
        let req = ProjectionRequest {
            desired_goal: f64::INFINITY,
            max_years: 1,
            ..scenario_a()
        };
        let p = project(&req, anchor());
        // 13 points, stride 2: 0,2,..,12 already includes the last index
        assert_eq!(p.chart_window(6).len(), 7);
        // stride 4: 0,4,8,12
        assert_eq!(p.chart_window(3).len(), 4);
        // stride 6: 0,6,12
        let w = p.chart_window(2);
        assert_eq!(w.len(), 3);
        assert_eq!(w[2], p.timeline[12]);
    }

    #[test]
    fn chart_window_keeps_last_point_off_stride() {
        let req = ProjectionRequest {
            desired_goal: f64::INFINITY,
            max_years: 2,
            ..scenario_a()
        };
        let p = project(&req, anchor());
        // 25 points, stride 5: 0,5,10,15,20 and then 24
        let w = p.chart_window(5);
        assert_eq!(w.len(), 6);
        assert_eq!(w[4], p.timeline[20]);
        assert_eq!(w[5], p.timeline[24]);
    }

    #[test]
    fn oversized_horizon_is_capped() {
        let req = ProjectionRequest {
            desired_goal: f64::INFINITY,
            max_years: u32::MAX,
            ..scenario_a()
        };
        let p = project(&req, anchor());
        assert_eq!(p.timeline.len(), MAX_PROJECTION_YEARS as usize * 12 + 1);
        assert_eq!(p.request.max_years, u32::MAX);
    }
}
