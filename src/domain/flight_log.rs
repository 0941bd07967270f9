//! Flight log: accumulated distributions and contribution-based period metrics.

use chrono::NaiveDate;

use crate::domain::calendar::{round2, shift_months};
use crate::domain::holding::Holding;
use crate::domain::timeline::TimePeriod;

/// Annual growth assumed on reinvested distributions.
pub const REINVEST_ANNUAL_GROWTH: f64 = 0.05;
pub const MONTHLY_CONTRIBUTION: f64 = 500.0;
/// Base portfolio growth; scaled by `exp(months / 12)`.
pub const PORTFOLIO_BASE_GROWTH_RATE: f64 = 0.01;
/// Benchmark growth per elapsed month.
pub const BENCHMARK_MONTHLY_GROWTH_RATE: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct FlightLogEntry {
    pub date: NaiveDate,
    /// Distributions collected, not reinvested.
    pub actual_wealth: f64,
    /// Distributions reinvested at [`REINVEST_ANNUAL_GROWTH`].
    pub projected_wealth: f64,
}

/// `months + 1` monthly entries ending at `anchor`.
pub fn generate_flight_log(
    holdings: &[Holding],
    months: u32,
    anchor: NaiveDate,
) -> Vec<FlightLogEntry> {
    let monthly_thrust = holdings.iter().map(|h| h.yearly_thrust).sum::<f64>() / 12.0;
    let growth = 1.0 + REINVEST_ANNUAL_GROWTH / 12.0;
    let start = shift_months(anchor, -i64::from(months));

    let mut actual = 0.0;
    let mut projected = 0.0;
    (0..=months)
        .map(|i| {
            actual += monthly_thrust;
            projected = projected * growth + monthly_thrust;
            FlightLogEntry {
                date: shift_months(start, i64::from(i)),
                actual_wealth: round2(actual),
                projected_wealth: round2(projected),
            }
        })
        .collect()
}

/// Mean monthly change of actual wealth over the last 12 entries.
pub fn speed(log: &[FlightLogEntry]) -> f64 {
    let recent = &log[log.len().saturating_sub(12)..];
    if recent.len() < 2 {
        return 0.0;
    }
    let first = recent[0].actual_wealth;
    let last = recent[recent.len() - 1].actual_wealth;
    (last - first) / (recent.len() - 1) as f64
}

/// Actual wealth at the end of the log.
pub fn distance(log: &[FlightLogEntry]) -> f64 {
    log.last().map_or(0.0, |e| e.actual_wealth)
}

/// Headline numbers for a time-period toggle, driven by a fixed monthly
/// contribution rather than by holdings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct PeriodMetrics {
    pub total_invested: f64,
    pub total_gained: f64,
    pub total_gained_percent: f64,
    pub portfolio_growth: f64,
    pub portfolio_growth_percent: f64,
    pub benchmark_growth: f64,
    pub benchmark_growth_percent: f64,
}

fn portfolio_growth_rate(months: f64) -> f64 {
    PORTFOLIO_BASE_GROWTH_RATE * (months / 12.0).exp()
}

fn benchmark_growth_rate(months: f64) -> f64 {
    BENCHMARK_MONTHLY_GROWTH_RATE * months
}

impl PeriodMetrics {
    pub fn compute(period: TimePeriod) -> Self {
        let months = period.months_past() as f64;
        let total_invested = months * MONTHLY_CONTRIBUTION;
        let portfolio_rate = portfolio_growth_rate(months);
        let benchmark_rate = benchmark_growth_rate(months);

        let current_value = total_invested * (1.0 + portfolio_rate);
        let benchmark_value = total_invested * (1.0 + benchmark_rate);
        let total_gained = current_value - total_invested;

        PeriodMetrics {
            total_invested,
            total_gained,
            total_gained_percent: if total_invested > 0.0 {
                total_gained / total_invested * 100.0
            } else {
                0.0
            },
            portfolio_growth: current_value,
            portfolio_growth_percent: if months > 0.0 { portfolio_rate * 100.0 } else { 0.0 },
            benchmark_growth: benchmark_value,
            benchmark_growth_percent: if months > 0.0 { benchmark_rate * 100.0 } else { 0.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct ContributionPoint {
    pub date: NaiveDate,
    pub money_invested: f64,
    pub portfolio_value: f64,
    pub benchmark_value: f64,
}

/// Month-by-month contribution chart for the past leg of `period`.
///
/// The present month is left off once the window holds more than two months.
pub fn contribution_chart(period: TimePeriod, anchor: NaiveDate) -> Vec<ContributionPoint> {
    let months_past = period.months_past();
    let past_points = months_past + 1;
    let count = if past_points > 2 { past_points - 1 } else { past_points };
    let start = shift_months(anchor, -months_past);

    (0..count)
        .map(|index| {
            let months_from_start = (index + 1) as f64;
            let money_invested = MONTHLY_CONTRIBUTION * months_from_start;
            ContributionPoint {
                date: shift_months(start, index),
                money_invested,
                portfolio_value: round2(
                    money_invested * (1.0 + portfolio_growth_rate(months_from_start)),
                ),
                benchmark_value: round2(
                    money_invested * (1.0 + benchmark_growth_rate(months_from_start)),
                ),
            }
        })
        .collect()
}
