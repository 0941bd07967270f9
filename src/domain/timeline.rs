//! Comparative portfolio vs benchmark timeline.
//!
//! The past leg back-solves a starting value and walks forward; the future
//! leg projects from the present. The portfolio path compounds while the
//! benchmark path grows linearly. The two legs meet at a present point that is
//! forced to the holdings' actual total value.

use chrono::NaiveDate;

use crate::domain::calendar::{round2, shift_months};
use crate::domain::holding::Holding;

/// Fixed annual return of the benchmark index.
pub const BENCHMARK_ANNUAL_RETURN: f64 = 0.25;
/// Yield assumed when no holding has a positive value.
pub const DEFAULT_AVG_YIELD: f64 = 0.05;

/// Share of the average yield treated as annual growth when back-solving.
const PAST_GROWTH_SHARE: f64 = 0.6;
/// Share of the monthly yield added as appreciation on the past leg.
const PAST_APPRECIATION_SHARE: f64 = 0.4;
/// Share of the average yield used as the continuous growth rate ahead.
const FUTURE_APPRECIATION_SHARE: f64 = 0.5;

/// One month on the comparative chart.
///
/// Past points fill the actual fields and zero the projected ones; future
/// points do the inverse. The present point fills all four.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct ComparativePoint {
    pub date: NaiveDate,
    pub portfolio_value: f64,
    pub benchmark_value: f64,
    pub portfolio_projected: f64,
    pub benchmark_projected: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct ComparativeTimeline {
    pub points: Vec<ComparativePoint>,
    /// Index of the reconciled present point, equal to the clamped months past.
    pub present_index: usize,
    pub avg_yield: f64,
}

impl ComparativeTimeline {
    pub fn present(&self) -> &ComparativePoint {
        &self.points[self.present_index]
    }

    pub fn past(&self) -> &[ComparativePoint] {
        &self.points[..=self.present_index]
    }

    pub fn future(&self) -> &[ComparativePoint] {
        &self.points[self.present_index + 1..]
    }
}

/// Value-weighted mean of `yearly_thrust / current_value` over holdings with
/// positive value, or [`DEFAULT_AVG_YIELD`] when none qualify.
pub fn average_yield(holdings: &[Holding]) -> f64 {
    let mut weighted = 0.0;
    let mut weight = 0.0;
    for h in holdings {
        if let Some(rate) = h.yield_rate() {
            weighted += rate * h.current_value;
            weight += h.current_value;
        }
    }
    if weight > 0.0 {
        weighted / weight
    } else {
        DEFAULT_AVG_YIELD
    }
}

/// Build the combined past and future timeline around `anchor`.
///
/// Negative month counts are treated as zero.
pub fn generate_timeline(
    holdings: &[Holding],
    months_past: i64,
    months_future: i64,
    anchor: NaiveDate,
) -> ComparativeTimeline {
    let months_past = months_past.max(0);
    let months_future = months_future.max(0);

    let present_value: f64 = holdings.iter().map(|h| h.current_value).sum();
    let avg_yield = average_yield(holdings);
    let monthly_yield = avg_yield / 12.0;
    let benchmark_monthly = BENCHMARK_ANNUAL_RETURN / 12.0;

    let mut points = Vec::with_capacity((months_past + months_future + 1) as usize);

    let years_past = months_past as f64 / 12.0;
    let portfolio_start = present_value / (1.0 + avg_yield * PAST_GROWTH_SHARE).powf(years_past);
    let benchmark_start = present_value / (1.0 + BENCHMARK_ANNUAL_RETURN * years_past);
    let benchmark_past_step = benchmark_monthly * benchmark_start;

    let start_date = shift_months(anchor, -months_past);
    let mut portfolio = portfolio_start;
    let mut benchmark = benchmark_start;

    for i in 0..=months_past {
        if i > 0 {
            portfolio += portfolio * monthly_yield;
            portfolio *= 1.0 + monthly_yield * PAST_APPRECIATION_SHARE;
            benchmark += benchmark_past_step;
        }
        points.push(ComparativePoint {
            date: shift_months(start_date, i),
            portfolio_value: round2(portfolio),
            benchmark_value: round2(benchmark),
            portfolio_projected: 0.0,
            benchmark_projected: 0.0,
        });
    }

    // Reconcile: the back-solved estimate is discarded at the present.
    let present_index = points.len() - 1;
    points[present_index] = ComparativePoint {
        date: anchor,
        portfolio_value: present_value,
        benchmark_value: present_value,
        portfolio_projected: present_value,
        benchmark_projected: present_value,
    };

    let growth_factor = (avg_yield * FUTURE_APPRECIATION_SHARE / 12.0).exp();
    let benchmark_future_step = benchmark_monthly * present_value;
    let mut portfolio = present_value;
    let mut benchmark = present_value;

    for i in 1..=months_future {
        portfolio += portfolio * monthly_yield;
        portfolio *= growth_factor;
        benchmark += benchmark_future_step;
        points.push(ComparativePoint {
            date: shift_months(anchor, i),
            portfolio_value: 0.0,
            benchmark_value: 0.0,
            portfolio_projected: round2(portfolio),
            benchmark_projected: round2(benchmark),
        });
    }

    ComparativeTimeline {
        points,
        present_index,
        avg_yield,
    }
}

/// Preset windows offered by the time-period toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
pub enum TimePeriod {
    OneMonth,
    SixMonths,
    #[default]
    OneYear,
    FiveYears,
    AllTime,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 5] = [
        TimePeriod::OneMonth,
        TimePeriod::SixMonths,
        TimePeriod::OneYear,
        TimePeriod::FiveYears,
        TimePeriod::AllTime,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TimePeriod::OneMonth => "1month",
            TimePeriod::SixMonths => "6months",
            TimePeriod::OneYear => "1year",
            TimePeriod::FiveYears => "5years",
            TimePeriod::AllTime => "alltime",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimePeriod::OneMonth => "1 Month",
            TimePeriod::SixMonths => "6 Months",
            TimePeriod::OneYear => "1 Year",
            TimePeriod::FiveYears => "5 Years",
            TimePeriod::AllTime => "All Time",
        }
    }

    pub fn months_past(self) -> i64 {
        match self {
            TimePeriod::OneMonth => 1,
            TimePeriod::SixMonths => 6,
            TimePeriod::OneYear => 12,
            TimePeriod::FiveYears => 60,
            TimePeriod::AllTime => 120,
        }
    }

    /// Every preset looks as far ahead as it looks back.
    pub fn months_future(self) -> i64 {
        self.months_past()
    }

    /// Unknown keys fall back to the one-year window.
    pub fn from_key(key: &str) -> TimePeriod {
        TimePeriod::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(key.trim()))
            .unwrap_or_default()
    }
}
