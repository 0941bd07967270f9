//! Secondary dashboard gauges derived from holdings.

use std::collections::BTreeMap;

use crate::domain::engine::{integrity_score, level_score};
use crate::domain::holding::Holding;
use crate::domain::portfolio::{aggregate, rounded_mean, PortfolioSnapshot};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct PortfolioGauges {
    pub snapshot: PortfolioSnapshot,
    pub engine_integrity: u32,
    pub avg_engine_level: u32,
    pub thrust_reliability: u32,
    pub avg_energy_cost: u32,
    pub income_per_month: f64,
}

impl PortfolioGauges {
    pub fn compute(holdings: &[Holding]) -> Self {
        let snapshot = aggregate(holdings);
        let mean_of = |score: fn(&Holding) -> u32| {
            let scores: Vec<u32> = holdings.iter().map(score).collect();
            rounded_mean(&scores)
        };

        PortfolioGauges {
            engine_integrity: mean_of(|h| integrity_score(h.engine_type)),
            avg_engine_level: mean_of(|h| level_score(h.engine_type)),
            thrust_reliability: mean_of(|h| h.stability().reliability_score()),
            avg_energy_cost: mean_of(|h| h.efficiency().energy_cost_score()),
            income_per_month: snapshot.monthly_income(),
            snapshot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeKind {
    EngineLevel,
    ThrustReliability,
    EnergyCost,
}

/// Map a 0..=100 gauge reading back to its tier label.
pub fn classify_gauge(value: u32, kind: GaugeKind) -> &'static str {
    match kind {
        GaugeKind::EngineLevel => match value {
            90.. => "Nuclear Propulsion",
            70..=89 => "Elite Propulsion",
            40..=69 => "Stabilized Propulsion",
            20..=39 => "Baseline Propulsion",
            _ => "Wind-Dependent",
        },
        GaugeKind::ThrustReliability => match value {
            90.. => "Ultra-Stable",
            70..=89 => "Stable",
            40..=69 => "Moderate",
            _ => "Variable",
        },
        GaugeKind::EnergyCost => match value {
            90.. => "Ultra-Efficient",
            70..=89 => "Efficient",
            40..=69 => "Moderate",
            _ => "Inefficient",
        },
    }
}

fn status_band(value: u32) -> &'static str {
    match value {
        90.. => "OPTIMAL",
        75..=89 => "EXCELLENT",
        60..=74 => "GOOD",
        40..=59 => "MODERATE",
        25..=39 => "FAIR",
        _ => "NEEDS ATTENTION",
    }
}

pub fn health_status(health: u32) -> String {
    format!("ROCKET STATUS: {}", status_band(health))
}

pub fn integrity_status(integrity: u32) -> String {
    format!("ENGINE STATUS: {}", status_band(integrity))
}

/// Count holdings per engine label; unset types are counted as "Unknown".
pub fn engine_type_breakdown(holdings: &[Holding]) -> BTreeMap<String, usize> {
    let mut breakdown = BTreeMap::new();
    for h in holdings {
        let key = h.engine_type.map_or("Unknown", |t| t.label());
        *breakdown.entry(key.to_string()).or_insert(0) += 1;
    }
    breakdown
}
