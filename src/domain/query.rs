//! Holdings queries backing the engine database and top lists.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::domain::display::mover_score;
use crate::domain::engine::EngineType;
use crate::domain::error::ThrustError;
use crate::domain::holding::Holding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankMetric {
    #[default]
    YearlyThrust,
    CurrentValue,
    Shares,
}

impl RankMetric {
    fn value(self, holding: &Holding) -> f64 {
        match self {
            RankMetric::YearlyThrust => holding.yearly_thrust,
            RankMetric::CurrentValue => holding.current_value,
            RankMetric::Shares => holding.shares,
        }
    }
}

impl FromStr for RankMetric {
    type Err = ThrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "thrust" | "yearly_thrust" => Ok(RankMetric::YearlyThrust),
            "value" | "current_value" => Ok(RankMetric::CurrentValue),
            "shares" => Ok(RankMetric::Shares),
            _ => Err(ThrustError::ConfigInvalid {
                section: "query".into(),
                key: "metric".into(),
                reason: format!("unknown metric '{s}', expected thrust, value or shares"),
            }),
        }
    }
}

/// Holdings keyed by engine type; untyped holdings are left out.
pub fn group_by_engine_type(holdings: &[Holding]) -> BTreeMap<EngineType, Vec<&Holding>> {
    let mut grouped: BTreeMap<EngineType, Vec<&Holding>> = BTreeMap::new();
    for h in holdings {
        if let Some(t) = h.engine_type {
            grouped.entry(t).or_default().push(h);
        }
    }
    grouped
}

/// Top `limit` holdings of each engine type by `metric`, descending.
pub fn top_by_type(
    holdings: &[Holding],
    metric: RankMetric,
    limit: usize,
) -> BTreeMap<EngineType, Vec<&Holding>> {
    group_by_engine_type(holdings)
        .into_iter()
        .map(|(t, mut group)| {
            group.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
            group.truncate(limit);
            (t, group)
        })
        .collect()
}

/// Top `limit` holdings by mover score. Equal scores keep input order.
pub fn top_movers(holdings: &[Holding], limit: usize) -> Vec<&Holding> {
    let mut ranked: Vec<&Holding> = holdings.iter().collect();
    ranked.sort_by(|a, b| mover_score(b).total_cmp(&mover_score(a)));
    ranked.truncate(limit);
    ranked
}

/// Case-insensitive substring search over ticker, frequency and escape ratio,
/// optionally narrowed to one engine type. An empty term matches everything.
pub fn filter_holdings<'a>(
    holdings: &'a [Holding],
    term: &str,
    engine_type: Option<EngineType>,
) -> Vec<&'a Holding> {
    let term = term.to_lowercase();
    holdings
        .iter()
        .filter(|h| {
            term.is_empty()
                || h.ticker.to_lowercase().contains(&term)
                || h.frequency.to_lowercase().contains(&term)
                || h.escape_ratio.to_lowercase().contains(&term)
        })
        .filter(|h| engine_type.is_none_or(|t| h.engine_type == Some(t)))
        .collect()
}
