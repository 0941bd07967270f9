//! Portfolio aggregation and composite health score.

use crate::domain::holding::Holding;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct PortfolioSnapshot {
    pub total_value: f64,
    pub total_yearly_thrust: f64,
    /// 0..=100
    pub overall_health: u8,
}

impl PortfolioSnapshot {
    pub fn monthly_income(&self) -> f64 {
        self.total_yearly_thrust / 12.0
    }
}

/// Reduce holdings to totals and a composite health score.
///
/// Health is the rounded mean of per-holding contributions; an empty slice
/// scores 0.
pub fn aggregate(holdings: &[Holding]) -> PortfolioSnapshot {
    let total_value: f64 = holdings.iter().map(|h| h.current_value).sum();
    let total_yearly_thrust: f64 = holdings.iter().map(|h| h.yearly_thrust).sum();

    let contributions: Vec<u32> = holdings.iter().map(Holding::health_contribution).collect();
    let overall_health = rounded_mean(&contributions).min(100) as u8;

    PortfolioSnapshot {
        total_value,
        total_yearly_thrust,
        overall_health,
    }
}

/// Rounded mean of non-negative integer scores, 0 for an empty slice.
pub(crate) fn rounded_mean(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    (sum as f64 / scores.len() as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::EngineType;

    fn scored(engine: Option<EngineType>, dsi: &str, eec: &str) -> Holding {
        let mut h = Holding::new("T", 1.0, 100.0, 10.0)
            .with_stability_label(dsi)
            .with_energy_cost_label(eec);
        h.engine_type = engine;
        h
    }

    #[test]
    fn empty_portfolio_is_all_zero() {
        let snap = aggregate(&[]);
        assert_eq!(snap.total_value, 0.0);
        assert_eq!(snap.total_yearly_thrust, 0.0);
        assert_eq!(snap.overall_health, 0);
    }

    #[test]
    fn single_perfect_holding_scores_seventy() {
        let h = scored(Some(EngineType::Nuclear), "Ultra-Stable", "Ultra-Efficient");
        let snap = aggregate(&[h]);
        assert_eq!(snap.overall_health, 70);
    }

    #[test]
    fn totals_sum_every_holding() {
        let holdings = vec![
            Holding::new("A", 1.0, 1000.0, 100.0),
            Holding::new("B", 1.0, 2500.5, 12.5),
            Holding::new("A", 1.0, 10.0, 1.0),
        ];
        let snap = aggregate(&holdings);
        assert!((snap.total_value - 3510.5).abs() < 1e-9);
        assert!((snap.total_yearly_thrust - 113.5).abs() < 1e-9);
    }

    #[test]
    fn health_is_rounded_mean() {
        // 30+15+15 = 60 and 10+0+0 = 10 -> mean 35
        let holdings = vec![
            scored(Some(EngineType::Nuclear), "Stable", "Efficient"),
            scored(Some(EngineType::WindDependent), "Variable", "Inefficient"),
        ];
        assert_eq!(aggregate(&holdings).overall_health, 35);

        // 25 and 0 -> 12.5 rounds up to 13
        let holdings = vec![
            scored(Some(EngineType::Elite), "", ""),
            scored(None, "", ""),
        ];
        assert_eq!(aggregate(&holdings).overall_health, 13);
    }

    #[test]
    fn negative_values_do_not_panic() {
        let holdings = vec![Holding::new("NEG", -5.0, -100.0, -3.0)];
        let snap = aggregate(&holdings);
        assert_eq!(snap.total_value, -100.0);
        assert_eq!(snap.overall_health, 0);
    }

    #[test]
    fn monthly_income() {
        let snap = aggregate(&[Holding::new("A", 1.0, 1000.0, 120.0)]);
        assert!((snap.monthly_income() - 10.0).abs() < f64::EPSILON);
    }
}
