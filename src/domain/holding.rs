//! Holding record: one ETF position.

use crate::domain::engine::EngineType;
use crate::domain::tier::{EfficiencyTier, StabilityTier};

/// A normalized ETF position.
///
/// The stability and energy-cost labels are private and only settable through
/// the `with_*` builders, which derive their tiers in the same step.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "camelCase"))]
pub struct Holding {
    pub ticker: String,
    pub frequency: String,
    pub shares: f64,
    pub current_value: f64,
    /// Annual distribution amount.
    pub yearly_thrust: f64,
    pub escape_ratio: String,
    /// Raw Distribution Stability Index label.
    stability_label: String,
    /// Raw Gavel Engine Quality Score label.
    pub geqs: String,
    /// Raw Engine Energy Cost label.
    energy_cost_label: String,
    pub engine_type: Option<EngineType>,
    stability: StabilityTier,
    efficiency: EfficiencyTier,
}

impl Holding {
    pub fn new(
        ticker: impl Into<String>,
        shares: f64,
        current_value: f64,
        yearly_thrust: f64,
    ) -> Self {
        Holding {
            ticker: ticker.into(),
            shares,
            current_value,
            yearly_thrust,
            ..Holding::default()
        }
    }

    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = frequency.into();
        self
    }

    pub fn with_escape_ratio(mut self, escape_ratio: impl Into<String>) -> Self {
        self.escape_ratio = escape_ratio.into();
        self
    }

    pub fn with_stability_label(mut self, label: impl Into<String>) -> Self {
        self.stability_label = label.into();
        self.stability = StabilityTier::classify(&self.stability_label);
        self
    }

    pub fn with_energy_cost_label(mut self, label: impl Into<String>) -> Self {
        self.energy_cost_label = label.into();
        self.efficiency = EfficiencyTier::classify(&self.energy_cost_label);
        self
    }

    /// Set the GEQS label and derive the engine type from it.
    pub fn with_geqs(mut self, geqs: impl Into<String>) -> Self {
        self.geqs = geqs.into();
        self.engine_type = EngineType::from_geqs(&self.geqs);
        self
    }

    pub fn with_engine_type(mut self, engine_type: EngineType) -> Self {
        self.engine_type = Some(engine_type);
        self
    }

    pub fn stability_label(&self) -> &str {
        &self.stability_label
    }

    pub fn energy_cost_label(&self) -> &str {
        &self.energy_cost_label
    }

    pub fn stability(&self) -> StabilityTier {
        self.stability
    }

    pub fn efficiency(&self) -> EfficiencyTier {
        self.efficiency
    }

    /// Distribution yield of this position, `None` when value is not positive.
    pub fn yield_rate(&self) -> Option<f64> {
        if self.current_value > 0.0 {
            Some(self.yearly_thrust / self.current_value)
        } else {
            None
        }
    }

    /// Per-holding health contribution, at most 70.
    pub fn health_contribution(&self) -> u32 {
        self.engine_type.map_or(0, EngineType::health_points)
            + self.stability.health_points()
            + self.efficiency.health_points()
    }
}
