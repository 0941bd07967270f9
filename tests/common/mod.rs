#![allow(dead_code)]

use chrono::NaiveDate;
use std::cell::Cell;
use thrustdeck::domain::engine::EngineType;
use thrustdeck::domain::error::ThrustError;
use thrustdeck::domain::holding::Holding;
use thrustdeck::ports::holdings_port::HoldingsPort;

pub struct MockHoldingsPort {
    pub holdings: Vec<Holding>,
    pub error: Option<String>,
    pub calls: Cell<usize>,
}

impl MockHoldingsPort {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self {
            holdings,
            error: None,
            calls: Cell::new(0),
        }
    }

    pub fn unavailable(path: &str) -> Self {
        Self {
            holdings: Vec::new(),
            error: Some(path.to_string()),
            calls: Cell::new(0),
        }
    }
}

impl HoldingsPort for MockHoldingsPort {
    fn load_holdings(&self) -> Result<Vec<Holding>, ThrustError> {
        self.calls.set(self.calls.get() + 1);
        match &self.error {
            Some(path) => Err(ThrustError::SourceUnavailable { path: path.clone() }),
            None => Ok(self.holdings.clone()),
        }
    }

    fn source_name(&self) -> String {
        "mock".to_string()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn anchor() -> NaiveDate {
    date(2025, 6, 15)
}

/// Single top-tier holding worth 70 health points.
pub fn scenario_b_holding() -> Holding {
    Holding::new("A", 10.0, 1_000.0, 100.0)
        .with_engine_type(EngineType::Nuclear)
        .with_stability_label("Ultra-Stable")
        .with_energy_cost_label("Ultra-Efficient")
}

pub fn sample_holdings() -> Vec<Holding> {
    vec![
        Holding::new("MSTY", 120.0, 2_400.0, 1_800.0)
            .with_frequency("Monthly")
            .with_geqs("Nuclear Propulsion")
            .with_stability_label("Variable")
            .with_energy_cost_label("Inefficient"),
        Holding::new("JEPI", 50.0, 2_900.0, 220.0)
            .with_frequency("Monthly")
            .with_geqs("Elite Propulsion")
            .with_stability_label("Stable")
            .with_energy_cost_label("Efficient"),
        Holding::new("SCHD", 200.0, 5_000.0, 175.0)
            .with_frequency("Quarterly")
            .with_geqs("Stabilized Propulsion")
            .with_stability_label("Ultra-Stable")
            .with_energy_cost_label("Ultra-Efficient"),
        Holding::new("VOO", 3.0, 1_500.0, 20.0)
            .with_frequency("Quarterly")
            .with_geqs("Baseline Propulsion")
            .with_stability_label("Stable")
            .with_energy_cost_label("Ultra-Efficient"),
        Holding::new("CASH", 0.0, 0.0, 0.0),
    ]
}

pub const SAMPLE_CSV: &str = "\
Ticker/Fund,Frequency,# of Shares,Current Value,Yearly Thrust,Escape Ratio (ER),Distribution Stability Index (DSI),Gavel Engine Quality Score (GEQS),Engine Energy Cost (EEC)
MSTY,Monthly,120,2400,1800,High,Variable,Nuclear Propulsion,Inefficient
JEPI,Monthly,50,2900,220,Medium,Stable,Elite Propulsion,Efficient
SCHD,Quarterly,200,5000,175,Low,Ultra-Stable,Stabilized Propulsion,Ultra-Efficient
VOO,Quarterly,3,1500,20,Low,Stable,Baseline Propulsion,Ultra-Efficient
";
