//! Ordered tier classification of free-text DSI and EEC labels.
//!
//! Matching is case-sensitive substring search, checked strongest first so
//! "Ultra-Stable" never falls through to "Stable".

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
pub enum StabilityTier {
    UltraStable,
    Stable,
    Moderate,
    Variable,
    #[default]
    Unrated,
}

impl StabilityTier {
    pub fn classify(label: &str) -> Self {
        if label.contains("Ultra-Stable") {
            StabilityTier::UltraStable
        } else if label.contains("Stable") {
            StabilityTier::Stable
        } else if label.contains("Moderate") {
            StabilityTier::Moderate
        } else if label.contains("Variable") {
            StabilityTier::Variable
        } else {
            StabilityTier::Unrated
        }
    }

    /// Contribution to a holding's health score.
    pub fn health_points(self) -> u32 {
        match self {
            StabilityTier::UltraStable => 20,
            StabilityTier::Stable => 15,
            StabilityTier::Moderate => 10,
            StabilityTier::Variable | StabilityTier::Unrated => 0,
        }
    }

    /// Contribution to the thrust reliability gauge.
    pub fn reliability_score(self) -> u32 {
        match self {
            StabilityTier::UltraStable => 100,
            StabilityTier::Stable => 75,
            StabilityTier::Moderate => 50,
            StabilityTier::Variable => 25,
            StabilityTier::Unrated => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
pub enum EfficiencyTier {
    UltraEfficient,
    Efficient,
    Moderate,
    Inefficient,
    #[default]
    Unrated,
}

impl EfficiencyTier {
    pub fn classify(label: &str) -> Self {
        if label.contains("Ultra-Efficient") {
            EfficiencyTier::UltraEfficient
        } else if label.contains("Efficient") {
            EfficiencyTier::Efficient
        } else if label.contains("Moderate") {
            EfficiencyTier::Moderate
        } else if label.contains("Inefficient") {
            EfficiencyTier::Inefficient
        } else {
            EfficiencyTier::Unrated
        }
    }

    pub fn health_points(self) -> u32 {
        match self {
            EfficiencyTier::UltraEfficient => 20,
            EfficiencyTier::Efficient => 15,
            EfficiencyTier::Moderate | EfficiencyTier::Inefficient | EfficiencyTier::Unrated => 0,
        }
    }

    /// Contribution to the average energy cost gauge.
    pub fn energy_cost_score(self) -> u32 {
        match self {
            EfficiencyTier::UltraEfficient => 100,
            EfficiencyTier::Efficient => 75,
            EfficiencyTier::Moderate => 50,
            EfficiencyTier::Inefficient => 25,
            EfficiencyTier::Unrated => 0,
        }
    }
}
