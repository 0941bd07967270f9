//! Engine classification table.
//!
//! Every holding is reclassified into one of five propulsion engine types.
//! Each type carries a static profile: default distribution yield, annual
//! NAV drag and the consistency factor used by the volatility projector.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ThrustError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
pub enum EngineType {
    Nuclear,
    Elite,
    Stabilized,
    Baseline,
    WindDependent,
}

impl EngineType {
    /// All engine types, strongest first.
    pub const ALL: [EngineType; 5] = [
        EngineType::Nuclear,
        EngineType::Elite,
        EngineType::Stabilized,
        EngineType::Baseline,
        EngineType::WindDependent,
    ];

    pub fn profile(self) -> &'static EngineProfile {
        match self {
            EngineType::Nuclear => &NUCLEAR,
            EngineType::Elite => &ELITE,
            EngineType::Stabilized => &STABILIZED,
            EngineType::Baseline => &BASELINE,
            EngineType::WindDependent => &WIND_DEPENDENT,
        }
    }

    /// Display label, e.g. "Nuclear Propulsion".
    pub fn label(self) -> &'static str {
        self.profile().label
    }

    /// Map a raw GEQS label to an engine type.
    ///
    /// Case-insensitive substring match, first hit wins in strength order.
    /// Unmatched labels leave the engine type unset.
    pub fn from_geqs(geqs: &str) -> Option<EngineType> {
        let lower = geqs.to_lowercase();
        if lower.contains("nuclear") {
            Some(EngineType::Nuclear)
        } else if lower.contains("elite") {
            Some(EngineType::Elite)
        } else if lower.contains("stabilized") {
            Some(EngineType::Stabilized)
        } else if lower.contains("baseline") {
            Some(EngineType::Baseline)
        } else if lower.contains("wind") {
            Some(EngineType::WindDependent)
        } else {
            None
        }
    }

    /// Points this type contributes to a holding's health score.
    pub fn health_points(self) -> u32 {
        match self {
            EngineType::Nuclear => 30,
            EngineType::Elite => 25,
            EngineType::Stabilized => 20,
            EngineType::Baseline => 15,
            EngineType::WindDependent => 10,
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EngineType {
    type Err = ThrustError;

    /// Accepts the short key ("nuclear", "wind-dependent") or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "nuclear" | "nuclearpropulsion" => Ok(EngineType::Nuclear),
            "elite" | "elitepropulsion" => Ok(EngineType::Elite),
            "stabilized" | "stabilizedpropulsion" => Ok(EngineType::Stabilized),
            "baseline" | "baselinepropulsion" => Ok(EngineType::Baseline),
            "wind" | "winddependent" => Ok(EngineType::WindDependent),
            _ => Err(ThrustError::UnknownEngineType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
pub struct EngineProfile {
    pub label: &'static str,
    /// Percent, e.g. 7.5 for 7.5%.
    pub default_yield: f64,
    /// Decimal fraction of capital lost per year.
    pub default_nav_drag: f64,
    /// 0..=1, scales how far a year's return may stray from the band midpoint.
    pub consistency_factor: f64,
    pub description: &'static str,
    pub emoji: &'static str,
}

impl EngineProfile {
    /// Default yield as a decimal fraction.
    pub fn yield_fraction(&self) -> f64 {
        self.default_yield / 100.0
    }
}

pub const NUCLEAR: EngineProfile = EngineProfile {
    label: "Nuclear Propulsion",
    default_yield: 10.0,
    default_nav_drag: 0.15,
    consistency_factor: 0.8,
    description: "Generates extreme thrust capable of dominating total portfolio output. \
        Thrives when DRIP is active, converting volatility into rapid share accumulation. \
        Experiences meaningful drag, requiring active efficiency monitoring. \
        Best used as a contained core reactor, not an uncontrolled majority position.",
    emoji: "☢️",
};

pub const ELITE: EngineProfile = EngineProfile {
    label: "Elite Propulsion",
    default_yield: 7.5,
    default_nav_drag: 0.08,
    consistency_factor: 0.6,
    description: "Produces strong, reliable income with manageable drag. \
        Maintains high engine quality across multiple market regimes. \
        Serves as a primary propulsion source for sustained acceleration. \
        Scales well with capital and is suitable for long-duration deployment.",
    emoji: "🚀",
};

pub const STABILIZED: EngineProfile = EngineProfile {
    label: "Stabilized Propulsion",
    default_yield: 5.5,
    default_nav_drag: 0.04,
    consistency_factor: 0.3,
    description: "Delivers moderate thrust with enhanced distribution stability. \
        Dampens volatility and smooths income during market stress. \
        Exhibits lower drag, protecting portfolio mass over time. \
        Functions as a counterweight to higher-energy engines.",
    emoji: "⚖️",
};

pub const BASELINE: EngineProfile = EngineProfile {
    label: "Baseline Propulsion",
    default_yield: 3.0,
    default_nav_drag: 0.02,
    consistency_factor: 0.1,
    description: "Provides low but dependable thrust with minimal complexity. \
        Preserves mass with consistently low drag. \
        Acts as a foundation layer for conservative capital allocation. \
        Offers predictability rather than acceleration.",
    emoji: "🏗️",
};

pub const WIND_DEPENDENT: EngineProfile = EngineProfile {
    label: "Wind-Dependent",
    default_yield: 5.0,
    default_nav_drag: 0.12,
    consistency_factor: 0.7,
    description: "Generates thrust only when market conditions are favorable. \
        Performance is highly dependent on external tailwinds. \
        Lacks internal thrust mechanisms, making DRIP less effective. \
        Best suited for opportunistic or supplemental use, not core propulsion.",
    emoji: "🌬️",
};

/// Profile used when a holding carries no engine type.
pub const UNCLASSIFIED: EngineProfile = EngineProfile {
    label: "Unclassified",
    default_yield: 5.0,
    default_nav_drag: 0.05,
    consistency_factor: 0.4,
    description: "No engine quality score was recorded for this position.",
    emoji: "❔",
};

/// Total lookup over the closed key set plus the unset case.
pub fn profile_of(key: Option<EngineType>) -> &'static EngineProfile {
    match key {
        Some(t) => t.profile(),
        None => &UNCLASSIFIED,
    }
}

/// Engine integrity gauge contribution (unset sits mid-scale).
pub fn integrity_score(key: Option<EngineType>) -> u32 {
    match key {
        Some(EngineType::Nuclear) => 100,
        Some(EngineType::Elite) => 80,
        Some(EngineType::Stabilized) => 60,
        Some(EngineType::Baseline) => 40,
        Some(EngineType::WindDependent) => 30,
        None => 50,
    }
}

/// Engine level gauge contribution.
pub fn level_score(key: Option<EngineType>) -> u32 {
    match key {
        Some(EngineType::Nuclear) => 100,
        Some(EngineType::Elite) => 75,
        Some(EngineType::Stabilized) => 50,
        Some(EngineType::Baseline) => 25,
        Some(EngineType::WindDependent) => 10,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_five_distinct_profiles() {
        let labels: std::collections::HashSet<_> =
            EngineType::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels.len(), 5);
    }

    #[test]
    fn profile_values() {
        assert_eq!(EngineType::Nuclear.profile().default_yield, 10.0);
        assert_eq!(EngineType::Elite.profile().default_nav_drag, 0.08);
        assert_eq!(EngineType::Baseline.profile().consistency_factor, 0.1);
        assert!((EngineType::Stabilized.profile().yield_fraction() - 0.055).abs() < 1e-12);
    }

    #[test]
    fn unset_falls_back_to_unclassified() {
        assert_eq!(profile_of(None).label, "Unclassified");
        assert_eq!(profile_of(Some(EngineType::Elite)).label, "Elite Propulsion");
    }

    #[test]
    fn geqs_mapping_is_case_insensitive() {
        assert_eq!(
            EngineType::from_geqs("NUCLEAR PROPULSION"),
            Some(EngineType::Nuclear)
        );
        assert_eq!(
            EngineType::from_geqs("elite propulsion ⭐"),
            Some(EngineType::Elite)
        );
        assert_eq!(
            EngineType::from_geqs("Wind-Dependent"),
            Some(EngineType::WindDependent)
        );
        assert_eq!(EngineType::from_geqs("Unknown grade"), None);
        assert_eq!(EngineType::from_geqs(""), None);
    }

    #[test]
    fn geqs_mapping_prefers_stronger_type() {
        assert_eq!(
            EngineType::from_geqs("Elite (was Baseline)"),
            Some(EngineType::Elite)
        );
    }

    #[test]
    fn from_str_accepts_keys_and_labels() {
        assert_eq!("nuclear".parse::<EngineType>().unwrap(), EngineType::Nuclear);
        assert_eq!(
            "Stabilized Propulsion".parse::<EngineType>().unwrap(),
            EngineType::Stabilized
        );
        assert_eq!(
            "wind-dependent".parse::<EngineType>().unwrap(),
            EngineType::WindDependent
        );
        assert!("warp".parse::<EngineType>().is_err());
    }

    #[test]
    fn health_points_order() {
        let points: Vec<u32> = EngineType::ALL.iter().map(|t| t.health_points()).collect();
        assert_eq!(points, vec![30, 25, 20, 15, 10]);
    }

    #[test]
    fn gauge_scores_for_unset() {
        assert_eq!(integrity_score(None), 50);
        assert_eq!(level_score(None), 0);
    }
}
