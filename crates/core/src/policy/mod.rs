//! Contextual play-calling policy.
//!
//! Every tunable lives in [`PolicyConfig`]. Presets carry a `version` string that is echoed in
//! each [`crate::domain::recommendation::RecommendationResult`], so a change in behavior always
//! shows up as a change in version.

pub mod constraints;
pub mod scoring;
pub mod weights;

use crate::config::Settings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub version: String,
    pub weights: WeightRules,
    pub constraints: HardConstraints,
    /// Subtract [`RiskPenalties`] from each score before ranking.
    pub apply_risk_penalty: bool,
    pub risk_penalties: RiskPenalties,
}

/// Situation-dependent shifts between the success and yards weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRules {
    pub base_success_weight: f64,
    pub base_yards_weight: f64,

    /// Downs at or above this count as conversion downs.
    pub late_down: u8,
    pub late_down_shift: f64,

    pub red_zone_yardline: u8,
    pub red_zone_shift: f64,

    pub leading_late_seconds: u32,
    pub leading_late_shift: f64,

    pub trailing_late_seconds: u32,
    pub trailing_late_min_shift: f64,
    pub trailing_late_max_shift: f64,
    /// Deficits beyond this many points get the maximum shift.
    pub trailing_deficit_cap: u32,

    pub min_success_weight: f64,
    pub min_yards_weight: f64,
}

/// Plays rejected outright regardless of model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardConstraints {
    pub goal_line_yardline: u8,
    pub goal_line_max_distance: f64,

    /// Quarters in which the two-minute drill rules apply.
    pub two_minute_quarters: Vec<u8>,
    pub two_minute_seconds: u32,
    pub two_minute_large_deficit: u32,
    /// Runs stay allowed at or below this many yards to go.
    pub two_minute_run_max_distance: f64,
    pub chunk_needed_seconds: u32,
    pub chunk_needed_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPenalties {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for WeightRules {
    fn default() -> Self {
        Self {
            base_success_weight: 0.80,
            base_yards_weight: 0.20,
            late_down: 3,
            late_down_shift: 0.15,
            red_zone_yardline: 20,
            red_zone_shift: 0.05,
            leading_late_seconds: 8 * 60,
            leading_late_shift: 0.05,
            trailing_late_seconds: 10 * 60,
            trailing_late_min_shift: 0.05,
            trailing_late_max_shift: 0.20,
            trailing_deficit_cap: 17,
            min_success_weight: 0.05,
            min_yards_weight: 0.02,
        }
    }
}

impl Default for HardConstraints {
    fn default() -> Self {
        Self {
            goal_line_yardline: 5,
            goal_line_max_distance: 5.0,
            two_minute_quarters: vec![2, 4, 5],
            two_minute_seconds: 120,
            two_minute_large_deficit: 9,
            two_minute_run_max_distance: 2.0,
            chunk_needed_seconds: 90,
            chunk_needed_distance: 10.0,
        }
    }
}

impl Default for RiskPenalties {
    fn default() -> Self {
        Self {
            high: 0.20,
            medium: 0.05,
            low: 0.0,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::conversion_first()
    }
}

impl PolicyConfig {
    /// Ranks purely on weighted success and yards; risk is reported but not penalized.
    pub fn conversion_first() -> Self {
        Self {
            version: "conversion-first/2".to_string(),
            weights: WeightRules::default(),
            constraints: HardConstraints::default(),
            apply_risk_penalty: false,
            risk_penalties: RiskPenalties::default(),
        }
    }

    /// Same contextual rules as [`PolicyConfig::conversion_first`] with the risk penalty applied.
    pub fn risk_averse() -> Self {
        Self {
            version: "risk-averse/2".to_string(),
            apply_risk_penalty: true,
            ..Self::conversion_first()
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        if settings.risk_penalty {
            Self::risk_averse()
        } else {
            Self::conversion_first()
        }
    }
}
