use crate::domain::situation::GameSituation;
use crate::policy::WeightRules;
use serde::{Deserialize, Serialize};

/// Contextual rule that adjusted the weights. Declaration order is application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextRule {
    LateDown,
    RedZone,
    LeadingLate,
    TrailingLate,
}

impl ContextRule {
    pub fn rationale(self) -> &'static str {
        match self {
            ContextRule::LateDown => "Third or fourth down - prioritize conversion.",
            ContextRule::RedZone => "Red zone - prioritize efficiency over raw yards.",
            ContextRule::LeadingLate => "Leading late - reduce risk and keep the clock running.",
            ContextRule::TrailingLate => "Trailing late - lean toward higher upside plays.",
        }
    }
}

/// Normalized weights; `success_weight + yards_weight == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextWeights {
    pub success_weight: f64,
    pub yards_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightDerivation {
    pub weights: ContextWeights,
    pub fired: Vec<ContextRule>,
}

pub fn derive_weights(situation: &GameSituation, rules: &WeightRules) -> WeightDerivation {
    let mut success = rules.base_success_weight;
    let mut yards = rules.base_yards_weight;
    let mut fired = Vec::new();

    if situation.down >= rules.late_down {
        success += rules.late_down_shift;
        yards -= rules.late_down_shift;
        fired.push(ContextRule::LateDown);
    }

    if situation.yardline_100 <= rules.red_zone_yardline {
        success += rules.red_zone_shift;
        yards -= rules.red_zone_shift;
        fired.push(ContextRule::RedZone);
    }

    if situation.is_late(rules.leading_late_seconds) && situation.is_leading() {
        success += rules.leading_late_shift;
        yards -= rules.leading_late_shift;
        fired.push(ContextRule::LeadingLate);
    }

    if situation.is_late(rules.trailing_late_seconds) && situation.is_trailing() {
        let shift = trailing_late_shift(situation.deficit(), rules);
        yards += shift;
        success -= shift;
        fired.push(ContextRule::TrailingLate);
    }

    let success = success.max(rules.min_success_weight);
    let yards = yards.max(rules.min_yards_weight);
    let total = success + yards;

    WeightDerivation {
        weights: ContextWeights {
            success_weight: success / total,
            yards_weight: yards / total,
        },
        fired,
    }
}

/// Linear in the deficit between the configured min and max shift, saturating at the cap.
pub fn trailing_late_shift(deficit: u32, rules: &WeightRules) -> f64 {
    let cap = rules.trailing_deficit_cap.max(1);
    let fraction = f64::from(deficit.min(cap)) / f64::from(cap);
    rules.trailing_late_min_shift
        + (rules.trailing_late_max_shift - rules.trailing_late_min_shift) * fraction
}
