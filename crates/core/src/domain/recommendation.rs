use crate::domain::play::Candidate;
use serde::{Deserialize, Serialize};

pub const NO_CANDIDATES_REASON: &str = "No candidates available for this situation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Hard constraint that removed a candidate from consideration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disqualification {
    /// Medium/deep pass inside the goal-line window.
    GoalLinePassDepth,
    /// Run while down big in a two-minute drill with more than short yardage to go.
    TwoMinuteRun,
    /// Short pass when a chunk gain is needed with little time left.
    TwoMinuteShortPass,
}

/// Candidate after prediction, before policy scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    /// Raw predictor output; may be on a 0..1 or 0..100 scale.
    pub success_prob: f64,
    pub expected_yards: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    /// Normalized to 0..=1.
    pub success_prob: f64,
    pub expected_yards: f64,
    /// `None` when a hard constraint rejected the play.
    pub score: Option<f64>,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disqualified_by: Option<Disqualification>,
}

impl ScoredCandidate {
    pub fn is_eligible(&self) -> bool {
        matches!(self.score, Some(score) if score.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub recommended_play: Option<ScoredCandidate>,
    pub reasoning: Vec<String>,
    /// Percentage, one decimal.
    pub success_probability: f64,
    pub expected_yards: f64,
    pub risk_level: RiskLevel,
    pub alternative_plays: Vec<ScoredCandidate>,
    pub policy_version: String,
}

impl RecommendationResult {
    /// Well-defined result for a situation with nothing to recommend.
    pub fn no_candidates(policy_version: &str) -> Self {
        Self {
            recommended_play: None,
            reasoning: vec![NO_CANDIDATES_REASON.to_string()],
            success_probability: 0.0,
            expected_yards: 0.0,
            risk_level: RiskLevel::Medium,
            alternative_plays: Vec::new(),
            policy_version: policy_version.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recommended_play.is_none()
    }
}
