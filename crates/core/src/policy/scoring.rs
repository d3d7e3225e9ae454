use crate::domain::play::{Candidate, PassDepth, PlayType};
use crate::domain::recommendation::{PredictedCandidate, RiskLevel, ScoredCandidate};
use crate::domain::situation::GameSituation;
use crate::policy::weights::ContextWeights;
use crate::policy::{constraints, PolicyConfig, RiskPenalties};

/// Accepts either a 0..1 probability or a 0..100 percentage and returns 0..=1.
pub fn normalize_probability(value: f64) -> f64 {
    let p = if value > 1.0 { value / 100.0 } else { value };
    p.clamp(0.0, 1.0)
}

pub fn classify_risk(candidate: &Candidate) -> RiskLevel {
    match (candidate.play_type, candidate.pass_depth_bucket) {
        (PlayType::Run, _) => RiskLevel::Low,
        (PlayType::Pass, PassDepth::Deep) => RiskLevel::High,
        (PlayType::Pass, _) => RiskLevel::Medium,
    }
}

pub fn risk_penalty(level: RiskLevel, penalties: &RiskPenalties) -> f64 {
    match level {
        RiskLevel::High => penalties.high,
        RiskLevel::Medium => penalties.medium,
        RiskLevel::Low => penalties.low,
    }
}

pub fn score_candidate(
    situation: &GameSituation,
    weights: ContextWeights,
    predicted: PredictedCandidate,
    policy: &PolicyConfig,
) -> ScoredCandidate {
    let PredictedCandidate {
        candidate,
        success_prob,
        expected_yards,
    } = predicted;

    let success_prob = normalize_probability(success_prob);
    let risk_level = classify_risk(&candidate);

    if let Some(reason) = constraints::check(situation, &candidate, &policy.constraints) {
        return ScoredCandidate {
            candidate,
            success_prob,
            expected_yards,
            score: None,
            risk_level,
            disqualified_by: Some(reason),
        };
    }

    let mut score =
        weights.success_weight * success_prob + weights.yards_weight * (expected_yards / 10.0);
    if policy.apply_risk_penalty {
        score -= risk_penalty(risk_level, &policy.risk_penalties);
    }

    ScoredCandidate {
        candidate,
        success_prob,
        expected_yards,
        score: Some(score),
        risk_level,
        disqualified_by: None,
    }
}
