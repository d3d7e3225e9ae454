use crate::domain::recommendation::{PredictedCandidate, RecommendationResult, ScoredCandidate};
use crate::domain::situation::GameSituation;
use crate::policy::scoring::score_candidate;
use crate::policy::weights::derive_weights;
use crate::policy::PolicyConfig;

pub const MAX_ALTERNATES: usize = 3;

/// Scores, filters, and ranks predicted candidates into a recommendation.
///
/// Candidates rejected by a hard constraint never appear in the result. Equal scores keep their
/// input order. With nothing eligible the result is [`RecommendationResult::no_candidates`].
pub fn rank_candidates(
    situation: &GameSituation,
    policy: &PolicyConfig,
    predicted: Vec<PredictedCandidate>,
) -> RecommendationResult {
    if predicted.is_empty() {
        return RecommendationResult::no_candidates(&policy.version);
    }

    let derivation = derive_weights(situation, &policy.weights);
    let total = predicted.len();

    let mut eligible: Vec<ScoredCandidate> = predicted
        .into_iter()
        .map(|p| score_candidate(situation, derivation.weights, p, policy))
        .filter(ScoredCandidate::is_eligible)
        .collect();

    tracing::debug!(
        total,
        eligible = eligible.len(),
        success_weight = derivation.weights.success_weight,
        yards_weight = derivation.weights.yards_weight,
        rules = ?derivation.fired,
        "scored candidates"
    );

    // `sort_by` is stable, so ties stay in generation order.
    eligible.sort_by(|a, b| score_of(b).total_cmp(&score_of(a)));

    let mut ranked = eligible.into_iter();
    let Some(best) = ranked.next() else {
        return RecommendationResult::no_candidates(&policy.version);
    };
    let alternative_plays: Vec<ScoredCandidate> = ranked.take(MAX_ALTERNATES).collect();

    let reasoning = derivation
        .fired
        .iter()
        .map(|rule| rule.rationale().to_string())
        .collect();

    RecommendationResult {
        success_probability: as_percent(best.success_prob),
        expected_yards: best.expected_yards,
        risk_level: best.risk_level,
        recommended_play: Some(best),
        reasoning,
        alternative_plays,
        policy_version: policy.version.clone(),
    }
}

fn score_of(c: &ScoredCandidate) -> f64 {
    c.score.unwrap_or(f64::NEG_INFINITY)
}

fn as_percent(p: f64) -> f64 {
    (p * 1000.0).round() / 10.0
}
