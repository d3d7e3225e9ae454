pub mod candidates;
pub mod ranker;

use crate::domain::contract::SituationRequest;
use crate::domain::recommendation::RecommendationResult;
use crate::domain::situation::GameSituation;
use crate::engine::candidates::{generate_candidates, GeneratorConfig};
use crate::policy::PolicyConfig;
use crate::predictor::{predict_all, PlayPredictor};
use std::sync::Arc;
use tracing::Instrument;

pub use ranker::rank_candidates;

/// Stateless recommendation pipeline. Cheap to clone and safe to share across requests.
#[derive(Clone)]
pub struct RecommendationEngine {
    predictor: Arc<dyn PlayPredictor>,
    policy: PolicyConfig,
    generator: GeneratorConfig,
}

impl RecommendationEngine {
    pub fn new(
        predictor: Arc<dyn PlayPredictor>,
        policy: PolicyConfig,
        generator: GeneratorConfig,
    ) -> Self {
        Self {
            predictor,
            policy,
            generator,
        }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn predictor_name(&self) -> &'static str {
        self.predictor.name()
    }

    pub async fn recommend(&self, request: SituationRequest) -> anyhow::Result<RecommendationResult> {
        let situation = request.validate_and_into_situation()?;
        self.recommend_situation(&situation).await
    }

    pub async fn recommend_situation(
        &self,
        situation: &GameSituation,
    ) -> anyhow::Result<RecommendationResult> {
        let span = tracing::info_span!(
            "recommend",
            down = situation.down,
            distance = situation.distance,
            yardline_100 = situation.yardline_100,
            quarter = situation.quarter,
            seconds = situation.time_remaining_seconds,
            score_difference = situation.score_difference,
            policy = %self.policy.version,
        );

        async {
            let candidates = generate_candidates(&self.generator);
            let predicted = predict_all(Arc::clone(&self.predictor), situation, candidates).await?;
            let result = rank_candidates(situation, &self.policy, predicted);

            match &result.recommended_play {
                Some(best) => tracing::info!(
                    play_type = ?best.candidate.play_type,
                    score = best.score,
                    risk = ?result.risk_level,
                    alternates = result.alternative_plays.len(),
                    "recommendation ready"
                ),
                None => tracing::info!("no eligible candidates; returning empty recommendation"),
            }

            Ok(result)
        }
        .instrument(span)
        .await
    }
}
