pub mod error;
pub mod http;

use crate::domain::play::{Candidate, FeatureRecord};
use crate::domain::recommendation::PredictedCandidate;
use crate::domain::situation::GameSituation;
use crate::predictor::error::PredictorUnavailableError;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Pre-trained models consumed as black boxes.
#[async_trait::async_trait]
pub trait PlayPredictor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Probability in 0..1 (0..100 is tolerated downstream) that the play succeeds.
    async fn predict_success(&self, features: &FeatureRecord) -> anyhow::Result<f64>;

    async fn predict_yards(&self, features: &FeatureRecord) -> anyhow::Result<f64>;
}

/// Runs both predictors for every candidate concurrently and returns results in candidate order.
///
/// Any failure aborts the outstanding calls and fails with [`PredictorUnavailableError`].
pub async fn predict_all(
    predictor: Arc<dyn PlayPredictor>,
    situation: &GameSituation,
    candidates: Vec<Candidate>,
) -> anyhow::Result<Vec<PredictedCandidate>> {
    let name = predictor.name();
    let total = candidates.len();
    let mut tasks = JoinSet::new();

    for (index, candidate) in candidates.into_iter().enumerate() {
        let predictor = Arc::clone(&predictor);
        let features = candidate.features(situation);
        tasks.spawn(async move {
            let out = predict_one(predictor.as_ref(), &features).await;
            (index, out.map(|(success_prob, expected_yards)| PredictedCandidate {
                candidate,
                success_prob,
                expected_yards,
            }))
        });
    }

    let mut slots: Vec<Option<PredictedCandidate>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        let (index, out) = joined.map_err(|e| PredictorUnavailableError {
            predictor: name,
            stage: "join",
            candidate_index: None,
            detail: e.to_string(),
        })?;

        match out {
            Ok(predicted) => slots[index] = Some(predicted),
            Err((stage, detail)) => {
                tracing::warn!(predictor = name, stage, index, %detail, "prediction failed; aborting request");
                return Err(PredictorUnavailableError {
                    predictor: name,
                    stage,
                    candidate_index: Some(index),
                    detail,
                }
                .into());
            }
        }
    }

    let predicted: Vec<PredictedCandidate> = slots.into_iter().flatten().collect();
    anyhow::ensure!(
        predicted.len() == total,
        "predictor {name} returned {} of {total} results",
        predicted.len()
    );
    Ok(predicted)
}

async fn predict_one(
    predictor: &dyn PlayPredictor,
    features: &FeatureRecord,
) -> Result<(f64, f64), (&'static str, String)> {
    let (success, yards) = tokio::join!(
        predictor.predict_success(features),
        predictor.predict_yards(features)
    );
    let success = success.map_err(|e| ("success", format!("{e:#}")))?;
    let yards = yards.map_err(|e| ("yards", format!("{e:#}")))?;

    if !success.is_finite() || !yards.is_finite() {
        return Err((
            "invalid_output",
            format!("non-finite prediction (success={success}, yards={yards})"),
        ));
    }
    Ok((success, yards))
}
