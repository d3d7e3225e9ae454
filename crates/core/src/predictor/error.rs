use std::fmt;

/// A predictor could not produce a usable value for some candidate. Fails the whole request.
#[derive(Debug, Clone)]
pub struct PredictorUnavailableError {
    pub predictor: &'static str,
    pub stage: &'static str,
    pub candidate_index: Option<usize>,
    pub detail: String,
}

impl fmt::Display for PredictorUnavailableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "model unavailable (predictor={}, stage={}",
            self.predictor, self.stage
        )?;
        if let Some(index) = self.candidate_index {
            write!(f, ", candidate={index}")?;
        }
        write!(f, "): {}", self.detail)
    }
}

impl std::error::Error for PredictorUnavailableError {}
