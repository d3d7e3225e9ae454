use crate::config::Settings;
use crate::domain::play::FeatureRecord;
use crate::predictor::PlayPredictor;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SUCCESS_PATH: &str = "/v1/predict/success";
const DEFAULT_YARDS_PATH: &str = "/v1/predict/yards";

/// Calls an external model-serving endpoint that hosts the success and yards models.
///
/// Each call is a single attempt; retry policy belongs to whoever owns the request.
#[derive(Debug, Clone)]
pub struct HttpModelPredictor {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    success_path: String,
    yards_path: String,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    features: &'a FeatureRecord,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    value: f64,
}

impl HttpModelPredictor {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_predictor_base_url()?.to_string();
        let api_key = settings.predictor_api_key.clone();

        let timeout_secs = std::env::var("PREDICTOR_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let success_path = path_from_env("PREDICTOR_SUCCESS_PATH", DEFAULT_SUCCESS_PATH);
        let yards_path = path_from_env("PREDICTOR_YARDS_PATH", DEFAULT_YARDS_PATH);

        Self::new(base_url, api_key, success_path, yards_path, Duration::from_secs(timeout_secs))
    }

    pub fn new(
        base_url: String,
        api_key: Option<String>,
        success_path: String,
        yards_path: String,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build predictor http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
            success_path,
            yards_path,
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert("x-api-key", HeaderValue::from_str(api_key)?);
        }
        Ok(headers)
    }

    async fn predict(&self, path: &str, features: &FeatureRecord) -> Result<f64> {
        let url = self.url(path);
        let res = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&PredictRequest { features })
            .send()
            .await
            .with_context(|| format!("predictor request to {url} failed"))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read predictor response")?;
        if !status.is_success() {
            anyhow::bail!("predictor HTTP {status} from {url}: {text}");
        }

        let parsed = serde_json::from_str::<PredictResponse>(&text)
            .with_context(|| format!("predictor response is not {{\"value\": number}}: {text}"))?;
        Ok(parsed.value)
    }
}

#[async_trait::async_trait]
impl PlayPredictor for HttpModelPredictor {
    fn name(&self) -> &'static str {
        "http_model"
    }

    async fn predict_success(&self, features: &FeatureRecord) -> Result<f64> {
        self.predict(&self.success_path, features).await
    }

    async fn predict_yards(&self, features: &FeatureRecord) -> Result<f64> {
        self.predict(&self.yards_path, features).await
    }
}

fn path_from_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn join_url(base_url: &str, path: &str) -> String {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::play::{Candidate, Formation, PlayLocation, RunGap};
    use crate::domain::situation::fixtures::situation;
    use serde_json::json;

    #[test]
    fn joins_base_and_path_with_one_slash() {
        assert_eq!(join_url("http://models:9000/", "/v1/predict/yards"), "http://models:9000/v1/predict/yards");
        assert_eq!(join_url("http://models:9000", "v1/predict/yards"), "http://models:9000/v1/predict/yards");
    }

    #[test]
    fn request_body_wraps_feature_record() {
        let s = situation(1, 10.0, 63, 3, 489, 0);
        let features = Candidate::run(Formation::Shotgun, PlayLocation::Middle, RunGap::Guard, "D.Swift").features(&s);
        let body = serde_json::to_value(PredictRequest { features: &features }).unwrap();
        assert_eq!(body["features"]["ydstogo"], json!(10.0));
        assert_eq!(body["features"]["run_gap"], json!("guard"));
    }

    #[test]
    fn parses_value_response_and_rejects_strings() {
        let ok: PredictResponse = serde_json::from_value(json!({"value": 0.61})).unwrap();
        assert_eq!(ok.value, 0.61);
        assert!(serde_json::from_value::<PredictResponse>(json!({"value": "0.61"})).is_err());
    }

    #[test]
    fn from_settings_requires_base_url() {
        let settings = Settings {
            predictor_base_url: None,
            predictor_api_key: None,
            sentry_dsn: None,
            cors_allowed_origins: Vec::new(),
            risk_penalty: false,
        };
        assert!(HttpModelPredictor::from_settings(&settings).is_err());
    }
}
