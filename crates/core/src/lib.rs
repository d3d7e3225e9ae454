pub mod domain;
pub mod engine;
pub mod policy;
pub mod predictor;
pub mod time;

pub use engine::RecommendationEngine;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_CORS_ALLOWED_ORIGINS: [&str; 3] = [
        "http://localhost:5173",
        "http://localhost:4173",
        "https://playcalling-engine-bears.vercel.app",
    ];

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub predictor_base_url: Option<String>,
        pub predictor_api_key: Option<String>,
        pub sentry_dsn: Option<String>,
        pub cors_allowed_origins: Vec<String>,
        pub risk_penalty: bool,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let cors_allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                Ok(s) => parse_origins(&s),
                Err(_) => DEFAULT_CORS_ALLOWED_ORIGINS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            };

            let risk_penalty = match std::env::var("POLICY_RISK_PENALTY") {
                Ok(s) => parse_flag(&s)
                    .with_context(|| format!("POLICY_RISK_PENALTY must be on/off (got {s:?})"))?,
                Err(_) => false,
            };

            Ok(Self {
                predictor_base_url: std::env::var("PREDICTOR_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                predictor_api_key: std::env::var("PREDICTOR_API_KEY").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                cors_allowed_origins,
                risk_penalty,
            })
        }

        pub fn require_predictor_base_url(&self) -> anyhow::Result<&str> {
            self.predictor_base_url
                .as_deref()
                .context("PREDICTOR_BASE_URL is required")
        }
    }

    fn parse_origins(s: &str) -> Vec<String> {
        s.split(',')
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect()
    }

    fn parse_flag(s: &str) -> Option<bool> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "0" | "false" | "off" | "no" => Some(false),
            _ => None,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn parse_origins_skips_blank_entries() {
            let origins = parse_origins(" http://a.test , ,http://b.test,");
            assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
        }

        #[test]
        fn parse_flag_accepts_common_spellings() {
            assert_eq!(parse_flag("ON"), Some(true));
            assert_eq!(parse_flag(" off "), Some(false));
            assert_eq!(parse_flag("1"), Some(true));
            assert_eq!(parse_flag("maybe"), None);
        }

        #[test]
        fn require_predictor_base_url_reports_missing_key() {
            let settings = Settings {
                predictor_base_url: None,
                predictor_api_key: None,
                sentry_dsn: None,
                cors_allowed_origins: Vec::new(),
                risk_penalty: false,
            };
            let err = settings.require_predictor_base_url().unwrap_err();
            assert!(err.to_string().contains("PREDICTOR_BASE_URL"));
        }
    }
}
