use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playcall_core::domain::contract::SituationRequest;
use playcall_core::engine::candidates::GeneratorConfig;
use playcall_core::policy::PolicyConfig;
use playcall_core::predictor::http::HttpModelPredictor;
use playcall_core::RecommendationEngine;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const PING_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Parser)]
#[command(name = "playcall")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend a play for one situation and print the result as JSON.
    Recommend(RecommendArgs),

    /// Check that a running API answers its health endpoint.
    Ping {
        /// API base URL. Defaults to PLAYCALL_API_URL, then http://localhost:8000.
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Debug, Args)]
struct RecommendArgs {
    #[arg(long)]
    down: i32,

    /// Yards to go.
    #[arg(long)]
    distance: i32,

    /// Yards from the opponent goal line.
    #[arg(long)]
    field_position: i32,

    /// 1-4, 5 for overtime.
    #[arg(long)]
    quarter: i32,

    /// Period clock as MM:SS.
    #[arg(long)]
    time_remaining: String,

    /// Offense score minus defense score.
    #[arg(long, allow_hyphen_values = true)]
    score_difference: i32,

    #[arg(long)]
    opponent: String,

    #[arg(long, default_value_t = 3)]
    posteam_timeouts: i32,

    #[arg(long, default_value_t = 3)]
    defteam_timeouts: i32,

    /// Subtract the risk penalty before ranking (overrides POLICY_RISK_PENALTY).
    #[arg(long)]
    risk_penalty: bool,
}

impl RecommendArgs {
    fn into_request(self) -> SituationRequest {
        SituationRequest {
            down: self.down,
            distance: self.distance,
            field_position: self.field_position,
            quarter: self.quarter,
            time_remaining: self.time_remaining,
            score_difference: self.score_difference,
            opponent: self.opponent,
            posteam_timeouts_remaining: self.posteam_timeouts,
            defteam_timeouts_remaining: self.defteam_timeouts,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = playcall_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let cli = Cli::parse();
    let res = match cli.command {
        Command::Recommend(args) => run_recommend(&settings, args).await,
        Command::Ping { url } => run_ping(url).await,
    };

    if let Err(err) = &res {
        sentry_anyhow::capture_anyhow(err);
    }
    res
}

async fn run_recommend(
    settings: &playcall_core::config::Settings,
    args: RecommendArgs,
) -> anyhow::Result<()> {
    let policy = if args.risk_penalty {
        PolicyConfig::risk_averse()
    } else {
        PolicyConfig::from_settings(settings)
    };

    let predictor = HttpModelPredictor::from_settings(settings)?;
    let engine = RecommendationEngine::new(Arc::new(predictor), policy, GeneratorConfig::from_env());

    let result = engine.recommend(args.into_request()).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("failed to serialize recommendation")?
    );
    Ok(())
}

async fn run_ping(url: Option<String>) -> anyhow::Result<()> {
    let base = url
        .or_else(|| std::env::var("PLAYCALL_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let url = health_url(&base);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(PING_TIMEOUT_SECS))
        .build()
        .context("failed to build http client")?;

    let res = http
        .get(&url)
        .send()
        .await
        .with_context(|| format!("health request to {url} failed"))?;

    let status = res.status();
    anyhow::ensure!(status.is_success(), "health check {url} returned HTTP {status}");

    tracing::info!(%url, %status, "health check ok");
    Ok(())
}

fn health_url(base: &str) -> String {
    format!("{}/health", base.trim_end_matches('/'))
}

fn init_sentry(settings: &playcall_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recommend_with_negative_score_difference() {
        let cli = Cli::try_parse_from([
            "playcall",
            "recommend",
            "--down",
            "3",
            "--distance",
            "6",
            "--field-position",
            "35",
            "--quarter",
            "3",
            "--time-remaining",
            "08:45",
            "--score-difference",
            "-3",
            "--opponent",
            "MIN",
        ])
        .unwrap();

        let Command::Recommend(args) = cli.command else {
            panic!("expected recommend subcommand");
        };
        assert!(!args.risk_penalty);
        let req = args.into_request();
        assert_eq!(req.score_difference, -3);
        assert_eq!(req.posteam_timeouts_remaining, 3);
        assert_eq!(req.defteam_timeouts_remaining, 3);

        let situation = req.validate_and_into_situation().unwrap();
        assert_eq!(situation.time_remaining_seconds, 525);
    }

    #[test]
    fn health_url_avoids_double_slash() {
        assert_eq!(health_url("http://localhost:8000/"), "http://localhost:8000/health");
        assert_eq!(health_url("https://playcalling-engine.onrender.com"), "https://playcalling-engine.onrender.com/health");
    }
}
