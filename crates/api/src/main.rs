use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use playcall_core::domain::contract::SituationRequest;
use playcall_core::domain::recommendation::RecommendationResult;
use playcall_core::engine::candidates::GeneratorConfig;
use playcall_core::policy::PolicyConfig;
use playcall_core::predictor::error::PredictorUnavailableError;
use playcall_core::predictor::http::HttpModelPredictor;
use playcall_core::RecommendationEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = playcall_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let policy = PolicyConfig::from_settings(&settings);
    let engine = match HttpModelPredictor::from_settings(&settings) {
        Ok(predictor) => {
            tracing::info!(policy = %policy.version, "predictor configured");
            Some(RecommendationEngine::new(
                Arc::new(predictor),
                policy,
                GeneratorConfig::from_env(),
            ))
        }
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "predictor not configured; starting API in degraded mode");
            None
        }
    };

    let app = router(AppState { engine }, cors_layer(&settings.cors_allowed_origins));

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/recommend", post(recommend))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(origin = %o, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[derive(Clone)]
struct AppState {
    engine: Option<RecommendationEngine>,
}

#[derive(Debug, Serialize)]
struct Health {
    ok: bool,
}

async fn health() -> Json<Health> {
    Json(Health { ok: true })
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    request_id: Uuid,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<SituationRequest>,
) -> ApiResult<RecommendationResult> {
    let request_id = Uuid::new_v4();

    let Some(engine) = &state.engine else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError {
                error: "model unavailable",
                detail: Some("predictor is not configured".to_string()),
                request_id,
            }),
        ));
    };

    let situation = request.validate_and_into_situation().map_err(|e| {
        tracing::info!(%request_id, error = %e, "rejected situation");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError {
                error: "invalid situation",
                detail: Some(e.to_string()),
                request_id,
            }),
        )
    })?;

    match engine.recommend_situation(&situation).await {
        Ok(result) => {
            tracing::info!(%request_id, empty = result.is_empty(), "recommend served");
            Ok(Json(result))
        }
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(%request_id, error = %e, "recommend failed");
            let (status, error) = if e.downcast_ref::<PredictorUnavailableError>().is_some() {
                (StatusCode::SERVICE_UNAVAILABLE, "model unavailable")
            } else {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            };
            Err((
                status,
                Json(ApiError {
                    error,
                    detail: Some(format!("{e:#}")),
                    request_id,
                }),
            ))
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
