use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use plantfacts_core::{LocaleTable, RequestEnvelope, ResponseEnvelope};
use plantfacts_observability::{MetricsSnapshot, SkillMetrics};
use plantfacts_skill::{RandomFactPicker, Skill, DEFAULT_USER_AGENT_SUFFIX};
use serde::Serialize;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind: String,
    /// Replaces the built-in locale table when set.
    pub resources_path: Option<PathBuf>,
    pub user_agent_suffix: String,
    pub body_limit_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            resources_path: None,
            user_agent_suffix: DEFAULT_USER_AGENT_SUFFIX.to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank or unparsable values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind: lookup("PLANTFACTS_BIND")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.bind),
            resources_path: lookup("PLANTFACTS_RESOURCES")
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            user_agent_suffix: lookup("PLANTFACTS_USER_AGENT")
                .unwrap_or(defaults.user_agent_suffix),
            body_limit_bytes: lookup("PLANTFACTS_BODY_LIMIT_BYTES")
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|value| *value > 0)
                .unwrap_or(defaults.body_limit_bytes),
        }
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub skill: Arc<Skill>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    user_agent: String,
    locales: Vec<String>,
    metrics: MetricsSnapshot,
}

pub fn build_skill(config: &ApiConfig) -> Result<Skill> {
    let table = match config.resources_path.as_ref() {
        Some(path) => LocaleTable::from_path(path)
            .with_context(|| format!("failed loading locale resources from {}", path.display()))?,
        None => LocaleTable::builtin(),
    };

    Ok(Skill::new(
        Arc::new(table),
        Arc::new(RandomFactPicker),
        SkillMetrics::shared(),
    )
    .with_user_agent_suffix(&config.user_agent_suffix))
}

pub fn build_app(config: &ApiConfig) -> Result<Router> {
    let skill = build_skill(config)?;
    tracing::info!(
        locales = ?skill.table().locales(),
        user_agent = %skill.user_agent(),
        "skill initialized"
    );

    Ok(build_router(
        ApiState {
            skill: Arc::new(skill),
        },
        config.body_limit_bytes,
    ))
}

pub fn build_router(state: ApiState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/skill", post(invoke_skill))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        user_agent: state.skill.user_agent().to_string(),
        locales: state
            .skill
            .table()
            .locales()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
        metrics: state.skill.metrics().snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

/// The skill endpoint. Envelopes that fail to deserialize are rejected by
/// the extractor and never reach the skill.
async fn invoke_skill(
    State(state): State<ApiState>,
    Json(envelope): Json<RequestEnvelope>,
) -> Json<ResponseEnvelope> {
    Json(state.skill.invoke(&envelope))
}
