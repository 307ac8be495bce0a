use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::json;

use crate::infra::AppState;
use gummy_mummy::auth::AuthError;
use gummy_mummy::engine::{Assessment, Payload};
use gummy_mummy::error::AppError;
use gummy_mummy::profile::NewClient;
use gummy_mummy::service::{AdviceService, Registration, ServiceError};
use gummy_mummy::store::{ClientRepository, SubmissionArchive};

pub(crate) fn advice_routes<C, S>(service: Arc<AdviceService<C, S>>) -> Router
where
    C: ClientRepository + 'static,
    S: SubmissionArchive + 'static,
{
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/register", post(register_handler::<C, S>))
        .route("/section/:section_name", post(section_handler::<C, S>))
        .with_state(service)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "time": Utc::now().to_rfc3339() }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn register_handler<C, S>(
    State(service): State<Arc<AdviceService<C, S>>>,
    Json(client): Json<NewClient>,
) -> Result<Json<Registration>, AppError>
where
    C: ClientRepository + 'static,
    S: SubmissionArchive + 'static,
{
    let confirmation = service.register(client)?;
    Ok(Json(confirmation))
}

pub(crate) async fn section_handler<C, S>(
    State(service): State<Arc<AdviceService<C, S>>>,
    Path(section_name): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<Payload>,
) -> Result<Json<Assessment>, AppError>
where
    C: ClientRepository + 'static,
    S: SubmissionArchive + 'static,
{
    let token =
        bearer_token(&headers).ok_or(AppError::Service(ServiceError::Auth(AuthError::Invalid)))?;
    let assessment = service.assess(token, &section_name, payload)?;
    Ok(Json(assessment))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}
