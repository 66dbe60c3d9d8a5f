//! HTTP surface for the policy question-answering service.
//!
//! This module exposes a compact Axum router with a handful of endpoints:
//!
//! - `POST /hackrx/run` – Retrieve the document behind `documents`, run the
//!   question-answering pipeline, and return one answer per entry in `questions`.
//! - `GET /ping` – Liveness probe answering with the literal body `PONG`.
//! - `GET /metrics` – Observe run counters; gated by the bearer-token middleware.
//! - `POST /auth/signup`, `POST /auth/login` – Account surface issuing the bearer tokens
//!   the metrics gate expects.
//!
//! Request-shape validation happens here, before any I/O: a body that does not decode
//! into the expected shape is answered with `400` without touching the document store.

use crate::auth::{self, UserStore};
use crate::pipeline::QaApi;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Build the HTTP router exposing the question-answering API surface.
pub fn create_router<S>(service: Arc<S>, user_store: Arc<UserStore>) -> Router
where
    S: QaApi + 'static,
{
    Router::new()
        .route("/hackrx/run", post(run_submission::<S>))
        .route("/ping", get(ping))
        .route(
            "/metrics",
            get(get_metrics::<S>).layer(middleware::from_fn(auth::require_bearer)),
        )
        .with_state(service)
        .nest("/auth", auth::router(user_store))
}

/// Request body for the `POST /hackrx/run` endpoint.
#[derive(Deserialize)]
struct RunRequest {
    /// Address of the source document to retrieve.
    documents: String,
    /// Questions to answer against the document, in caller order.
    questions: Vec<String>,
}

/// Success response for the `POST /hackrx/run` endpoint.
#[derive(Serialize)]
struct RunResponse {
    /// One answer per question, order-preserving.
    answers: Vec<String>,
}

/// Run the question-answering pipeline for one document.
///
/// Pipeline failures before the chunk fan-out are fatal and answered with a generic
/// `500`; the detail stays in the log. Per-chunk failures never reach this handler —
/// they degrade the affected answers to the sentinel string instead.
async fn run_submission<S>(
    State(service): State<Arc<S>>,
    payload: Result<Json<RunRequest>, JsonRejection>,
) -> Response
where
    S: QaApi,
{
    let Ok(Json(request)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid request body" })),
        )
            .into_response();
    };

    match service
        .answer_questions(&request.documents, &request.questions)
        .await
    {
        Ok(answers) => {
            tracing::info!(
                questions = request.questions.len(),
                "Run request completed"
            );
            Json(RunResponse { answers }).into_response()
        }
        Err(error) => {
            tracing::error!(error = %error, "Failed to process document");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to process document" })),
            )
                .into_response()
        }
    }
}

/// Liveness probe.
async fn ping() -> &'static str {
    "PONG"
}

/// Return a concise metrics snapshot with run counters and the last chunk count.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<crate::metrics::MetricsSnapshot>
where
    S: QaApi,
{
    Json(service.metrics_snapshot())
}
