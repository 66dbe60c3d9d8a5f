//! Account registration, login, and the bearer-token gate.
//!
//! This is a conventional auth surface kept separate from the question-answering
//! pipeline: signup and login handlers backed by the in-memory [`UserStore`], and a
//! middleware that rejects requests lacking a valid bearer token. Login responses carry
//! an HS256 token valid for 24 hours.

mod store;
pub mod token;

use axum::{
    Json, Router,
    extract::{Request, State, rejection::JsonRejection},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::config::get_config;
pub use store::{AuthError, UserRecord, UserStore};

/// Build the router exposing `/signup` and `/login`.
pub fn router(store: Arc<UserStore>) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .with_state(store)
}

/// Request body for `POST /auth/signup`.
#[derive(Deserialize)]
struct SignupRequest {
    name: String,
    email: String,
    password: String,
}

impl SignupRequest {
    fn is_valid(&self) -> bool {
        (3..=100).contains(&self.name.trim().chars().count())
            && self.email.contains('@')
            && (4..=100).contains(&self.password.chars().count())
    }
}

/// Request body for `POST /auth/login`.
#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    fn is_valid(&self) -> bool {
        self.email.contains('@') && (4..=100).contains(&self.password.chars().count())
    }
}

/// Register a new account.
async fn signup(
    State(store): State<Arc<UserStore>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return bad_request("Bad request: Invalid signup data");
    };
    if !request.is_valid() {
        return bad_request("Bad request: Invalid signup data");
    }

    match store
        .register(request.name.trim(), &request.email, &request.password)
        .await
    {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Signup successful", "success": true })),
        )
            .into_response(),
        Err(AuthError::EmailTaken) => (
            StatusCode::CONFLICT,
            Json(json!({ "message": "User already exists, you can login", "success": false })),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(error = %error, "Signup failed");
            internal_error()
        }
    }
}

/// Check credentials and issue a bearer token.
async fn login(
    State(store): State<Arc<UserStore>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return bad_request("Bad request: Invalid login data");
    };
    if !request.is_valid() {
        return bad_request("Bad request: Invalid login data");
    }

    let user = match store.authenticate(&request.email, &request.password).await {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "message": "Auth failed: email or password is incorrect",
                    "success": false
                })),
            )
                .into_response();
        }
        Err(error) => {
            tracing::error!(error = %error, "Login failed");
            return internal_error();
        }
    };

    match token::issue_token(&get_config().jwt_secret, &user.email, &user.id) {
        Ok(jwt_token) => (
            StatusCode::OK,
            Json(json!({
                "message": "Login successful",
                "success": true,
                "jwt_token": jwt_token,
                "email": user.email,
                "name": user.name
            })),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(error = %error, "Token signing failed");
            internal_error()
        }
    }
}

/// Middleware rejecting requests without a valid bearer token.
///
/// Accepts the `Authorization` header with or without the `Bearer ` prefix.
pub async fn require_bearer(request: Request, next: Next) -> Response {
    let Some(raw) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    else {
        return forbidden("Unauthorized: JWT token is required");
    };

    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);
    match token::verify_token(&get_config().jwt_secret, token) {
        Ok(claims) => {
            tracing::debug!(email = %claims.email, "Authenticated request");
            next.run(request).await
        }
        Err(error) => {
            tracing::debug!(error = %error, "Rejected bearer token");
            forbidden("Unauthorized: JWT token is invalid or expired")
        }
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": message })),
    )
        .into_response()
}

fn forbidden(message: &str) -> Response {
    (StatusCode::FORBIDDEN, Json(json!({ "message": message }))).into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal server error", "success": false })),
    )
        .into_response()
}
