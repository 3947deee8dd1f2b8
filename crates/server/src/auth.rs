//! Registration and login endpoints.
//!
//! Both answer with a `{message, success}` payload, failures included; the
//! status code carries the failure kind.

use api_types::{
    ActionResponse,
    auth::{Login, Register},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::EngineError;

use crate::{failure, server::ServerState};

fn rejected(err: EngineError) -> (StatusCode, Json<ActionResponse>) {
    let (status, message) = match err {
        EngineError::ExistingKey(_) => (StatusCode::CONFLICT, "User already exists".to_string()),
        EngineError::KeyNotFound(_) => (StatusCode::NOT_FOUND, "User not found".to_string()),
        EngineError::InvalidCredential => {
            (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
        }
        other => failure(other),
    };
    (status, Json(ActionResponse::failed(message)))
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<Register>,
) -> (StatusCode, Json<ActionResponse>) {
    match state
        .engine
        .register(&payload.email, &payload.password, payload.name.as_deref())
        .await
    {
        Ok(_) => (
            StatusCode::CREATED,
            Json(ActionResponse::ok("User registered successfully")),
        ),
        Err(err) => rejected(err),
    }
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Login>,
) -> (StatusCode, Json<ActionResponse>) {
    match state.engine.login(&payload.email, &payload.password).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "login succeeded");
            (StatusCode::OK, Json(ActionResponse::ok("Login successful")))
        }
        Err(err) => rejected(err),
    }
}
