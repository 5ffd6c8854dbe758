//! Authentication routes
//!
//! The router is generic over the host application's state so the gateway
//! can nest it under `/api/auth` as long as it can hand out an
//! [`AuthService`].

use axum::{
    Json, Router,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    error::AuthError,
    models::{LoginRequest, RegisterRequest},
    service::AuthService,
};

/// Create the router for the auth registry
pub fn create_router<S>() -> Router<S>
where
    AuthService: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users", get(list_users))
}

/// Register a new user
pub async fn register(
    State(auth): State<AuthService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(payload) = payload?;
    let user = auth.register(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "user": user,
        })),
    ))
}

/// User login endpoint
pub async fn login(
    State(auth): State<AuthService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(payload) = payload?;
    let user = auth.login(&payload).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "user": user,
    })))
}

/// Diagnostic listing of all users, password data stripped
pub async fn list_users(State(auth): State<AuthService>) -> Result<impl IntoResponse, AuthError> {
    let users = auth.list_users().await?;
    let count = users.len();

    Ok(Json(json!({
        "success": true,
        "users": users,
        "count": count,
    })))
}
