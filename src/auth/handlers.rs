use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{AuthResponse, CheckEmailRequest, CheckEmailResponse, LoginRequest, SignupRequest},
        jwt::JwtKeys,
        service,
    },
    error::AuthError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/check-email", post(check_email))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let keys = JwtKeys::from_ref(&state);
    let res = service::signup(state.store.as_ref(), &keys, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let keys = JwtKeys::from_ref(&state);
    let res = service::login(state.store.as_ref(), &keys, payload).await?;
    Ok(Json(res))
}

#[instrument(skip(state, payload))]
pub async fn check_email(
    State(state): State<AppState>,
    Json(payload): Json<CheckEmailRequest>,
) -> Result<Json<CheckEmailResponse>, AuthError> {
    let exists = service::email_exists(state.store.as_ref(), &payload.email).await?;
    Ok(Json(CheckEmailResponse { exists }))
}
