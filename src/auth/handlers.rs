//! Authentication HTTP Handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::error::ApiError;
use crate::extractors::{AuthUser, Json};
use crate::models::{LoginRequest, RegisterRequest, RegisterResponse};
use crate::AppState;

/// POST /api/auth/register
///
/// Register a new user account and return a token for it
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let resp = state.auth.register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            auth: resp,
        }),
    ))
}

/// POST /api/auth/login
///
/// Authenticate and return an access token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let resp = state.auth.login(req).await?;

    Ok(Json(resp))
}

/// GET /api/auth/me
///
/// Get the authenticated user's profile
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.auth.get_profile(user.id).await?;
    Ok(Json(profile))
}
