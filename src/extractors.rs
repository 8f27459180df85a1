//! Request Extractors
//!
//! Axum extractors: a bearer-token identity and a JSON body wrapper whose
//! rejection speaks the same error format as the rest of the API.
//! Verification goes through the state-held token service; nothing is read
//! from ambient environment at request time.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRef, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::ApiError;
use crate::AppState;

/// Authenticated user identity extracted from the bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::InvalidToken)?;

        // Missing, malformed, and expired credentials are all reported the
        // same way.
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::InvalidToken)?;

        let state = AppState::from_ref(state);
        let id = state.tokens.verify(token)?;

        Ok(AuthUser { id })
    }
}

/// JSON body extractor that reports missing or malformed bodies as a
/// validation failure instead of axum's default plain-text 422.
#[derive(Debug, Clone, Copy)]
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        Ok(Json(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
