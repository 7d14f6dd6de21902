use std::sync::Arc;

use auth::Authenticator;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::Utc;

use crate::domain::user::models::UserId;

/// Body of every rejection from the gate. Deliberately a bare JSON string
/// that does not reveal which check failed.
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized";

/// Identity resolved by [`authenticate`] for the current request.
///
/// Lives in request extensions for the duration of one request only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates bearer tokens and adds the caller to request extensions
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Non-UTF-8 header values are handled as a missing header.
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let identity = authenticator
        .authenticate_bearer(authorization, Utc::now())
        .map_err(|_| unauthorized())?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: identity.into(),
    });

    Ok(next.run(req).await)
}

pub fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(UNAUTHORIZED_MESSAGE)).into_response()
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(unauthorized)
    }
}
