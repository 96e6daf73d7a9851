//! Bearer token authorization for protected routes
//!
//! The gateway never inspects tokens itself: each one is resolved by the
//! identity service. Any answer other than an explicit acceptance, including
//! an unreachable or slow identity service, ends the request with 401.

use axum::{
    RequestPartsExt, async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use common::rpc::Reply;
use tracing::{debug, info, warn};

use crate::{error::ApiError, state::AppState};

/// Caller identity attached to a request once its token has been accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

/// Authorization middleware
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = req.into_parts();

    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|e| {
            debug!(error = %e, "Rejected request without a bearer token");
            ApiError::Unauthorized("Missing or malformed Authorization header".to_string())
        })?;

    let user_id = match state.identity.validate(bearer.token()).await {
        Ok(Reply::Accepted(user_id)) => user_id,
        Ok(Reply::Rejected { code, message }) => {
            info!(%code, message, "Token rejected by identity service");
            return Err(ApiError::Unauthorized("Invalid token".to_string()));
        }
        Err(e) => {
            warn!(error = %e, "Token validation unavailable, denying request");
            return Err(ApiError::Unauthorized("Invalid token".to_string()));
        }
    };

    parts.extensions.insert(AuthenticatedUser { user_id });

    Ok(next.run(Request::from_parts(parts, body)).await)
}
