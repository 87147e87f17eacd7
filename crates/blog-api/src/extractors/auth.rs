//! Authentication extractor
//!
//! Extracts and validates bearer JWTs from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use blog_core::{Actor, Role, UserId};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from the JWT
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the token subject
    pub user_id: UserId,
    /// Role claimed by the token
    pub role: Role,
}

impl AuthUser {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// The caller as the services see it
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

impl From<Actor> for AuthUser {
    fn from(actor: Actor) -> Self {
        Self::new(actor.user_id, actor.role)
    }
}

fn authenticate(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    let claims = state
        .jwt_service()
        .validate_access_token(token)
        .map_err(|e| {
            tracing::warn!(error = %e, "Invalid access token");
            ApiError::App(e)
        })?;

    let actor = claims.actor().map_err(|e| {
        tracing::warn!(error = %e, "Invalid subject in token");
        ApiError::App(e)
    })?;

    Ok(AuthUser::from(actor))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        authenticate(&app_state, bearer.token())
    }
}
