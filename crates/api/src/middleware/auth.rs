//! Session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use cybermind_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in user resolved from an `Authorization: Bearer <token>` header.
///
/// Add it as a handler parameter to gate the route:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(subject = ?user.subject, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// When no token key is configured the gate is open and every request
/// resolves to an anonymous user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The provider's user id (`claims.sub`). `None` when the gate is open.
    pub subject: Option<String>,
}

impl AuthUser {
    pub fn anonymous() -> Self {
        Self { subject: None }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(jwt) = state.config.auth.as_ref() else {
            return Ok(AuthUser::anonymous());
        };

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            subject: Some(claims.sub),
        })
    }
}
