//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use gamesapi_core::error::CoreError;
use gamesapi_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Rejects with 401 when the header is missing or the token is invalid.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        user_from_headers(&parts.headers, &state.config.jwt)?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Authentication credentials were not provided.".into(),
            ))
        })
    }
}

/// Decode the bearer token in `headers`, if any.
pub fn user_from_headers(
    headers: &HeaderMap,
    config: &JwtConfig,
) -> Result<Option<AuthUser>, AppError> {
    let Some(auth_header) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

    let claims = validate_token(token.trim(), config).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(Some(AuthUser {
        user_id: claims.sub,
        username: claims.username,
    }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;
    use crate::auth::jwt::generate_access_token;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".into(),
            access_token_expiry_mins: 5,
        }
    }

    #[test]
    fn no_header_is_anonymous() {
        assert_matches!(user_from_headers(&HeaderMap::new(), &config()), Ok(None));
    }

    #[test]
    fn valid_bearer_token_yields_user() {
        let token = generate_access_token(9, "carol", &config()).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        let user = user_from_headers(&headers, &config()).unwrap().unwrap();
        assert_eq!(user.user_id, 9);
        assert_eq!(user.username, "carol");
    }

    #[test]
    fn wrong_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic YWxpY2U6cHc="));
        assert_matches!(
            user_from_headers(&headers, &config()),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
    }
}
