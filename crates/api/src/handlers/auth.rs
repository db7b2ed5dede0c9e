//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use gamesapi_core::error::CoreError;
use gamesapi_core::types::DbId;
use gamesapi_core::validation::{not_blank, FieldErrors};
use gamesapi_db::models::user::CreateUser;
use gamesapi_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::field_errors;
use super::user::{represent, UserResponse};
use crate::auth::jwt::generate_access_token;
use crate::auth::password::{check_password_policy, hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::links::Links;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        custom(function = "valid_username"),
        length(max = 150, message = "Ensure this field has no more than 150 characters.")
    )]
    pub username: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub password: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub pk: DbId,
    pub username: String,
}

/// Non-blank, letters, digits and `@.+-_` only.
fn valid_username(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Ok(());
    }
    let mut err = ValidationError::new("username");
    err.message = Some(
        "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
            .into(),
    );
    Err(err)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/register
///
/// Create an account. Responds with the user representation.
pub async fn register(
    State(state): State<AppState>,
    links: Links,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let mut errors = FieldErrors::new();
    errors.require("username", &input.username);
    errors.require("password", &input.password);
    errors.merge(field_errors(&input));

    let username = input.username.unwrap_or_default();
    let password = input.password.unwrap_or_default();

    if !errors.contains("password") {
        errors.merge(check_password_policy(&password, &username));
    }
    if !errors.contains("username")
        && UserRepo::find_by_username(&state.pool, &username)
            .await?
            .is_some()
    {
        errors.add("username", "A user with that username already exists.");
    }
    errors.into_result()?;

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let body = represent(&state.pool, vec![user], &links)
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("User representation missing".into()))?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /auth/login
///
/// Authenticate with username + password. Returns a bearer access token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let access_token = generate_access_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserInfo {
            pk: user.id,
            username: user.username,
        },
    }))
}
