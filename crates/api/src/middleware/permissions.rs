//! Owner-or-read-only enforcement for owned objects.

use axum::http::Method;
use gamesapi_core::error::CoreError;
use gamesapi_core::permissions::{has_object_permission, is_safe_method};
use gamesapi_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;

/// Allow safe methods for everyone and unsafe methods only for the owner.
///
/// Anonymous unsafe requests get 401, authenticated non-owners get 403.
pub fn check_object_permission(
    method: &Method,
    user: Option<&AuthUser>,
    owner_id: Option<DbId>,
) -> Result<(), AppError> {
    if is_safe_method(method.as_str()) {
        return Ok(());
    }

    let Some(user) = user else {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Authentication credentials were not provided.".into(),
        )));
    };

    if has_object_permission(method.as_str(), Some(user.user_id), owner_id) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to perform this action.".into(),
        )))
    }
}
