//! Authentication extractors, object permissions and request throttling.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`permissions`] -- Owner-or-read-only checks for owned objects.
//! - [`throttle`] -- Per-scope sliding-window rate limiting.

pub mod auth;
pub mod permissions;
pub mod throttle;
