//! Shared query parameter types for API handlers.

use gamesapi_core::pagination::{clamp_limit, clamp_offset};
use gamesapi_core::query_value::blank_as_none;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Extracted alongside each resource's filter struct; values are clamped
/// by [`PaginationParams::window`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaginationParams {
    #[serde(deserialize_with = "blank_as_none")]
    pub limit: Option<i64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub offset: Option<i64>,
}

/// Clamped limit/offset pair for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PaginationParams {
    pub fn window(&self, default_limit: i64) -> PageWindow {
        PageWindow {
            limit: clamp_limit(self.limit, default_limit),
            offset: clamp_offset(self.offset),
        }
    }
}
