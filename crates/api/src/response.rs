//! Shared response envelope types for API handlers.

use gamesapi_core::pagination::{next_offset, previous_offset};
use serde::Serialize;
use url::Url;

use crate::links::Links;
use crate::query::PageWindow;

/// Standard `{count, next, previous, results}` list page.
///
/// `next` and `previous` are absolute URLs that keep every other query
/// parameter of the current request, or `null` at either end.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T: Serialize> Page<T> {
    pub fn new(results: Vec<T>, count: i64, window: PageWindow, links: &Links) -> Self {
        let current = links.current();
        let link = |offset: Option<i64>| {
            let offset = offset?;
            let url = current.as_ref()?;
            Some(page_link(url, window.limit, offset))
        };

        Self {
            count,
            next: link(next_offset(count, window.limit, window.offset)),
            previous: link(previous_offset(window.limit, window.offset)),
            results,
        }
    }
}

/// Rewrite `limit`/`offset` on `current`; offset 0 is omitted.
fn page_link(current: &Url, limit: i64, offset: i64) -> String {
    let kept: Vec<(String, String)> = current
        .query_pairs()
        .filter(|(k, _)| k != "limit" && k != "offset")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut url = current.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(kept);
        pairs.append_pair("limit", &limit.to_string());
        if offset > 0 {
            pairs.append_pair("offset", &offset.to_string());
        }
    }
    url.to_string()
}
