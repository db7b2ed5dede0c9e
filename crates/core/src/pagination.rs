//! Limit/offset pagination arithmetic.

/// Page size used when the client does not send `limit`.
pub const DEFAULT_LIMIT: i64 = 5;

/// Hard ceiling on `limit`, whatever the client asks for.
pub const MAX_LIMIT: i64 = 10;

/// Clamp a user-provided limit into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(MAX_LIMIT)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Offset of the following page, or `None` on the last page.
pub fn next_offset(count: i64, limit: i64, offset: i64) -> Option<i64> {
    let next = offset.saturating_add(limit);
    if next >= count {
        None
    } else {
        Some(next)
    }
}

/// Offset of the preceding page, or `None` on the first page.
///
/// `Some(0)` means the first page; callers drop the `offset` parameter then.
pub fn previous_offset(limit: i64, offset: i64) -> Option<i64> {
    if offset <= 0 {
        None
    } else {
        Some((offset - limit).max(0))
    }
}
