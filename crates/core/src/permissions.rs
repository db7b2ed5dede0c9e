//! Object-level access rules.
//!
//! Reads are always allowed. Writes to an owned object are allowed only for
//! its recorded owner; an object without an owner cannot be modified.

use crate::types::DbId;

/// HTTP methods that never modify state.
pub const SAFE_METHODS: &[&str] = &["GET", "HEAD", "OPTIONS"];

pub fn is_safe_method(method: &str) -> bool {
    SAFE_METHODS.contains(&method)
}

/// `true` only when both ids are known and equal.
pub fn is_owner(requester: Option<DbId>, owner: Option<DbId>) -> bool {
    matches!((requester, owner), (Some(r), Some(o)) if r == o)
}

/// Owner-or-read-only check for a single object.
pub fn has_object_permission(method: &str, requester: Option<DbId>, owner: Option<DbId>) -> bool {
    is_safe_method(method) || is_owner(requester, owner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_methods_always_permitted() {
        for method in SAFE_METHODS {
            assert!(has_object_permission(method, None, Some(1)));
            assert!(has_object_permission(method, Some(2), Some(1)));
            assert!(has_object_permission(method, None, None));
        }
    }

    #[test]
    fn owner_may_write() {
        for method in ["PUT", "PATCH", "DELETE", "POST"] {
            assert!(has_object_permission(method, Some(7), Some(7)));
        }
    }

    #[test]
    fn non_owner_may_not_write() {
        assert!(!has_object_permission("PUT", Some(2), Some(1)));
        assert!(!has_object_permission("DELETE", None, Some(1)));
    }

    #[test]
    fn unowned_object_is_read_only() {
        assert!(!has_object_permission("PATCH", Some(1), None));
        assert!(!is_owner(None, None));
    }

    #[test]
    fn method_names_are_case_sensitive() {
        assert!(!is_safe_method("get"));
        assert!(is_safe_method("GET"));
    }
}
