//! Field-level validation errors.
//!
//! [`FieldErrors`] collects human-readable messages keyed by payload field
//! name. It serializes as a plain JSON object (`{"name": ["..."]}`) so the
//! API layer can return it verbatim in a 400 response.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";

/// Validation messages grouped by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record [`MSG_REQUIRED`] if `value` is absent. Returns `true` when present.
    pub fn require<T>(&mut self, field: &str, value: &Option<T>) -> bool {
        if value.is_none() {
            self.add(field, MSG_REQUIRED);
            return false;
        }
        true
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when no errors were recorded, otherwise
    /// [`CoreError::InvalidFields`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value ({}).", err.code),
                };
                out.add(&field.to_string(), message);
            }
        }
        out
    }
}

/// `validator` custom rule rejecting empty or whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed(MSG_BLANK));
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "not_blank"))]
        name: String,
        #[validate(range(min = 0, message = "Must be positive."))]
        amount: i32,
    }

    #[test]
    fn add_groups_messages_by_field() {
        let mut errors = FieldErrors::new();
        errors.add("name", "first");
        errors.add("name", "second");
        errors.add("gender", "bad");

        assert_eq!(errors.get("name").unwrap(), ["first", "second"]);
        assert!(errors.contains("gender"));
        assert!(!errors.contains("score"));
    }

    #[test]
    fn require_flags_missing_values() {
        let mut errors = FieldErrors::new();
        assert!(errors.require("name", &Some("x")));
        assert!(!errors.require::<i32>("score", &None));
        assert_eq!(errors.get("score").unwrap(), [MSG_REQUIRED]);
    }

    #[test]
    fn into_result_is_ok_when_empty() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.add("name", MSG_BLANK);
        assert_matches!(errors.into_result(), Err(CoreError::InvalidFields(_)));
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut errors = FieldErrors::new();
        errors.add("name", MSG_REQUIRED);
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"name":["This field is required."]}"#);
    }

    #[test]
    fn display_joins_all_messages() {
        let mut errors = FieldErrors::new();
        errors.add("a", "one");
        errors.add("b", "two");
        assert_eq!(errors.to_string(), "a: one; b: two");
    }

    #[test]
    fn converts_validator_errors() {
        let sample = Sample {
            name: "   ".into(),
            amount: -1,
        };
        let errors: FieldErrors = sample.validate().unwrap_err().into();
        assert_eq!(errors.get("name").unwrap(), [MSG_BLANK]);
        assert_eq!(errors.get("amount").unwrap(), ["Must be positive."]);
    }

    #[test]
    fn merge_combines_fields() {
        let mut a = FieldErrors::new();
        a.add("name", "x");
        let mut b = FieldErrors::new();
        b.add("name", "y");
        b.add("game", "z");
        a.merge(b);
        assert_eq!(a.get("name").unwrap(), ["x", "y"]);
        assert!(a.contains("game"));
    }
}
