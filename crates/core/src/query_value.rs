//! Lenient deserializers for query-string filters.
//!
//! Every query value arrives as a string. A blank value (`?played=`) means
//! "no filter" instead of a parse error.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::types::Timestamp;

fn non_blank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

/// Parse an optional value with [`FromStr`]; blank values become `None`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    non_blank(deserializer)?
        .map(|v| v.parse().map_err(D::Error::custom))
        .transpose()
}

/// An RFC 3339 timestamp or a bare `YYYY-MM-DD` date, read as midnight UTC.
pub fn date_or_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = non_blank(deserializer)? else {
        return Ok(None);
    };
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(Some(ts));
    }
    raw.parse::<NaiveDate>()
        .map(|date| Some(date.and_time(NaiveTime::MIN).and_utc()))
        .map_err(|_| D::Error::custom(format!("invalid date or timestamp: {raw}")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Params {
        #[serde(deserialize_with = "blank_as_none")]
        count: Option<i32>,
        #[serde(deserialize_with = "blank_as_none")]
        flag: Option<bool>,
        #[serde(deserialize_with = "date_or_timestamp")]
        since: Option<Timestamp>,
    }

    #[test]
    fn blank_and_missing_values_are_none() {
        let params: Params =
            serde_json::from_value(json!({ "count": "", "flag": "  ", "since": "" })).unwrap();
        assert_eq!(params.count, None);
        assert_eq!(params.flag, None);
        assert_eq!(params.since, None);

        let params: Params = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.count, None);
    }

    #[test]
    fn values_are_parsed() {
        let params: Params =
            serde_json::from_value(json!({ "count": "42", "flag": "true" })).unwrap();
        assert_eq!(params.count, Some(42));
        assert_eq!(params.flag, Some(true));
    }

    #[test]
    fn unparsable_value_is_an_error() {
        assert_matches!(
            serde_json::from_value::<Params>(json!({ "count": "many" })),
            Err(_)
        );
        assert_matches!(
            serde_json::from_value::<Params>(json!({ "since": "yesterday" })),
            Err(_)
        );
    }

    #[test]
    fn since_accepts_date_or_timestamp() {
        let params: Params = serde_json::from_value(json!({ "since": "2024-01-01" })).unwrap();
        assert_eq!(
            params.since,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );

        let params: Params =
            serde_json::from_value(json!({ "since": "2024-01-01T12:30:00Z" })).unwrap();
        assert_eq!(
            params.since,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap())
        );
    }
}
