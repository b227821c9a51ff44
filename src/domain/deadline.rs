//! Deadline parsing and timestamp rendering.
//!
//! Deadlines arrive as whatever JSON the client sent. Strings may be RFC 3339,
//! a naive date-time (taken as UTC) or a bare date (UTC midnight); numbers are
//! milliseconds since the Unix epoch. Whether an unparseable value is rejected
//! or stored as an invalid deadline is decided by the caller.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A todo deadline. `None` is an invalid date kept from a lenient parse and
/// renders as JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Option<DateTime<Utc>>);

impl Deadline {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(Some(instant))
    }

    pub fn invalid() -> Self {
        Self(None)
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Resolve raw request input. In strict mode an unparseable, missing or
    /// `null` value is an error. Otherwise `null` is the Unix epoch and
    /// anything else unparseable becomes an invalid deadline.
    pub fn resolve(raw: Option<&Value>, strict: bool) -> ApiResult<Self> {
        if let (Some(Value::Null), false) = (raw, strict) {
            return Ok(Self::at(DateTime::<Utc>::UNIX_EPOCH));
        }
        match raw.and_then(parse_value) {
            Some(instant) => Ok(Self::at(instant)),
            None if strict => Err(ApiError::InvalidDeadline),
            None => Ok(Self::invalid()),
        }
    }
}

impl Serialize for Deadline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(instant) => timestamp::serialize(instant, serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// Parse a JSON value into an instant.
pub fn parse_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_text(text),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

/// Parse a textual date-like value.
pub fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serde helper rendering instants as RFC 3339 UTC with millisecond precision.
pub mod timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(instant))
    }

    pub fn format(instant: &DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_parse_date_only_is_utc_midnight() {
        let parsed = parse_text("2021-02-27").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 2, 27, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_text("2021-02-27T10:00:00-03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 2, 27, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime() {
        let parsed = parse_text("2021-02-27T08:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 2, 27, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_epoch_millis() {
        let parsed = parse_value(&json!(1_614_384_000_000_i64)).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 2, 27, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_garbage_is_unparseable() {
        assert!(parse_text("tomorrow-ish").is_none());
        assert!(parse_text("   ").is_none());
        assert!(parse_value(&json!(true)).is_none());
        assert!(parse_value(&Value::Null).is_none());
    }

    #[test]
    fn test_resolve_strict_and_lenient() {
        assert!(matches!(
            Deadline::resolve(Some(&json!("nope")), true),
            Err(ApiError::InvalidDeadline)
        ));
        assert!(matches!(Deadline::resolve(None, true), Err(ApiError::InvalidDeadline)));

        let lenient = Deadline::resolve(Some(&json!("nope")), false).unwrap();
        assert!(!lenient.is_valid());
        assert_eq!(serde_json::to_value(lenient).unwrap(), Value::Null);
    }

    #[test]
    fn test_lenient_null_is_epoch() {
        let null = Deadline::resolve(Some(&Value::Null), false).unwrap();
        assert_eq!(serde_json::to_value(null).unwrap(), json!("1970-01-01T00:00:00.000Z"));

        let missing = Deadline::resolve(None, false).unwrap();
        assert!(!missing.is_valid());

        assert!(matches!(
            Deadline::resolve(Some(&Value::Null), true),
            Err(ApiError::InvalidDeadline)
        ));
    }

    #[test]
    fn test_serializes_with_millis() {
        let deadline = Deadline::at(Utc.with_ymd_and_hms(2021, 2, 27, 0, 0, 0).unwrap());
        assert_eq!(
            serde_json::to_value(deadline).unwrap(),
            json!("2021-02-27T00:00:00.000Z")
        );
    }
}
