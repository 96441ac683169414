//! Canonical text encodings for timestamps and UUIDs.
//!
//! - Timestamps: RFC 3339, UTC, second precision, e.g. `2021-06-01T12:00:00Z`.
//!   Sub-second parts are dropped on output. Input must match
//!   `YYYY-MM-DDTHH:MM:SS` followed by `Z` or a `±HH:MM` offset; offsets are
//!   normalized to UTC.
//! - UUIDs: lowercase hyphenated form. Input is accepted in either case but
//!   only in the 36-character hyphenated layout.
//!
//! Only years `0000..=9999` have a canonical form. Timestamps outside that
//! range fail to serialize, and offset input that normalizes outside it is
//! rejected as malformed.
//!
//! Malformed input fails with `Custom("malformed date: <input>")` or
//! `Custom("malformed UUID: <input>")`.

use crate::error::{DeserializeError, DeserializeResult, SerializeError, SerializeResult};
use crate::forward::ToJson;
use crate::reverse::FromJson;
use crate::text::to_compact_string;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use std::sync::LazyLock;
use uuid::Uuid;
use value_core::JsonValue;

const RFC3339_SECONDS: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Formatter items for [`RFC3339_SECONDS`], parsed once per process.
static RFC3339_ITEMS: LazyLock<Vec<Item<'static>>> =
    LazyLock::new(|| StrftimeItems::new(RFC3339_SECONDS).collect());

/// Check that `dt` falls in the four-digit year range.
pub fn in_canonical_range(dt: &DateTime<Utc>) -> bool {
    (0..=9999).contains(&dt.year())
}

/// Format a timestamp in the canonical `YYYY-MM-DDTHH:MM:SSZ` form.
///
/// Years outside `0000..=9999` are printed with a sign and extra digits;
/// [`in_canonical_range`] guards the serializer against them.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format_with_items(RFC3339_ITEMS.iter()).to_string()
}

/// Parse a timestamp in the canonical form, returning `None` if it does not match.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if !has_canonical_shape(s) {
        return None;
    }
    let dt = if let Some(naive) = s.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S").ok()?;
        Utc.from_utc_datetime(&naive)
    } else {
        DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%:z")
            .ok()?
            .with_timezone(&Utc)
    };
    in_canonical_range(&dt).then_some(dt)
}

/// Check the fixed-width layout before handing the text to chrono, which
/// would otherwise accept single-digit fields and fractional seconds.
fn has_canonical_shape(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < 20 {
        return false;
    }
    let digits = |from: usize, to: usize| b[from..to].iter().all(u8::is_ascii_digit);
    let datetime = digits(0, 4)
        && b[4] == b'-'
        && digits(5, 7)
        && b[7] == b'-'
        && digits(8, 10)
        && b[10] == b'T'
        && digits(11, 13)
        && b[13] == b':'
        && digits(14, 16)
        && b[16] == b':'
        && digits(17, 19);
    if !datetime {
        return false;
    }
    match &b[19..] {
        [b'Z'] => true,
        [b'+' | b'-', h1, h2, b':', m1, m2] => {
            [h1, h2, m1, m2].iter().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Format a UUID in the canonical lowercase hyphenated form.
pub fn format_uuid(uuid: &Uuid) -> String {
    uuid.hyphenated().to_string()
}

/// Parse a hyphenated UUID in either case.
pub fn parse_uuid(s: &str) -> Option<Uuid> {
    // The hyphenated layout is the only 36-character form uuid accepts.
    if s.len() != 36 {
        return None;
    }
    Uuid::try_parse(s).ok()
}

/// Text quoted in error messages: string input verbatim, anything else as
/// compact JSON. A bare `12` and a string `"12"` therefore read the same.
fn describe(json: &JsonValue) -> String {
    match json {
        JsonValue::String(s) => s.clone(),
        other => to_compact_string(other),
    }
}

impl ToJson for DateTime<Utc> {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        if !in_canonical_range(self) {
            return Err(SerializeError::custom(format!("date out of range: {self}")));
        }
        Ok(JsonValue::String(format_datetime(self)))
    }
}

impl FromJson for DateTime<Utc> {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        json.as_str().and_then(parse_datetime).ok_or_else(|| {
            let input = describe(json);
            tracing::debug!(input = %input, "Rejected malformed date");
            DeserializeError::custom(format!("malformed date: {input}"))
        })
    }
}

impl ToJson for Uuid {
    fn to_json(&self) -> SerializeResult<JsonValue> {
        Ok(JsonValue::String(format_uuid(self)))
    }
}

impl FromJson for Uuid {
    fn from_json(json: &JsonValue) -> DeserializeResult<Self> {
        json.as_str().and_then(parse_uuid).ok_or_else(|| {
            let input = describe(json);
            tracing::debug!(input = %input, "Rejected malformed UUID");
            DeserializeError::custom(format!("malformed UUID: {input}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::serialize;
    use crate::reverse::deserialize;
    use chrono::Timelike;

    #[test]
    fn test_datetime_conversion() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        assert_eq!(
            serialize(&dt).unwrap(),
            JsonValue::from("2024-06-15T10:30:00Z")
        );
    }

    #[test]
    fn test_datetime_drops_subseconds() {
        let dt = Utc
            .with_ymd_and_hms(2021, 6, 1, 12, 0, 0)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();
        assert_eq!(format_datetime(&dt), "2021-06-01T12:00:00Z");
    }

    #[test]
    fn test_datetime_reserializes_byte_identical() {
        let input = JsonValue::from("2021-06-01T12:00:00Z");
        let dt: DateTime<Utc> = deserialize(&input).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap());
        assert_eq!(serialize(&dt).unwrap(), input);
    }

    #[test]
    fn test_datetime_offset_normalized_to_utc() {
        let dt = parse_datetime("2021-06-01T14:00:00+02:00").unwrap();
        assert_eq!(format_datetime(&dt), "2021-06-01T12:00:00Z");
        let dt = parse_datetime("2021-06-01T07:30:00-04:30").unwrap();
        assert_eq!(format_datetime(&dt), "2021-06-01T12:00:00Z");
    }

    #[test]
    fn test_datetime_outside_four_digit_years() {
        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 30, 0).unwrap();
        assert_eq!(
            serialize(&far),
            Err(SerializeError::Custom(format!("date out of range: {far}")))
        );
        let before = Utc.with_ymd_and_hms(-1, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(serialize(&before), Err(SerializeError::Custom(_))));

        let edge = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            serialize(&edge).unwrap(),
            JsonValue::from("9999-12-31T23:59:59Z")
        );
    }

    #[test]
    fn test_datetime_offset_leaving_year_range_rejected() {
        assert!(parse_datetime("9999-12-31T23:30:00-01:00").is_none());
        assert!(parse_datetime("0000-01-01T00:30:00+01:00").is_none());
        assert_eq!(
            deserialize::<DateTime<Utc>>(&JsonValue::from("9999-12-31T23:30:00-01:00")),
            Err(DeserializeError::Custom(
                "malformed date: 9999-12-31T23:30:00-01:00".to_string()
            ))
        );
        let dt = parse_datetime("9999-12-31T23:30:00+01:00").unwrap();
        assert_eq!(format_datetime(&dt), "9999-12-31T22:30:00Z");
    }

    #[test]
    fn test_datetime_rejects_other_layouts() {
        for input in [
            "2021-06-01 12:00:00Z",
            "2021-06-01T12:00:00",
            "2021-06-01T12:00:00.5Z",
            "2021-6-01T12:00:00Z",
            "2021-06-01T12:00:00+0200",
            "2021-13-01T12:00:00Z",
            "2021-06-01",
            "",
        ] {
            assert!(parse_datetime(input).is_none(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_datetime_error_message() {
        assert_eq!(
            deserialize::<DateTime<Utc>>(&JsonValue::from("yesterday")),
            Err(DeserializeError::Custom(
                "malformed date: yesterday".to_string()
            ))
        );
        assert_eq!(
            deserialize::<DateTime<Utc>>(&JsonValue::from(12)),
            Err(DeserializeError::Custom("malformed date: 12".to_string()))
        );
    }

    #[test]
    fn test_uuid_lowercase_output() {
        let upper = Uuid::parse_str("550E8400-E29B-41D4-A716-446655440000").unwrap();
        assert_eq!(
            serialize(&upper).unwrap(),
            JsonValue::from("550e8400-e29b-41d4-a716-446655440000")
        );
    }

    #[test]
    fn test_uuid_accepts_either_case() {
        let lower: Uuid =
            deserialize(&JsonValue::from("550e8400-e29b-41d4-a716-446655440000")).unwrap();
        let upper: Uuid =
            deserialize(&JsonValue::from("550E8400-E29B-41D4-A716-446655440000")).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(
            serialize(&upper).unwrap(),
            JsonValue::from("550e8400-e29b-41d4-a716-446655440000")
        );
    }

    #[test]
    fn test_uuid_rejects_other_forms() {
        for input in [
            "550e8400e29b41d4a716446655440000",
            "{550e8400-e29b-41d4-a716-446655440000}",
            "urn:uuid:550e8400-e29b-41d4-a716-446655440000",
            "550e8400-e29b-41d4-a716-44665544000g",
        ] {
            assert_eq!(
                deserialize::<Uuid>(&JsonValue::from(input)),
                Err(DeserializeError::Custom(format!("malformed UUID: {input}")))
            );
        }
    }

    #[test]
    fn test_uuid_round_trip() {
        let id = Uuid::new_v4();
        assert_eq!(deserialize::<Uuid>(&serialize(&id).unwrap()), Ok(id));
    }
}
