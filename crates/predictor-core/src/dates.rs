//! Date Codec
//!
//! History dates travel as `dd-MM-yyyy` or `dd-MM-yyyy HH:mm:ss` strings.
//! A token that matches neither shape decodes to `None`; it is never an error.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

pub const DATE_FORMAT: &str = "%d-%m-%Y";
pub const DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Parse a raw date token.
///
/// Date-only tokens resolve to midnight.
pub fn parse_date_token(token: &str) -> Option<NaiveDateTime> {
    let token = token.trim();
    if token.contains(' ') {
        NaiveDateTime::parse_from_str(token, DATE_TIME_FORMAT).ok()
    } else {
        NaiveDate::parse_from_str(token, DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

pub fn format_date(date: NaiveDateTime) -> String {
    date.format(DATE_TIME_FORMAT).to_string()
}

/// Milliseconds since the epoch, reading the naive value as UTC
pub fn to_epoch_millis(date: NaiveDateTime) -> i64 {
    date.and_utc().timestamp_millis()
}

pub fn from_epoch_millis(millis: i64) -> Option<NaiveDateTime> {
    chrono::DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

/// Serde adapter for optional history dates.
///
/// `null`, non-string values and unparseable strings all become `None`.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(token)) => parse_date_token(&token),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_date_only_is_midnight() {
        let date = parse_date_token("15-03-2017").unwrap();
        assert_eq!(format_date(date), "15-03-2017 00:00:00");
        assert_eq!(date.hour(), 0);
    }

    #[test]
    fn test_date_with_time() {
        let date = parse_date_token("15-03-2017 10:20:30").unwrap();
        assert_eq!(format_date(date), "15-03-2017 10:20:30");
    }

    #[test]
    fn test_same_day_differs_only_by_time() {
        let midnight = parse_date_token("01-01-2018").unwrap();
        let later = parse_date_token("01-01-2018 06:30:15").unwrap();
        let delta = to_epoch_millis(later) - to_epoch_millis(midnight);
        assert_eq!(delta, ((6 * 60 + 30) * 60 + 15) * 1000);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(parse_date_token("  02-02-2020  ").is_some());
    }

    #[test]
    fn test_unparseable_tokens_are_absent() {
        assert!(parse_date_token("").is_none());
        assert!(parse_date_token("2017-03-15").is_none());
        assert!(parse_date_token("32-01-2017").is_none());
        assert!(parse_date_token("15-03-2017 25:00:00").is_none());
        assert!(parse_date_token("15-03-2017 noon").is_none());
    }

    #[test]
    fn test_epoch_round_trip() {
        let date = parse_date_token("10-10-2010 10:10:10").unwrap();
        assert_eq!(from_epoch_millis(to_epoch_millis(date)), Some(date));
        assert_eq!(to_epoch_millis(parse_date_token("01-01-1970").unwrap()), 0);
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        at: Option<NaiveDateTime>,
    }

    #[test]
    fn test_serde_adapter() {
        let ok: Holder = serde_json::from_str(r#"{"at": "05-06-2019 07:08:09"}"#).unwrap();
        assert_eq!(ok.at.map(format_date).as_deref(), Some("05-06-2019 07:08:09"));

        let bad: Holder = serde_json::from_str(r#"{"at": "tomorrow"}"#).unwrap();
        assert!(bad.at.is_none());

        let null: Holder = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(null.at.is_none());

        let number: Holder = serde_json::from_str(r#"{"at": 12}"#).unwrap();
        assert!(number.at.is_none());

        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert!(missing.at.is_none());
    }
}
