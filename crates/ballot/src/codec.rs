//! Message payload: ordered query items and the wire formats of their values.
//!
//! Items are `date-<i>` / `vote-<i>` pairs. Dates use `yyyy-MM-dd-HH-mm` in UTC,
//! votes are decimal integers. Nothing here fails: values that do not parse
//! are reported as `None` and the ledger substitutes defaults.

use core::num::IntErrorKind;

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use url::{Url, form_urlencoded};

/// `chrono` pattern of the `date-<i>` value.
pub const DATE_FORMAT: &str = "%Y-%m-%d-%H-%M";

/// Wire values for instants outside the four-digit year range.
const LATEST_WIRE_DATE: &str = "9999-12-31-23-59";
const EARLIEST_WIRE_DATE: &str = "0000-01-01-00-00";

pub(crate) const DATE_KEY_PREFIX: &str = "date-";
pub(crate) const VOTE_KEY_PREFIX: &str = "vote-";

/// Format a date for the wire; years outside 0..=9999 clamp to the range ends.
pub fn format_date(date: &DateTime<Utc>) -> String {
    match date.year() {
        year if year > 9999 => LATEST_WIRE_DATE.to_string(),
        year if year < 0 => EARLIEST_WIRE_DATE.to_string(),
        _ => date.format(DATE_FORMAT).to_string(),
    }
}

pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse a tally; counts beyond `u64::MAX` saturate.
pub fn parse_votes(value: &str) -> Option<u64> {
    match value.parse::<u64>() {
        Ok(count) => Some(count),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
        Err(_) => None,
    }
}

pub(crate) fn date_key(index: usize) -> String {
    format!("{DATE_KEY_PREFIX}{index}")
}

pub(crate) fn vote_key(index: usize) -> String {
    format!("{VOTE_KEY_PREFIX}{index}")
}

/// Ordered `(key, value)` query items of a message URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    items: Vec<(String, String)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.push((key.into(), value.into()));
    }

    pub fn items(&self) -> &[(String, String)] {
        &self.items
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parse a raw (percent-encoded) query string, preserving item order.
    pub fn from_query(query: &str) -> Self {
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// Query items of a message URL; a URL without a query yields no items.
    pub fn from_url(url: &Url) -> Self {
        url.query().map(Self::from_query).unwrap_or_default()
    }

    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.items.iter())
            .finish()
    }

    /// `base` with its query replaced by these items.
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(None);
        if !self.is_empty() {
            url.query_pairs_mut().extend_pairs(self.items.iter());
        }
        url
    }
}

impl FromIterator<(String, String)> for Payload {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Payload {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Payload {
    type Item = &'a (String, String);
    type IntoIter = core::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn date_format_is_utc_minutes_with_hyphens() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 42).unwrap();
        assert_eq!(format_date(&date), "2024-03-07-09-05");
    }

    #[test]
    fn parse_date_accepts_wire_format() {
        let parsed = parse_date("2024-01-01-10-00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2024-01-01T10:00"), None);
        assert_eq!(parse_date("2024-13-01-10-00"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn parse_votes_is_decimal_only() {
        assert_eq!(parse_votes("12"), Some(12));
        assert_eq!(parse_votes("abc"), None);
        assert_eq!(parse_votes("-1"), None);
        assert_eq!(parse_votes(""), None);
    }

    #[test]
    fn parse_votes_keeps_large_tallies() {
        assert_eq!(parse_votes("5000000000"), Some(5_000_000_000));
        assert_eq!(parse_votes("99999999999999999999999"), Some(u64::MAX));
        assert_eq!(parse_votes("+3"), Some(3));
    }

    #[test]
    fn out_of_range_years_clamp_to_four_digits() {
        let far_future = Utc.with_ymd_and_hms(12345, 6, 7, 8, 9, 0).unwrap();
        let wire = format_date(&far_future);
        assert_eq!(wire, "9999-12-31-23-59");
        assert!(wire.bytes().all(|b| b.is_ascii_digit() || b == b'-'));
        assert_eq!(
            parse_date(&wire),
            Some(Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 0).unwrap())
        );

        let before_year_zero = Utc.with_ymd_and_hms(-5, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date(&before_year_zero), "0000-01-01-00-00");
    }

    #[test]
    fn from_query_keeps_item_order_and_decodes_escapes() {
        let payload = Payload::from_query("vote-0=3&date-0=2024-01-01-10-00&note=a%20b");
        assert_eq!(
            payload.items(),
            &[
                ("vote-0".to_string(), "3".to_string()),
                ("date-0".to_string(), "2024-01-01-10-00".to_string()),
                ("note".to_string(), "a b".to_string()),
            ]
        );
    }

    #[test]
    fn url_without_query_is_an_empty_payload() {
        let url = Url::parse("timeshare://vote").unwrap();
        assert!(Payload::from_url(&url).is_empty());
    }

    #[test]
    fn to_url_replaces_existing_query() {
        let base = Url::parse("timeshare://vote?stale=1").unwrap();
        let mut payload = Payload::new();
        payload.push("date-0", "2024-01-01-10-00");
        payload.push("vote-0", "1");

        let url = payload.to_url(&base);
        assert_eq!(url.as_str(), "timeshare://vote?date-0=2024-01-01-10-00&vote-0=1");
        assert_eq!(Payload::from_url(&url), payload);
    }

    #[test]
    fn get_returns_first_value_for_key() {
        let payload = Payload::from_query("vote-0=1&vote-0=2");
        assert_eq!(payload.get("vote-0"), Some("1"));
        assert_eq!(payload.get("date-0"), None);
    }
}
