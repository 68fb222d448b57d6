//! Dates typed on the command line.

use chrono::{DateTime, NaiveDateTime, Utc};

use timeshare_ballot::parse_date;

/// Local (offset-free) forms, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse RFC 3339, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM` or the wire format.
pub fn parse_date_input(input: &str) -> Result<DateTime<Utc>, String> {
    let input = input.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Ok(date.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| parse_date(input))
        .ok_or_else(|| {
            format!("invalid date '{input}' (expected e.g. 2024-01-01T10:00 or 2024-01-01-10-00)")
        })
}
