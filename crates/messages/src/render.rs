//! Rows shown for a ledger and the date labels they use.

use chrono::{DateTime, Utc};
use serde::Serialize;

use timeshare_ballot::VoteLedger;

/// Long date + short time, e.g. "January 1, 2024 at 10:00 AM".
const DISPLAY_FORMAT: &str = "%B %-d, %Y at %-I:%M %p";

pub fn display_date(date: &DateTime<Utc>) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// One list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub label: String,
    /// The local participant votes for this date.
    pub checked: bool,
    /// `"Votes: N"` once someone else voted, empty otherwise.
    pub detail: String,
}

pub fn rows(ledger: &VoteLedger) -> Vec<Row> {
    ledger
        .options()
        .iter()
        .map(|option| Row {
            label: display_date(&option.date()),
            checked: option.is_voted(),
            detail: match option.aggregate_votes() {
                0 => String::new(),
                n => format!("Votes: {n}"),
            },
        })
        .collect()
}
