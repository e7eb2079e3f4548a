//! Due-date display helpers.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DueState {
    Overdue,
    Today,
    Upcoming,
}

impl DueState {
    /// `None` when `date` is not a `YYYY-MM-DD` date (a time suffix is
    /// ignored).
    pub fn of(date: &str, today: NaiveDate) -> Option<Self> {
        let date = parse_date(date)?;
        Some(match date.cmp(&today) {
            std::cmp::Ordering::Less => Self::Overdue,
            std::cmp::Ordering::Equal => Self::Today,
            std::cmp::Ordering::Greater => Self::Upcoming,
        })
    }
}

/// `2025-10-26` → `Oct 26`. Unparseable input is returned unchanged.
pub fn short_date(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format("%b %-d").to_string(),
        None => date.to_string(),
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    let day = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
