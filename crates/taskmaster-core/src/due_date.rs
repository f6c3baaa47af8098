use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// Calendar format accepted for due dates (`YYYY-MM-DD`).
pub const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Due date as entered by the user.
///
/// The raw text is kept verbatim. Date-based logic goes through [`DueDate::date`],
/// which treats empty and unparsable input the same way: as "no due date".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(String);

impl DueDate {
    /// Wrap raw user input.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Due date for a known calendar day.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        Self(format_date(date))
    }

    /// Raw text as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no due date was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Parsed calendar date, or `None` for empty or unparsable input.
    #[must_use]
    pub fn date(&self) -> Option<Date> {
        if self.is_empty() {
            return None;
        }
        Date::parse(&self.0, DUE_DATE_FORMAT).ok()
    }

    /// True when the text is non-empty but not a valid calendar date.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        !self.is_empty() && self.date().is_none()
    }

    /// Key used when ordering by due date; absent dates sort after every real date,
    /// including the last representable one.
    #[must_use]
    pub fn sort_key(&self) -> (bool, Option<Date>) {
        let date = self.date();
        (date.is_none(), date)
    }

    /// True when the date parses and falls strictly before `today`.
    #[must_use]
    pub fn is_before(&self, today: Date) -> bool {
        self.date().is_some_and(|due| due < today)
    }
}

impl From<String> for DueDate {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for DueDate {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<Date> for DueDate {
    fn from(date: Date) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    // Four-digit years always fit the format; fall back to the ISO display otherwise.
    date.format(DUE_DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// Parse `YYYY-MM-DD`.
///
/// # Errors
/// Returns an error if the input is not a valid calendar date in that format.
pub fn parse_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw.trim(), DUE_DATE_FORMAT)
}
