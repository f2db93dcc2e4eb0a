//! Day-first date parsing.
//!
//! The risk and PnL extracts write dates day-first (`02/01/2020` is the
//! 2nd of January). ISO dates (`2020-01-02`) are recognised by their
//! four-digit leading field and parsed as ISO.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

const SEPARATORS: [char; 3] = ['/', '-', '.'];

/// Parse a day-first date such as `31/01/2020`, `31-01-2020`, `31.01.20`
/// or an ISO date such as `2020-01-31`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use deskscope_data::date::parse_day_first;
///
/// let date = parse_day_first("02/01/2020").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
/// ```
pub fn parse_day_first(raw: &str) -> Result<NaiveDate> {
    let value = raw.trim();
    let invalid = |reason: String| DataError::DateParse {
        value: raw.to_string(),
        reason,
    };

    let sep = value
        .chars()
        .find(|c| SEPARATORS.contains(c))
        .ok_or_else(|| invalid("no date separator".to_string()))?;

    let parts: Vec<&str> = value.split(sep).collect();
    if parts.len() != 3 {
        return Err(invalid(format!("expected 3 fields, found {}", parts.len())));
    }

    let format = if parts[0].len() == 4 {
        format!("%Y{sep}%m{sep}%d")
    } else if parts[2].len() == 2 {
        format!("%d{sep}%m{sep}%y")
    } else {
        format!("%d{sep}%m{sep}%Y")
    };

    NaiveDate::parse_from_str(value, &format).map_err(|e| invalid(e.to_string()))
}

/// Serde adapter for day-first date columns.
pub fn deserialize_day_first<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day_first(&raw).map_err(serde::de::Error::custom)
}
