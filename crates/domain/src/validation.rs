// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// The calendar date format accepted and produced at every boundary.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Date-times without an offset, as `T`- or space-separated ISO 8601.
const LOCAL_DATE_TIME_FORMATS: [&[BorrowedFormatItem<'static>]; 2] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"),
];

/// Parses an ISO `YYYY-MM-DD` calendar date.
///
/// An ISO 8601 date-time is also accepted; its time of day and offset are
/// dropped and the date as written is kept.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is empty or is not a
/// valid calendar date (including impossible dates such as February 30).
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::DateParseError {
            date_string: value.to_string(),
            error: String::from("date is empty"),
        });
    }

    Date::parse(trimmed, DATE_FORMAT)
        .or_else(|date_error| date_of_date_time(trimmed).ok_or(date_error))
        .map_err(|e| DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        })
}

fn date_of_date_time(value: &str) -> Option<Date> {
    if let Ok(date_time) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(date_time.date());
    }
    LOCAL_DATE_TIME_FORMATS
        .into_iter()
        .find_map(|format| PrimitiveDateTime::parse(value, format).ok())
        .map(PrimitiveDateTime::date)
}

/// Formats a calendar date as ISO `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| format!("{date}"))
}

/// Validates a rejection reason, returning it trimmed.
///
/// # Errors
///
/// Returns `DomainError::MissingReason` if the reason is absent or blank.
pub fn validate_rejection_reason(reason: Option<&str>) -> Result<String, DomainError> {
    match reason.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(DomainError::MissingReason),
    }
}

/// Validates a ledger year.
///
/// # Errors
///
/// Returns `DomainError::InvalidYear` if the year is outside 2000..=2200.
pub fn validate_year(year: i32) -> Result<(), DomainError> {
    if !(2000..=2200).contains(&year) {
        return Err(DomainError::InvalidYear(year));
    }
    Ok(())
}
