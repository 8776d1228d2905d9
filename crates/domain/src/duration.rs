// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chargeable duration of a leave period.
//!
//! Converts a calendar date range into the number of days charged against a
//! balance. The calculation is pure and deterministic: it counts the days of
//! the range that fall on a working weekday, then removes half a day for
//! each half-day flag whose boundary date is itself a working day.

use crate::days::Days;
use crate::error::DomainError;
use crate::validation::parse_date;
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

/// A set of working weekdays.
///
/// Stored as a seven-bit mask, Monday in bit 0 through Sunday in bit 6.
/// Serialized as a list of ISO weekday numbers (Monday = 1, Sunday = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WorkingDays {
    mask: u8,
}

impl WorkingDays {
    /// Monday through Friday.
    pub const MONDAY_TO_FRIDAY: Self = Self { mask: 0b001_1111 };

    const ALL_DAYS_MASK: u8 = 0b111_1111;

    /// Builds a set from weekdays.
    #[must_use]
    pub fn from_weekdays<I>(weekdays: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        let mask: u8 = weekdays
            .into_iter()
            .fold(0_u8, |acc, weekday| acc | Self::bit(weekday));
        Self { mask }
    }

    /// Rebuilds a set from its stored mask.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyWorkingDays` if no valid weekday bit is set.
    pub const fn from_mask(mask: u8) -> Result<Self, DomainError> {
        let mask: u8 = mask & Self::ALL_DAYS_MASK;
        if mask == 0 {
            return Err(DomainError::EmptyWorkingDays);
        }
        Ok(Self { mask })
    }

    /// Returns the stored mask.
    #[must_use]
    pub const fn mask(&self) -> u8 {
        self.mask
    }

    /// Returns `true` if `weekday` is a working day.
    #[must_use]
    pub const fn contains(&self, weekday: Weekday) -> bool {
        self.mask & Self::bit(weekday) != 0
    }

    /// Returns the ISO numbers (Monday = 1) of the working days, ascending.
    #[must_use]
    pub fn iso_numbers(&self) -> Vec<u8> {
        (0..7_u8)
            .filter(|offset| self.mask & (1 << offset) != 0)
            .map(|offset| offset + 1)
            .collect()
    }

    const fn bit(weekday: Weekday) -> u8 {
        1 << weekday.number_days_from_monday()
    }
}

impl Default for WorkingDays {
    fn default() -> Self {
        Self::MONDAY_TO_FRIDAY
    }
}

impl TryFrom<Vec<u8>> for WorkingDays {
    type Error = DomainError;

    fn try_from(numbers: Vec<u8>) -> Result<Self, Self::Error> {
        let mut mask: u8 = 0;
        for number in numbers {
            if !(1..=7).contains(&number) {
                return Err(DomainError::InvalidWeekday(number));
            }
            mask |= 1 << (number - 1);
        }
        Self::from_mask(mask)
    }
}

impl From<WorkingDays> for Vec<u8> {
    fn from(working_days: WorkingDays) -> Self {
        working_days.iso_numbers()
    }
}

/// Inputs to the duration calculation besides the date range itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationConfig {
    /// Weekdays on which leave is chargeable.
    pub working_days: WorkingDays,
    /// Only the afternoon of the first day is taken.
    pub half_day_start: bool,
    /// Only the morning of the last day is taken.
    pub half_day_end: bool,
}

/// Iterates every calendar day from `start` to `end` inclusive.
///
/// Yields nothing when `start > end`.
pub fn calendar_days(start: Date, end: Date) -> impl Iterator<Item = Date> {
    let first: Option<Date> = (start <= end).then_some(start);
    std::iter::successors(first, move |day: &Date| {
        day.next_day().filter(|next: &Date| *next <= end)
    })
}

/// Computes the chargeable days of a leave period.
///
/// - A range with `start > end` is zero days, not an error.
/// - A range containing no working day is zero days regardless of half-day flags.
/// - Each half-day flag removes 0.5 only when its boundary date is a working day.
/// - The result never drops below zero.
#[must_use]
pub fn compute_chargeable_days(start: Date, end: Date, config: &DurationConfig) -> Days {
    let working_day_count: u32 = calendar_days(start, end)
        .filter(|day| config.working_days.contains(day.weekday()))
        .fold(0_u32, |acc, _| acc.saturating_add(1));

    if working_day_count == 0 {
        return Days::ZERO;
    }

    let mut chargeable: Days = Days::whole(working_day_count);

    if config.half_day_start && config.working_days.contains(start.weekday()) {
        chargeable = chargeable.saturating_sub(Days::HALF);
    }
    if config.half_day_end && config.working_days.contains(end.weekday()) {
        chargeable = chargeable.saturating_sub(Days::HALF);
    }

    chargeable
}

/// Computes the chargeable days of a period given as ISO `YYYY-MM-DD` strings.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if either date cannot be parsed.
/// An end date before the start date is not an error and yields zero days.
pub fn compute_chargeable_days_from_str(
    start: &str,
    end: &str,
    config: &DurationConfig,
) -> Result<Days, DomainError> {
    let start_date: Date = parse_date(start)?;
    let end_date: Date = parse_date(end)?;
    Ok(compute_chargeable_days(start_date, end_date, config))
}
