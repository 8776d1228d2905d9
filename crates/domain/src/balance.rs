// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger arithmetic for a single balance record.
//!
//! A `BalanceRecord` can only be changed through `reserve`, `consume`,
//! `release` and `initialize_year`. Each of them leaves the record satisfying
//! `used + pending <= allocated + carry_over`, so `remaining` is always the
//! derived non-negative value and is never set directly.

use crate::days::Days;
use crate::error::DomainError;
use crate::types::{CategoryId, EmployeeId, LeaveCategory};
use serde::{Deserialize, Serialize};

/// The natural key of a balance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalanceKey {
    /// The employee holding the balance.
    pub employee_id: EmployeeId,
    /// The leave category of the balance.
    pub category_id: CategoryId,
    /// The calendar year of the balance.
    pub year: i32,
}

impl BalanceKey {
    /// Creates a new key.
    #[must_use]
    pub const fn new(employee_id: EmployeeId, category_id: CategoryId, year: i32) -> Self {
        Self {
            employee_id,
            category_id,
            year,
        }
    }

    /// The key of the same employee and category one year earlier.
    #[must_use]
    pub const fn previous_year(&self) -> Self {
        Self {
            employee_id: self.employee_id,
            category_id: self.category_id,
            year: self.year.saturating_sub(1),
        }
    }
}

impl std::fmt::Display for BalanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "employee {} / category {} / {}",
            self.employee_id, self.category_id, self.year
        )
    }
}

/// A per-(employee, category, year) entitlement ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceRecord {
    key: BalanceKey,
    allocated: Days,
    carry_over: Days,
    used: Days,
    pending: Days,
}

impl BalanceRecord {
    /// Creates a fresh record with nothing used or pending.
    #[must_use]
    pub const fn provision(key: BalanceKey, allocated: Days, carry_over: Days) -> Self {
        Self {
            key,
            allocated,
            carry_over,
            used: Days::ZERO,
            pending: Days::ZERO,
        }
    }

    /// Rebuilds a record from stored values, checking the ledger invariant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LedgerInvariantViolated` if `used + pending`
    /// exceeds `allocated + carry_over`.
    pub fn from_parts(
        key: BalanceKey,
        allocated: Days,
        carry_over: Days,
        used: Days,
        pending: Days,
    ) -> Result<Self, DomainError> {
        let record: Self = Self {
            key,
            allocated,
            carry_over,
            used,
            pending,
        };
        let available: Days = record.available()?;
        let committed: Days = record.committed()?;
        if committed > available {
            return Err(DomainError::LedgerInvariantViolated {
                reason: format!(
                    "{key}: used + pending ({committed}) exceeds allocated + carry-over ({available})"
                ),
            });
        }
        Ok(record)
    }

    #[must_use]
    pub const fn key(&self) -> BalanceKey {
        self.key
    }

    #[must_use]
    pub const fn allocated(&self) -> Days {
        self.allocated
    }

    #[must_use]
    pub const fn carry_over(&self) -> Days {
        self.carry_over
    }

    #[must_use]
    pub const fn used(&self) -> Days {
        self.used
    }

    #[must_use]
    pub const fn pending(&self) -> Days {
        self.pending
    }

    /// `allocated + carry_over - used - pending`.
    #[must_use]
    pub const fn remaining(&self) -> Days {
        let available: u32 = self
            .allocated
            .half_days()
            .saturating_add(self.carry_over.half_days());
        let committed: u32 = self
            .used
            .half_days()
            .saturating_add(self.pending.half_days());
        Days::from_half_days(available.saturating_sub(committed))
    }

    /// Reserves `days` for a pending request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientRemaining` if fewer than `days`
    /// remain. The record is unchanged on error.
    pub fn reserve(&mut self, days: Days) -> Result<(), DomainError> {
        let remaining: Days = self.remaining();
        if days > remaining {
            return Err(DomainError::InsufficientRemaining {
                requested: days,
                remaining,
            });
        }
        self.pending = self
            .pending
            .checked_add(days)
            .ok_or_else(|| overflow("reserving days"))?;
        Ok(())
    }

    /// Converts `days` of pending reservation into used days.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InsufficientPending` if fewer than `days` are
    /// pending. The record is unchanged on error.
    pub fn consume(&mut self, days: Days) -> Result<(), DomainError> {
        let Some(pending) = self.pending.checked_sub(days) else {
            return Err(DomainError::InsufficientPending {
                requested: days,
                pending: self.pending,
            });
        };
        let used: Days = self
            .used
            .checked_add(days)
            .ok_or_else(|| overflow("consuming days"))?;
        self.pending = pending;
        self.used = used;
        Ok(())
    }

    /// Releases up to `days` of pending reservation, clamping at zero.
    ///
    /// Returns the number of days actually released.
    pub const fn release(&mut self, days: Days) -> Days {
        let released: Days = if days.half_days() > self.pending.half_days() {
            self.pending
        } else {
            days
        };
        self.pending = self.pending.saturating_sub(released);
        released
    }

    /// Builds the record of `key.year` for a category, keeping any existing
    /// `used` and `pending`.
    ///
    /// `previous` is the record for the year before, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AllocationBelowCommitted` if the new allocation
    /// plus carry-over is below what `existing` already has used or pending.
    pub fn initialize_year(
        key: BalanceKey,
        category: &LeaveCategory,
        previous: Option<&Self>,
        existing: Option<&Self>,
    ) -> Result<Self, DomainError> {
        let carry_over: Days = carry_over_for(category, previous);
        let (used, pending): (Days, Days) =
            existing.map_or((Days::ZERO, Days::ZERO), |record| (record.used, record.pending));

        let record: Self = Self {
            key,
            allocated: category.annual_allocation,
            carry_over,
            used,
            pending,
        };
        let available: Days = record.available()?;
        let committed: Days = record.committed()?;
        if committed > available {
            return Err(DomainError::AllocationBelowCommitted {
                available,
                committed,
            });
        }
        Ok(record)
    }

    fn available(&self) -> Result<Days, DomainError> {
        self.allocated
            .checked_add(self.carry_over)
            .ok_or_else(|| overflow("summing allocation and carry-over"))
    }

    fn committed(&self) -> Result<Days, DomainError> {
        self.used
            .checked_add(self.pending)
            .ok_or_else(|| overflow("summing used and pending days"))
    }
}

/// Days rolled into a new year from the previous year's record.
///
/// Zero unless the category allows carry-over and the previous year ended
/// with a positive remaining balance; otherwise capped at `carry_over_max`.
#[must_use]
pub fn carry_over_for(category: &LeaveCategory, previous: Option<&BalanceRecord>) -> Days {
    if !category.allows_carry_over {
        return Days::ZERO;
    }
    previous.map_or(Days::ZERO, |record| {
        record.remaining().min(category.carry_over_max)
    })
}

fn overflow(operation: &str) -> DomainError {
    DomainError::ArithmeticOverflow {
        operation: operation.to_string(),
    }
}
