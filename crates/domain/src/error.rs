// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::days::Days;
use crate::request::LeaveStatus;

/// Errors that can occur during domain validation and ledger arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Failed to parse a calendar date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A day quantity is negative or not a multiple of one half day.
    InvalidDays {
        /// The rejected value, as supplied.
        value: String,
    },
    /// A weekday number outside `1..=7` (ISO numbering, Monday = 1).
    InvalidWeekday(u8),
    /// A working-day set with no working day in it.
    EmptyWorkingDays,
    /// A lifecycle status string that does not name a known status.
    InvalidLeaveStatus(String),
    /// A calendar year outside the supported range.
    InvalidYear(i32),
    /// A submission violates an organization policy or a category rule.
    PolicyViolation {
        /// The name of the violated policy (or category).
        policy: String,
        /// A human-readable description of the violation.
        reason: String,
    },
    /// A reservation asks for more days than remain available.
    InsufficientRemaining {
        /// Days requested.
        requested: Days,
        /// Days currently remaining.
        remaining: Days,
    },
    /// A consumption asks for more days than are currently reserved.
    InsufficientPending {
        /// Days requested.
        requested: Days,
        /// Days currently pending.
        pending: Days,
    },
    /// Re-initializing a year would leave fewer days than are already used or pending.
    AllocationBelowCommitted {
        /// `allocated + carry_over` for the year being initialized.
        available: Days,
        /// `used + pending` already recorded for the year.
        committed: Days,
    },
    /// A stored balance does not satisfy the ledger invariants.
    LedgerInvariantViolated {
        /// Description of the violated invariant.
        reason: String,
    },
    /// A lifecycle transition that is not permitted from the current status.
    InvalidTransition {
        /// The current status.
        from: LeaveStatus,
        /// The requested status.
        to: LeaveStatus,
    },
    /// A rejection was requested without a non-blank reason.
    MissingReason,
    /// The date range contains no chargeable day.
    ZeroDuration {
        /// First day of the requested range.
        start: time::Date,
        /// Last day of the requested range.
        end: time::Date,
    },
    /// The leave category is not active.
    CategoryInactive {
        /// The category name.
        category: String,
    },
    /// The leave category belongs to a different organization than the employee.
    CategoryNotInOrganization {
        /// The category name.
        category: String,
        /// The employee's organization identifier.
        organization_id: i64,
    },
    /// The employee is not active.
    EmployeeInactive(i64),
    /// Arithmetic on day quantities overflowed.
    ArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidDays { value } => {
                write!(
                    f,
                    "Invalid day quantity '{value}': must be a non-negative multiple of 0.5"
                )
            }
            Self::InvalidWeekday(number) => {
                write!(f, "Invalid weekday number {number}: must be between 1 and 7")
            }
            Self::EmptyWorkingDays => write!(f, "Working-day set must not be empty"),
            Self::InvalidLeaveStatus(status) => write!(f, "Invalid leave status: {status}"),
            Self::InvalidYear(year) => write!(f, "Invalid year: {year}"),
            Self::PolicyViolation { policy, reason } => {
                write!(f, "Policy '{policy}' violated: {reason}")
            }
            Self::InsufficientRemaining {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "Insufficient remaining balance: requested {requested} day(s), {remaining} remaining"
                )
            }
            Self::InsufficientPending { requested, pending } => {
                write!(
                    f,
                    "Insufficient pending balance: requested {requested} day(s), {pending} pending"
                )
            }
            Self::AllocationBelowCommitted {
                available,
                committed,
            } => {
                write!(
                    f,
                    "Allocation of {available} day(s) is below the {committed} day(s) already used or pending"
                )
            }
            Self::LedgerInvariantViolated { reason } => {
                write!(f, "Ledger invariant violated: {reason}")
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot transition leave request from {from} to {to}")
            }
            Self::MissingReason => write!(f, "A rejection requires a non-blank reason"),
            Self::ZeroDuration { start, end } => {
                write!(
                    f,
                    "The period {start} to {end} contains no chargeable working day"
                )
            }
            Self::CategoryInactive { category } => {
                write!(f, "Leave category '{category}' is not active")
            }
            Self::CategoryNotInOrganization {
                category,
                organization_id,
            } => {
                write!(
                    f,
                    "Leave category '{category}' does not belong to organization {organization_id}"
                )
            }
            Self::EmployeeInactive(employee_id) => {
                write!(f, "Employee {employee_id} is not active")
            }
            Self::ArithmeticOverflow { operation } => {
                write!(f, "Arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
