// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod balance;
mod days;
mod duration;
mod error;
mod policy;
mod request;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use balance::{BalanceKey, BalanceRecord, carry_over_for};
pub use days::Days;
pub use duration::{
    DurationConfig, WorkingDays, calendar_days, compute_chargeable_days,
    compute_chargeable_days_from_str,
};
pub use error::DomainError;
pub use policy::{evaluate_category_rules, evaluate_policies, evaluate_policy};
pub use request::{Decision, LeavePeriod, LeaveRequest, LeaveStatus};

// Re-export public types
pub use types::{
    CategoryId, Employee, EmployeeId, LeaveCategory, LeavePolicy, Organization, OrganizationId,
    PolicyId, RequestId,
};
pub use validation::{format_date, parse_date, validate_rejection_reason, validate_year};
