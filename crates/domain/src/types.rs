// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::days::Days;
use crate::duration::WorkingDays;
use serde::{Deserialize, Serialize};
use time::Date;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a persisted identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier!(
    /// Identifies an organization (tenant).
    OrganizationId
);
identifier!(
    /// Identifies an employee.
    EmployeeId
);
identifier!(
    /// Identifies a leave category.
    CategoryId
);
identifier!(
    /// Identifies a leave policy.
    PolicyId
);
identifier!(
    /// Identifies a leave request.
    RequestId
);

/// An organization and the calendar configuration its leave is charged against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    /// The organization identifier.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Weekdays on which leave is chargeable.
    pub working_days: WorkingDays,
}

/// An employee holding leave balances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// The employee identifier.
    pub employee_id: EmployeeId,
    /// The organization the employee belongs to.
    pub organization_id: OrganizationId,
    /// Display name, used when composing notifications.
    pub name: String,
    /// Inactive employees cannot submit and are skipped by the annual rollover.
    pub is_active: bool,
}

/// A named entitlement bucket (paid leave, RTT, ...) scoped to an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveCategory {
    /// The category identifier.
    pub category_id: CategoryId,
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Days allocated at the start of every year.
    pub annual_allocation: Days,
    /// Whether unused days roll into the next year.
    pub allows_carry_over: bool,
    /// Cap on the days rolled into the next year.
    pub carry_over_max: Days,
    /// Whether a human decision is expected for requests in this category.
    pub requires_approval: bool,
    /// Whether every request in this category needs a supporting document.
    pub requires_document: bool,
    /// Inactive categories accept no submissions and are skipped by the rollover.
    pub is_active: bool,
}

/// An organization-defined constraint on leave submissions.
///
/// All active policies of an organization must be satisfied for a
/// submission to be accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeavePolicy {
    /// The policy identifier.
    pub policy_id: PolicyId,
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// Display name, reported in violations.
    pub name: String,
    /// Upper bound on the chargeable days of a single request.
    pub max_consecutive_days: Option<Days>,
    /// Calendar dates on which no leave may be taken.
    pub blackout_dates: Vec<Date>,
    /// Whether a supporting document is mandatory.
    pub requires_document: bool,
    /// Stored with the policy but not enforced by the approval workflow.
    pub auto_approval_threshold: Option<Days>,
    /// Inactive policies are ignored during evaluation.
    pub is_active: bool,
}
