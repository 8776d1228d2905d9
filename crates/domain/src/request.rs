// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::days::Days;
use crate::duration::{DurationConfig, WorkingDays, calendar_days, compute_chargeable_days};
use crate::error::DomainError;
use crate::types::{CategoryId, EmployeeId, RequestId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Lifecycle state of a leave request.
///
/// `Pending` is the only non-terminal state. Every transition leaves it and
/// none returns to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    /// Submitted and holding a reservation, awaiting a decision.
    Pending,
    /// Approved; the reservation has been consumed.
    Approved,
    /// Rejected; the reservation has been released.
    Rejected,
    /// Withdrawn by the requester; the reservation has been released.
    Cancelled,
}

impl LeaveStatus {
    /// Converts this status to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - `Pending` → `Approved`
    /// - `Pending` → `Rejected`
    /// - `Pending` → `Cancelled`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Rejected | Self::Cancelled)
        )
    }
}

impl FromStr for LeaveStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidLeaveStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The calendar span of a leave request with its half-day flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeavePeriod {
    /// First day of leave.
    pub start: Date,
    /// Last day of leave.
    pub end: Date,
    /// Only the afternoon of `start` is taken.
    pub half_day_start: bool,
    /// Only the morning of `end` is taken.
    pub half_day_end: bool,
}

impl LeavePeriod {
    /// Creates a new period.
    #[must_use]
    pub const fn new(start: Date, end: Date, half_day_start: bool, half_day_end: bool) -> Self {
        Self {
            start,
            end,
            half_day_start,
            half_day_end,
        }
    }

    /// The ledger year charged by this period: the year of its start date.
    #[must_use]
    pub const fn ledger_year(&self) -> i32 {
        self.start.year()
    }

    /// Chargeable days of this period under the given working-day set.
    #[must_use]
    pub fn chargeable_days(&self, working_days: WorkingDays) -> Days {
        compute_chargeable_days(
            self.start,
            self.end,
            &DurationConfig {
                working_days,
                half_day_start: self.half_day_start,
                half_day_end: self.half_day_end,
            },
        )
    }

    /// Iterates every calendar day of the period, inclusive.
    pub fn calendar_days(&self) -> impl Iterator<Item = Date> {
        calendar_days(self.start, self.end)
    }
}

/// Who decided a request, when, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Identity of the deciding (or cancelling) actor.
    pub actor_id: String,
    /// When the decision was committed.
    pub decided_at: OffsetDateTime,
    /// The rejection reason, present only for rejected requests.
    pub rejection_reason: Option<String>,
}

/// A single time-off submission.
///
/// `total_days` is fixed at submission and is the amount charged against the
/// balance of (employee, category, year of `period.start`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequest {
    /// The persisted identifier. `None` until the submission is stored.
    request_id: Option<RequestId>,
    /// The requesting employee.
    pub employee_id: EmployeeId,
    /// The charged leave category.
    pub category_id: CategoryId,
    /// Requested dates and half-day flags.
    pub period: LeavePeriod,
    /// Chargeable days, computed at submission.
    pub total_days: Days,
    /// Lifecycle state.
    pub status: LeaveStatus,
    /// Free-form comment from the requester.
    pub comment: Option<String>,
    /// Reference to a supporting document.
    pub document_ref: Option<String>,
    /// When the request was submitted.
    pub submitted_at: OffsetDateTime,
    /// Decision metadata, present once the request leaves `Pending`.
    pub decision: Option<Decision>,
}

impl LeaveRequest {
    /// Creates a new, not yet persisted, pending request.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new_pending(
        employee_id: EmployeeId,
        category_id: CategoryId,
        period: LeavePeriod,
        total_days: Days,
        comment: Option<String>,
        document_ref: Option<String>,
        submitted_at: OffsetDateTime,
    ) -> Self {
        Self {
            request_id: None,
            employee_id,
            category_id,
            period,
            total_days,
            status: LeaveStatus::Pending,
            comment,
            document_ref,
            submitted_at,
            decision: None,
        }
    }

    /// Returns this request carrying a persisted identifier.
    #[must_use]
    pub fn with_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Returns the persisted identifier, if any.
    #[must_use]
    pub const fn request_id(&self) -> Option<RequestId> {
        self.request_id
    }

    /// Returns whether a supporting document reference was supplied.
    #[must_use]
    pub fn has_document(&self) -> bool {
        self.document_ref
            .as_deref()
            .is_some_and(|reference| !reference.trim().is_empty())
    }
}
