// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leave_engine_domain::{CategoryId, EmployeeId, LeavePeriod};
use time::OffsetDateTime;

/// The outcome chosen by a decider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    /// Consume the reservation.
    Approve,
    /// Release the reservation. Requires a reason.
    Reject,
}

impl DecisionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

/// A command represents caller intent as data only.
///
/// Commands are the only way to request a leave request state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a new leave request.
    Submit {
        /// The requesting employee.
        employee_id: EmployeeId,
        /// The leave category to charge.
        category_id: CategoryId,
        /// Requested dates and half-day flags.
        period: LeavePeriod,
        /// Optional comment from the requester.
        comment: Option<String>,
        /// Optional supporting document reference.
        document_ref: Option<String>,
        /// Submission time.
        submitted_at: OffsetDateTime,
    },
    /// Approve or reject a pending request.
    Decide {
        /// Approve or reject.
        decision: DecisionKind,
        /// Rejection reason. Ignored for approvals.
        reason: Option<String>,
        /// Decision time.
        decided_at: OffsetDateTime,
    },
    /// Withdraw a pending request.
    Cancel {
        /// Cancellation time.
        cancelled_at: OffsetDateTime,
    },
}

impl Command {
    /// The command name, as recorded in audit events and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Submit { .. } => "Submit",
            Self::Decide { .. } => "Decide",
            Self::Cancel { .. } => "Cancel",
        }
    }
}
