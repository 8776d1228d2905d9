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
    clippy::all
)]

use leave_engine_domain::{BalanceRecord, Days, EmployeeId, LeaveStatus, RequestId};

#[cfg(test)]
mod tests;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// an employee, a manager, an administrator, or a scheduled job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "employee", "manager", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// An actor for unattended batch processing such as the annual rollover.
    #[must_use]
    pub fn system(id: &str) -> Self {
        Self::new(id.to_string(), String::from("system"))
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID, job run ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SubmitLeave`", "`ApproveLeave`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The ledger figures of one balance record at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub allocated: Days,
    pub carry_over: Days,
    pub used: Days,
    pub pending: Days,
    pub remaining: Days,
}

impl From<&BalanceRecord> for BalanceSnapshot {
    fn from(record: &BalanceRecord) -> Self {
        Self {
            allocated: record.allocated(),
            carry_over: record.carry_over(),
            used: record.used(),
            pending: record.pending(),
            remaining: record.remaining(),
        }
    }
}

/// A snapshot of the state touched by a transition.
///
/// `status` is absent before a submission (the request does not exist yet)
/// and for ledger-only events. `balance` is filled in once the ledger effect
/// has been applied to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateSnapshot {
    /// Lifecycle status of the request.
    pub status: Option<LeaveStatus>,
    /// Ledger figures of the charged balance record.
    pub balance: Option<BalanceSnapshot>,
}

impl StateSnapshot {
    /// A snapshot carrying only a request status.
    #[must_use]
    pub const fn with_status(status: Option<LeaveStatus>) -> Self {
        Self {
            status,
            balance: None,
        }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before the transition (before)
/// - The state after the transition (after)
///
/// Events are scoped to an employee and, for request transitions, to a
/// request. The request id of a submission is only known once it has been
/// stored, so it is attached by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The employee whose request or ledger changed.
    pub employee_id: EmployeeId,
    /// The request that changed, if any.
    pub request_id: Option<RequestId>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        employee_id: EmployeeId,
        request_id: Option<RequestId>,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            employee_id,
            request_id,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Returns this event scoped to a stored request.
    #[must_use]
    pub fn for_request(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Returns this event carrying the balance figures around the ledger effect.
    #[must_use]
    pub fn with_balances(mut self, before: &BalanceRecord, after: &BalanceRecord) -> Self {
        self.before.balance = Some(BalanceSnapshot::from(before));
        self.after.balance = Some(BalanceSnapshot::from(after));
        self
    }
}
