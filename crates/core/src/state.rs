// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leave_engine_audit::AuditEvent;
use leave_engine_domain::{
    BalanceKey, BalanceRecord, Days, DomainError, Employee, LeaveCategory, LeavePolicy,
    LeaveRequest, WorkingDays,
};

/// Everything a submission is evaluated against, as read from the policy source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionContext {
    /// The requesting employee.
    pub employee: Employee,
    /// The charged category.
    pub category: LeaveCategory,
    /// The organization's working-day set.
    pub working_days: WorkingDays,
    /// The organization's policies, in creation order.
    pub policies: Vec<LeavePolicy>,
}

/// The ledger mutation a transition requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOperation {
    /// Move days from remaining to pending.
    Reserve,
    /// Move days from pending to used.
    Consume,
    /// Return pending days to remaining, clamped.
    Release,
}

impl LedgerOperation {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reserve => "reserve",
            Self::Consume => "consume",
            Self::Release => "release",
        }
    }
}

/// A ledger mutation against one balance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEffect {
    /// The mutation to perform.
    pub operation: LedgerOperation,
    /// The record to mutate.
    pub key: BalanceKey,
    /// The days involved.
    pub days: Days,
}

impl LedgerEffect {
    /// Applies this effect to an in-memory record.
    ///
    /// Returns the days actually moved: equal to `days` except for a clamped
    /// release.
    ///
    /// # Errors
    ///
    /// Returns the ledger error of a failed reserve or consume. The record is
    /// unchanged on error.
    pub fn apply_to(&self, record: &mut BalanceRecord) -> Result<Days, DomainError> {
        match self.operation {
            LedgerOperation::Reserve => record.reserve(self.days).map(|()| self.days),
            LedgerOperation::Consume => record.consume(self.days).map(|()| self.days),
            LedgerOperation::Release => Ok(record.release(self.days)),
        }
    }
}

/// The result of a successful state transition.
///
/// Nothing is stored yet. The request, the ledger effect and the audit event
/// must be committed together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The request after the transition.
    pub request: LeaveRequest,
    /// The ledger mutation that must accompany the status change.
    pub ledger_effect: LedgerEffect,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
