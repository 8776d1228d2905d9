// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, DecisionKind};
use crate::error::CoreError;
use crate::state::{LedgerEffect, LedgerOperation, SubmissionContext, TransitionResult};
use leave_engine_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use leave_engine_domain::{
    BalanceKey, Days, Decision, DomainError, LeaveRequest, LeaveStatus, evaluate_category_rules,
    EmployeeId, evaluate_policies, format_date, validate_rejection_reason, validate_year,
};
use time::OffsetDateTime;

/// Applies a submission command, producing a pending request.
///
/// The request is evaluated against the employee, the category and every
/// active policy of the organization before any ledger effect is produced.
///
/// # Arguments
///
/// * `context` - The employee, category, working days and policies to evaluate against
/// * `command` - Must be `Command::Submit`
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` with a pending request and a `Reserve` effect
/// * `Err(CoreError)` if the submission is invalid or violates a policy
///
/// # Errors
///
/// Returns an error if:
/// - The command is not a submission, or targets another employee or category
/// - The employee or category is inactive, or they belong to different organizations
/// - The period contains no chargeable day
/// - A category rule or an active policy is violated
pub fn apply_submission(
    context: &SubmissionContext,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let command_name: &'static str = command.name();
    let Command::Submit {
        employee_id,
        category_id,
        period,
        comment,
        document_ref,
        submitted_at,
    } = command
    else {
        return Err(CoreError::UnsupportedCommand(command_name));
    };

    if employee_id != context.employee.employee_id || category_id != context.category.category_id
    {
        return Err(CoreError::UnsupportedCommand(command_name));
    }

    if !context.employee.is_active {
        return Err(DomainError::EmployeeInactive(employee_id.value()).into());
    }
    if context.category.organization_id != context.employee.organization_id {
        return Err(DomainError::CategoryNotInOrganization {
            category: context.category.name.clone(),
            organization_id: context.employee.organization_id.value(),
        }
        .into());
    }

    validate_year(period.ledger_year())?;

    let total_days: Days = period.chargeable_days(context.working_days);
    if total_days.is_zero() {
        return Err(DomainError::ZeroDuration {
            start: period.start,
            end: period.end,
        }
        .into());
    }

    let request: LeaveRequest = LeaveRequest::new_pending(
        employee_id,
        category_id,
        period,
        total_days,
        normalize(comment),
        normalize(document_ref),
        submitted_at,
    );

    evaluate_category_rules(&request, &context.category)?;
    evaluate_policies(&request, &context.policies)?;

    let action: Action = Action::new(
        String::from("SubmitLeave"),
        Some(format!(
            "{total_days} day(s) of '{}' from {} to {}",
            context.category.name,
            format_date(period.start),
            format_date(period.end)
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        employee_id,
        None,
        actor,
        cause,
        action,
        StateSnapshot::with_status(None),
        StateSnapshot::with_status(Some(LeaveStatus::Pending)),
    );

    let ledger_effect: LedgerEffect = LedgerEffect {
        operation: LedgerOperation::Reserve,
        key: balance_key(&request),
        days: total_days,
    };

    Ok(TransitionResult {
        request,
        ledger_effect,
        audit_event,
    })
}

/// Applies a decision or cancellation to a stored request.
///
/// # Arguments
///
/// * `request` - The current request (immutable)
/// * `command` - `Command::Decide` or `Command::Cancel`
/// * `actor` - The deciding or cancelling actor
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` with the terminal request and its `Consume` or `Release` effect
/// * `Err(CoreError)` if the transition is not permitted
///
/// # Errors
///
/// Returns an error if:
/// - The request has not been persisted
/// - The request is no longer pending
/// - A rejection has no non-blank reason
/// - The command is a submission
pub fn apply(
    request: &LeaveRequest,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let Some(request_id) = request.request_id() else {
        return Err(CoreError::UnpersistedRequest);
    };

    let (target, operation, decided_at, rejection_reason): (
        LeaveStatus,
        LedgerOperation,
        OffsetDateTime,
        Option<String>,
    ) = match command {
        Command::Decide {
            decision: DecisionKind::Approve,
            decided_at,
            ..
        } => (
            LeaveStatus::Approved,
            LedgerOperation::Consume,
            decided_at,
            None,
        ),
        Command::Decide {
            decision: DecisionKind::Reject,
            reason,
            decided_at,
        } => {
            ensure_transition(request.status, LeaveStatus::Rejected)?;
            let reason: String = validate_rejection_reason(reason.as_deref())?;
            (
                LeaveStatus::Rejected,
                LedgerOperation::Release,
                decided_at,
                Some(reason),
            )
        }
        Command::Cancel { cancelled_at } => (
            LeaveStatus::Cancelled,
            LedgerOperation::Release,
            cancelled_at,
            None,
        ),
        Command::Submit { .. } => return Err(CoreError::UnsupportedCommand("Submit")),
    };

    ensure_transition(request.status, target)?;

    let mut new_request: LeaveRequest = request.clone();
    new_request.status = target;
    new_request.decision = Some(Decision {
        actor_id: actor.id.clone(),
        decided_at,
        rejection_reason: rejection_reason.clone(),
    });

    let action_name: &str = match target {
        LeaveStatus::Approved => "ApproveLeave",
        LeaveStatus::Rejected => "RejectLeave",
        LeaveStatus::Cancelled | LeaveStatus::Pending => "CancelLeave",
    };
    let action: Action = Action::new(String::from(action_name), rejection_reason);

    let audit_event: AuditEvent = AuditEvent::new(
        request.employee_id,
        Some(request_id),
        actor,
        cause,
        action,
        StateSnapshot::with_status(Some(request.status)),
        StateSnapshot::with_status(Some(target)),
    );

    let ledger_effect: LedgerEffect = LedgerEffect {
        operation,
        key: balance_key(request),
        days: request.total_days,
    };

    Ok(TransitionResult {
        request: new_request,
        ledger_effect,
        audit_event,
    })
}

/// Builds the audit event of an annual ledger initialization for one employee.
///
/// `categories` names the categories whose record was created or refreshed.
#[must_use]
pub fn year_initialization_event(
    employee_id: EmployeeId,
    year: i32,
    categories: &[String],
    actor: Actor,
    cause: Cause,
) -> AuditEvent {
    let action: Action = Action::new(
        String::from("InitializeYear"),
        Some(format!(
            "Initialized {year} balances for: {}",
            categories.join(", ")
        )),
    );
    AuditEvent::new(
        employee_id,
        None,
        actor,
        cause,
        action,
        StateSnapshot::default(),
        StateSnapshot::default(),
    )
}

/// The balance record a request is charged against.
#[must_use]
pub const fn balance_key(request: &LeaveRequest) -> BalanceKey {
    BalanceKey::new(
        request.employee_id,
        request.category_id,
        request.period.ledger_year(),
    )
}

fn ensure_transition(from: LeaveStatus, to: LeaveStatus) -> Result<(), DomainError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(DomainError::InvalidTransition { from, to })
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
