// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic commit of lifecycle transitions and year initializations.
//!
//! Each function here runs in a single `BEGIN IMMEDIATE` transaction. The
//! request row, the balance record and the audit event are written together
//! or not at all.

use diesel::SqliteConnection;
use leave_engine::{TransitionResult, year_initialization_event};
use leave_engine_audit::{Actor, AuditEvent, Cause};
use leave_engine_domain::{
    BalanceRecord, Days, DomainError, Employee, EmployeeId, LeaveCategory, LeaveRequest,
    RequestId,
};
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::ledger::{LedgerOutcome, apply_ledger_effect, initialize_year_records};
use crate::mutations::requests::{insert_request, record_decision};
use crate::queries::config::{get_employee, list_active_categories};
use crate::queries::requests::get_request;

/// The committed outcome of a lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The request as stored, carrying its ID.
    pub request: LeaveRequest,
    /// The ID of the audit event recording the transition.
    pub event_id: i64,
    /// The charged balance record after the ledger effect.
    pub balance: BalanceRecord,
    /// Days actually moved by the ledger effect.
    pub days_moved: Days,
}

/// Commits a transition produced by the state machine.
///
/// A submission (request without an ID) reserves its days and is then
/// inserted. A decision or cancellation updates the request only if it is
/// still pending in storage, then applies its ledger effect. The audit event
/// is written last, with the request ID and balance figures attached.
///
/// # Errors
///
/// Returns `PersistenceError::Domain` with `InvalidTransition` if the stored
/// request was decided concurrently, the ledger error if the effect is
/// rejected, or a storage error. Nothing is written on error.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let (request, ledger): (LeaveRequest, LedgerOutcome) = match result.request.request_id()
        {
            None => {
                let ledger: LedgerOutcome = apply_ledger_effect(conn, &result.ledger_effect)?;
                let request_id: RequestId = insert_request(conn, &result.request)?;
                (result.request.clone().with_id(request_id), ledger)
            }
            Some(request_id) => {
                if record_decision(conn, request_id, &result.request)? == 0 {
                    let stored: LeaveRequest = get_request(conn, request_id)?;
                    return Err(DomainError::InvalidTransition {
                        from: stored.status,
                        to: result.request.status,
                    }
                    .into());
                }
                let ledger: LedgerOutcome = apply_ledger_effect(conn, &result.ledger_effect)?;
                (result.request.clone(), ledger)
            }
        };

        let request_id: RequestId = request
            .request_id()
            .ok_or_else(|| PersistenceError::DatabaseError("request has no ID".to_string()))?;
        let event: AuditEvent = result
            .audit_event
            .clone()
            .for_request(request_id)
            .with_balances(&ledger.before, &ledger.after);
        let event_id: i64 = persist_audit_event(conn, &event)?;

        info!(
            request_id = request_id.value(),
            employee_id = request.employee_id.value(),
            action = %event.action.name,
            status = %request.status,
            days = %ledger.moved,
            remaining = %ledger.after.remaining(),
            "Committed leave request transition"
        );

        Ok(PersistTransitionResult {
            request,
            event_id,
            balance: ledger.after,
            days_moved: ledger.moved,
        })
    })
}

/// Creates or refreshes one employee's balance records for `year`, across
/// every active category of the employee's organization, and records one
/// audit event.
///
/// # Errors
///
/// Returns an error if any category's record cannot be initialized; no
/// record of the employee is changed in that case.
pub fn persist_year_initialization(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    year: i32,
    actor: Actor,
    cause: Cause,
) -> Result<Vec<BalanceRecord>, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let employee: Employee = get_employee(conn, employee_id)?;
        let categories: Vec<LeaveCategory> =
            list_active_categories(conn, employee.organization_id)?;
        let records: Vec<BalanceRecord> =
            initialize_year_records(conn, employee_id, year, &categories)?;

        if !records.is_empty() {
            let names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
            let event: AuditEvent =
                year_initialization_event(employee_id, year, &names, actor, cause);
            persist_audit_event(conn, &event)?;
        }

        info!(
            employee_id = employee_id.value(),
            year,
            categories = records.len(),
            "Initialized leave year"
        );

        Ok(records)
    })
}
