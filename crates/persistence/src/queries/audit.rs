// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_engine_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use leave_engine_domain::{EmployeeId, RequestId};

use crate::data_models::{ActionData, ActorData, AuditEventRow, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// An audit event as stored, with its assigned ID and recording time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAuditEvent {
    pub event_id: i64,
    /// `CURRENT_TIMESTAMP` at insertion, as `SQLite` renders it.
    pub recorded_at: String,
    pub event: AuditEvent,
}

/// Lists the audit events of one request, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a payload cannot be deserialized.
pub fn list_audit_events_for_request(
    conn: &mut SqliteConnection,
    request_id: RequestId,
) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::request_id.eq(request_id.value()))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?
        .into_iter()
        .map(reconstruct_event)
        .collect()
}

/// Lists every audit event of an employee, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a payload cannot be deserialized.
pub fn list_audit_events_for_employee(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::employee_id.eq(employee_id.value()))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?
        .into_iter()
        .map(reconstruct_event)
        .collect()
}

fn reconstruct_event(row: AuditEventRow) -> Result<StoredAuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    let event: AuditEvent = AuditEvent::new(
        EmployeeId::new(row.employee_id),
        row.request_id.map(RequestId::new),
        Actor::from(actor_data),
        Cause::from(cause_data),
        Action::from(action_data),
        StateSnapshot::from(before_data),
        StateSnapshot::from(after_data),
    );

    Ok(StoredAuditEvent {
        event_id: row.event_id,
        recorded_at: row.created_at,
        event,
    })
}
