// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_engine_domain::{LeaveRequest, LeaveStatus, RequestId, format_date};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewRequestRow, bool_to_db, days_to_db, timestamp_to_db};
use crate::diesel_schema::leave_requests;
use crate::error::PersistenceError;

/// Inserts a new pending request and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_request(
    conn: &mut SqliteConnection,
    request: &LeaveRequest,
) -> Result<RequestId, PersistenceError> {
    diesel::insert_into(leave_requests::table)
        .values(NewRequestRow {
            employee_id: request.employee_id.value(),
            category_id: request.category_id.value(),
            start_date: format_date(request.period.start),
            end_date: format_date(request.period.end),
            half_day_start: bool_to_db(request.period.half_day_start),
            half_day_end: bool_to_db(request.period.half_day_end),
            total_half_days: days_to_db(request.total_days),
            status: request.status.as_str(),
            comment: request.comment.as_deref(),
            document_ref: request.document_ref.as_deref(),
            submitted_at: timestamp_to_db(request.submitted_at)?,
        })
        .execute(conn)?;
    Ok(RequestId::new(conn.get_last_insert_rowid()?))
}

/// Records the decision of a request that is still pending in storage.
///
/// Returns the number of rows updated: 0 if the stored request is no longer
/// pending.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn record_decision(
    conn: &mut SqliteConnection,
    request_id: RequestId,
    request: &LeaveRequest,
) -> Result<usize, PersistenceError> {
    let decided_at: Option<String> = request
        .decision
        .as_ref()
        .map(|decision| timestamp_to_db(decision.decided_at))
        .transpose()?;
    let decided_by: Option<&str> = request
        .decision
        .as_ref()
        .map(|decision| decision.actor_id.as_str());
    let rejection_reason: Option<&str> = request
        .decision
        .as_ref()
        .and_then(|decision| decision.rejection_reason.as_deref());

    let rows: usize = diesel::update(
        leave_requests::table
            .filter(leave_requests::request_id.eq(request_id.value()))
            .filter(leave_requests::status.eq(LeaveStatus::Pending.as_str())),
    )
    .set((
        leave_requests::status.eq(request.status.as_str()),
        leave_requests::decided_by.eq(decided_by),
        leave_requests::decided_at.eq(decided_at),
        leave_requests::rejection_reason.eq(rejection_reason),
    ))
    .execute(conn)?;
    Ok(rows)
}
