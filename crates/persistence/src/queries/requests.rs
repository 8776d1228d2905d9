// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_engine_domain::{EmployeeId, LeaveRequest, RequestId};

use crate::data_models::RequestRow;
use crate::diesel_schema::leave_requests;
use crate::error::PersistenceError;

/// Retrieves a leave request by ID.
///
/// # Errors
///
/// Returns `PersistenceError::RequestNotFound` if it does not exist.
pub fn get_request(
    conn: &mut SqliteConnection,
    request_id: RequestId,
) -> Result<LeaveRequest, PersistenceError> {
    let row: RequestRow = leave_requests::table
        .find(request_id.value())
        .select(RequestRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::RequestNotFound(request_id.value()))?;
    LeaveRequest::try_from(row)
}

/// Lists an employee's leave requests in submission order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_requests_for_employee(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Vec<LeaveRequest>, PersistenceError> {
    leave_requests::table
        .filter(leave_requests::employee_id.eq(employee_id.value()))
        .order(leave_requests::request_id.asc())
        .select(RequestRow::as_select())
        .load(conn)?
        .into_iter()
        .map(LeaveRequest::try_from)
        .collect()
}
