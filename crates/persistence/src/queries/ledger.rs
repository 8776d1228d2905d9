// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_engine_domain::{BalanceKey, BalanceRecord, EmployeeId};

use crate::data_models::{BalanceRow, VersionedBalance};
use crate::diesel_schema::balance_records;
use crate::error::PersistenceError;

/// Looks up the balance record for a key, with the version it was read at.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn find_balance(
    conn: &mut SqliteConnection,
    key: &BalanceKey,
) -> Result<Option<VersionedBalance>, PersistenceError> {
    balance_records::table
        .filter(balance_records::employee_id.eq(key.employee_id.value()))
        .filter(balance_records::category_id.eq(key.category_id.value()))
        .filter(balance_records::year.eq(key.year))
        .select(BalanceRow::as_select())
        .first(conn)
        .optional()?
        .map(VersionedBalance::try_from)
        .transpose()
}

/// Retrieves the balance record for a key.
///
/// # Errors
///
/// Returns `PersistenceError::LedgerNotFound` if none has been provisioned.
pub fn get_balance(
    conn: &mut SqliteConnection,
    key: &BalanceKey,
) -> Result<BalanceRecord, PersistenceError> {
    find_balance(conn, key)?
        .map(|balance| balance.record)
        .ok_or(PersistenceError::LedgerNotFound(*key))
}

/// Lists an employee's balance records for a year, ordered by category.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_balances(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    year: i32,
) -> Result<Vec<BalanceRecord>, PersistenceError> {
    balance_records::table
        .filter(balance_records::employee_id.eq(employee_id.value()))
        .filter(balance_records::year.eq(year))
        .order(balance_records::category_id.asc())
        .select(BalanceRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row| VersionedBalance::try_from(row).map(|balance| balance.record))
        .collect()
}
