// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The balance ledger.
//!
//! This module is the only writer of `balance_records`. Every write replaces
//! all figures, including the derived `remaining`, from a `BalanceRecord`
//! that has already passed the domain checks, and is guarded by the version
//! the record was read at.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_engine::LedgerEffect;
use leave_engine_domain::{BalanceKey, BalanceRecord, Days, EmployeeId, LeaveCategory};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewBalanceRow, VersionedBalance, days_to_db};
use crate::diesel_schema::balance_records;
use crate::error::PersistenceError;
use crate::queries::ledger::find_balance;

/// A balance record around one ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerOutcome {
    pub before: BalanceRecord,
    pub after: BalanceRecord,
    /// Days actually moved. Smaller than requested only for a clamped release.
    pub moved: Days,
}

/// Inserts a new balance record at version 0.
fn insert_balance(
    conn: &mut SqliteConnection,
    record: &BalanceRecord,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(balance_records::table)
        .values(NewBalanceRow::from(record))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

/// Overwrites a balance record if it is still at `expected_version`.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if another writer
/// committed first.
fn write_balance(
    conn: &mut SqliteConnection,
    current: &VersionedBalance,
    record: &BalanceRecord,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(
        balance_records::table
            .filter(balance_records::balance_id.eq(current.balance_id))
            .filter(balance_records::version.eq(current.version)),
    )
    .set((
        balance_records::allocated_half_days.eq(days_to_db(record.allocated())),
        balance_records::carry_over_half_days.eq(days_to_db(record.carry_over())),
        balance_records::used_half_days.eq(days_to_db(record.used())),
        balance_records::pending_half_days.eq(days_to_db(record.pending())),
        balance_records::remaining_half_days.eq(days_to_db(record.remaining())),
        balance_records::version.eq(current.version + 1),
    ))
    .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::ConcurrentModification(format!(
            "balance record for {} changed since version {}",
            record.key(),
            current.version
        )));
    }
    Ok(())
}

/// Creates the balance record for a key.
///
/// # Errors
///
/// Returns `PersistenceError::BalanceAlreadyProvisioned` if a record already
/// exists for the key, or an error if the insert fails.
pub fn provision_balance(
    conn: &mut SqliteConnection,
    key: BalanceKey,
    allocated: Days,
    carry_over: Days,
) -> Result<BalanceRecord, PersistenceError> {
    if find_balance(conn, &key)?.is_some() {
        return Err(PersistenceError::BalanceAlreadyProvisioned(key));
    }
    let record: BalanceRecord = BalanceRecord::provision(key, allocated, carry_over);
    let balance_id: i64 = insert_balance(conn, &record)?;
    debug!(balance_id, %key, %allocated, %carry_over, "Provisioned balance record");
    Ok(record)
}

/// Applies a reserve, consume or release to the stored record.
///
/// The record is unchanged if the effect fails.
///
/// # Errors
///
/// Returns `PersistenceError::LedgerNotFound` if the record does not exist,
/// `PersistenceError::Domain` if the ledger rejects the mutation, or
/// `PersistenceError::ConcurrentModification` if the version guard fails.
pub fn apply_ledger_effect(
    conn: &mut SqliteConnection,
    effect: &LedgerEffect,
) -> Result<LedgerOutcome, PersistenceError> {
    let current: VersionedBalance =
        find_balance(conn, &effect.key)?.ok_or(PersistenceError::LedgerNotFound(effect.key))?;

    let mut after: BalanceRecord = current.record;
    let moved: Days = effect.apply_to(&mut after)?;
    write_balance(conn, &current, &after)?;

    debug!(
        key = %effect.key,
        operation = effect.operation.as_str(),
        requested = %effect.days,
        moved = %moved,
        pending = %after.pending(),
        remaining = %after.remaining(),
        "Applied ledger effect"
    );

    Ok(LedgerOutcome {
        before: current.record,
        after,
        moved,
    })
}

/// Creates or refreshes the records of `year` for every given category.
///
/// Existing records keep their `used` and `pending` days; allocation and
/// carry-over are recomputed from the category and the previous year.
/// Inactive categories are skipped.
///
/// # Errors
///
/// Returns `PersistenceError::Domain` if a refreshed record would have fewer
/// days available than already used or pending.
pub fn initialize_year_records(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    year: i32,
    categories: &[LeaveCategory],
) -> Result<Vec<BalanceRecord>, PersistenceError> {
    let mut records: Vec<BalanceRecord> = Vec::with_capacity(categories.len());

    for category in categories.iter().filter(|category| category.is_active) {
        let key: BalanceKey = BalanceKey::new(employee_id, category.category_id, year);
        let previous: Option<VersionedBalance> = find_balance(conn, &key.previous_year())?;
        let existing: Option<VersionedBalance> = find_balance(conn, &key)?;

        let record: BalanceRecord = BalanceRecord::initialize_year(
            key,
            category,
            previous.as_ref().map(|balance| &balance.record),
            existing.as_ref().map(|balance| &balance.record),
        )?;

        match existing {
            Some(current) => write_balance(conn, &current, &record)?,
            None => {
                insert_balance(conn, &record)?;
            }
        }

        debug!(
            %key,
            allocated = %record.allocated(),
            carry_over = %record.carry_over(),
            remaining = %record.remaining(),
            "Initialized balance record"
        );
        records.push(record);
    }

    Ok(records)
}
