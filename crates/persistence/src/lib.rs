// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the leave engine.
//!
//! This crate stores organizations, leave categories and policies, balance
//! records, leave requests and audit events in `SQLite` through Diesel.
//!
//! ## Ledger Ownership
//!
//! `mutations::ledger` is the only code that writes `balance_records`. Every
//! write recomputes `remaining` from the other figures, and the schema
//! rejects any row where it does not match.
//!
//! ## Concurrency
//!
//! Every ledger operation, lifecycle transition and year initialization runs
//! in its own `BEGIN IMMEDIATE` transaction, so the read-modify-write of a
//! balance record holds the database write lock from the first read. Writes
//! to `balance_records` are additionally guarded by a version column, and
//! request status updates by `status = 'PENDING'`. A writer that waits past
//! the busy timeout, or loses a guard, gets a transient error and is expected
//! to retry the whole operation.
//!
//! ## Testing
//!
//! - `new_in_memory()` gives each caller an isolated shared-cache database
//! - Concurrency tests use a temporary file with one connection per thread

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use leave_engine::{LedgerEffect, LedgerOperation, SubmissionContext, TransitionResult};
use leave_engine_audit::{Actor, Cause};
use leave_engine_domain::{
    BalanceKey, BalanceRecord, CategoryId, Days, Employee, EmployeeId, LeaveCategory,
    LeavePolicy, LeaveRequest, Organization, OrganizationId, RequestId, WorkingDays,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::{LedgerOutcome, NewCategory, NewPolicy, PersistTransitionResult};
pub use queries::StoredAuditEvent;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
///
/// One adapter serves one caller at a time. Concurrent callers each open
/// their own adapter against the same database file.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database,
    /// running any pending migrations.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path_to_str(path.as_ref())?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Opens an additional connection to a database file that has already
    /// been initialized with `new_with_file`.
    ///
    /// No migration runs, so any number of workers can open connections at
    /// once.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path_to_str(path.as_ref())?;

        let mut conn: SqliteConnection = backend::sqlite::open_connection(path_str)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Balance Ledger
    // ========================================================================

    /// Creates the balance record for a key with nothing used or pending.
    ///
    /// # Errors
    ///
    /// Returns an error if a record already exists for the key.
    pub fn provision_balance(
        &mut self,
        key: BalanceKey,
        allocated: Days,
        carry_over: Days,
    ) -> Result<BalanceRecord, PersistenceError> {
        self.conn
            .immediate_transaction::<_, PersistenceError, _>(|conn| {
                mutations::provision_balance(conn, key, allocated, carry_over)
            })
    }

    /// Moves `days` from remaining to pending.
    ///
    /// # Errors
    ///
    /// Returns `LedgerNotFound` if the record does not exist, or
    /// `Domain(InsufficientRemaining)` if fewer than `days` remain.
    pub fn reserve(
        &mut self,
        key: BalanceKey,
        days: Days,
    ) -> Result<LedgerOutcome, PersistenceError> {
        self.apply_ledger(LedgerOperation::Reserve, key, days)
    }

    /// Moves `days` from pending to used.
    ///
    /// # Errors
    ///
    /// Returns `LedgerNotFound` if the record does not exist, or
    /// `Domain(InsufficientPending)` if fewer than `days` are pending.
    pub fn consume(
        &mut self,
        key: BalanceKey,
        days: Days,
    ) -> Result<LedgerOutcome, PersistenceError> {
        self.apply_ledger(LedgerOperation::Consume, key, days)
    }

    /// Returns up to `days` of pending reservation to remaining.
    ///
    /// `LedgerOutcome::moved` reports how many days were actually released.
    ///
    /// # Errors
    ///
    /// Returns `LedgerNotFound` if the record does not exist.
    pub fn release(
        &mut self,
        key: BalanceKey,
        days: Days,
    ) -> Result<LedgerOutcome, PersistenceError> {
        self.apply_ledger(LedgerOperation::Release, key, days)
    }

    fn apply_ledger(
        &mut self,
        operation: LedgerOperation,
        key: BalanceKey,
        days: Days,
    ) -> Result<LedgerOutcome, PersistenceError> {
        let effect: LedgerEffect = LedgerEffect {
            operation,
            key,
            days,
        };
        self.conn
            .immediate_transaction::<_, PersistenceError, _>(|conn| {
                mutations::apply_ledger_effect(conn, &effect)
            })
    }

    /// Creates or refreshes an employee's records of `year` for every active
    /// category of their organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or any record cannot
    /// be initialized. Nothing is changed on error.
    pub fn initialize_year(
        &mut self,
        employee_id: EmployeeId,
        year: i32,
        actor: Actor,
        cause: Cause,
    ) -> Result<Vec<BalanceRecord>, PersistenceError> {
        mutations::persist_year_initialization(&mut self.conn, employee_id, year, actor, cause)
    }

    /// Retrieves the balance record for a key.
    ///
    /// # Errors
    ///
    /// Returns `LedgerNotFound` if the record does not exist.
    pub fn get_balance(&mut self, key: &BalanceKey) -> Result<BalanceRecord, PersistenceError> {
        queries::get_balance(&mut self.conn, key)
    }

    /// Lists an employee's balance records for a year.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_balances(
        &mut self,
        employee_id: EmployeeId,
        year: i32,
    ) -> Result<Vec<BalanceRecord>, PersistenceError> {
        queries::list_balances(&mut self.conn, employee_id, year)
    }

    // ========================================================================
    // Leave Requests
    // ========================================================================

    /// Commits a transition produced by the state machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition cannot be committed. Nothing is
    /// written on error.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    /// Loads the employee, category, working days and policies a submission
    /// is evaluated against.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if any of them is missing.
    pub fn load_submission_context(
        &mut self,
        employee_id: EmployeeId,
        category_id: CategoryId,
    ) -> Result<SubmissionContext, PersistenceError> {
        queries::load_submission_context(&mut self.conn, employee_id, category_id)
    }

    /// Retrieves a leave request by ID.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if it does not exist.
    pub fn get_request(&mut self, request_id: RequestId) -> Result<LeaveRequest, PersistenceError> {
        queries::get_request(&mut self.conn, request_id)
    }

    /// Lists an employee's leave requests in submission order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_requests_for_employee(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Vec<LeaveRequest>, PersistenceError> {
        queries::list_requests_for_employee(&mut self.conn, employee_id)
    }

    // ========================================================================
    // Audit Events
    // ========================================================================

    /// Lists the audit events of a request, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be deserialized.
    pub fn list_audit_events_for_request(
        &mut self,
        request_id: RequestId,
    ) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
        queries::list_audit_events_for_request(&mut self.conn, request_id)
    }

    /// Lists the audit events of an employee, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be deserialized.
    pub fn list_audit_events_for_employee(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
        queries::list_audit_events_for_employee(&mut self.conn, employee_id)
    }

    // ========================================================================
    // Organization Configuration
    // ========================================================================

    /// Creates an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken.
    pub fn create_organization(
        &mut self,
        name: &str,
        working_days: WorkingDays,
    ) -> Result<Organization, PersistenceError> {
        mutations::create_organization(&mut self.conn, name, working_days)
    }

    /// Creates an active employee.
    ///
    /// # Errors
    ///
    /// Returns `OrganizationNotFound` if the organization does not exist.
    pub fn create_employee(
        &mut self,
        organization_id: OrganizationId,
        name: &str,
    ) -> Result<Employee, PersistenceError> {
        mutations::create_employee(&mut self.conn, organization_id, name)
    }

    /// Creates an active leave category.
    ///
    /// # Errors
    ///
    /// Returns an error if the organization does not exist or the name is taken.
    pub fn create_category(
        &mut self,
        category: &NewCategory,
    ) -> Result<LeaveCategory, PersistenceError> {
        mutations::create_category(&mut self.conn, category)
    }

    /// Creates an active leave policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the organization does not exist or the name is taken.
    pub fn create_policy(&mut self, policy: &NewPolicy) -> Result<LeavePolicy, PersistenceError> {
        mutations::create_policy(&mut self.conn, policy)
    }

    /// Activates or deactivates an employee.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if the employee does not exist.
    pub fn set_employee_active(
        &mut self,
        employee_id: EmployeeId,
        is_active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::set_employee_active(&mut self.conn, employee_id, is_active)
    }

    /// Activates or deactivates a leave category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryNotFound` if the category does not exist.
    pub fn set_category_active(
        &mut self,
        category_id: CategoryId,
        is_active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::set_category_active(&mut self.conn, category_id, is_active)
    }

    /// Retrieves an organization by ID.
    ///
    /// # Errors
    ///
    /// Returns `OrganizationNotFound` if it does not exist.
    pub fn get_organization(
        &mut self,
        organization_id: OrganizationId,
    ) -> Result<Organization, PersistenceError> {
        queries::get_organization(&mut self.conn, organization_id)
    }

    /// Lists all organizations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_organizations(&mut self) -> Result<Vec<Organization>, PersistenceError> {
        queries::list_organizations(&mut self.conn)
    }

    /// Retrieves an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if it does not exist.
    pub fn get_employee(&mut self, employee_id: EmployeeId) -> Result<Employee, PersistenceError> {
        queries::get_employee(&mut self.conn, employee_id)
    }

    /// Lists the active employees of an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_employees(
        &mut self,
        organization_id: OrganizationId,
    ) -> Result<Vec<Employee>, PersistenceError> {
        queries::list_active_employees(&mut self.conn, organization_id)
    }

    /// Retrieves a leave category by ID.
    ///
    /// # Errors
    ///
    /// Returns `CategoryNotFound` if it does not exist.
    pub fn get_category(
        &mut self,
        category_id: CategoryId,
    ) -> Result<LeaveCategory, PersistenceError> {
        queries::get_category(&mut self.conn, category_id)
    }

    /// Lists the active leave categories of an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_categories(
        &mut self,
        organization_id: OrganizationId,
    ) -> Result<Vec<LeaveCategory>, PersistenceError> {
        queries::list_active_categories(&mut self.conn, organization_id)
    }

    /// Lists every policy of an organization in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_policies(
        &mut self,
        organization_id: OrganizationId,
    ) -> Result<Vec<LeavePolicy>, PersistenceError> {
        queries::list_policies(&mut self.conn, organization_id)
    }
}

fn path_to_str(path: &Path) -> Result<&str, PersistenceError> {
    path.to_str()
        .ok_or_else(|| PersistenceError::InitializationError("Invalid database path".to_string()))
}
