// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;
use leave_engine::CoreError;
use leave_engine_domain::{BalanceKey, DomainError};

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// A stored row could not be turned back into a domain value.
    ReconstructionError(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// No balance record has been provisioned for the key.
    LedgerNotFound(BalanceKey),
    /// A balance record already exists for the key.
    BalanceAlreadyProvisioned(BalanceKey),
    /// The requested leave request was not found.
    RequestNotFound(i64),
    /// The requested employee was not found.
    EmployeeNotFound(i64),
    /// The requested leave category was not found.
    CategoryNotFound(i64),
    /// The requested organization was not found.
    OrganizationNotFound(i64),
    /// A guarded write matched no row because another writer got there first.
    ConcurrentModification(String),
    /// The database was busy or locked; the operation can be retried from scratch.
    Transient(String),
    /// A domain rule rejected the operation inside the transaction.
    Domain(DomainError),
    /// A state transition was rejected.
    Core(CoreError),
    /// The requested resource was not found.
    NotFound(String),
}

impl PersistenceError {
    /// Returns `true` if retrying the whole operation may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::ConcurrentModification(_))
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ReconstructionError(msg) => write!(f, "Stored data is invalid: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::LedgerNotFound(key) => write!(f, "No balance record for {key}"),
            Self::BalanceAlreadyProvisioned(key) => {
                write!(f, "Balance record for {key} already exists")
            }
            Self::RequestNotFound(id) => write!(f, "Leave request not found: {id}"),
            Self::EmployeeNotFound(id) => write!(f, "Employee not found: {id}"),
            Self::CategoryNotFound(id) => write!(f, "Leave category not found: {id}"),
            Self::OrganizationNotFound(id) => write!(f, "Organization not found: {id}"),
            Self::ConcurrentModification(msg) => write!(f, "Concurrent modification: {msg}"),
            Self::Transient(msg) => write!(f, "Transient storage failure: {msg}"),
            Self::Domain(err) => write!(f, "{err}"),
            Self::Core(err) => write!(f, "{err}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        if let diesel::result::Error::DatabaseError(kind, info) = &err
            && (matches!(kind, DatabaseErrorKind::SerializationFailure) || is_busy(info.message()))
        {
            return Self::Transient(info.message().to_string());
        }
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DomainViolation(domain) => Self::Domain(domain),
            other => Self::Core(other),
        }
    }
}

/// `SQLITE_BUSY` and `SQLITE_LOCKED` surface only through their messages.
fn is_busy(message: &str) -> bool {
    message.contains("database is locked")
        || message.contains("database table is locked")
        || message.contains("database is busy")
}
