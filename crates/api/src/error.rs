// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use leave_engine::CoreError;
use leave_engine_domain::{Days, DomainError};
use leave_engine_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain, core and persistence errors and represent
/// the API contract. Every variant except `Transient` is a final answer:
/// retrying the same operation yields the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A field of the request is malformed or refers to something unusable.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// An organization policy or category rule rejected the request.
    #[error("Policy '{policy}' violated: {reason}")]
    PolicyViolation { policy: String, reason: String },

    /// The ledger does not hold enough days for the operation.
    #[error("Insufficient balance: {message}")]
    InsufficientBalance {
        requested: Days,
        available: Days,
        message: String,
    },

    /// The operation conflicts with the current state of a request or record.
    #[error("State conflict ({rule}): {message}")]
    StateConflict { rule: String, message: String },

    /// A referenced resource does not exist.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        resource_type: String,
        message: String,
    },

    /// Storage was busy or a concurrent writer won; the operation was not applied.
    #[error("Transient storage failure: {message}")]
    Transient { message: String },

    /// An unexpected failure that the caller cannot correct.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Returns `true` if the whole operation may be retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// Translates a domain error into an API error.
///
/// Domain errors are internal and must not leak across the API boundary.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::DateParseError { .. } => invalid_input("date", message),
        DomainError::InvalidDays { .. } => invalid_input("days", message),
        DomainError::InvalidWeekday(_) | DomainError::EmptyWorkingDays => {
            invalid_input("working_days", message)
        }
        DomainError::InvalidLeaveStatus(_) => invalid_input("status", message),
        DomainError::InvalidYear(_) => invalid_input("year", message),
        DomainError::MissingReason => invalid_input("reason", message),
        DomainError::ZeroDuration { .. } => invalid_input("period", message),
        DomainError::CategoryInactive { .. } | DomainError::CategoryNotInOrganization { .. } => {
            invalid_input("category_id", message)
        }
        DomainError::EmployeeInactive(_) => invalid_input("employee_id", message),
        DomainError::PolicyViolation { policy, reason } => ApiError::PolicyViolation { policy, reason },
        DomainError::InsufficientRemaining {
            requested,
            remaining,
        } => ApiError::InsufficientBalance {
            requested,
            available: remaining,
            message,
        },
        DomainError::InsufficientPending { requested, pending } => {
            ApiError::InsufficientBalance {
                requested,
                available: pending,
                message,
            }
        }
        DomainError::AllocationBelowCommitted { .. } => ApiError::StateConflict {
            rule: String::from("allocation_covers_committed"),
            message,
        },
        DomainError::InvalidTransition { .. } => ApiError::StateConflict {
            rule: String::from("request_not_pending"),
            message,
        },
        DomainError::LedgerInvariantViolated { .. } | DomainError::ArithmeticOverflow { .. } => {
            ApiError::Internal { message }
        }
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        other @ (CoreError::UnsupportedCommand(_) | CoreError::UnpersistedRequest) => {
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Busy or locked storage and lost compare-and-swap races become
/// `ApiError::Transient`; everything else is final.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    let message: String = err.to_string();
    match err {
        PersistenceError::Domain(domain_err) => translate_domain_error(domain_err),
        PersistenceError::Core(core_err) => translate_core_error(core_err),
        PersistenceError::LedgerNotFound(_) => ApiError::StateConflict {
            rule: String::from("balance_provisioned"),
            message,
        },
        PersistenceError::BalanceAlreadyProvisioned(_) => ApiError::StateConflict {
            rule: String::from("balance_provisioned_once"),
            message,
        },
        PersistenceError::RequestNotFound(_) => not_found("Leave request", message),
        PersistenceError::EmployeeNotFound(_) => not_found("Employee", message),
        PersistenceError::CategoryNotFound(_) => not_found("Leave category", message),
        PersistenceError::OrganizationNotFound(_) => not_found("Organization", message),
        PersistenceError::NotFound(_) => not_found("Resource", message),
        PersistenceError::Transient(_) | PersistenceError::ConcurrentModification(_) => {
            ApiError::Transient { message }
        }
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::ReconstructionError(_)
        | PersistenceError::SerializationError(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled => ApiError::Internal { message },
    }
}

fn invalid_input(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}
