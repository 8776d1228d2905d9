// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::cell::Cell;

use leave_engine::CoreError;
use leave_engine_domain::{
    BalanceKey, CategoryId, Days, DomainError, EmployeeId, LeaveStatus,
};
use leave_engine_persistence::PersistenceError;

use crate::{
    ApiError, EngineConfig, translate_core_error, translate_domain_error,
    translate_persistence_error, with_transient_retry,
};

fn transient() -> ApiError {
    ApiError::Transient {
        message: String::from("database is locked"),
    }
}

#[test]
fn test_retry_gives_up_after_budget() {
    let config: EngineConfig = EngineConfig::with_max_transient_retries(3);
    let calls: Cell<u32> = Cell::new(0);

    let result: Result<(), ApiError> = with_transient_retry(&config, "test", || {
        calls.set(calls.get() + 1);
        Err(transient())
    });

    assert_eq!(result, Err(transient()));
    assert_eq!(calls.get(), 4);
}

#[test]
fn test_retry_succeeds_after_transient_failures() {
    let config: EngineConfig = EngineConfig::default();
    let calls: Cell<u32> = Cell::new(0);

    let result: Result<u32, ApiError> = with_transient_retry(&config, "test", || {
        calls.set(calls.get() + 1);
        if calls.get() < 3 {
            Err(transient())
        } else {
            Ok(calls.get())
        }
    });

    assert_eq!(result, Ok(3));
}

#[test]
fn test_final_errors_are_not_retried() {
    let config: EngineConfig = EngineConfig::default();
    let calls: Cell<u32> = Cell::new(0);

    let result: Result<(), ApiError> = with_transient_retry(&config, "test", || {
        calls.set(calls.get() + 1);
        Err(ApiError::StateConflict {
            rule: String::from("request_not_pending"),
            message: String::from("already approved"),
        })
    });

    assert!(matches!(result, Err(ApiError::StateConflict { .. })));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_zero_budget_runs_once() {
    let config: EngineConfig = EngineConfig::with_max_transient_retries(0);
    let calls: Cell<u32> = Cell::new(0);

    let result: Result<(), ApiError> = with_transient_retry(&config, "test", || {
        calls.set(calls.get() + 1);
        Err(transient())
    });

    assert!(result.is_err());
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_only_transient_is_retryable() {
    assert!(transient().is_retryable());
    assert!(
        !ApiError::Internal {
            message: String::from("boom")
        }
        .is_retryable()
    );
}

#[test]
fn test_lost_race_translates_to_transient() {
    let err: ApiError = translate_persistence_error(PersistenceError::ConcurrentModification(
        String::from("balance record changed"),
    ));
    assert!(err.is_retryable());
}

#[test]
fn test_missing_ledger_is_state_conflict() {
    let key: BalanceKey = BalanceKey::new(EmployeeId::new(1), CategoryId::new(2), 2027);
    match translate_persistence_error(PersistenceError::LedgerNotFound(key)) {
        ApiError::StateConflict { rule, .. } => assert_eq!(rule, "balance_provisioned"),
        other => panic!("Expected StateConflict, got {other:?}"),
    }
}

#[test]
fn test_duplicate_ledger_is_state_conflict() {
    let key: BalanceKey = BalanceKey::new(EmployeeId::new(1), CategoryId::new(2), 2027);
    match translate_persistence_error(PersistenceError::BalanceAlreadyProvisioned(key)) {
        ApiError::StateConflict { rule, message } => {
            assert_eq!(rule, "balance_provisioned_once");
            assert!(message.contains("already exists"));
        }
        other => panic!("Expected StateConflict, got {other:?}"),
    }
}

#[test]
fn test_not_found_names_resource() {
    match translate_persistence_error(PersistenceError::EmployeeNotFound(7)) {
        ApiError::ResourceNotFound { resource_type, .. } => {
            assert_eq!(resource_type, "Employee");
        }
        other => panic!("Expected ResourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_insufficient_pending_reports_pending_as_available() {
    let err: ApiError = translate_domain_error(DomainError::InsufficientPending {
        requested: Days::whole(3),
        pending: Days::HALF,
    });
    match err {
        ApiError::InsufficientBalance {
            requested,
            available,
            ..
        } => {
            assert_eq!(requested, Days::whole(3));
            assert_eq!(available, Days::HALF);
        }
        other => panic!("Expected InsufficientBalance, got {other:?}"),
    }
}

#[test]
fn test_core_domain_violation_is_unwrapped() {
    let err: ApiError = translate_core_error(CoreError::DomainViolation(
        DomainError::InvalidTransition {
            from: LeaveStatus::Approved,
            to: LeaveStatus::Cancelled,
        },
    ));
    assert!(matches!(err, ApiError::StateConflict { .. }));

    let err: ApiError = translate_core_error(CoreError::UnpersistedRequest);
    assert!(matches!(err, ApiError::Internal { .. }));
}
