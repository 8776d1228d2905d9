// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::{balance_records, leave_requests};
use crate::tests::{
    Fixture, create_fixture, create_test_cause, create_test_manager, now, request_id,
};
use crate::{PersistTransitionResult, PersistenceError, StoredAuditEvent};
use diesel::prelude::*;
use leave_engine::{Command, DecisionKind, TransitionResult, apply};
use leave_engine_domain::{
    BalanceRecord, Days, DomainError, LeaveRequest, LeaveStatus, RequestId,
};
use time::macros::date;

#[test]
fn test_submit_reserves_and_persists_pending_request() {
    let mut fixture: Fixture = create_fixture();
    fixture.provision(2026, 20);

    let result: PersistTransitionResult = fixture
        .submit(date!(2026 - 03 - 02), date!(2026 - 03 - 06))
        .unwrap();

    assert_eq!(result.request.total_days, Days::whole(5));
    assert_eq!(result.request.status, LeaveStatus::Pending);
    assert_eq!(result.days_moved, Days::whole(5));
    assert_eq!(result.balance.pending(), Days::whole(5));
    assert_eq!(result.balance.remaining(), Days::whole(15));

    let stored: LeaveRequest = fixture.persistence.get_request(request_id(&result)).unwrap();
    assert_eq!(stored, result.request);
    assert_eq!(fixture.balance(2026), result.balance);
}

#[test]
fn test_approve_consumes_reservation() {
    let mut fixture: Fixture = create_fixture();
    fixture.provision(2026, 20);
    let submitted: PersistTransitionResult = fixture
        .submit(date!(2026 - 03 - 02), date!(2026 - 03 - 06))
        .unwrap();

    let approved: PersistTransitionResult = fixture
        .decide(request_id(&submitted), DecisionKind::Approve, None)
        .unwrap();

    assert_eq!(approved.request.status, LeaveStatus::Approved);
    assert_eq!(approved.balance.used(), Days::whole(5));
    assert_eq!(approved.balance.pending(), Days::ZERO);
    assert_eq!(approved.balance.remaining(), Days::whole(15));

    let stored: LeaveRequest = fixture
        .persistence
        .get_request(request_id(&submitted))
        .unwrap();
    assert_eq!(stored.status, LeaveStatus::Approved);
    let decision = stored.decision.unwrap();
    assert_eq!(decision.actor_id, "mgr-9");
    assert_eq!(decision.decided_at, now());
    assert_eq!(decision.rejection_reason, None);
}

#[test]
fn test_reject_releases_reservation_and_stores_reason() {
    let mut fixture: Fixture = create_fixture();
    fixture.provision(2026, 20);
    let submitted: PersistTransitionResult = fixture
        .submit(date!(2026 - 03 - 02), date!(2026 - 03 - 03))
        .unwrap();
    assert_eq!(submitted.balance.remaining(), Days::whole(18));

    let rejected: PersistTransitionResult = fixture
        .decide(
            request_id(&submitted),
            DecisionKind::Reject,
            Some("insufficient activity"),
        )
        .unwrap();

    assert_eq!(rejected.request.status, LeaveStatus::Rejected);
    assert_eq!(rejected.days_moved, Days::whole(2));
    assert_eq!(rejected.balance.pending(), Days::ZERO);
    assert_eq!(rejected.balance.remaining(), Days::whole(20));

    let stored: LeaveRequest = fixture
        .persistence
        .get_request(request_id(&submitted))
        .unwrap();
    assert_eq!(
        stored.decision.unwrap().rejection_reason.as_deref(),
        Some("insufficient activity")
    );
}

#[test]
fn test_insufficient_remaining_persists_nothing() {
    let mut fixture: Fixture = create_fixture();
    fixture.provision(2026, 2);

    let result = fixture.submit(date!(2026 - 03 - 02), date!(2026 - 03 - 04));
    assert_eq!(
        result,
        Err(PersistenceError::Domain(DomainError::InsufficientRemaining {
            requested: Days::whole(3),
            remaining: Days::whole(2),
        }))
    );

    let requests: Vec<LeaveRequest> = fixture
        .persistence
        .list_requests_for_employee(fixture.employee.employee_id)
        .unwrap();
    assert!(requests.is_empty());
    assert_eq!(fixture.balance(2026).remaining(), Days::whole(2));
    assert_eq!(fixture.balance(2026).pending(), Days::ZERO);
    assert!(
        fixture
            .persistence
            .list_audit_events_for_employee(fixture.employee.employee_id)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_submit_without_provisioned_record_persists_nothing() {
    let mut fixture: Fixture = create_fixture();

    let result = fixture.submit(date!(2026 - 03 - 02), date!(2026 - 03 - 02));
    assert!(matches!(result, Err(PersistenceError::LedgerNotFound(_))));
    assert!(
        fixture
            .persistence
            .list_requests_for_employee(fixture.employee.employee_id)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_cancel_releases_reservation() {
    let mut fixture: Fixture = create_fixture();
    fixture.provision(2026, 20);
    let submitted: PersistTransitionResult = fixture
        .submit(date!(2026 - 03 - 02), date!(2026 - 03 - 06))
        .unwrap();

    let cancelled: PersistTransitionResult = fixture.cancel(request_id(&submitted)).unwrap();

    assert_eq!(cancelled.request.status, LeaveStatus::Cancelled);
    assert_eq!(cancelled.balance.pending(), Days::ZERO);
    assert_eq!(cancelled.balance.remaining(), Days::whole(20));
}

#[test]
fn test_failed_ledger_effect_rolls_back_status_change() {
    let mut fixture: Fixture = create_fixture();
    fixture.provision(2026, 20);
    let submitted: PersistTransitionResult = fixture
        .submit(date!(2026 - 03 - 02), date!(2026 - 03 - 06))
        .unwrap();

    // Leave fewer days pending than the request holds, so consuming fails
    // after the status update has been written inside the transaction.
    diesel::update(balance_records::table)
        .set((
            balance_records::pending_half_days.eq(4),
            balance_records::remaining_half_days.eq(36),
        ))
        .execute(&mut fixture.persistence.conn)
        .unwrap();
    let before: BalanceRecord = fixture.balance(2026);

    let result = fixture.decide(request_id(&submitted), DecisionKind::Approve, None);
    assert!(matches!(
        result,
        Err(PersistenceError::Domain(DomainError::InsufficientPending { .. }))
    ));

    let stored: LeaveRequest = fixture
        .persistence
        .get_request(request_id(&submitted))
        .unwrap();
    assert_eq!(stored.status, LeaveStatus::Pending);
    assert!(stored.decision.is_none());
    assert_eq!(fixture.balance(2026), before);

    let events: Vec<StoredAuditEvent> = fixture
        .persistence
        .list_audit_events_for_request(request_id(&submitted))
        .unwrap();
    assert_eq!(events.len(), 1);
}

#[test]
fn test_stale_decision_is_rejected_and_changes_nothing() {
    let mut fixture: Fixture = create_fixture();
    fixture.provision(2026, 20);
    let submitted: PersistTransitionResult = fixture
        .submit(date!(2026 - 03 - 02), date!(2026 - 03 - 06))
        .unwrap();
    let id: RequestId = request_id(&submitted);

    // Two deciders read the same pending request.
    let snapshot: LeaveRequest = fixture.persistence.get_request(id).unwrap();
    let approve: TransitionResult = apply(
        &snapshot,
        Command::Decide {
            decision: DecisionKind::Approve,
            reason: None,
            decided_at: now(),
        },
        create_test_manager(),
        create_test_cause(),
    )
    .unwrap();
    let reject: TransitionResult = apply(
        &snapshot,
        Command::Decide {
            decision: DecisionKind::Reject,
            reason: Some(String::from("team is short-staffed")),
            decided_at: now(),
        },
        create_test_manager(),
        create_test_cause(),
    )
    .unwrap();

    fixture.persistence.persist_transition(&approve).unwrap();
    let result = fixture.persistence.persist_transition(&reject);

    assert_eq!(
        result,
        Err(PersistenceError::Domain(DomainError::InvalidTransition {
            from: LeaveStatus::Approved,
            to: LeaveStatus::Rejected,
        }))
    );
    assert_eq!(
        fixture.persistence.get_request(id).unwrap().status,
        LeaveStatus::Approved
    );
    assert_eq!(fixture.balance(2026).used(), Days::whole(5));
    assert_eq!(fixture.balance(2026).pending(), Days::ZERO);
}

#[test]
fn test_second_decision_is_an_invalid_transition() {
    let mut fixture: Fixture = create_fixture();
    fixture.provision(2026, 20);
    let submitted: PersistTransitionResult = fixture
        .submit(date!(2026 - 03 - 02), date!(2026 - 03 - 06))
        .unwrap();
    fixture
        .decide(request_id(&submitted), DecisionKind::Approve, None)
        .unwrap();

    let result = fixture.cancel(request_id(&submitted));
    assert_eq!(
        result,
        Err(PersistenceError::Domain(DomainError::InvalidTransition {
            from: LeaveStatus::Approved,
            to: LeaveStatus::Cancelled,
        }))
    );
}

#[test]
fn test_terminal_request_cannot_be_rewritten() {
    let mut fixture: Fixture = create_fixture();
    fixture.provision(2026, 20);
    let submitted: PersistTransitionResult = fixture
        .submit(date!(2026 - 03 - 02), date!(2026 - 03 - 06))
        .unwrap();
    let id: RequestId = request_id(&submitted);
    fixture.decide(id, DecisionKind::Approve, None).unwrap();

    let result = diesel::update(leave_requests::table.find(id.value()))
        .set(leave_requests::comment.eq(Some("edited")))
        .execute(&mut fixture.persistence.conn);

    assert!(result.is_err());
    assert_eq!(fixture.persistence.get_request(id).unwrap().comment, None);
}

#[test]
fn test_transitions_are_audited_with_balances() {
    let mut fixture: Fixture = create_fixture();
    fixture.provision(2026, 20);
    let submitted: PersistTransitionResult = fixture
        .submit(date!(2026 - 03 - 02), date!(2026 - 03 - 06))
        .unwrap();
    let id: RequestId = request_id(&submitted);
    fixture
        .decide(id, DecisionKind::Reject, Some("coverage"))
        .unwrap();

    let events: Vec<StoredAuditEvent> = fixture.persistence.list_audit_events_for_request(id).unwrap();
    assert_eq!(events.len(), 2);
    assert!(events[0].event_id < events[1].event_id);

    let submit = &events[0].event;
    assert_eq!(submit.action.name, "SubmitLeave");
    assert_eq!(submit.request_id, Some(id));
    assert_eq!(submit.actor.id, "emp-1");
    assert_eq!(submit.before.status, None);
    assert_eq!(submit.after.status, Some(LeaveStatus::Pending));
    assert_eq!(submit.before.balance.unwrap().pending, Days::ZERO);
    assert_eq!(submit.after.balance.unwrap().pending, Days::whole(5));

    let reject = &events[1].event;
    assert_eq!(reject.action.name, "RejectLeave");
    assert_eq!(reject.action.details.as_deref(), Some("coverage"));
    assert_eq!(reject.actor.id, "mgr-9");
    assert_eq!(reject.before.status, Some(LeaveStatus::Pending));
    assert_eq!(reject.after.status, Some(LeaveStatus::Rejected));
    assert_eq!(reject.after.balance.unwrap().remaining, Days::whole(20));
}

#[test]
fn test_list_requests_for_employee_in_submission_order() {
    let mut fixture: Fixture = create_fixture();
    fixture.provision(2026, 20);
    let first = fixture
        .submit(date!(2026 - 03 - 02), date!(2026 - 03 - 02))
        .unwrap();
    let second = fixture
        .submit(date!(2026 - 04 - 06), date!(2026 - 04 - 07))
        .unwrap();

    let requests: Vec<LeaveRequest> = fixture
        .persistence
        .list_requests_for_employee(fixture.employee.employee_id)
        .unwrap();
    let ids: Vec<Option<RequestId>> = requests.iter().map(LeaveRequest::request_id).collect();
    assert_eq!(
        ids,
        vec![first.request.request_id(), second.request.request_id()]
    );
    assert_eq!(fixture.balance(2026).pending(), Days::whole(3));
}

#[test]
fn test_get_missing_request() {
    let mut fixture: Fixture = create_fixture();
    assert_eq!(
        fixture.persistence.get_request(RequestId::new(404)),
        Err(PersistenceError::RequestNotFound(404))
    );
}
