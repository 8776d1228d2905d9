// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, DecisionKind, SubmissionContext, TransitionResult, apply_submission};
use leave_engine_audit::{Actor, Cause};
use leave_engine_domain::{
    CategoryId, Days, Employee, EmployeeId, LeaveCategory, LeavePeriod, LeaveRequest,
    OrganizationId, RequestId, WorkingDays,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("emp-1"), String::from("employee"))
}

pub fn create_test_manager() -> Actor {
    Actor::new(String::from("mgr-9"), String::from("manager"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Leave request"))
}

pub fn create_test_category() -> LeaveCategory {
    LeaveCategory {
        category_id: CategoryId::new(10),
        organization_id: OrganizationId::new(1),
        name: String::from("Paid leave"),
        annual_allocation: Days::whole(25),
        allows_carry_over: true,
        carry_over_max: Days::whole(5),
        requires_approval: true,
        requires_document: false,
        is_active: true,
    }
}

pub fn create_test_context() -> SubmissionContext {
    SubmissionContext {
        employee: Employee {
            employee_id: EmployeeId::new(1),
            organization_id: OrganizationId::new(1),
            name: String::from("Jane Doe"),
            is_active: true,
        },
        category: create_test_category(),
        working_days: WorkingDays::MONDAY_TO_FRIDAY,
        policies: Vec::new(),
    }
}

pub fn now() -> OffsetDateTime {
    datetime!(2026-02-15 10:30 UTC)
}

pub fn submit_command(start: Date, end: Date) -> Command {
    Command::Submit {
        employee_id: EmployeeId::new(1),
        category_id: CategoryId::new(10),
        period: LeavePeriod::new(start, end, false, false),
        comment: None,
        document_ref: None,
        submitted_at: now(),
    }
}

pub fn decide_command(decision: DecisionKind, reason: Option<&str>) -> Command {
    Command::Decide {
        decision,
        reason: reason.map(ToString::to_string),
        decided_at: now(),
    }
}

/// A stored pending request for Monday 2026-03-02 to Friday 2026-03-06.
pub fn create_stored_pending_request() -> LeaveRequest {
    let transition: TransitionResult = apply_submission(
        &create_test_context(),
        submit_command(date!(2026 - 03 - 02), date!(2026 - 03 - 06)),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    transition.request.with_id(RequestId::new(100))
}
