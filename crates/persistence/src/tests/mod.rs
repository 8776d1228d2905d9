// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod transition_tests;

use crate::{NewCategory, PersistTransitionResult, Persistence, PersistenceError};
use leave_engine::{Command, DecisionKind, SubmissionContext, TransitionResult, apply, apply_submission};
use leave_engine_audit::{Actor, Cause};
use leave_engine_domain::{
    BalanceKey, BalanceRecord, Days, Employee, LeaveCategory, LeavePeriod, LeaveRequest,
    Organization, RequestId, WorkingDays,
};
use time::macros::datetime;
use time::{Date, OffsetDateTime};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("emp-1"), String::from("employee"))
}

pub fn create_test_manager() -> Actor {
    Actor::new(String::from("mgr-9"), String::from("manager"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn now() -> OffsetDateTime {
    datetime!(2026-02-15 10:30 UTC)
}

/// An organization with one employee and one paid-leave category.
pub struct Fixture {
    pub persistence: Persistence,
    pub organization: Organization,
    pub employee: Employee,
    pub category: LeaveCategory,
}

impl Fixture {
    pub fn key(&self, year: i32) -> BalanceKey {
        BalanceKey::new(self.employee.employee_id, self.category.category_id, year)
    }

    /// Provisions the category's record for `year` with `allocated` days.
    pub fn provision(&mut self, year: i32, allocated: u32) -> BalanceRecord {
        let key: BalanceKey = self.key(year);
        self.persistence
            .provision_balance(key, Days::whole(allocated), Days::ZERO)
            .unwrap()
    }

    pub fn balance(&mut self, year: i32) -> BalanceRecord {
        let key: BalanceKey = self.key(year);
        self.persistence.get_balance(&key).unwrap()
    }

    pub fn submit(
        &mut self,
        start: Date,
        end: Date,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        submit_for(
            &mut self.persistence,
            &self.employee,
            &self.category,
            LeavePeriod::new(start, end, false, false),
        )
    }

    pub fn decide(
        &mut self,
        request_id: RequestId,
        decision: DecisionKind,
        reason: Option<&str>,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        let command: Command = Command::Decide {
            decision,
            reason: reason.map(ToString::to_string),
            decided_at: now(),
        };
        transition(&mut self.persistence, request_id, command)
    }

    pub fn cancel(&mut self, request_id: RequestId) -> Result<PersistTransitionResult, PersistenceError> {
        let command: Command = Command::Cancel {
            cancelled_at: now(),
        };
        transition(&mut self.persistence, request_id, command)
    }
}

pub fn paid_leave(organization: &Organization) -> NewCategory {
    NewCategory {
        organization_id: organization.organization_id,
        name: String::from("Paid leave"),
        annual_allocation: Days::whole(25),
        allows_carry_over: true,
        carry_over_max: Days::whole(5),
        requires_approval: true,
        requires_document: false,
    }
}

/// Seeds an organization, employee and category into `persistence`.
pub fn seed(mut persistence: Persistence) -> Fixture {
    let organization: Organization = persistence
        .create_organization("Acme", WorkingDays::MONDAY_TO_FRIDAY)
        .unwrap();
    let employee: Employee = persistence
        .create_employee(organization.organization_id, "Jane Doe")
        .unwrap();
    let category: LeaveCategory = persistence
        .create_category(&paid_leave(&organization))
        .unwrap();
    Fixture {
        persistence,
        organization,
        employee,
        category,
    }
}

pub fn create_fixture() -> Fixture {
    seed(Persistence::new_in_memory().unwrap())
}

pub fn submit_for(
    persistence: &mut Persistence,
    employee: &Employee,
    category: &LeaveCategory,
    period: LeavePeriod,
) -> Result<PersistTransitionResult, PersistenceError> {
    let context: SubmissionContext =
        persistence.load_submission_context(employee.employee_id, category.category_id)?;
    let command: Command = Command::Submit {
        employee_id: employee.employee_id,
        category_id: category.category_id,
        period,
        comment: None,
        document_ref: None,
        submitted_at: now(),
    };
    let result: TransitionResult =
        apply_submission(&context, command, create_test_actor(), create_test_cause())?;
    persistence.persist_transition(&result)
}

fn transition(
    persistence: &mut Persistence,
    request_id: RequestId,
    command: Command,
) -> Result<PersistTransitionResult, PersistenceError> {
    let request: LeaveRequest = persistence.get_request(request_id)?;
    let result: TransitionResult =
        apply(&request, command, create_test_manager(), create_test_cause())?;
    persistence.persist_transition(&result)
}

pub fn request_id(result: &PersistTransitionResult) -> RequestId {
    result.request.request_id().unwrap()
}
