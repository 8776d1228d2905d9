// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Mutex;

use leave_engine_audit::Cause;
use leave_engine_domain::Days;
use leave_engine_persistence::Persistence;

use crate::{
    AuthenticatedActor, BalanceInfo, CategoryInfo, CreateCategoryRequest, CreateEmployeeRequest,
    CreateOrganizationRequest, DecideLeaveRequest, DecisionNotice, EmployeeInfo, EngineConfig,
    LeaveTransitionResponse, NotificationError, NotificationSink, OrganizationInfo, Role,
    RolloverReport, RolloverRequest, SubmitLeaveRequest, create_category, create_employee,
    create_organization, decide_leave_request, get_balance, run_annual_rollover,
    submit_leave_request,
};

pub fn create_test_employee_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("emp-1"), Role::Employee)
}

pub fn create_test_manager() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("mgr-9"), Role::Manager)
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("hr-admin"), Role::Administrator)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

/// Records every notice it receives.
#[derive(Default)]
pub struct RecordingSink {
    pub notices: Mutex<Vec<DecisionNotice>>,
}

impl RecordingSink {
    pub fn received(&self) -> Vec<DecisionNotice> {
        self.notices.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notice: &DecisionNotice) -> Result<(), NotificationError> {
        self.notices.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

/// Fails every delivery.
pub struct FailingSink;

impl NotificationSink for FailingSink {
    fn notify(&self, _notice: &DecisionNotice) -> Result<(), NotificationError> {
        Err(NotificationError::new("mail relay unreachable"))
    }
}

/// Panics on every delivery.
pub struct PanickingSink;

impl NotificationSink for PanickingSink {
    fn notify(&self, _notice: &DecisionNotice) -> Result<(), NotificationError> {
        panic!("mail client crashed");
    }
}

/// An organization with one employee and a 20-day paid-leave category
/// whose 2026 ledger has been initialized.
pub struct TestEnv {
    pub persistence: Persistence,
    pub config: EngineConfig,
    pub organization: OrganizationInfo,
    pub employee: EmployeeInfo,
    pub category: CategoryInfo,
}

impl TestEnv {
    pub fn new() -> Self {
        let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
        let organization: OrganizationInfo = create_organization(
            &mut persistence,
            &CreateOrganizationRequest {
                name: String::from("Acme"),
                working_days: None,
            },
        )
        .unwrap();
        let employee: EmployeeInfo = create_employee(
            &mut persistence,
            &CreateEmployeeRequest {
                organization_id: organization.organization_id,
                name: String::from("Ada Lovelace"),
            },
        )
        .unwrap();
        let category: CategoryInfo = create_category(
            &mut persistence,
            &CreateCategoryRequest {
                organization_id: organization.organization_id,
                name: String::from("Paid Leave"),
                annual_allocation: Days::whole(20),
                allows_carry_over: true,
                carry_over_max: Days::whole(5),
                requires_approval: true,
                requires_document: false,
            },
        )
        .unwrap();

        let mut env: Self = Self {
            persistence,
            config: EngineConfig::default(),
            organization,
            employee,
            category,
        };
        env.rollover(2026).unwrap();
        env
    }

    pub fn add_employee(&mut self, name: &str) -> EmployeeInfo {
        create_employee(
            &mut self.persistence,
            &CreateEmployeeRequest {
                organization_id: self.organization.organization_id,
                name: name.to_string(),
            },
        )
        .unwrap()
    }

    pub fn rollover(&mut self, year: i32) -> Result<RolloverReport, crate::ApiError> {
        run_annual_rollover(
            &mut self.persistence,
            &self.config,
            &RolloverRequest {
                year,
                organization_id: None,
            },
            &create_test_admin(),
            &create_test_cause(),
        )
    }

    pub fn submission(&self, start: &str, end: &str) -> SubmitLeaveRequest {
        SubmitLeaveRequest {
            employee_id: self.employee.employee_id,
            category_id: self.category.category_id,
            start_date: start.to_string(),
            end_date: end.to_string(),
            half_day_start: false,
            half_day_end: false,
            comment: None,
            document_ref: None,
        }
    }

    pub fn submit(
        &mut self,
        start: &str,
        end: &str,
    ) -> Result<LeaveTransitionResponse, crate::ApiError> {
        let request: SubmitLeaveRequest = self.submission(start, end);
        self.submit_request(&request)
    }

    pub fn submit_request(
        &mut self,
        request: &SubmitLeaveRequest,
    ) -> Result<LeaveTransitionResponse, crate::ApiError> {
        submit_leave_request(
            &mut self.persistence,
            &self.config,
            request,
            &create_test_employee_actor(),
            &create_test_cause(),
        )
    }

    pub fn decide(
        &mut self,
        sink: &dyn NotificationSink,
        request_id: i64,
        decision: &str,
        reason: Option<&str>,
    ) -> Result<LeaveTransitionResponse, crate::ApiError> {
        decide_leave_request(
            &mut self.persistence,
            &self.config,
            sink,
            request_id,
            &DecideLeaveRequest {
                decision: decision.to_string(),
                reason: reason.map(str::to_string),
            },
            &create_test_manager(),
            &create_test_cause(),
        )
    }

    pub fn balance(&mut self, year: i32) -> BalanceInfo {
        get_balance(
            &mut self.persistence,
            self.employee.employee_id,
            self.category.category_id,
            year,
        )
        .unwrap()
    }
}
