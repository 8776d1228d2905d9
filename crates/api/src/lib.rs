// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Boundary of the leave engine.
//!
//! Callers hand in plain request DTOs together with the authenticated actor
//! and a cause. Handlers parse and validate the input, run the state machine,
//! commit through the persistence layer and translate every internal error
//! into an `ApiError`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod config;
mod error;
mod handlers;
mod notification;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, Role};
pub use config::{DEFAULT_MAX_TRANSIENT_RETRIES, EngineConfig, with_transient_retry};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    cancel_leave_request, create_category, create_employee, create_organization, create_policy,
    decide_leave_request, get_balance, get_leave_request, list_balances,
    list_employee_audit_events, list_leave_requests, list_request_audit_events, preview_duration,
    run_annual_rollover, set_category_active, set_employee_active, submit_leave_request,
};
pub use notification::{
    DecisionNotice, LogNotificationSink, NotificationError, NotificationSink,
    dispatch_decision_notice,
};
pub use request_response::{
    AuditEventInfo, BalanceInfo, CategoryInfo, CreateCategoryRequest, CreateEmployeeRequest,
    CreateOrganizationRequest, CreatePolicyRequest, DecideLeaveRequest, EmployeeInfo,
    EmployeeRolloverOutcome, LeaveRequestInfo, LeaveTransitionResponse, ListBalancesResponse,
    ListLeaveRequestsResponse, OrganizationInfo, PolicyInfo, PreviewDurationRequest,
    PreviewDurationResponse, RolloverOutcome, RolloverReport, RolloverRequest, SetActiveRequest,
    SubmitLeaveRequest,
};
