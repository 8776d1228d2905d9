// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross the boundary as ISO `YYYY-MM-DD` strings, timestamps as
//! RFC 3339 strings and day quantities as JSON numbers in half-day steps.

use leave_engine_domain::{Days, LeaveRequest};

// ============================================================================
// Leave requests
// ============================================================================

/// API request to submit a leave request.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitLeaveRequest {
    /// The employee taking leave.
    pub employee_id: i64,
    /// The leave category charged.
    pub category_id: i64,
    /// First day of leave (ISO 8601).
    pub start_date: String,
    /// Last day of leave, inclusive (ISO 8601).
    pub end_date: String,
    /// Only the afternoon of the first day is taken.
    #[serde(default)]
    pub half_day_start: bool,
    /// Only the morning of the last day is taken.
    #[serde(default)]
    pub half_day_end: bool,
    /// Free-form note from the employee.
    #[serde(default)]
    pub comment: Option<String>,
    /// Reference to a supporting document, such as a medical certificate.
    #[serde(default)]
    pub document_ref: Option<String>,
}

/// API request to approve or reject a pending leave request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecideLeaveRequest {
    /// `approve` or `reject`.
    pub decision: String,
    /// Required and non-blank when rejecting.
    #[serde(default)]
    pub reason: Option<String>,
}

/// A leave request as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeaveRequestInfo {
    pub request_id: i64,
    pub employee_id: i64,
    pub category_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub half_day_start: bool,
    pub half_day_end: bool,
    /// Chargeable days, fixed at submission.
    pub total_days: Days,
    /// `PENDING`, `APPROVED`, `REJECTED` or `CANCELLED`.
    pub status: String,
    pub comment: Option<String>,
    pub document_ref: Option<String>,
    pub submitted_at: String,
    /// The actor who approved, rejected or cancelled the request.
    pub decided_by: Option<String>,
    pub decided_at: Option<String>,
    pub rejection_reason: Option<String>,
}

/// API response for a committed submission, decision or cancellation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeaveTransitionResponse {
    /// The request after the transition.
    pub request: LeaveRequestInfo,
    /// The balance record the transition was charged against, after the transition.
    pub balance: BalanceInfo,
    /// Days moved between ledger buckets by the transition.
    pub days_moved: Days,
    /// The audit event recording the transition.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response listing an employee's leave requests.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListLeaveRequestsResponse {
    pub employee_id: i64,
    /// Oldest first.
    pub requests: Vec<LeaveRequestInfo>,
}

// ============================================================================
// Balances
// ============================================================================

/// A balance record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BalanceInfo {
    pub employee_id: i64,
    pub category_id: i64,
    pub year: i32,
    pub allocated: Days,
    pub carry_over: Days,
    pub used: Days,
    pub pending: Days,
    /// `allocated + carry_over - used - pending`.
    pub remaining: Days,
}

/// API response listing an employee's balances for a year.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListBalancesResponse {
    pub employee_id: i64,
    pub year: i32,
    pub balances: Vec<BalanceInfo>,
}

// ============================================================================
// Annual rollover
// ============================================================================

/// API request to initialize the ledger of a year.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RolloverRequest {
    /// The year to initialize.
    pub year: i32,
    /// Restricts the run to one organization. All organizations when absent.
    #[serde(default)]
    pub organization_id: Option<i64>,
}

/// Result of the rollover for one employee.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RolloverOutcome {
    /// Records were created or refreshed for these categories.
    Initialized { categories: Vec<String> },
    /// Nothing was changed for this employee.
    Failed { reason: String },
}

/// Rollover result for one employee.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeRolloverOutcome {
    pub organization_id: i64,
    pub employee_id: i64,
    #[serde(flatten)]
    pub outcome: RolloverOutcome,
}

/// Per-employee report of an annual rollover run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RolloverReport {
    pub year: i32,
    pub initialized: usize,
    pub failed: usize,
    pub outcomes: Vec<EmployeeRolloverOutcome>,
}

// ============================================================================
// Duration preview
// ============================================================================

/// API request to compute the chargeable days of a period without submitting.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreviewDurationRequest {
    /// The organization whose working days apply.
    pub organization_id: i64,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub half_day_start: bool,
    #[serde(default)]
    pub half_day_end: bool,
}

/// API response for a duration preview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreviewDurationResponse {
    pub start_date: String,
    pub end_date: String,
    pub total_days: Days,
}

// ============================================================================
// Audit
// ============================================================================

/// An audit event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    pub event_id: i64,
    pub recorded_at: String,
    pub employee_id: i64,
    pub request_id: Option<i64>,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action: String,
    pub details: Option<String>,
    pub status_before: Option<String>,
    pub status_after: Option<String>,
    pub remaining_before: Option<Days>,
    pub remaining_after: Option<Days>,
}

// ============================================================================
// Configuration
// ============================================================================

/// API request to create an organization.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
    /// ISO weekday numbers (Monday = 1). Monday to Friday when absent.
    #[serde(default)]
    pub working_days: Option<Vec<u8>>,
}

/// An organization as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrganizationInfo {
    pub organization_id: i64,
    pub name: String,
    pub working_days: Vec<u8>,
}

/// API request to create an employee.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateEmployeeRequest {
    pub organization_id: i64,
    pub name: String,
}

/// An employee as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeInfo {
    pub employee_id: i64,
    pub organization_id: i64,
    pub name: String,
    pub is_active: bool,
}

/// API request to create a leave category.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateCategoryRequest {
    pub organization_id: i64,
    pub name: String,
    pub annual_allocation: Days,
    #[serde(default)]
    pub allows_carry_over: bool,
    #[serde(default)]
    pub carry_over_max: Days,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default)]
    pub requires_document: bool,
}

/// A leave category as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryInfo {
    pub category_id: i64,
    pub organization_id: i64,
    pub name: String,
    pub annual_allocation: Days,
    pub allows_carry_over: bool,
    pub carry_over_max: Days,
    pub requires_approval: bool,
    pub requires_document: bool,
    pub is_active: bool,
}

/// API request to create a leave policy.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreatePolicyRequest {
    pub organization_id: i64,
    pub name: String,
    #[serde(default)]
    pub max_consecutive_days: Option<Days>,
    /// ISO 8601 dates on which no leave may be taken.
    #[serde(default)]
    pub blackout_dates: Vec<String>,
    #[serde(default)]
    pub requires_document: bool,
    /// Stored for reporting; requests are never approved automatically.
    #[serde(default)]
    pub auto_approval_threshold: Option<Days>,
}

/// A leave policy as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PolicyInfo {
    pub policy_id: i64,
    pub organization_id: i64,
    pub name: String,
    pub max_consecutive_days: Option<Days>,
    pub blackout_dates: Vec<String>,
    pub requires_document: bool,
    pub auto_approval_threshold: Option<Days>,
    pub is_active: bool,
}

/// API request to activate or deactivate an employee or category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

impl LeaveRequestInfo {
    /// Builds the API view of a stored request.
    #[must_use]
    pub fn from_request(request_id: i64, request: &LeaveRequest) -> Self {
        Self {
            request_id,
            employee_id: request.employee_id.value(),
            category_id: request.category_id.value(),
            start_date: leave_engine_domain::format_date(request.period.start),
            end_date: leave_engine_domain::format_date(request.period.end),
            half_day_start: request.period.half_day_start,
            half_day_end: request.period.half_day_end,
            total_days: request.total_days,
            status: request.status.as_str().to_string(),
            comment: request.comment.clone(),
            document_ref: request.document_ref.clone(),
            submitted_at: crate::handlers::format_timestamp(request.submitted_at),
            decided_by: request.decision.as_ref().map(|d| d.actor_id.clone()),
            decided_at: request
                .decision
                .as_ref()
                .map(|d| crate::handlers::format_timestamp(d.decided_at)),
            rejection_reason: request
                .decision
                .as_ref()
                .and_then(|d| d.rejection_reason.clone()),
        }
    }
}
