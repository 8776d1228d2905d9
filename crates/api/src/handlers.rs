// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Every mutating handler builds a command, runs it through the state
//! machine and commits the result in one transaction. Transient storage
//! failures rerun the whole sequence under `EngineConfig`'s retry budget.

use leave_engine::{
    Command, DecisionKind, SubmissionContext, TransitionResult, apply, apply_submission,
};
use leave_engine_audit::{Cause, StateSnapshot};
use leave_engine_domain::{
    BalanceKey, BalanceRecord, CategoryId, DomainError, DurationConfig, Employee, EmployeeId,
    LeaveCategory, LeavePeriod, LeavePolicy, LeaveRequest, LeaveStatus, Organization,
    OrganizationId, RequestId, WorkingDays, compute_chargeable_days, format_date, parse_date,
    validate_year,
};
use leave_engine_persistence::{
    NewCategory, NewPolicy, Persistence, PersistTransitionResult, StoredAuditEvent,
};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::{error, info, warn};

use crate::auth::AuthenticatedActor;
use crate::config::{EngineConfig, with_transient_retry};
use crate::error::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};
use crate::notification::{DecisionNotice, NotificationSink, dispatch_decision_notice};
use crate::request_response::{
    AuditEventInfo, BalanceInfo, CategoryInfo, CreateCategoryRequest, CreateEmployeeRequest,
    CreateOrganizationRequest, CreatePolicyRequest, DecideLeaveRequest, EmployeeInfo,
    EmployeeRolloverOutcome, LeaveRequestInfo, LeaveTransitionResponse, ListBalancesResponse,
    ListLeaveRequestsResponse, OrganizationInfo, PolicyInfo, PreviewDurationRequest,
    PreviewDurationResponse, RolloverOutcome, RolloverReport, RolloverRequest, SubmitLeaveRequest,
};

// ============================================================================
// Leave request lifecycle
// ============================================================================

/// Submits a leave request and reserves its days.
///
/// The request is evaluated against the category rules and every active
/// policy of the employee's organization. On success the request is stored
/// as `PENDING` and its chargeable days move from remaining to pending.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `config` - Engine configuration (retry budget)
/// * `request` - The submission
/// * `authenticated_actor` - The authenticated actor submitting the request
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(LeaveTransitionResponse)` with the pending request and the updated balance
/// * `Err(ApiError)` if the submission is rejected
///
/// # Errors
///
/// Returns an error if:
/// - A date is malformed or the period contains no working day
/// - The employee or category is unknown, inactive, or from another organization
/// - A category rule or an active policy is violated
/// - No balance record exists for the employee, category and year
/// - Fewer days remain than the request needs
/// - Storage stays busy after every retry
pub fn submit_leave_request(
    persistence: &mut Persistence,
    config: &EngineConfig,
    request: &SubmitLeaveRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> Result<LeaveTransitionResponse, ApiError> {
    let start: Date = parse_field_date("start_date", &request.start_date)?;
    let end: Date = parse_field_date("end_date", &request.end_date)?;
    let period: LeavePeriod =
        LeavePeriod::new(start, end, request.half_day_start, request.half_day_end);
    let employee_id: EmployeeId = EmployeeId::new(request.employee_id);
    let category_id: CategoryId = CategoryId::new(request.category_id);
    let submitted_at: OffsetDateTime = OffsetDateTime::now_utc();

    let committed: PersistTransitionResult =
        with_transient_retry(config, "submit_leave_request", || {
            let context: SubmissionContext = persistence
                .load_submission_context(employee_id, category_id)
                .map_err(translate_persistence_error)?;
            let command: Command = Command::Submit {
                employee_id,
                category_id,
                period,
                comment: request.comment.clone(),
                document_ref: request.document_ref.clone(),
                submitted_at,
            };
            let result: TransitionResult = apply_submission(
                &context,
                command,
                authenticated_actor.to_audit_actor(),
                cause.clone(),
            )
            .map_err(translate_core_error)?;
            persistence
                .persist_transition(&result)
                .map_err(translate_persistence_error)
        })?;

    let message: String = format!(
        "Submitted {} day(s) of leave from {} to {}",
        committed.request.total_days, request.start_date, request.end_date
    );
    transition_response(&committed, message)
}

/// Approves or rejects a pending leave request.
///
/// Approval moves the reserved days from pending to used; rejection returns
/// them to remaining. After the decision is committed a notice is handed to
/// `sink`. A notice that cannot be delivered is logged and the decision stands.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `config` - Engine configuration (retry budget)
/// * `sink` - Where the decision notice is sent
/// * `request_id` - The request to decide
/// * `request` - The decision and, for a rejection, its reason
/// * `authenticated_actor` - The deciding actor
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The decision is neither `approve` nor `reject`
/// - The request does not exist
/// - The request is no longer `PENDING`
/// - A rejection has no non-blank reason
/// - Storage stays busy after every retry
pub fn decide_leave_request(
    persistence: &mut Persistence,
    config: &EngineConfig,
    sink: &dyn NotificationSink,
    request_id: i64,
    request: &DecideLeaveRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> Result<LeaveTransitionResponse, ApiError> {
    let decision: DecisionKind = parse_decision(&request.decision)?;
    let decided_at: OffsetDateTime = OffsetDateTime::now_utc();

    let committed: PersistTransitionResult =
        with_transient_retry(config, "decide_leave_request", || {
            let current: LeaveRequest = persistence
                .get_request(RequestId::new(request_id))
                .map_err(translate_persistence_error)?;
            let command: Command = Command::Decide {
                decision,
                reason: request.reason.clone(),
                decided_at,
            };
            let result: TransitionResult = apply(
                &current,
                command,
                authenticated_actor.to_audit_actor(),
                cause.clone(),
            )
            .map_err(translate_core_error)?;
            persistence
                .persist_transition(&result)
                .map_err(translate_persistence_error)
        })?;

    notify_decision(persistence, sink, request_id, &committed.request);

    let verb: &str = match decision {
        DecisionKind::Approve => "Approved",
        DecisionKind::Reject => "Rejected",
    };
    let message: String = format!("{verb} leave request {request_id}");
    transition_response(&committed, message)
}

/// Cancels a pending leave request and releases its reserved days.
///
/// Cancellation sends no notice.
///
/// # Errors
///
/// Returns an error if the request does not exist, is no longer `PENDING`,
/// or storage stays busy after every retry.
pub fn cancel_leave_request(
    persistence: &mut Persistence,
    config: &EngineConfig,
    request_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> Result<LeaveTransitionResponse, ApiError> {
    let cancelled_at: OffsetDateTime = OffsetDateTime::now_utc();

    let committed: PersistTransitionResult =
        with_transient_retry(config, "cancel_leave_request", || {
            let current: LeaveRequest = persistence
                .get_request(RequestId::new(request_id))
                .map_err(translate_persistence_error)?;
            let result: TransitionResult = apply(
                &current,
                Command::Cancel { cancelled_at },
                authenticated_actor.to_audit_actor(),
                cause.clone(),
            )
            .map_err(translate_core_error)?;
            persistence
                .persist_transition(&result)
                .map_err(translate_persistence_error)
        })?;

    let message: String = format!(
        "Cancelled leave request {request_id}; released {} day(s)",
        committed.days_moved
    );
    transition_response(&committed, message)
}

/// Retrieves a leave request.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the request does not exist.
pub fn get_leave_request(
    persistence: &mut Persistence,
    request_id: i64,
) -> Result<LeaveRequestInfo, ApiError> {
    let request: LeaveRequest = persistence
        .get_request(RequestId::new(request_id))
        .map_err(translate_persistence_error)?;
    Ok(LeaveRequestInfo::from_request(request_id, &request))
}

/// Lists an employee's leave requests, oldest first.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the employee does not exist.
pub fn list_leave_requests(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<ListLeaveRequestsResponse, ApiError> {
    let employee_id_typed: EmployeeId = EmployeeId::new(employee_id);
    persistence
        .get_employee(employee_id_typed)
        .map_err(translate_persistence_error)?;
    let requests: Vec<LeaveRequestInfo> = persistence
        .list_requests_for_employee(employee_id_typed)
        .map_err(translate_persistence_error)?
        .iter()
        .filter_map(|request| {
            request
                .request_id()
                .map(|id| LeaveRequestInfo::from_request(id.value(), request))
        })
        .collect();

    Ok(ListLeaveRequestsResponse {
        employee_id,
        requests,
    })
}

// ============================================================================
// Balances and rollover
// ============================================================================

/// Retrieves one balance record.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an out-of-range year and
/// `ApiError::StateConflict` if the record has not been provisioned.
pub fn get_balance(
    persistence: &mut Persistence,
    employee_id: i64,
    category_id: i64,
    year: i32,
) -> Result<BalanceInfo, ApiError> {
    validate_year(year).map_err(translate_domain_error)?;
    let key: BalanceKey = BalanceKey::new(
        EmployeeId::new(employee_id),
        CategoryId::new(category_id),
        year,
    );
    let record: BalanceRecord = persistence
        .get_balance(&key)
        .map_err(translate_persistence_error)?;
    Ok(BalanceInfo::from(&record))
}

/// Lists an employee's balance records for a year.
///
/// # Errors
///
/// Returns an error if the year is out of range or the employee does not exist.
pub fn list_balances(
    persistence: &mut Persistence,
    employee_id: i64,
    year: i32,
) -> Result<ListBalancesResponse, ApiError> {
    validate_year(year).map_err(translate_domain_error)?;
    let employee_id_typed: EmployeeId = EmployeeId::new(employee_id);
    persistence
        .get_employee(employee_id_typed)
        .map_err(translate_persistence_error)?;
    let balances: Vec<BalanceInfo> = persistence
        .list_balances(employee_id_typed, year)
        .map_err(translate_persistence_error)?
        .iter()
        .map(BalanceInfo::from)
        .collect();

    Ok(ListBalancesResponse {
        employee_id,
        year,
        balances,
    })
}

/// Initializes the ledger of a year for every active employee.
///
/// Each employee is initialized in a transaction of their own. A failure
/// for one employee is logged and reported, leaves that employee's records
/// untouched, and does not stop the run.
///
/// # Errors
///
/// Returns an error if the year is out of range, the requested organization
/// does not exist, or the employees of an organization cannot be listed.
pub fn run_annual_rollover(
    persistence: &mut Persistence,
    config: &EngineConfig,
    request: &RolloverRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> Result<RolloverReport, ApiError> {
    let year: i32 = request.year;
    validate_year(year).map_err(translate_domain_error)?;

    let organizations: Vec<Organization> = match request.organization_id {
        Some(id) => vec![
            persistence
                .get_organization(OrganizationId::new(id))
                .map_err(translate_persistence_error)?,
        ],
        None => persistence
            .list_organizations()
            .map_err(translate_persistence_error)?,
    };

    let mut outcomes: Vec<EmployeeRolloverOutcome> = Vec::new();
    for organization in &organizations {
        let categories: Vec<LeaveCategory> = persistence
            .list_active_categories(organization.organization_id)
            .map_err(translate_persistence_error)?;
        let employees: Vec<Employee> = persistence
            .list_active_employees(organization.organization_id)
            .map_err(translate_persistence_error)?;

        for employee in employees {
            let initialized: Result<Vec<BalanceRecord>, ApiError> =
                with_transient_retry(config, "initialize_year", || {
                    persistence
                        .initialize_year(
                            employee.employee_id,
                            year,
                            authenticated_actor.to_audit_actor(),
                            cause.clone(),
                        )
                        .map_err(translate_persistence_error)
                });

            let outcome: RolloverOutcome = match initialized {
                Ok(records) => RolloverOutcome::Initialized {
                    categories: records
                        .iter()
                        .map(|record| category_name(&categories, record.key().category_id))
                        .collect(),
                },
                Err(err) => {
                    error!(
                        employee_id = employee.employee_id.value(),
                        year,
                        error = %err,
                        "Failed to initialize leave balances"
                    );
                    RolloverOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            };
            outcomes.push(EmployeeRolloverOutcome {
                organization_id: organization.organization_id.value(),
                employee_id: employee.employee_id.value(),
                outcome,
            });
        }
    }

    let failed: usize = outcomes
        .iter()
        .filter(|o| matches!(o.outcome, RolloverOutcome::Failed { .. }))
        .count();
    let initialized: usize = outcomes.len() - failed;
    info!(
        year,
        organizations = organizations.len(),
        initialized,
        failed,
        "Annual rollover finished"
    );

    Ok(RolloverReport {
        year,
        initialized,
        failed,
        outcomes,
    })
}

// ============================================================================
// Duration preview and audit
// ============================================================================

/// Computes the chargeable days of a period under an organization's working
/// days, without submitting anything.
///
/// An end date before the start date yields zero days.
///
/// # Errors
///
/// Returns an error if a date is malformed or the organization does not exist.
pub fn preview_duration(
    persistence: &mut Persistence,
    request: &PreviewDurationRequest,
) -> Result<PreviewDurationResponse, ApiError> {
    let start: Date = parse_field_date("start_date", &request.start_date)?;
    let end: Date = parse_field_date("end_date", &request.end_date)?;
    let organization: Organization = persistence
        .get_organization(OrganizationId::new(request.organization_id))
        .map_err(translate_persistence_error)?;
    let duration_config: DurationConfig = DurationConfig {
        working_days: organization.working_days,
        half_day_start: request.half_day_start,
        half_day_end: request.half_day_end,
    };

    Ok(PreviewDurationResponse {
        start_date: format_date(start),
        end_date: format_date(end),
        total_days: compute_chargeable_days(start, end, &duration_config),
    })
}

/// Lists the audit trail of a leave request, oldest first.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the request does not exist.
pub fn list_request_audit_events(
    persistence: &mut Persistence,
    request_id: i64,
) -> Result<Vec<AuditEventInfo>, ApiError> {
    let request_id_typed: RequestId = RequestId::new(request_id);
    persistence
        .get_request(request_id_typed)
        .map_err(translate_persistence_error)?;
    Ok(persistence
        .list_audit_events_for_request(request_id_typed)
        .map_err(translate_persistence_error)?
        .iter()
        .map(AuditEventInfo::from)
        .collect())
}

/// Lists every audit event of an employee, including year initializations.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the employee does not exist.
pub fn list_employee_audit_events(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<Vec<AuditEventInfo>, ApiError> {
    let employee_id_typed: EmployeeId = EmployeeId::new(employee_id);
    persistence
        .get_employee(employee_id_typed)
        .map_err(translate_persistence_error)?;
    Ok(persistence
        .list_audit_events_for_employee(employee_id_typed)
        .map_err(translate_persistence_error)?
        .iter()
        .map(AuditEventInfo::from)
        .collect())
}

// ============================================================================
// Configuration
// ============================================================================

/// Creates an organization.
///
/// # Errors
///
/// Returns an error if the working-day set is invalid or the name is taken.
pub fn create_organization(
    persistence: &mut Persistence,
    request: &CreateOrganizationRequest,
) -> Result<OrganizationInfo, ApiError> {
    let name: &str = require_name(&request.name)?;
    let working_days: WorkingDays = match &request.working_days {
        Some(numbers) => WorkingDays::try_from(numbers.clone()).map_err(translate_domain_error)?,
        None => WorkingDays::MONDAY_TO_FRIDAY,
    };
    let organization: Organization = persistence
        .create_organization(name, working_days)
        .map_err(translate_persistence_error)?;
    Ok(OrganizationInfo::from(&organization))
}

/// Creates an active employee.
///
/// # Errors
///
/// Returns an error if the name is blank or the organization does not exist.
pub fn create_employee(
    persistence: &mut Persistence,
    request: &CreateEmployeeRequest,
) -> Result<EmployeeInfo, ApiError> {
    let name: &str = require_name(&request.name)?;
    let employee: Employee = persistence
        .create_employee(OrganizationId::new(request.organization_id), name)
        .map_err(translate_persistence_error)?;
    Ok(EmployeeInfo {
        employee_id: employee.employee_id.value(),
        organization_id: employee.organization_id.value(),
        name: employee.name,
        is_active: employee.is_active,
    })
}

/// Creates an active leave category.
///
/// # Errors
///
/// Returns an error if the name is blank, the organization does not exist,
/// or the name is taken within the organization.
pub fn create_category(
    persistence: &mut Persistence,
    request: &CreateCategoryRequest,
) -> Result<CategoryInfo, ApiError> {
    let name: &str = require_name(&request.name)?;
    let category: LeaveCategory = persistence
        .create_category(&NewCategory {
            organization_id: OrganizationId::new(request.organization_id),
            name: name.to_string(),
            annual_allocation: request.annual_allocation,
            allows_carry_over: request.allows_carry_over,
            carry_over_max: request.carry_over_max,
            requires_approval: request.requires_approval,
            requires_document: request.requires_document,
        })
        .map_err(translate_persistence_error)?;
    Ok(CategoryInfo::from(&category))
}

/// Creates an active leave policy.
///
/// # Errors
///
/// Returns an error if the name is blank, a blackout date is malformed,
/// the organization does not exist, or the name is taken.
pub fn create_policy(
    persistence: &mut Persistence,
    request: &CreatePolicyRequest,
) -> Result<PolicyInfo, ApiError> {
    let name: &str = require_name(&request.name)?;
    let blackout_dates: Vec<Date> = request
        .blackout_dates
        .iter()
        .map(|value| parse_field_date("blackout_dates", value))
        .collect::<Result<_, _>>()?;
    let policy: LeavePolicy = persistence
        .create_policy(&NewPolicy {
            organization_id: OrganizationId::new(request.organization_id),
            name: name.to_string(),
            max_consecutive_days: request.max_consecutive_days,
            blackout_dates,
            requires_document: request.requires_document,
            auto_approval_threshold: request.auto_approval_threshold,
        })
        .map_err(translate_persistence_error)?;
    Ok(PolicyInfo::from(&policy))
}

/// Activates or deactivates an employee.
///
/// Inactive employees cannot submit and are skipped by the annual rollover.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the employee does not exist.
pub fn set_employee_active(
    persistence: &mut Persistence,
    employee_id: i64,
    is_active: bool,
) -> Result<(), ApiError> {
    persistence
        .set_employee_active(EmployeeId::new(employee_id), is_active)
        .map_err(translate_persistence_error)
}

/// Activates or deactivates a leave category.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the category does not exist.
pub fn set_category_active(
    persistence: &mut Persistence,
    category_id: i64,
    is_active: bool,
) -> Result<(), ApiError> {
    persistence
        .set_category_active(CategoryId::new(category_id), is_active)
        .map_err(translate_persistence_error)
}

// ============================================================================
// Helpers
// ============================================================================

/// Formats a timestamp as RFC 3339.
pub(crate) fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| timestamp.to_string())
}

fn parse_field_date(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|err: DomainError| ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    })
}

fn parse_decision(value: &str) -> Result<DecisionKind, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "approve" => Ok(DecisionKind::Approve),
        "reject" => Ok(DecisionKind::Reject),
        other => Err(ApiError::InvalidInput {
            field: String::from("decision"),
            message: format!("Unknown decision '{other}': expected 'approve' or 'reject'"),
        }),
    }
}

fn require_name(name: &str) -> Result<&str, ApiError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Name must not be blank"),
        });
    }
    Ok(trimmed)
}

fn category_name(categories: &[LeaveCategory], category_id: CategoryId) -> String {
    categories
        .iter()
        .find(|category| category.category_id == category_id)
        .map_or_else(
            || format!("category {}", category_id.value()),
            |category| category.name.clone(),
        )
}

fn transition_response(
    committed: &PersistTransitionResult,
    message: String,
) -> Result<LeaveTransitionResponse, ApiError> {
    let request_id: RequestId =
        committed
            .request
            .request_id()
            .ok_or_else(|| ApiError::Internal {
                message: String::from("Committed leave request has no identifier"),
            })?;
    Ok(LeaveTransitionResponse {
        request: LeaveRequestInfo::from_request(request_id.value(), &committed.request),
        balance: BalanceInfo::from(&committed.balance),
        days_moved: committed.days_moved,
        event_id: committed.event_id,
        message,
    })
}

/// Sends the notice of a committed decision.
///
/// Runs after commit. Nothing here can fail the decision.
fn notify_decision(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    request_id: i64,
    request: &LeaveRequest,
) {
    let employee_name: String = match persistence.get_employee(request.employee_id) {
        Ok(employee) => employee.name,
        Err(err) => {
            warn!(request_id, error = %err, "Decision notice not sent: employee lookup failed");
            return;
        }
    };
    let category_name: String = match persistence.get_category(request.category_id) {
        Ok(category) => category.name,
        Err(err) => {
            warn!(request_id, error = %err, "Decision notice not sent: category lookup failed");
            return;
        }
    };
    let Some(decision) = &request.decision else {
        warn!(request_id, "Decision notice not sent: request carries no decision");
        return;
    };

    let notice: DecisionNotice = DecisionNotice {
        request_id,
        employee_id: request.employee_id.value(),
        employee_name,
        category_name,
        start_date: format_date(request.period.start),
        end_date: format_date(request.period.end),
        total_days: request.total_days,
        outcome: request.status.as_str().to_string(),
        decided_by: decision.actor_id.clone(),
        rejection_reason: decision.rejection_reason.clone(),
    };
    dispatch_decision_notice(sink, &notice);
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&BalanceRecord> for BalanceInfo {
    fn from(record: &BalanceRecord) -> Self {
        let key: BalanceKey = record.key();
        Self {
            employee_id: key.employee_id.value(),
            category_id: key.category_id.value(),
            year: key.year,
            allocated: record.allocated(),
            carry_over: record.carry_over(),
            used: record.used(),
            pending: record.pending(),
            remaining: record.remaining(),
        }
    }
}

impl From<&StoredAuditEvent> for AuditEventInfo {
    fn from(stored: &StoredAuditEvent) -> Self {
        let event = &stored.event;
        Self {
            event_id: stored.event_id,
            recorded_at: stored.recorded_at.clone(),
            employee_id: event.employee_id.value(),
            request_id: event.request_id.map(|id| id.value()),
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            status_before: status_name(&event.before),
            status_after: status_name(&event.after),
            remaining_before: event.before.balance.map(|b| b.remaining),
            remaining_after: event.after.balance.map(|b| b.remaining),
        }
    }
}

fn status_name(snapshot: &StateSnapshot) -> Option<String> {
    snapshot.status.map(|status: LeaveStatus| status.as_str().to_string())
}

impl From<&Organization> for OrganizationInfo {
    fn from(organization: &Organization) -> Self {
        Self {
            organization_id: organization.organization_id.value(),
            name: organization.name.clone(),
            working_days: organization.working_days.iso_numbers(),
        }
    }
}

impl From<&LeaveCategory> for CategoryInfo {
    fn from(category: &LeaveCategory) -> Self {
        Self {
            category_id: category.category_id.value(),
            organization_id: category.organization_id.value(),
            name: category.name.clone(),
            annual_allocation: category.annual_allocation,
            allows_carry_over: category.allows_carry_over,
            carry_over_max: category.carry_over_max,
            requires_approval: category.requires_approval,
            requires_document: category.requires_document,
            is_active: category.is_active,
        }
    }
}

impl From<&LeavePolicy> for PolicyInfo {
    fn from(policy: &LeavePolicy) -> Self {
        Self {
            policy_id: policy.policy_id.value(),
            organization_id: policy.organization_id.value(),
            name: policy.name.clone(),
            max_consecutive_days: policy.max_consecutive_days,
            blackout_dates: policy.blackout_dates.iter().copied().map(format_date).collect(),
            requires_document: policy.requires_document,
            auto_approval_threshold: policy.auto_approval_threshold,
            is_active: policy.is_active,
        }
    }
}
