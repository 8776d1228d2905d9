// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to and from domain values.
//!
//! Day quantities are stored as half-day counts, booleans as `0`/`1`
//! integers, calendar dates as `YYYY-MM-DD` text and instants as RFC 3339
//! text.

use diesel::prelude::*;
use leave_engine_audit::{Action, Actor, BalanceSnapshot, Cause, StateSnapshot};
use leave_engine_domain::{
    BalanceKey, BalanceRecord, CategoryId, Days, Decision, Employee, EmployeeId, LeaveCategory,
    LeavePeriod, LeavePolicy, LeaveRequest, LeaveStatus, Organization, OrganizationId, PolicyId,
    RequestId, WorkingDays, format_date, parse_date,
};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::diesel_schema::{
    audit_events, balance_records, employees, leave_categories, leave_policies, leave_requests,
    organizations,
};
use crate::error::PersistenceError;

// ============================================================================
// Column conversions
// ============================================================================

pub fn days_to_db(days: Days) -> i64 {
    i64::from(days.half_days())
}

pub fn days_from_db(half_days: i64, column: &str) -> Result<Days, PersistenceError> {
    half_days
        .to_u32()
        .map(Days::from_half_days)
        .ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "{column} holds {half_days}, not a non-negative half-day count"
            ))
        })
}

pub fn bool_to_db(value: bool) -> i32 {
    i32::from(value)
}

pub const fn bool_from_db(value: i32) -> bool {
    value != 0
}

pub fn timestamp_to_db(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub fn timestamp_from_db(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::ReconstructionError(format!("timestamp '{value}': {e}")))
}

fn date_from_db(value: &str) -> Result<Date, PersistenceError> {
    parse_date(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

// ============================================================================
// Audit payloads
// ============================================================================

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `BalanceSnapshot`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BalanceSnapshotData {
    pub allocated: Days,
    pub carry_over: Days,
    pub used: Days,
    pub pending: Days,
    pub remaining: Days,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub status: Option<LeaveStatus>,
    pub balance: Option<BalanceSnapshotData>,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

impl From<ActorData> for Actor {
    fn from(data: ActorData) -> Self {
        Self::new(data.id, data.actor_type)
    }
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.name, data.details)
    }
}

impl From<&StateSnapshot> for StateSnapshotData {
    fn from(snapshot: &StateSnapshot) -> Self {
        Self {
            status: snapshot.status,
            balance: snapshot.balance.map(|b| BalanceSnapshotData {
                allocated: b.allocated,
                carry_over: b.carry_over,
                used: b.used,
                pending: b.pending,
                remaining: b.remaining,
            }),
        }
    }
}

impl From<StateSnapshotData> for StateSnapshot {
    fn from(data: StateSnapshotData) -> Self {
        Self {
            status: data.status,
            balance: data.balance.map(|b| BalanceSnapshot {
                allocated: b.allocated,
                carry_over: b.carry_over,
                used: b.used,
                pending: b.pending,
                remaining: b.remaining,
            }),
        }
    }
}

// ============================================================================
// Configuration rows
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrganizationRow {
    pub organization_id: i64,
    pub name: String,
    pub working_days_mask: i32,
}

impl TryFrom<OrganizationRow> for Organization {
    type Error = PersistenceError;

    fn try_from(row: OrganizationRow) -> Result<Self, Self::Error> {
        let mask: u8 = row.working_days_mask.to_u8().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "working_days_mask {} out of range",
                row.working_days_mask
            ))
        })?;
        let working_days: WorkingDays = WorkingDays::from_mask(mask)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        Ok(Self {
            organization_id: OrganizationId::new(row.organization_id),
            name: row.name,
            working_days,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = organizations)]
pub struct NewOrganizationRow<'a> {
    pub name: &'a str,
    pub working_days_mask: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub organization_id: i64,
    pub name: String,
    pub is_active: i32,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            employee_id: EmployeeId::new(row.employee_id),
            organization_id: OrganizationId::new(row.organization_id),
            name: row.name,
            is_active: bool_from_db(row.is_active),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployeeRow<'a> {
    pub organization_id: i64,
    pub name: &'a str,
    pub is_active: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = leave_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryRow {
    pub category_id: i64,
    pub organization_id: i64,
    pub name: String,
    pub annual_allocation_half_days: i64,
    pub allows_carry_over: i32,
    pub carry_over_max_half_days: i64,
    pub requires_approval: i32,
    pub requires_document: i32,
    pub is_active: i32,
}

impl TryFrom<CategoryRow> for LeaveCategory {
    type Error = PersistenceError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            category_id: CategoryId::new(row.category_id),
            organization_id: OrganizationId::new(row.organization_id),
            name: row.name,
            annual_allocation: days_from_db(
                row.annual_allocation_half_days,
                "annual_allocation_half_days",
            )?,
            allows_carry_over: bool_from_db(row.allows_carry_over),
            carry_over_max: days_from_db(row.carry_over_max_half_days, "carry_over_max_half_days")?,
            requires_approval: bool_from_db(row.requires_approval),
            requires_document: bool_from_db(row.requires_document),
            is_active: bool_from_db(row.is_active),
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = leave_categories)]
pub struct NewCategoryRow<'a> {
    pub organization_id: i64,
    pub name: &'a str,
    pub annual_allocation_half_days: i64,
    pub allows_carry_over: i32,
    pub carry_over_max_half_days: i64,
    pub requires_approval: i32,
    pub requires_document: i32,
    pub is_active: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = leave_policies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PolicyRow {
    pub policy_id: i64,
    pub organization_id: i64,
    pub name: String,
    pub max_consecutive_half_days: Option<i64>,
    pub blackout_dates_json: String,
    pub requires_document: i32,
    pub auto_approval_threshold_half_days: Option<i64>,
    pub is_active: i32,
}

impl TryFrom<PolicyRow> for LeavePolicy {
    type Error = PersistenceError;

    fn try_from(row: PolicyRow) -> Result<Self, Self::Error> {
        let blackout_strings: Vec<String> = serde_json::from_str(&row.blackout_dates_json)?;
        let blackout_dates: Vec<Date> = blackout_strings
            .iter()
            .map(|d| date_from_db(d))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            policy_id: PolicyId::new(row.policy_id),
            organization_id: OrganizationId::new(row.organization_id),
            name: row.name,
            max_consecutive_days: row
                .max_consecutive_half_days
                .map(|v| days_from_db(v, "max_consecutive_half_days"))
                .transpose()?,
            blackout_dates,
            requires_document: bool_from_db(row.requires_document),
            auto_approval_threshold: row
                .auto_approval_threshold_half_days
                .map(|v| days_from_db(v, "auto_approval_threshold_half_days"))
                .transpose()?,
            is_active: bool_from_db(row.is_active),
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = leave_policies)]
pub struct NewPolicyRow<'a> {
    pub organization_id: i64,
    pub name: &'a str,
    pub max_consecutive_half_days: Option<i64>,
    pub blackout_dates_json: String,
    pub requires_document: i32,
    pub auto_approval_threshold_half_days: Option<i64>,
    pub is_active: i32,
}

/// Serializes blackout dates as a JSON array of `YYYY-MM-DD` strings.
pub fn blackout_dates_to_db(dates: &[Date]) -> Result<String, PersistenceError> {
    let strings: Vec<String> = dates.iter().copied().map(format_date).collect();
    Ok(serde_json::to_string(&strings)?)
}

// ============================================================================
// Ledger rows
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = balance_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceRow {
    pub balance_id: i64,
    pub employee_id: i64,
    pub category_id: i64,
    pub year: i32,
    pub allocated_half_days: i64,
    pub carry_over_half_days: i64,
    pub used_half_days: i64,
    pub pending_half_days: i64,
    pub remaining_half_days: i64,
    pub version: i64,
}

/// A balance record together with the version it was read at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionedBalance {
    pub balance_id: i64,
    pub version: i64,
    pub record: BalanceRecord,
}

impl TryFrom<BalanceRow> for VersionedBalance {
    type Error = PersistenceError;

    fn try_from(row: BalanceRow) -> Result<Self, Self::Error> {
        let key: BalanceKey = BalanceKey::new(
            EmployeeId::new(row.employee_id),
            CategoryId::new(row.category_id),
            row.year,
        );
        let record: BalanceRecord = BalanceRecord::from_parts(
            key,
            days_from_db(row.allocated_half_days, "allocated_half_days")?,
            days_from_db(row.carry_over_half_days, "carry_over_half_days")?,
            days_from_db(row.used_half_days, "used_half_days")?,
            days_from_db(row.pending_half_days, "pending_half_days")?,
        )
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        if days_to_db(record.remaining()) != row.remaining_half_days {
            return Err(PersistenceError::ReconstructionError(format!(
                "{key}: stored remaining {} does not match derived {}",
                row.remaining_half_days,
                days_to_db(record.remaining())
            )));
        }

        Ok(Self {
            balance_id: row.balance_id,
            version: row.version,
            record,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = balance_records)]
pub struct NewBalanceRow {
    pub employee_id: i64,
    pub category_id: i64,
    pub year: i32,
    pub allocated_half_days: i64,
    pub carry_over_half_days: i64,
    pub used_half_days: i64,
    pub pending_half_days: i64,
    pub remaining_half_days: i64,
    pub version: i64,
}

impl From<&BalanceRecord> for NewBalanceRow {
    fn from(record: &BalanceRecord) -> Self {
        let key: BalanceKey = record.key();
        Self {
            employee_id: key.employee_id.value(),
            category_id: key.category_id.value(),
            year: key.year,
            allocated_half_days: days_to_db(record.allocated()),
            carry_over_half_days: days_to_db(record.carry_over()),
            used_half_days: days_to_db(record.used()),
            pending_half_days: days_to_db(record.pending()),
            remaining_half_days: days_to_db(record.remaining()),
            version: 0,
        }
    }
}

// ============================================================================
// Request rows
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = leave_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RequestRow {
    pub request_id: i64,
    pub employee_id: i64,
    pub category_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub half_day_start: i32,
    pub half_day_end: i32,
    pub total_half_days: i64,
    pub status: String,
    pub comment: Option<String>,
    pub document_ref: Option<String>,
    pub submitted_at: String,
    pub decided_by: Option<String>,
    pub decided_at: Option<String>,
    pub rejection_reason: Option<String>,
}

impl TryFrom<RequestRow> for LeaveRequest {
    type Error = PersistenceError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        let status: LeaveStatus = row
            .status
            .parse()
            .map_err(|e: leave_engine_domain::DomainError| {
                PersistenceError::ReconstructionError(e.to_string())
            })?;

        let decision: Option<Decision> = match (row.decided_by, row.decided_at) {
            (Some(actor_id), Some(decided_at)) => Some(Decision {
                actor_id,
                decided_at: timestamp_from_db(&decided_at)?,
                rejection_reason: row.rejection_reason,
            }),
            _ => None,
        };

        let mut request: Self = Self::new_pending(
            EmployeeId::new(row.employee_id),
            CategoryId::new(row.category_id),
            LeavePeriod::new(
                date_from_db(&row.start_date)?,
                date_from_db(&row.end_date)?,
                bool_from_db(row.half_day_start),
                bool_from_db(row.half_day_end),
            ),
            days_from_db(row.total_half_days, "total_half_days")?,
            row.comment,
            row.document_ref,
            timestamp_from_db(&row.submitted_at)?,
        )
        .with_id(RequestId::new(row.request_id));
        request.status = status;
        request.decision = decision;
        Ok(request)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = leave_requests)]
pub struct NewRequestRow<'a> {
    pub employee_id: i64,
    pub category_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub half_day_start: i32,
    pub half_day_end: i32,
    pub total_half_days: i64,
    pub status: &'a str,
    pub comment: Option<&'a str>,
    pub document_ref: Option<&'a str>,
    pub submitted_at: String,
}

// ============================================================================
// Audit rows
// ============================================================================

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditEventRow {
    pub event_id: i64,
    pub employee_id: i64,
    pub request_id: Option<i64>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}
