// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seeding of organization configuration.
//!
//! The engine only reads this data; these writers exist so that operators
//! and tests can provision it.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_engine_domain::{
    CategoryId, Days, Employee, EmployeeId, LeaveCategory, LeavePolicy, Organization,
    OrganizationId, PolicyId, WorkingDays,
};
use time::Date;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{
    NewCategoryRow, NewEmployeeRow, NewOrganizationRow, NewPolicyRow, blackout_dates_to_db,
    bool_to_db, days_to_db,
};
use crate::diesel_schema::{employees, leave_categories, leave_policies, organizations};
use crate::error::PersistenceError;
use crate::queries::config::get_organization;

/// A leave category to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub organization_id: OrganizationId,
    pub name: String,
    pub annual_allocation: Days,
    pub allows_carry_over: bool,
    pub carry_over_max: Days,
    pub requires_approval: bool,
    pub requires_document: bool,
}

/// A leave policy to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPolicy {
    pub organization_id: OrganizationId,
    pub name: String,
    pub max_consecutive_days: Option<Days>,
    pub blackout_dates: Vec<Date>,
    pub requires_document: bool,
    pub auto_approval_threshold: Option<Days>,
}

/// Creates an organization.
///
/// # Errors
///
/// Returns an error if the name is taken or the insert fails.
pub fn create_organization(
    conn: &mut SqliteConnection,
    name: &str,
    working_days: WorkingDays,
) -> Result<Organization, PersistenceError> {
    diesel::insert_into(organizations::table)
        .values(NewOrganizationRow {
            name,
            working_days_mask: i32::from(working_days.mask()),
        })
        .execute(conn)?;
    let organization_id: i64 = conn.get_last_insert_rowid()?;

    info!(organization_id, name, "Created organization");

    Ok(Organization {
        organization_id: OrganizationId::new(organization_id),
        name: name.to_string(),
        working_days,
    })
}

/// Creates an active employee.
///
/// # Errors
///
/// Returns `PersistenceError::OrganizationNotFound` if the organization does
/// not exist.
pub fn create_employee(
    conn: &mut SqliteConnection,
    organization_id: OrganizationId,
    name: &str,
) -> Result<Employee, PersistenceError> {
    get_organization(conn, organization_id)?;

    diesel::insert_into(employees::table)
        .values(NewEmployeeRow {
            organization_id: organization_id.value(),
            name,
            is_active: bool_to_db(true),
        })
        .execute(conn)?;
    let employee_id: i64 = conn.get_last_insert_rowid()?;

    info!(employee_id, organization_id = organization_id.value(), "Created employee");

    Ok(Employee {
        employee_id: EmployeeId::new(employee_id),
        organization_id,
        name: name.to_string(),
        is_active: true,
    })
}

/// Creates an active leave category.
///
/// # Errors
///
/// Returns `PersistenceError::OrganizationNotFound` if the organization does
/// not exist, or an error if the name is taken within it.
pub fn create_category(
    conn: &mut SqliteConnection,
    category: &NewCategory,
) -> Result<LeaveCategory, PersistenceError> {
    get_organization(conn, category.organization_id)?;

    diesel::insert_into(leave_categories::table)
        .values(NewCategoryRow {
            organization_id: category.organization_id.value(),
            name: &category.name,
            annual_allocation_half_days: days_to_db(category.annual_allocation),
            allows_carry_over: bool_to_db(category.allows_carry_over),
            carry_over_max_half_days: days_to_db(category.carry_over_max),
            requires_approval: bool_to_db(category.requires_approval),
            requires_document: bool_to_db(category.requires_document),
            is_active: bool_to_db(true),
        })
        .execute(conn)?;
    let category_id: i64 = conn.get_last_insert_rowid()?;

    info!(category_id, name = %category.name, "Created leave category");

    Ok(LeaveCategory {
        category_id: CategoryId::new(category_id),
        organization_id: category.organization_id,
        name: category.name.clone(),
        annual_allocation: category.annual_allocation,
        allows_carry_over: category.allows_carry_over,
        carry_over_max: category.carry_over_max,
        requires_approval: category.requires_approval,
        requires_document: category.requires_document,
        is_active: true,
    })
}

/// Creates an active leave policy.
///
/// # Errors
///
/// Returns `PersistenceError::OrganizationNotFound` if the organization does
/// not exist, or an error if the name is taken within it.
pub fn create_policy(
    conn: &mut SqliteConnection,
    policy: &NewPolicy,
) -> Result<LeavePolicy, PersistenceError> {
    get_organization(conn, policy.organization_id)?;

    diesel::insert_into(leave_policies::table)
        .values(NewPolicyRow {
            organization_id: policy.organization_id.value(),
            name: &policy.name,
            max_consecutive_half_days: policy.max_consecutive_days.map(days_to_db),
            blackout_dates_json: blackout_dates_to_db(&policy.blackout_dates)?,
            requires_document: bool_to_db(policy.requires_document),
            auto_approval_threshold_half_days: policy.auto_approval_threshold.map(days_to_db),
            is_active: bool_to_db(true),
        })
        .execute(conn)?;
    let policy_id: i64 = conn.get_last_insert_rowid()?;

    info!(policy_id, name = %policy.name, "Created leave policy");

    Ok(LeavePolicy {
        policy_id: PolicyId::new(policy_id),
        organization_id: policy.organization_id,
        name: policy.name.clone(),
        max_consecutive_days: policy.max_consecutive_days,
        blackout_dates: policy.blackout_dates.clone(),
        requires_document: policy.requires_document,
        auto_approval_threshold: policy.auto_approval_threshold,
        is_active: true,
    })
}

/// Activates or deactivates an employee.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if the employee does not exist.
pub fn set_employee_active(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    is_active: bool,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(employees::table.find(employee_id.value()))
        .set(employees::is_active.eq(bool_to_db(is_active)))
        .execute(conn)?;
    if rows == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id.value()));
    }
    info!(employee_id = employee_id.value(), is_active, "Updated employee status");
    Ok(())
}

/// Activates or deactivates a leave category.
///
/// # Errors
///
/// Returns `PersistenceError::CategoryNotFound` if the category does not exist.
pub fn set_category_active(
    conn: &mut SqliteConnection,
    category_id: CategoryId,
    is_active: bool,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(leave_categories::table.find(category_id.value()))
        .set(leave_categories::is_active.eq(bool_to_db(is_active)))
        .execute(conn)?;
    if rows == 0 {
        return Err(PersistenceError::CategoryNotFound(category_id.value()));
    }
    info!(category_id = category_id.value(), is_active, "Updated category status");
    Ok(())
}
