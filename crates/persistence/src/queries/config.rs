// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reads of the organization configuration a submission is evaluated against.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_engine::SubmissionContext;
use leave_engine_domain::{
    CategoryId, Employee, EmployeeId, LeaveCategory, LeavePolicy, Organization, OrganizationId,
};

use crate::data_models::{CategoryRow, EmployeeRow, OrganizationRow, PolicyRow};
use crate::diesel_schema::{employees, leave_categories, leave_policies, organizations};
use crate::error::PersistenceError;

/// Retrieves an organization by ID.
///
/// # Errors
///
/// Returns `PersistenceError::OrganizationNotFound` if it does not exist.
pub fn get_organization(
    conn: &mut SqliteConnection,
    organization_id: OrganizationId,
) -> Result<Organization, PersistenceError> {
    let row: OrganizationRow = organizations::table
        .find(organization_id.value())
        .select(OrganizationRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::OrganizationNotFound(
            organization_id.value(),
        ))?;
    Organization::try_from(row)
}

/// Lists all organizations, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_organizations(
    conn: &mut SqliteConnection,
) -> Result<Vec<Organization>, PersistenceError> {
    organizations::table
        .order(organizations::organization_id.asc())
        .select(OrganizationRow::as_select())
        .load(conn)?
        .into_iter()
        .map(Organization::try_from)
        .collect()
}

/// Retrieves an employee by ID.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if it does not exist.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Employee, PersistenceError> {
    let row: EmployeeRow = employees::table
        .find(employee_id.value())
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::EmployeeNotFound(employee_id.value()))?;
    Ok(Employee::from(row))
}

/// Lists the active employees of an organization, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_active_employees(
    conn: &mut SqliteConnection,
    organization_id: OrganizationId,
) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .filter(employees::organization_id.eq(organization_id.value()))
        .filter(employees::is_active.eq(1))
        .order(employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(Employee::from).collect())
}

/// Retrieves a leave category by ID.
///
/// # Errors
///
/// Returns `PersistenceError::CategoryNotFound` if it does not exist.
pub fn get_category(
    conn: &mut SqliteConnection,
    category_id: CategoryId,
) -> Result<LeaveCategory, PersistenceError> {
    let row: CategoryRow = leave_categories::table
        .find(category_id.value())
        .select(CategoryRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::CategoryNotFound(category_id.value()))?;
    LeaveCategory::try_from(row)
}

/// Lists the active leave categories of an organization, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_active_categories(
    conn: &mut SqliteConnection,
    organization_id: OrganizationId,
) -> Result<Vec<LeaveCategory>, PersistenceError> {
    leave_categories::table
        .filter(leave_categories::organization_id.eq(organization_id.value()))
        .filter(leave_categories::is_active.eq(1))
        .order(leave_categories::category_id.asc())
        .select(CategoryRow::as_select())
        .load(conn)?
        .into_iter()
        .map(LeaveCategory::try_from)
        .collect()
}

/// Lists every policy of an organization in creation order.
///
/// Inactive policies are included; the evaluator skips them.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_policies(
    conn: &mut SqliteConnection,
    organization_id: OrganizationId,
) -> Result<Vec<LeavePolicy>, PersistenceError> {
    leave_policies::table
        .filter(leave_policies::organization_id.eq(organization_id.value()))
        .order(leave_policies::policy_id.asc())
        .select(PolicyRow::as_select())
        .load(conn)?
        .into_iter()
        .map(LeavePolicy::try_from)
        .collect()
}

/// Loads everything a submission by `employee_id` against `category_id`
/// is evaluated against.
///
/// # Errors
///
/// Returns a not-found error if the employee, category or organization is
/// missing.
pub fn load_submission_context(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
    category_id: CategoryId,
) -> Result<SubmissionContext, PersistenceError> {
    let employee: Employee = get_employee(conn, employee_id)?;
    let category: LeaveCategory = get_category(conn, category_id)?;
    let organization: Organization = get_organization(conn, employee.organization_id)?;
    let policies: Vec<LeavePolicy> = list_policies(conn, organization.organization_id)?;

    Ok(SubmissionContext {
        employee,
        category,
        working_days: organization.working_days,
        policies,
    })
}
