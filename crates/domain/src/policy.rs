// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Policy evaluation for leave submissions.
//!
//! Evaluation is read-only and deterministic. Policies are checked in the
//! order supplied by the caller (creation order when read from storage) and
//! evaluation stops at the first violation. Within one policy the checks run
//! in a fixed order: consecutive-day cap, blackout dates, document.

use crate::error::DomainError;
use crate::request::LeaveRequest;
use crate::types::{LeaveCategory, LeavePolicy};
use crate::validation::format_date;
use time::Date;

/// Evaluates a proposed request against a sequence of policies.
///
/// Inactive policies are skipped. All active policies must pass.
///
/// # Errors
///
/// Returns `DomainError::PolicyViolation` naming the first violated policy.
pub fn evaluate_policies<'a, I>(request: &LeaveRequest, policies: I) -> Result<(), DomainError>
where
    I: IntoIterator<Item = &'a LeavePolicy>,
{
    policies
        .into_iter()
        .filter(|policy| policy.is_active)
        .try_for_each(|policy| evaluate_policy(request, policy))
}

/// Evaluates a proposed request against a single policy.
///
/// # Errors
///
/// Returns `DomainError::PolicyViolation` if the policy is violated.
pub fn evaluate_policy(request: &LeaveRequest, policy: &LeavePolicy) -> Result<(), DomainError> {
    if let Some(max_days) = policy.max_consecutive_days
        && request.total_days > max_days
    {
        return Err(DomainError::PolicyViolation {
            policy: policy.name.clone(),
            reason: format!(
                "{} day(s) requested exceeds the maximum of {max_days} consecutive day(s)",
                request.total_days
            ),
        });
    }

    if let Some(blackout) = first_blackout_date(request, &policy.blackout_dates) {
        return Err(DomainError::PolicyViolation {
            policy: policy.name.clone(),
            reason: format!("{} is a blackout date", format_date(blackout)),
        });
    }

    if policy.requires_document && !request.has_document() {
        return Err(DomainError::PolicyViolation {
            policy: policy.name.clone(),
            reason: String::from("a supporting document is required"),
        });
    }

    Ok(())
}

/// Checks the rules a category imposes on every request charged to it.
///
/// # Errors
///
/// Returns `DomainError::CategoryInactive` for an inactive category, or
/// `DomainError::PolicyViolation` naming the category when it requires a
/// document and none was supplied.
pub fn evaluate_category_rules(
    request: &LeaveRequest,
    category: &LeaveCategory,
) -> Result<(), DomainError> {
    if !category.is_active {
        return Err(DomainError::CategoryInactive {
            category: category.name.clone(),
        });
    }

    if category.requires_document && !request.has_document() {
        return Err(DomainError::PolicyViolation {
            policy: category.name.clone(),
            reason: String::from("a supporting document is required for this leave category"),
        });
    }

    Ok(())
}

/// Finds the first calendar day of the request that is a blackout date.
///
/// Half-day flags are ignored: a half day on a blackout date still matches.
fn first_blackout_date(request: &LeaveRequest, blackout_dates: &[Date]) -> Option<Date> {
    if blackout_dates.is_empty() {
        return None;
    }
    request
        .period
        .calendar_days()
        .find(|day| blackout_dates.contains(day))
}
