// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leave_engine_domain::Days;

use super::helpers::TestEnv;
use crate::{
    ApiError, CreateEmployeeRequest, CreateOrganizationRequest, CreatePolicyRequest,
    OrganizationInfo, PolicyInfo, PreviewDurationRequest, PreviewDurationResponse,
    SubmitLeaveRequest, create_employee, create_organization, create_policy, preview_duration,
    set_category_active,
};

fn preview(
    env: &mut TestEnv,
    organization_id: i64,
    start: &str,
    end: &str,
    half_day_start: bool,
    half_day_end: bool,
) -> Result<PreviewDurationResponse, ApiError> {
    preview_duration(
        &mut env.persistence,
        &PreviewDurationRequest {
            organization_id,
            start_date: start.to_string(),
            end_date: end.to_string(),
            half_day_start,
            half_day_end,
        },
    )
}

#[test]
fn test_organization_defaults_to_monday_to_friday() {
    let env: TestEnv = TestEnv::new();
    assert_eq!(env.organization.working_days, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_preview_uses_organization_working_days() {
    let mut env: TestEnv = TestEnv::new();
    let four_day_week: OrganizationInfo = create_organization(
        &mut env.persistence,
        &CreateOrganizationRequest {
            name: String::from("Four Day Co"),
            working_days: Some(vec![1, 2, 3, 4]),
        },
    )
    .unwrap();

    let standard_id: i64 = env.organization.organization_id;

    let standard: PreviewDurationResponse = preview(
        &mut env,
        standard_id,
        "2026-03-02",
        "2026-03-08",
        false,
        false,
    )
    .unwrap();
    let shortened: PreviewDurationResponse = preview(
        &mut env,
        four_day_week.organization_id,
        "2026-03-02",
        "2026-03-08",
        false,
        false,
    )
    .unwrap();

    assert_eq!(standard.total_days, Days::whole(5));
    assert_eq!(shortened.total_days, Days::whole(4));
}

#[test]
fn test_preview_half_days_and_reversed_range() {
    let mut env: TestEnv = TestEnv::new();
    let organization_id: i64 = env.organization.organization_id;

    let both_halves: PreviewDurationResponse =
        preview(&mut env, organization_id, "2026-03-02", "2026-03-03", true, true).unwrap();
    assert_eq!(both_halves.total_days, Days::whole(1));

    // Saturday boundary: the half-day flag does not apply.
    let weekend_start: PreviewDurationResponse =
        preview(&mut env, organization_id, "2026-03-07", "2026-03-09", true, false).unwrap();
    assert_eq!(weekend_start.total_days, Days::whole(1));

    let reversed: PreviewDurationResponse =
        preview(&mut env, organization_id, "2026-03-06", "2026-03-02", false, false).unwrap();
    assert_eq!(reversed.total_days, Days::ZERO);
}

#[test]
fn test_preview_rejects_malformed_date() {
    let mut env: TestEnv = TestEnv::new();
    let organization_id: i64 = env.organization.organization_id;

    let result = preview(&mut env, organization_id, "03/02/2026", "2026-03-06", false, false);

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "start_date"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_invalid_working_days_are_rejected() {
    let mut env: TestEnv = TestEnv::new();

    let result = create_organization(
        &mut env.persistence,
        &CreateOrganizationRequest {
            name: String::from("Eight Day Week"),
            working_days: Some(vec![1, 8]),
        },
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "working_days"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_blank_names_are_rejected() {
    let mut env: TestEnv = TestEnv::new();

    let result = create_employee(
        &mut env.persistence,
        &CreateEmployeeRequest {
            organization_id: env.organization.organization_id,
            name: String::from("   "),
        },
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_create_policy_round_trips_blackout_dates() {
    let mut env: TestEnv = TestEnv::new();

    let policy: PolicyInfo = create_policy(
        &mut env.persistence,
        &CreatePolicyRequest {
            organization_id: env.organization.organization_id,
            name: String::from("Two week cap"),
            max_consecutive_days: Some(Days::whole(10)),
            blackout_dates: vec![String::from("2026-12-24"), String::from("2026-12-31")],
            requires_document: false,
            auto_approval_threshold: Some(Days::whole(2)),
        },
    )
    .unwrap();

    assert!(policy.is_active);
    assert_eq!(policy.blackout_dates, vec!["2026-12-24", "2026-12-31"]);
    assert_eq!(policy.auto_approval_threshold, Some(Days::whole(2)));
}

#[test]
fn test_create_policy_rejects_malformed_blackout_date() {
    let mut env: TestEnv = TestEnv::new();

    let result = create_policy(
        &mut env.persistence,
        &CreatePolicyRequest {
            organization_id: env.organization.organization_id,
            name: String::from("Bad dates"),
            max_consecutive_days: None,
            blackout_dates: vec![String::from("Christmas")],
            requires_document: false,
            auto_approval_threshold: None,
        },
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "blackout_dates"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_inactive_category_rejects_submissions() {
    let mut env: TestEnv = TestEnv::new();
    set_category_active(&mut env.persistence, env.category.category_id, false).unwrap();
    let request: SubmitLeaveRequest = env.submission("2026-03-02", "2026-03-03");

    let result = env.submit_request(&request);

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "category_id"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}
