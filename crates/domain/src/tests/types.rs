// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BalanceKey, CategoryId, EmployeeId, LeaveStatus, RequestId, WorkingDays};
use time::Weekday;

#[test]
fn test_identifiers_serialize_transparently() {
    let id: RequestId = RequestId::new(42);
    assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    assert_eq!(serde_json::from_str::<RequestId>("42").unwrap(), id);
    assert_eq!(id.to_string(), "42");
}

#[test]
fn test_balance_key_previous_year() {
    let key: BalanceKey = BalanceKey::new(EmployeeId::new(1), CategoryId::new(2), 2026);
    let previous: BalanceKey = key.previous_year();

    assert_eq!(previous.year, 2025);
    assert_eq!(previous.employee_id, key.employee_id);
    assert_eq!(previous.category_id, key.category_id);
    assert_eq!(key.to_string(), "employee 1 / category 2 / 2026");
}

#[test]
fn test_working_days_serde_as_iso_numbers() {
    let working_days: WorkingDays =
        WorkingDays::from_weekdays([Weekday::Monday, Weekday::Wednesday, Weekday::Sunday]);
    let json: String = serde_json::to_string(&working_days).unwrap();
    assert_eq!(json, "[1,3,7]");

    let parsed: WorkingDays = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, working_days);
    assert!(parsed.contains(Weekday::Sunday));
    assert!(!parsed.contains(Weekday::Tuesday));

    assert!(serde_json::from_str::<WorkingDays>("[]").is_err());
    assert!(serde_json::from_str::<WorkingDays>("[9]").is_err());
}

#[test]
fn test_leave_status_serde() {
    assert_eq!(
        serde_json::to_string(&LeaveStatus::Cancelled).unwrap(),
        "\"CANCELLED\""
    );
    assert_eq!(
        serde_json::from_str::<LeaveStatus>("\"APPROVED\"").unwrap(),
        LeaveStatus::Approved
    );
}
