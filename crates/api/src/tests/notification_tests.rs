// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leave_engine_domain::Days;

use super::helpers::{FailingSink, PanickingSink, RecordingSink};
use crate::{DecisionNotice, LogNotificationSink, NotificationSink, dispatch_decision_notice};

fn notice(outcome: &str, rejection_reason: Option<&str>) -> DecisionNotice {
    DecisionNotice {
        request_id: 12,
        employee_id: 3,
        employee_name: String::from("Ada Lovelace"),
        category_name: String::from("Paid Leave"),
        start_date: String::from("2026-03-02"),
        end_date: String::from("2026-03-06"),
        total_days: Days::from_half_days(9),
        outcome: outcome.to_string(),
        decided_by: String::from("mgr-9"),
        rejection_reason: rejection_reason.map(str::to_string),
    }
}

#[test]
fn test_summary_of_approval() {
    assert_eq!(
        notice("APPROVED", None).summary(),
        "4.5 day(s) of Paid Leave from 2026-03-02 to 2026-03-06 approved by mgr-9"
    );
}

#[test]
fn test_summary_of_rejection_includes_reason() {
    let summary: String = notice("REJECTED", Some("Peak season")).summary();
    assert!(summary.contains("rejected by mgr-9"));
    assert!(summary.ends_with(": Peak season"));
}

#[test]
fn test_log_sink_accepts_notices() {
    assert!(LogNotificationSink.notify(&notice("APPROVED", None)).is_ok());
}

#[test]
fn test_dispatch_swallows_sink_failure() {
    dispatch_decision_notice(&FailingSink, &notice("APPROVED", None));

    let sink: RecordingSink = RecordingSink::default();
    dispatch_decision_notice(&sink, &notice("APPROVED", None));
    assert_eq!(sink.received().len(), 1);
}

#[test]
fn test_dispatch_contains_sink_panic() {
    dispatch_decision_notice(&PanickingSink, &notice("REJECTED", Some("Peak season")));

    let sink: RecordingSink = RecordingSink::default();
    dispatch_decision_notice(&sink, &notice("REJECTED", Some("Peak season")));
    assert_eq!(sink.received().len(), 1);
}
