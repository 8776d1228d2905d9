// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Decision notifications.
//!
//! A notice is dispatched only after the decision has been committed. The
//! decision stands whether or not the notice is delivered.

use leave_engine_domain::{Days, LeaveStatus};
use serde::Serialize;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failure reported by a notification sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Notification delivery failed: {reason}")]
pub struct NotificationError {
    pub reason: String,
}

impl NotificationError {
    /// Creates a new notification error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// What an employee is told about a decided request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionNotice {
    pub request_id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub category_name: String,
    pub start_date: String,
    pub end_date: String,
    pub total_days: Days,
    /// `APPROVED` or `REJECTED`.
    pub outcome: String,
    pub decided_by: String,
    pub rejection_reason: Option<String>,
}

impl DecisionNotice {
    /// A one-line summary suitable for a mail subject or a log line.
    #[must_use]
    pub fn summary(&self) -> String {
        let verb: &str = if self.outcome == LeaveStatus::Approved.as_str() {
            "approved"
        } else {
            "rejected"
        };
        let mut summary: String = format!(
            "{} day(s) of {} from {} to {} {verb} by {}",
            self.total_days, self.category_name, self.start_date, self.end_date, self.decided_by
        );
        if let Some(reason) = &self.rejection_reason {
            summary.push_str(": ");
            summary.push_str(reason);
        }
        summary
    }
}

/// Destination of decision notices.
///
/// Implementations must not block for long: dispatch happens on the path
/// that answered the decision.
pub trait NotificationSink: Send + Sync {
    /// Delivers a notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the notice could not be handed off.
    fn notify(&self, notice: &DecisionNotice) -> Result<(), NotificationError>;
}

/// A sink that writes notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn notify(&self, notice: &DecisionNotice) -> Result<(), NotificationError> {
        info!(
            request_id = notice.request_id,
            employee_id = notice.employee_id,
            outcome = %notice.outcome,
            "{}",
            notice.summary()
        );
        Ok(())
    }
}

/// Hands a notice to the sink, logging instead of propagating any failure.
///
/// A panicking sink is caught here too; the decision has already been
/// committed and must be reported as such.
pub fn dispatch_decision_notice(sink: &dyn NotificationSink, notice: &DecisionNotice) {
    match catch_unwind(AssertUnwindSafe(|| sink.notify(notice))) {
        Ok(Ok(())) => debug!(request_id = notice.request_id, "Decision notice dispatched"),
        Ok(Err(err)) => warn!(
            request_id = notice.request_id,
            employee_id = notice.employee_id,
            error = %err,
            "Failed to dispatch decision notice"
        ),
        Err(payload) => warn!(
            request_id = notice.request_id,
            employee_id = notice.employee_id,
            panic = panic_message(payload.as_ref()),
            "Notification sink panicked while dispatching decision notice"
        ),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
