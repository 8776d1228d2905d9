// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Off-path delivery of decision notices.

use leave_engine_api::{
    DecisionNotice, NotificationError, NotificationSink, dispatch_decision_notice,
};
use std::sync::Arc;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;
use tracing::debug;

/// Delivers decision notices on tokio's blocking pool.
///
/// `notify` only schedules the delivery. The decide handler returns without
/// waiting on the wrapped sink, and the persistence lock is never held while
/// the sink runs.
#[derive(Clone)]
pub struct BackgroundNotifier {
    inner: Arc<dyn NotificationSink>,
    runtime: Handle,
}

impl BackgroundNotifier {
    /// Wraps `inner`, scheduling deliveries on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if called outside a tokio runtime.
    pub fn new(inner: Arc<dyn NotificationSink>) -> Result<Self, TryCurrentError> {
        Ok(Self {
            inner,
            runtime: Handle::try_current()?,
        })
    }
}

impl NotificationSink for BackgroundNotifier {
    fn notify(&self, notice: &DecisionNotice) -> Result<(), NotificationError> {
        let inner: Arc<dyn NotificationSink> = Arc::clone(&self.inner);
        let notice: DecisionNotice = notice.clone();
        debug!(request_id = notice.request_id, "Scheduling decision notice");

        // Detached; failures and panics are logged by the dispatcher.
        let delivery: JoinHandle<()> = self
            .runtime
            .spawn_blocking(move || dispatch_decision_notice(inner.as_ref(), &notice));
        drop(delivery);
        Ok(())
    }
}
