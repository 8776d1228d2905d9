// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine configuration and the transient-failure retry loop.

use tracing::warn;

use crate::error::ApiError;

/// Default number of extra attempts made after a transient failure.
pub const DEFAULT_MAX_TRANSIENT_RETRIES: u32 = 3;

/// Tunables of the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// How many times an operation that failed with `ApiError::Transient`
    /// is attempted again before the failure is returned to the caller.
    pub max_transient_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_transient_retries: DEFAULT_MAX_TRANSIENT_RETRIES,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with the given retry budget.
    #[must_use]
    pub const fn with_max_transient_retries(max_transient_retries: u32) -> Self {
        Self {
            max_transient_retries,
        }
    }
}

/// Runs `operation`, running it again from scratch while it fails with a
/// retryable error and the retry budget lasts.
///
/// Each attempt is a whole transaction, so a retried attempt never observes
/// partial effects of a failed one.
///
/// # Errors
///
/// Returns the first non-retryable error, or the last transient error once
/// the budget is exhausted.
pub fn with_transient_retry<T, F>(
    config: &EngineConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Result<T, ApiError>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation() {
            Err(err) if err.is_retryable() && attempt < config.max_transient_retries => {
                attempt += 1;
                warn!(
                    operation = operation_name,
                    attempt,
                    max_retries = config.max_transient_retries,
                    error = %err,
                    "Transient failure, retrying"
                );
            }
            result => return result,
        }
    }
}
