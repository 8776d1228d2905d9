// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Approval state machine of the leave engine.
//!
//! Transitions are pure: they take the current request (or the submission
//! context) and a command, and return the new request, the ledger effect that
//! must accompany it, and the audit event recording it. Committing the three
//! together is the persistence layer's job.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, apply_submission, balance_key, year_initialization_event};
pub use command::{Command, DecisionKind};
pub use error::CoreError;
pub use state::{LedgerEffect, LedgerOperation, SubmissionContext, TransitionResult};
