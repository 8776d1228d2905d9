// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! None of these functions opens a transaction; the `Persistence` adapter and
//! `transition` wrap them in `BEGIN IMMEDIATE` scopes.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event persistence
//! - `ledger`: The only writer of `balance_records`
//! - `provisioning`: Organizations, employees, categories and policies
//! - `requests`: Leave request inserts and guarded status updates
//! - `transition`: High-level orchestration (`persist_transition`, `persist_year_initialization`)

pub mod audit;
pub mod ledger;
pub mod provisioning;
pub mod requests;
pub mod transition;

pub use ledger::{LedgerOutcome, apply_ledger_effect, provision_balance};
pub use provisioning::{
    NewCategory, NewPolicy, create_category, create_employee, create_organization, create_policy,
    set_category_active, set_employee_active,
};
pub use transition::{PersistTransitionResult, persist_transition, persist_year_initialization};
