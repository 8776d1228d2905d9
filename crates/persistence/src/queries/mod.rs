// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event queries
//! - `config`: Organizations, employees, categories and policies (the policy source)
//! - `ledger`: Balance record lookups
//! - `requests`: Leave request lookups

pub mod audit;
pub mod config;
pub mod ledger;
pub mod requests;

pub use audit::{StoredAuditEvent, list_audit_events_for_employee, list_audit_events_for_request};
pub use config::{
    get_category, get_employee, get_organization, list_active_categories,
    list_active_employees, list_organizations, list_policies, load_submission_context,
};
pub use ledger::{get_balance, list_balances};
pub use requests::{get_request, list_requests_for_employee};
