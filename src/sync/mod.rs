// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconciliation of vault items into store variables.

pub mod names;
pub mod reconciler;
pub mod runner;

pub use names::{format_name, redact_name};
pub use reconciler::{ownership_description, ExpectedSecrets, Reconciler, SyncReport};
pub use runner::SyncRunner;
