// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Wire types for the source vault and the destination store.

pub mod variable;
pub mod vault;

pub use variable::{StoreErrorBody, StoreRequest, Variable};
pub use vault::{Field, ItemSummary, VaultItem};
