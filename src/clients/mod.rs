// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! API clients for the source vault and the destination store.

pub mod store;
pub mod vault;

pub use store::{classify_not_found, StoreClient};
pub use vault::VaultClient;

use crate::error::{Result, SyncError};
use crate::types::{ItemSummary, VaultItem, Variable};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// Read-only access to the source vault
#[async_trait]
pub trait SourceVault: Send + Sync {
    /// Vault identifier, used in ownership descriptions
    fn vault_id(&self) -> &str;

    async fn list_items(&self) -> Result<Vec<ItemSummary>>;

    async fn get_item(&self, id: &str) -> Result<VaultItem>;
}

/// Named variable records in the destination store
#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// `Ok(None)` when the store reports the variable as absent
    async fn get_variable(&self, name: &str) -> Result<Option<Variable>>;

    /// Always creates a secret variable
    async fn create_variable(&self, name: &str, value: &str, description: &str) -> Result<()>;

    /// Fails when the variable does not exist
    async fn update_variable_value(&self, name: &str, value: &str) -> Result<()>;

    /// Succeeds when the variable is already gone
    async fn delete_variable(&self, name: &str) -> Result<()>;

    async fn list_variables(&self) -> Result<BTreeMap<String, Variable>>;
}

/// Shared HTTP client builder, one timeout for every outbound call
pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(SyncError::HttpClient)
}
