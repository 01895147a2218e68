// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Source vault client (`/v1/vaults/{vault}/items`)

use crate::clients::{build_http_client, SourceVault};
use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::types::{ItemSummary, VaultItem};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    base_url: String,
    vault_id: String,
    token: String,
}

impl VaultClient {
    pub fn new(
        base_url: impl Into<String>,
        vault_id: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            http: build_http_client(timeout)?,
            base_url: base_url.into(),
            vault_id: vault_id.into(),
            token: token.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.vault_host.clone(),
            config.vault_id.clone(),
            config.vault_token.clone(),
            config.request_timeout,
        )
    }

    fn url(&self, item_path: &str) -> String {
        format!("{}/v1/vaults/{}{}", self.base_url, self.vault_id, item_path)
    }

    async fn get_json<T: DeserializeOwned>(&self, item_path: &str) -> Result<T> {
        let url = self.url(item_path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| SyncError::Connectivity {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await.map_err(|source| SyncError::Connectivity {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(SyncError::from_status(&url, status, body));
        }

        serde_json::from_str(&body).map_err(|source| SyncError::Decode { url, source })
    }
}

#[async_trait]
impl SourceVault for VaultClient {
    fn vault_id(&self) -> &str {
        &self.vault_id
    }

    #[instrument(skip(self), fields(vault = %self.vault_id))]
    async fn list_items(&self) -> Result<Vec<ItemSummary>> {
        let items: Vec<ItemSummary> = self.get_json("/items").await?;
        info!("Found {} items in vault '{}'", items.len(), self.vault_id);
        Ok(items)
    }

    #[instrument(skip(self), fields(vault = %self.vault_id))]
    async fn get_item(&self, id: &str) -> Result<VaultItem> {
        self.get_json(&format!("/items/{}", id)).await
    }
}
