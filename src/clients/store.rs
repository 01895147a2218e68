// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Destination store client speaking `{type, params}` envelopes over `/read` and `/write`.

use crate::clients::{build_http_client, DestinationStore};
use crate::config::Config;
use crate::constants::store::{API_KEY_HEADER, API_SECRET_HEADER};
use crate::error::{Result, SyncError};
use crate::sync::names::redact_name;
use crate::types::{StoreErrorBody, StoreRequest, Variable};
use async_trait::async_trait;
use http::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Whether a store response means "no such variable".
///
/// The store reports absence either with a 404 or with an error envelope whose
/// message mentions the variable not being found, under any status.
pub fn classify_not_found(status: StatusCode, body: &str) -> bool {
    if status == StatusCode::NOT_FOUND {
        return true;
    }

    let message = serde_json::from_str::<StoreErrorBody>(body)
        .map(|envelope| envelope.error)
        .unwrap_or_else(|_| body.to_string())
        .to_lowercase();

    message.contains("no variable found") || message.contains("not found")
}

struct RawResponse {
    url: String,
    status: StatusCode,
    body: String,
}

impl RawResponse {
    fn into_error(self) -> SyncError {
        SyncError::from_status(&self.url, self.status, self.body)
    }

    fn is_not_found(&self) -> bool {
        classify_not_found(self.status, &self.body)
    }
}

#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl StoreClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            http: build_http_client(timeout)?,
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.store_host.clone(),
            config.store_api_key.clone(),
            config.store_api_secret.clone(),
            config.request_timeout,
        )
    }

    /// Post one envelope. Only transport failures are errors here.
    async fn send(&self, request: &StoreRequest) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, request.path());
        debug!("POST {} ({})", url, request.operation());

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_SECRET_HEADER, &self.api_secret)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|source| SyncError::Connectivity {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| SyncError::Connectivity {
            url: url.clone(),
            source,
        })?;
        debug!("{} responded with status {}", request.operation(), status);

        Ok(RawResponse { url, status, body })
    }

    async fn write(&self, request: &StoreRequest) -> Result<()> {
        let response = self.send(request).await?;
        if !response.status.is_success() {
            return Err(response.into_error());
        }
        Ok(())
    }
}

#[async_trait]
impl DestinationStore for StoreClient {
    #[instrument(skip_all, fields(variable = %redact_name(name)))]
    async fn get_variable(&self, name: &str) -> Result<Option<Variable>> {
        let response = self
            .send(&StoreRequest::GetVariable {
                name: name.to_string(),
            })
            .await?;

        if !response.status.is_success() {
            if response.is_not_found() {
                debug!("Variable not found (status {})", response.status);
                return Ok(None);
            }
            return Err(response.into_error());
        }

        match serde_json::from_str::<Variable>(&response.body) {
            Ok(variable) => Ok(Some(variable)),
            Err(_) if response.is_not_found() => {
                debug!("Variable not found (status {}, error envelope)", response.status);
                Ok(None)
            }
            Err(source) => Err(SyncError::Decode {
                url: response.url,
                source,
            }),
        }
    }

    #[instrument(skip_all, fields(variable = %redact_name(name)))]
    async fn create_variable(&self, name: &str, value: &str, description: &str) -> Result<()> {
        self.write(&StoreRequest::CreateVariable {
            name: name.to_string(),
            value: value.to_string(),
            description: description.to_string(),
            is_secret: true,
        })
        .await?;
        debug!("Created secret variable");
        Ok(())
    }

    #[instrument(skip_all, fields(variable = %redact_name(name)))]
    async fn update_variable_value(&self, name: &str, value: &str) -> Result<()> {
        self.write(&StoreRequest::UpdateVariableValue {
            name: name.to_string(),
            value: value.to_string(),
        })
        .await?;
        debug!("Updated variable value");
        Ok(())
    }

    #[instrument(skip_all, fields(variable = %redact_name(name)))]
    async fn delete_variable(&self, name: &str) -> Result<()> {
        let response = self
            .send(&StoreRequest::DeleteVariable {
                name: name.to_string(),
            })
            .await?;

        if response.status.is_success() {
            debug!("Deleted variable");
            return Ok(());
        }
        if response.is_not_found() {
            debug!("Variable already gone (status {})", response.status);
            return Ok(());
        }
        Err(response.into_error())
    }

    #[instrument(skip_all)]
    async fn list_variables(&self) -> Result<BTreeMap<String, Variable>> {
        let response = self.send(&StoreRequest::ListVariables {}).await?;
        if !response.status.is_success() {
            return Err(response.into_error());
        }

        let variables: Vec<Variable> =
            serde_json::from_str(&response.body).map_err(|source| SyncError::Decode {
                url: response.url.clone(),
                source,
            })?;

        let by_name: BTreeMap<String, Variable> = variables
            .into_iter()
            .map(|variable| (variable.name.clone(), variable))
            .collect();
        info!("Listed {} variables from the store", by_name.len());
        Ok(by_name)
    }
}
