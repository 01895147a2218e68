// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: in-memory vault and store fakes plus JSON payload builders.

use crate::clients::{DestinationStore, SourceVault};
use crate::error::{Result, SyncError};
use crate::types::{Field, ItemSummary, VaultItem, Variable};
use async_trait::async_trait;
use http::StatusCode;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

fn injected_failure(target: &str) -> SyncError {
    SyncError::Status {
        url: format!("fake://{}", target),
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "injected failure".to_string(),
    }
}

#[derive(Default)]
struct VaultState {
    items: Vec<VaultItem>,
    failing_items: HashSet<String>,
    list_fails: bool,
}

/// Vault fake whose contents can change between runs
#[derive(Clone)]
pub struct FakeVault {
    vault_id: String,
    state: Arc<Mutex<VaultState>>,
}

impl FakeVault {
    pub fn new(vault_id: &str) -> Self {
        Self {
            vault_id: vault_id.to_string(),
            state: Arc::new(Mutex::new(VaultState::default())),
        }
    }

    /// Add an item with `(label, value)` fields
    pub fn with_item(self, id: &str, title: &str, fields: &[(&str, &str)]) -> Self {
        self.state.lock().unwrap().items.push(VaultItem {
            id: id.to_string(),
            title: title.to_string(),
            fields: make_fields(fields),
        });
        self
    }

    /// Make the detail fetch of one item fail
    pub fn failing_item(self, id: &str) -> Self {
        self.state.lock().unwrap().failing_items.insert(id.to_string());
        self
    }

    /// Make the item listing fail
    pub fn failing_list(self) -> Self {
        self.state.lock().unwrap().list_fails = true;
        self
    }

    pub fn set_field_value(&self, item_id: &str, label: &str, value: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(field) = state
            .items
            .iter_mut()
            .filter(|item| item.id == item_id)
            .flat_map(|item| item.fields.iter_mut())
            .find(|field| field.label == label)
        {
            field.value = value.to_string();
        }
    }

    pub fn remove_item(&self, item_id: &str) {
        self.state.lock().unwrap().items.retain(|item| item.id != item_id);
    }
}

#[async_trait]
impl SourceVault for FakeVault {
    fn vault_id(&self) -> &str {
        &self.vault_id
    }

    async fn list_items(&self) -> Result<Vec<ItemSummary>> {
        let state = self.state.lock().unwrap();
        if state.list_fails {
            return Err(injected_failure("vault/items"));
        }
        Ok(state
            .items
            .iter()
            .map(|item| ItemSummary {
                id: item.id.clone(),
                title: item.title.clone(),
            })
            .collect())
    }

    async fn get_item(&self, id: &str) -> Result<VaultItem> {
        let state = self.state.lock().unwrap();
        if state.failing_items.contains(id) {
            return Err(injected_failure(&format!("vault/items/{}", id)));
        }
        state
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| SyncError::NotFound(format!("item {}", id)))
    }
}

#[derive(Default)]
struct StoreState {
    variables: BTreeMap<String, Variable>,
    failing_writes: HashSet<String>,
    list_fails: bool,
    calls: Vec<String>,
}

/// Store fake that records every call as `op:NAME`
#[derive(Clone, Default)]
pub struct FakeStore {
    state: Arc<Mutex<StoreState>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(self, name: &str, value: &str, description: &str) -> Self {
        self.state.lock().unwrap().variables.insert(
            name.to_string(),
            Variable {
                name: name.to_string(),
                value: value.to_string(),
                description: description.to_string(),
                is_secret: true,
                ..Default::default()
            },
        );
        self
    }

    /// Make create, update and delete of one name fail
    pub fn failing_write(self, name: &str) -> Self {
        self.state.lock().unwrap().failing_writes.insert(name.to_string());
        self
    }

    pub fn failing_list(self) -> Self {
        self.state.lock().unwrap().list_fails = true;
        self
    }

    pub fn variables(&self) -> BTreeMap<String, Variable> {
        self.state.lock().unwrap().variables.clone()
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.state.lock().unwrap().variables.get(name).map(|v| v.value.clone())
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: String) -> std::sync::MutexGuard<'_, StoreState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl DestinationStore for FakeStore {
    async fn get_variable(&self, name: &str) -> Result<Option<Variable>> {
        let state = self.record(format!("get:{}", name));
        Ok(state.variables.get(name).cloned())
    }

    async fn create_variable(&self, name: &str, value: &str, description: &str) -> Result<()> {
        let mut state = self.record(format!("create:{}", name));
        if state.failing_writes.contains(name) {
            return Err(injected_failure("store/write"));
        }
        if state.variables.contains_key(name) {
            return Err(SyncError::Conflict {
                url: "fake://store/write".to_string(),
                status: StatusCode::CONFLICT,
                body: format!("variable {} already exists", name),
            });
        }
        state.variables.insert(
            name.to_string(),
            Variable {
                name: name.to_string(),
                value: value.to_string(),
                description: description.to_string(),
                is_secret: true,
                ..Default::default()
            },
        );
        Ok(())
    }

    async fn update_variable_value(&self, name: &str, value: &str) -> Result<()> {
        let mut state = self.record(format!("update:{}", name));
        if state.failing_writes.contains(name) {
            return Err(injected_failure("store/write"));
        }
        match state.variables.get_mut(name) {
            Some(variable) => {
                variable.value = value.to_string();
                Ok(())
            }
            None => Err(SyncError::NotFound(format!("variable {}", name))),
        }
    }

    async fn delete_variable(&self, name: &str) -> Result<()> {
        let mut state = self.record(format!("delete:{}", name));
        if state.failing_writes.contains(name) {
            return Err(injected_failure("store/write"));
        }
        state.variables.remove(name);
        Ok(())
    }

    async fn list_variables(&self) -> Result<BTreeMap<String, Variable>> {
        let state = self.record("list".to_string());
        if state.list_fails {
            return Err(injected_failure("store/read"));
        }
        Ok(state.variables.clone())
    }
}

pub fn make_fields(fields: &[(&str, &str)]) -> Vec<Field> {
    fields
        .iter()
        .enumerate()
        .map(|(i, (label, value))| Field {
            id: format!("field-{}", i),
            label: label.to_string(),
            value: value.to_string(),
            field_type: Some("CONCEALED".to_string()),
            purpose: None,
        })
        .collect()
}

/// Item listing payload
pub fn items_json(items: &[(&str, &str)]) -> String {
    serde_json::Value::Array(
        items
            .iter()
            .map(|(id, title)| serde_json::json!({"id": id, "title": title}))
            .collect(),
    )
    .to_string()
}

/// Item detail payload
pub fn item_json(id: &str, title: &str, fields: &[(&str, &str)]) -> String {
    serde_json::json!({
        "id": id,
        "title": title,
        "fields": make_fields(fields),
    })
    .to_string()
}

/// Store variable payload
pub fn variable_json(name: &str, description: &str) -> String {
    serde_json::json!({
        "name": name,
        "value": "#####",
        "description": description,
        "is_secret": true
    })
    .to_string()
}

/// Store `{error, trace}` failure payload
pub fn store_error_json(message: &str) -> String {
    serde_json::json!({
        "error": message,
        "trace": ["handler failed"]
    })
    .to_string()
}
