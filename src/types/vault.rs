// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

/// Entry of the vault item listing
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ItemSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Full item as returned by the item detail endpoint
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VaultItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Field {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl Field {
    /// Fields without a label or a value are never synced
    pub fn is_syncable(&self) -> bool {
        !self.label.is_empty() && !self.value.is_empty()
    }
}
