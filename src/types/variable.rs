// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{store, MANAGED_BY_MARKER};
use serde::{Deserialize, Serialize};

/// Variable record held by the destination store
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Variable {
    pub name: String,
    /// May come back masked for secret variables
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_secret: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<serde_json::Value>,
}

impl Variable {
    /// Whether this variable was created by the bridge
    pub fn is_managed(&self) -> bool {
        self.description.contains(MANAGED_BY_MARKER)
    }
}

/// Request envelope for the store's `/read` and `/write` endpoints
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "params")]
pub enum StoreRequest {
    GetVariable {
        name: String,
    },
    CreateVariable {
        name: String,
        value: String,
        description: String,
        is_secret: bool,
    },
    UpdateVariableValue {
        name: String,
        value: String,
    },
    DeleteVariable {
        name: String,
    },
    ListVariables {},
}

impl StoreRequest {
    /// Endpoint the request is posted to
    pub fn path(&self) -> &'static str {
        match self {
            StoreRequest::GetVariable { .. } | StoreRequest::ListVariables {} => store::READ_PATH,
            StoreRequest::CreateVariable { .. }
            | StoreRequest::UpdateVariableValue { .. }
            | StoreRequest::DeleteVariable { .. } => store::WRITE_PATH,
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            StoreRequest::GetVariable { .. } => "GetVariable",
            StoreRequest::CreateVariable { .. } => "CreateVariable",
            StoreRequest::UpdateVariableValue { .. } => "UpdateVariableValue",
            StoreRequest::DeleteVariable { .. } => "DeleteVariable",
            StoreRequest::ListVariables {} => "ListVariables",
        }
    }
}

/// Failure envelope returned by the store
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreErrorBody {
    pub error: String,
    #[serde(default)]
    pub trace: Vec<String>,
}
