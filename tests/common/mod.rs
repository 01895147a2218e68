// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Stateful wiremock servers standing in for the vault and the store.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use secret_bridge::clients::{StoreClient, VaultClient};

pub const VAULT_ID: &str = "vault-e2e";
pub const TOKEN: &str = "e2e-token";
pub const API_KEY: &str = "e2e-key";
pub const API_SECRET: &str = "e2e-secret";

/// Vault whose items can be edited between runs
pub struct VaultServer {
    pub server: MockServer,
    items: Arc<Mutex<BTreeMap<String, Value>>>,
}

impl VaultServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let items: Arc<Mutex<BTreeMap<String, Value>>> = Arc::default();

        let listing = items.clone();
        Mock::given(method("GET"))
            .and(path(format!("/v1/vaults/{}/items", VAULT_ID)))
            .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(move |_: &Request| {
                let summaries: Vec<Value> = listing
                    .lock()
                    .unwrap()
                    .values()
                    .map(|item| json!({"id": item["id"], "title": item["title"]}))
                    .collect();
                ResponseTemplate::new(200).set_body_json(summaries)
            })
            .mount(&server)
            .await;

        let details = items.clone();
        Mock::given(method("GET"))
            .and(path_regex(format!(r"^/v1/vaults/{}/items/[^/]+$", VAULT_ID)))
            .respond_with(move |req: &Request| {
                let id = req.url.path().rsplit('/').next().unwrap_or_default().to_string();
                match details.lock().unwrap().get(&id) {
                    Some(item) => ResponseTemplate::new(200).set_body_json(item.clone()),
                    None => ResponseTemplate::new(404)
                        .set_body_json(json!({"status": 404, "message": "item not found"})),
                }
            })
            .mount(&server)
            .await;

        Self { server, items }
    }

    pub fn put_item(&self, id: &str, title: &str, fields: &[(&str, &str)]) {
        let fields: Vec<Value> = fields
            .iter()
            .map(|(label, value)| json!({"id": label, "label": label, "value": value, "type": "CONCEALED"}))
            .collect();
        self.items.lock().unwrap().insert(
            id.to_string(),
            json!({"id": id, "title": title, "fields": fields}),
        );
    }

    pub fn remove_item(&self, id: &str) {
        self.items.lock().unwrap().remove(id);
    }

    pub fn client(&self) -> VaultClient {
        VaultClient::new(self.server.uri(), VAULT_ID, TOKEN, Duration::from_secs(5)).unwrap()
    }
}

/// Store backed by an in-memory variable map, answering `/read` and `/write` envelopes
pub struct StoreServer {
    pub server: MockServer,
    variables: Arc<Mutex<BTreeMap<String, Value>>>,
}

fn not_found(name: &str) -> ResponseTemplate {
    ResponseTemplate::new(500).set_body_json(json!({
        "error": format!("no variable found with name {}", name),
        "trace": ["GetVariable"]
    }))
}

fn handle(variables: &Mutex<BTreeMap<String, Value>>, req: &Request) -> ResponseTemplate {
    let envelope: Value = match serde_json::from_slice(&req.body) {
        Ok(v) => v,
        Err(_) => {
            return ResponseTemplate::new(400).set_body_json(json!({"error": "bad json", "trace": []}))
        }
    };
    let params = &envelope["params"];
    let name = params["name"].as_str().unwrap_or_default().to_string();
    let mut variables = variables.lock().unwrap();

    match envelope["type"].as_str().unwrap_or_default() {
        "GetVariable" => match variables.get(&name) {
            Some(v) => ResponseTemplate::new(200).set_body_json(v.clone()),
            None => not_found(&name),
        },
        "ListVariables" => {
            let all: Vec<Value> = variables.values().cloned().collect();
            ResponseTemplate::new(200).set_body_json(all)
        }
        "CreateVariable" => {
            if variables.contains_key(&name) {
                return ResponseTemplate::new(409)
                    .set_body_json(json!({"error": "variable already exists", "trace": []}));
            }
            let record = json!({
                "name": name,
                "value": params["value"],
                "description": params["description"],
                "is_secret": params["is_secret"],
            });
            variables.insert(name, record.clone());
            ResponseTemplate::new(200).set_body_json(record)
        }
        "UpdateVariableValue" => match variables.get_mut(&name) {
            Some(record) => {
                record["value"] = params["value"].clone();
                ResponseTemplate::new(200).set_body_json(record.clone())
            }
            None => not_found(&name),
        },
        "DeleteVariable" => match variables.remove(&name) {
            Some(record) => ResponseTemplate::new(200).set_body_json(record),
            None => ResponseTemplate::new(404),
        },
        other => ResponseTemplate::new(400)
            .set_body_json(json!({"error": format!("unknown request {}", other), "trace": []})),
    }
}

impl StoreServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let variables: Arc<Mutex<BTreeMap<String, Value>>> = Arc::default();

        for endpoint in ["/read", "/write"] {
            let state = variables.clone();
            Mock::given(method("POST"))
                .and(path(endpoint))
                .and(header("X-Api-Key", API_KEY))
                .and(header("X-Api-Secret", API_SECRET))
                .respond_with(move |req: &Request| handle(&state, req))
                .mount(&server)
                .await;
        }

        Self { server, variables }
    }

    pub fn insert(&self, name: &str, value: &str, description: &str) {
        self.variables.lock().unwrap().insert(
            name.to_string(),
            json!({"name": name, "value": value, "description": description, "is_secret": false}),
        );
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.variables.lock().unwrap().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.variables.lock().unwrap().keys().cloned().collect()
    }

    pub fn client(&self) -> StoreClient {
        StoreClient::new(self.server.uri(), API_KEY, API_SECRET, Duration::from_secs(5)).unwrap()
    }
}
