// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Token embedded in the description of every variable this tool creates.
/// Orphan detection only ever deletes variables carrying it.
pub const MANAGED_BY_MARKER: &str = "Vault-Sync:";

/// Separator between the item and field segments of a variable name
pub const NAME_SEPARATOR: &str = "__";

/// Environment variables read by [`crate::config::Config`]
pub mod env {
    pub const VAULT_HOST: &str = "VAULT_HOST";
    pub const VAULT_ID: &str = "VAULT_ID";
    pub const VAULT_TOKEN: &str = "VAULT_TOKEN";
    pub const STORE_HOST: &str = "STORE_HOST";
    pub const STORE_API_KEY: &str = "STORE_API_KEY";
    pub const STORE_API_SECRET: &str = "STORE_API_SECRET";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    pub const SYNC_INTERVAL: &str = "SYNC_INTERVAL";
    pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
}

/// Defaults for optional settings
pub mod defaults {
    pub const SYNC_INTERVAL: &str = "1h";
    pub const REQUEST_TIMEOUT: &str = "60s";
}

/// Destination store endpoints
pub mod store {
    pub const READ_PATH: &str = "/read";
    pub const WRITE_PATH: &str = "/write";
    pub const API_KEY_HEADER: &str = "X-Api-Key";
    pub const API_SECRET_HEADER: &str = "X-Api-Secret";
}
