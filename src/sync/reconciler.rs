// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One stateless reconciliation pass from the vault into the store.

use crate::clients::{DestinationStore, SourceVault};
use crate::constants::MANAGED_BY_MARKER;
use crate::error::Result;
use crate::sync::names::{format_name, redact_name};
use crate::types::ItemSummary;
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

/// Outcome counters of one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Set when the item listing failed and nothing was written
    pub source_unavailable: bool,
    pub items: usize,
    pub skipped: usize,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub item_errors: usize,
    pub sync_errors: usize,
    pub delete_errors: usize,
    /// Set when the store listing failed and the orphan phase was skipped
    pub orphan_listing_failed: bool,
}

impl SyncReport {
    pub fn processed(&self) -> usize {
        self.created + self.updated
    }

    pub fn error_count(&self) -> usize {
        usize::from(self.source_unavailable)
            + self.item_errors
            + self.sync_errors
            + self.delete_errors
            + usize::from(self.orphan_listing_failed)
    }

    pub fn is_success(&self) -> bool {
        self.error_count() == 0
    }
}

/// Secrets a pass should leave in the store, keyed by variable name
#[derive(Debug, Default)]
pub struct ExpectedSecrets {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ExpectedSecrets {
    /// Record a secret. A name seen before keeps its slot and takes the later value.
    /// Returns `true` when the name aliased an earlier one.
    pub fn insert(&mut self, name: String, value: String) -> bool {
        match self.index.get(&name) {
            Some(&slot) => {
                self.entries[slot].1 = value;
                true
            }
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
                false
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncAction {
    Created,
    Updated,
}

/// Mirrors vault item fields into store variables
pub struct Reconciler<V, S> {
    vault: V,
    store: S,
}

impl<V: SourceVault, S: DestinationStore> Reconciler<V, S> {
    pub fn new(vault: V, store: S) -> Self {
        Self { vault, store }
    }

    /// Run fetch, expand, create/update, orphan removal in strict order.
    ///
    /// Only a failed item listing ends the pass early; every other failure is
    /// logged, counted and skipped.
    #[instrument(skip(self), fields(vault = %self.vault.vault_id()))]
    pub async fn run(&self) -> SyncReport {
        let mut report = SyncReport::default();

        info!("Fetching items from vault '{}'...", self.vault.vault_id());
        let items = match self.vault.list_items().await {
            Ok(items) => items,
            Err(e) => {
                error!("Failed to list vault items, no changes made: {}", e);
                report.source_unavailable = true;
                return report;
            }
        };
        report.items = items.len();
        if items.is_empty() {
            info!("No items found in vault '{}'", self.vault.vault_id());
        }

        let expected = self.expand(&items, &mut report).await;
        info!(
            "Found {} secrets to sync, skipped {} items/fields",
            expected.len(),
            report.skipped
        );

        self.apply(&expected, &mut report).await;
        self.remove_orphans(&expected, &mut report).await;

        info!(
            items = report.items,
            processed = report.processed(),
            created = report.created,
            updated = report.updated,
            deleted = report.deleted,
            skipped = report.skipped,
            errors = report.error_count(),
            "Synchronization finished"
        );
        report
    }

    /// Fetch every item and collect its syncable fields
    async fn expand(&self, items: &[ItemSummary], report: &mut SyncReport) -> ExpectedSecrets {
        let mut expected = ExpectedSecrets::default();

        for summary in items {
            debug!("Processing item '{}' ({})", summary.title, summary.id);
            let item = match self.vault.get_item(&summary.id).await {
                Ok(item) => item,
                Err(e) => {
                    error!(
                        "Failed to get details for item '{}' ({}): {}",
                        summary.title, summary.id, e
                    );
                    report.item_errors += 1;
                    continue;
                }
            };

            if item.fields.is_empty() {
                info!("Item '{}' has no fields, skipping", item.title);
                report.skipped += 1;
                continue;
            }

            for field in &item.fields {
                if !field.is_syncable() {
                    debug!(
                        "Skipping field '{}' of item '{}' (label or value is empty)",
                        field.id, item.title
                    );
                    report.skipped += 1;
                    continue;
                }

                let name = format_name(&item.title, &field.label);
                if expected.insert(name.clone(), field.value.clone()) {
                    warn!(
                        "A field of item {} maps to '{}' which is already taken, later value wins",
                        item.id,
                        redact_name(&name)
                    );
                }
            }
        }

        expected
    }

    /// Create or update every expected secret
    async fn apply(&self, expected: &ExpectedSecrets, report: &mut SyncReport) {
        if expected.is_empty() {
            info!("No secrets to create or update");
            return;
        }
        info!("Syncing {} secrets to the store...", expected.len());

        for (name, value) in expected.iter() {
            match self.sync_secret(name, value).await {
                Ok(SyncAction::Created) => report.created += 1,
                Ok(SyncAction::Updated) => report.updated += 1,
                Err(e) => {
                    error!("Failed to sync secret '{}': {}", redact_name(name), e);
                    report.sync_errors += 1;
                }
            }
        }

        info!(
            "Finished create/update phase. Processed: {}, Errors: {}",
            report.processed(),
            report.sync_errors
        );
    }

    async fn sync_secret(&self, name: &str, value: &str) -> Result<SyncAction> {
        match self.store.get_variable(name).await? {
            Some(_) => {
                info!("Variable '{}' exists, updating", redact_name(name));
                self.store.update_variable_value(name, value).await?;
                Ok(SyncAction::Updated)
            }
            None => {
                info!("Variable '{}' does not exist, creating", redact_name(name));
                let description = ownership_description(self.vault.vault_id());
                self.store.create_variable(name, value, &description).await?;
                Ok(SyncAction::Created)
            }
        }
    }

    /// Delete managed variables whose names are no longer expected
    async fn remove_orphans(&self, expected: &ExpectedSecrets, report: &mut SyncReport) {
        info!("Checking for orphaned variables managed by this tool...");
        let variables = match self.store.list_variables().await {
            Ok(variables) => variables,
            Err(e) => {
                error!("Failed to list store variables, skipping deletion phase: {}", e);
                report.orphan_listing_failed = true;
                return;
            }
        };

        for (name, variable) in &variables {
            if !variable.is_managed() || expected.contains(name) {
                continue;
            }

            info!("Found orphaned variable '{}', deleting", redact_name(name));
            match self.store.delete_variable(name).await {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    error!("Failed to delete variable '{}': {}", redact_name(name), e);
                    report.delete_errors += 1;
                }
            }
        }

        info!(
            "Finished deletion phase. Deleted: {}, Errors: {}",
            report.deleted, report.delete_errors
        );
    }
}

/// Description stamped on created variables; only the marker is load-bearing
pub fn ownership_description(vault_id: &str) -> String {
    format!("{} synced from vault '{}'", MANAGED_BY_MARKER, vault_id)
}
