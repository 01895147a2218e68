// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mapping from vault item titles and field labels to store variable names.
//!
//! Whitespace runs become `-` first, then every run of characters outside
//! `[A-Za-z0-9_]` (including those hyphens) becomes `_`, then the result is
//! uppercased. `My Service API` / `API Key` therefore maps to
//! `MY_SERVICE_API__API_KEY`. Names carry no prefix, so the same function
//! serves both the create/update phase and orphan detection.

use crate::constants::NAME_SEPARATOR;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("valid regex"));

fn sanitize(segment: &str) -> String {
    let hyphenated = WHITESPACE.replace_all(segment, "-");
    DISALLOWED.replace_all(&hyphenated, "_").to_uppercase()
}

/// Variable name for a field of an item. An empty label yields the item segment alone.
pub fn format_name(item_title: &str, field_label: &str) -> String {
    let item = sanitize(item_title);
    if field_label.is_empty() {
        return item;
    }
    format!("{}{}{}", item, NAME_SEPARATOR, sanitize(field_label))
}

/// Display copy of a name with every segment after the item segment masked.
///
/// Segments longer than two characters keep their first two; shorter ones are
/// masked entirely. Only for log output, never for API calls.
pub fn redact_name(name: &str) -> String {
    let mut segments = name.split(NAME_SEPARATOR);
    let Some(item) = segments.next() else {
        return name.to_string();
    };

    let mut redacted = item.to_string();
    for segment in segments {
        redacted.push_str(NAME_SEPARATOR);
        if segment.chars().count() > 2 {
            redacted.extend(segment.chars().take(2));
        }
        redacted.push_str("***");
    }
    redacted
}
