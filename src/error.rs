// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Request to {url} failed: {source}")]
    Connectivity {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Credentials rejected by {url} (status {status}): {body}")]
    Auth {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict reported by {url} (status {status}): {body}")]
    Conflict {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl SyncError {
    /// Map a non-2xx response onto the error taxonomy, keeping status and body verbatim.
    pub fn from_status(url: &str, status: StatusCode, body: String) -> Self {
        let url = url.to_string();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SyncError::Auth { url, status, body },
            StatusCode::NOT_FOUND => SyncError::NotFound(format!("{} ({})", url, body)),
            StatusCode::CONFLICT => SyncError::Conflict { url, status, body },
            _ => SyncError::Status { url, status, body },
        }
    }

    /// HTTP status carried by the error, if any
    #[cfg(test)]
    pub(crate) fn status(&self) -> Option<StatusCode> {
        match self {
            SyncError::Auth { status, .. }
            | SyncError::Conflict { status, .. }
            | SyncError::Status { status, .. } => Some(*status),
            SyncError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
