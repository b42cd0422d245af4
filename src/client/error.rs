//! Client Error Types
//!
//! Every failure the client can hit while talking to the backend or touching
//! local state. The UI edge treats them alike: show a readable message
//! (backend detail when present, a fallback otherwise) and let the user retry.
//! A rejected credential additionally ends the session.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::client::credential_store::StoreError;
use crate::shared::SharedError;

/// Result alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Coarse classification used by the UI edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never got a response
    Transport,
    /// The backend answered with an error
    Backend,
    /// The credential is missing or was rejected
    Credential,
    /// Local validation, parsing or storage
    Local,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api {
        status: StatusCode,
        /// The backend's `detail` field, when it sent one
        detail: Option<String>,
    },

    #[error("Credential rejected: {}", .detail.as_deref().unwrap_or("unauthorized"))]
    CredentialRejected { detail: Option<String> },

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Api { .. } => ErrorKind::Backend,
            ClientError::CredentialRejected { .. } | ClientError::NotAuthenticated => {
                ErrorKind::Credential
            }
            ClientError::Decode(_)
            | ClientError::Validation(_)
            | ClientError::Store(_)
            | ClientError::File { .. } => ErrorKind::Local,
        }
    }

    /// True when the backend refused the bearer credential
    pub fn is_credential_rejected(&self) -> bool {
        matches!(self, ClientError::CredentialRejected { .. })
    }

    /// The backend-provided detail, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Api { detail, .. } | ClientError::CredentialRejected { detail } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    /// Message to show the user: the backend detail, a local validation
    /// message, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(err) => err.message().to_string(),
            ClientError::NotAuthenticated => "Please log in first".to_string(),
            _ => self.detail().unwrap_or(fallback).to_string(),
        }
    }

    /// Build the error for a non-success response body
    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let detail = extract_detail(body);
        if status == StatusCode::UNAUTHORIZED {
            ClientError::CredentialRejected { detail }
        } else {
            ClientError::Api { status, detail }
        }
    }
}

/// Pull the `detail` field out of an error body.
///
/// The backend sends either `{"detail": "text"}` or, for request validation
/// failures, `{"detail": [{"msg": "...", ...}, ...]}`.
pub(crate) fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        serde_json::Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(|msg| msg.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        serde_json::Value::Null | serde_json::Value::String(_) => None,
        other => Some(other.to_string()),
    }
}
