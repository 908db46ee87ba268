pub mod rest;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::contact::Contact;

/// Errors surfaced by a contact service.
///
/// The store reports these to the UI but never tears down local state over
/// them; a failed call leaves the contact list exactly as it was.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connect, timeout, TLS).
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status the contract does not allow here.
    #[error("{method} {path} returned unexpected status {status}")]
    UnexpectedStatus {
        method: &'static str,
        path: String,
        status: StatusCode,
    },

    /// The response body was not the JSON shape the contract promises.
    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Whether retrying the same call later could plausibly succeed.
    /// Transport failures and 5xx responses are transient; everything else
    /// means the request itself is wrong.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::UnexpectedStatus { status, .. } => status.is_server_error(),
            ApiError::Decode { .. } => false,
        }
    }
}

/// What a delete request did on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// 204: the record existed and is gone.
    Deleted,
    /// 404: the record was already gone. Callers keep their local copy.
    Missing,
}

/// The contact backend abstraction.
///
/// All calls are confirm-then-apply: implementations return the server's
/// view of the record and callers mutate local state only from that.
#[async_trait]
pub trait ContactService: Send + Sync {
    // === Sync ===

    /// Fetch the full contact collection.
    async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError>;

    // === Mutation ===

    /// Create a contact; returns the stored record including its server id.
    async fn create_contact(&self, contact: &Contact) -> Result<Contact, ApiError>;

    /// Replace the record with `contact.id`; returns the stored record.
    async fn update_contact(&self, contact: &Contact) -> Result<Contact, ApiError>;

    /// Delete the record with the given id.
    async fn delete_contact(&self, id: &str) -> Result<DeleteOutcome, ApiError>;
}

pub use rest::RestContactService;
