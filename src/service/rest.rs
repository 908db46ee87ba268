use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::contact::Contact;
use crate::service::{ApiError, ContactService, DeleteOutcome};

/// HTTP client for the contact REST API.
///
/// The server exposes one collection: `GET/POST {base}/contacts` and
/// `PUT/DELETE {base}/contacts/{id}`, every body a flat JSON contact object.
pub struct RestContactService {
    client: reqwest::Client,
    base_url: String,
}

impl RestContactService {
    /// Build a client against `base_url` (e.g. `http://localhost:3000`).
    /// The timeout applies per request, connect time included.
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/contacts", self.base_url)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/contacts/{}", self.base_url, id)
    }

    /// Read the body as text first so a malformed payload surfaces as a
    /// decode error with the offending path, not as a transport error.
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, ApiError> {
        let body = response.text().await.map_err(|source| ApiError::Transport {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ContactService for RestContactService {
    async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        let path = self.collection_url();
        debug!("GET {}", path);
        let response =
            self.client
                .get(&path)
                .send()
                .await
                .map_err(|source| ApiError::Transport {
                    path: path.clone(),
                    source,
                })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("GET {} returned {}", path, status);
            return Err(ApiError::UnexpectedStatus {
                method: "GET",
                path,
                status,
            });
        }

        let mut contacts: Vec<Contact> = Self::read_json(response, &path).await?;
        for contact in &mut contacts {
            contact.ensure_id();
        }
        Ok(contacts)
    }

    async fn create_contact(&self, contact: &Contact) -> Result<Contact, ApiError> {
        let path = self.collection_url();
        debug!("POST {}", path);
        let response = self
            .client
            .post(&path)
            .json(contact)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            warn!("POST {} returned {}", path, status);
            return Err(ApiError::UnexpectedStatus {
                method: "POST",
                path,
                status,
            });
        }

        let mut created: Contact = Self::read_json(response, &path).await?;
        created.ensure_id();
        Ok(created)
    }

    async fn update_contact(&self, contact: &Contact) -> Result<Contact, ApiError> {
        let path = self.record_url(&contact.id);
        debug!("PUT {}", path);
        let response = self
            .client
            .put(&path)
            .json(contact)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("PUT {} returned {}", path, status);
            return Err(ApiError::UnexpectedStatus {
                method: "PUT",
                path,
                status,
            });
        }

        let mut updated: Contact = Self::read_json(response, &path).await?;
        updated.ensure_id();
        Ok(updated)
    }

    async fn delete_contact(&self, id: &str) -> Result<DeleteOutcome, ApiError> {
        let path = self.record_url(id);
        debug!("DELETE {}", path);
        let response = self
            .client
            .delete(&path)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(DeleteOutcome::Deleted),
            StatusCode::NOT_FOUND => Ok(DeleteOutcome::Missing),
            status => {
                warn!("DELETE {} returned {}", path, status);
                Err(ApiError::UnexpectedStatus {
                    method: "DELETE",
                    path,
                    status,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_strip_trailing_slash() {
        let service =
            RestContactService::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(service.collection_url(), "http://localhost:3000/contacts");
        assert_eq!(
            service.record_url("abc"),
            "http://localhost:3000/contacts/abc"
        );
    }
}
