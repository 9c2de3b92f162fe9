//! HTTP client for the remote note store.

use super::{CredentialProvider, NoteStore};
use crate::error::{Result, SyncError};
use crate::model::{Note, NoteUpdate};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

/// The store signals rejected credentials with this literal body.
const UNAUTHORIZED_SENTINEL: &str = "Unauthorized";

pub struct HttpNoteStore {
    base_url: String,
    client: reqwest::Client,
    credentials: Box<dyn CredentialProvider>,
}

impl HttpNoteStore {
    pub fn new(base_url: &str, credentials: Box<dyn CredentialProvider>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            credentials,
        }
    }
}

/// Maps a response to the failure it signals, if any.
fn classify(status: StatusCode, body: &str) -> Option<SyncError> {
    if status == StatusCode::UNAUTHORIZED || body.trim() == UNAUTHORIZED_SENTINEL {
        return Some(SyncError::Unauthorized);
    }
    if !status.is_success() {
        return Some(SyncError::Network(format!("HTTP {}: {}", status, body)));
    }
    None
}

#[async_trait]
impl NoteStore for HttpNoteStore {
    async fn fetch_all(&self) -> Result<Vec<Note>> {
        let creds = self.credentials.credentials()?;
        debug!(url = %self.base_url, "fetching all notes");
        let resp = self
            .client
            .get(format!("{}/notes", self.base_url))
            .basic_auth(&creds.email, Some(&creds.password))
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;
        if let Some(err) = classify(status, &body) {
            return Err(err);
        }

        let notes: Vec<Note> = serde_json::from_str(&body).map_err(SyncError::Serialization)?;
        debug!(count = notes.len(), "fetched notes");
        Ok(notes)
    }

    async fn push_updates(&self, updates: &[NoteUpdate]) -> Result<()> {
        let creds = self.credentials.credentials()?;
        debug!(count = updates.len(), "pushing note updates");
        let resp = self
            .client
            .post(format!("{}/notes/update", self.base_url))
            .basic_auth(&creds.email, Some(&creds.password))
            .json(updates)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;
        if let Some(err) = classify(status, &body) {
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_body_is_unauthorized() {
        let err = classify(StatusCode::OK, "Unauthorized").unwrap();
        assert!(err.is_unauthorized());

        let err = classify(StatusCode::OK, "  Unauthorized\n").unwrap();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn status_401_is_unauthorized() {
        let err = classify(StatusCode::UNAUTHORIZED, "").unwrap();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn other_failures_are_network_errors() {
        let err = classify(StatusCode::INTERNAL_SERVER_ERROR, "boom").unwrap();
        assert!(!err.is_unauthorized());
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn success_classifies_clean() {
        assert!(classify(StatusCode::OK, "[]").is_none());
    }
}
