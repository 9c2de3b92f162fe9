//! # Remote Layer
//!
//! The remote note store is a black box with two operations: fetch the full
//! note set and upload local edits in bulk. The [`NoteStore`] trait keeps the
//! reconciliation engine off the wire; auth material flows through a
//! [`CredentialProvider`] so the engine never sees raw credentials.

use crate::error::Result;
use crate::model::{Note, NoteUpdate};
use async_trait::async_trait;
use std::fmt;

pub mod http;
pub mod memory;

/// Opaque account credentials for the remote note store.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Supplies auth material to the remote client.
pub trait CredentialProvider: Send + Sync {
    fn credentials(&self) -> Result<Credentials>;
}

/// Provider over an already-resolved credentials value.
pub struct StaticCredentials(pub Credentials);

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials> {
        Ok(self.0.clone())
    }
}

/// Abstract interface to the remote note store.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Download the full note set, tombstones included.
    async fn fetch_all(&self) -> Result<Vec<Note>>;

    /// Upload local edits in bulk.
    async fn push_updates(&self, updates: &[NoteUpdate]) -> Result<()>;
}
