use super::NoteStore;
use crate::error::{Result, SyncError};
use crate::model::{Note, NoteUpdate};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;

/// A failure an [`InMemoryNoteStore`] can be told to produce.
#[derive(Debug, Clone)]
pub enum StoreFailure {
    Unauthorized,
    Network(String),
}

impl StoreFailure {
    fn to_error(&self) -> SyncError {
        match self {
            StoreFailure::Unauthorized => SyncError::Unauthorized,
            StoreFailure::Network(msg) => SyncError::Network(msg.clone()),
        }
    }
}

#[derive(Default)]
struct Inner {
    notes: Vec<Note>,
    pushes: Vec<Vec<NoteUpdate>>,
    fetches: usize,
    fail_fetch: Option<StoreFailure>,
    fail_push: Option<StoreFailure>,
}

/// In-memory note store for tests: serves a fixed note set, records every
/// push, and injects failures on demand.
#[derive(Default)]
pub struct InMemoryNoteStore {
    inner: Mutex<Inner>,
    delay: Option<Duration>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        let store = Self::default();
        store.inner.lock().notes = notes;
        store
    }

    /// Sleep this long inside every call, to widen race windows in tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_notes(&self, notes: Vec<Note>) {
        self.inner.lock().notes = notes;
    }

    pub fn fail_fetch(&self, failure: StoreFailure) {
        self.inner.lock().fail_fetch = Some(failure);
    }

    pub fn fail_push(&self, failure: StoreFailure) {
        self.inner.lock().fail_push = Some(failure);
    }

    /// Every batch pushed so far, in call order.
    pub fn pushes(&self) -> Vec<Vec<NoteUpdate>> {
        self.inner.lock().pushes.clone()
    }

    pub fn push_count(&self) -> usize {
        self.inner.lock().pushes.len()
    }

    pub fn fetch_count(&self) -> usize {
        self.inner.lock().fetches
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn fetch_all(&self) -> Result<Vec<Note>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut inner = self.inner.lock();
        inner.fetches += 1;
        if let Some(failure) = &inner.fail_fetch {
            return Err(failure.to_error());
        }
        Ok(inner.notes.clone())
    }

    async fn push_updates(&self, updates: &[NoteUpdate]) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut inner = self.inner.lock();
        if let Some(failure) = &inner.fail_push {
            return Err(failure.to_error());
        }
        inner.pushes.push(updates.to_vec());
        Ok(())
    }
}
