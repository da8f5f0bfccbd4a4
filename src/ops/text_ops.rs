use log::{info, warn};

use crate::io::store::{StoreError, TextStore};
use crate::model::text::{EditBuffer, TextRecord};

/// Error type for text use-cases
#[derive(Debug, thiserror::Error)]
pub enum TextServiceError {
    #[error("text body cannot be empty")]
    EmptyBody,
    #[error("text #{0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for TextServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => TextServiceError::NotFound(id),
            other => TextServiceError::Store(other),
        }
    }
}

/// Use-case facade over a [`TextStore`].
///
/// Holds the last fetched list. Every successful write is followed by a
/// full refetch; the list is never patched locally. A write that succeeded
/// stays successful when that refetch fails: the list is kept as it was and
/// flagged stale.
pub struct TextService<S: TextStore> {
    store: S,
    texts: Vec<TextRecord>,
    /// Why the last refetch failed, until one succeeds
    stale: Option<String>,
}

impl<S: TextStore> TextService<S> {
    pub fn new(store: S) -> Self {
        TextService {
            store,
            texts: Vec::new(),
            stale: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records from the last successful fetch
    pub fn texts(&self) -> &[TextRecord] {
        &self.texts
    }

    /// Reason the local list may be out of date, if the last refetch failed
    pub fn stale(&self) -> Option<&str> {
        self.stale.as_deref()
    }

    /// Replace the local list with the store's current contents
    pub fn refresh(&mut self) -> Result<&[TextRecord], TextServiceError> {
        match self.store.list_all() {
            Ok(texts) => {
                self.texts = texts;
                self.stale = None;
                Ok(&self.texts)
            }
            Err(e) => {
                self.stale = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Refetch after a write. Failure only marks the list stale.
    fn refresh_after_write(&mut self, op: &str) {
        if let Err(e) = self.refresh() {
            warn!("event=text_refetch status=error op={} error={}", op, e);
        }
    }

    /// Look up a record in the last fetched list
    pub fn find(&self, id: i64) -> Option<&TextRecord> {
        self.texts.iter().find(|t| t.id == id)
    }

    /// Refetch, then look up one record
    pub fn fetch_one(&mut self, id: i64) -> Result<&TextRecord, TextServiceError> {
        self.refresh()?;
        self.find(id).ok_or(TextServiceError::NotFound(id))
    }

    /// Encode the buffer and create a record from it
    pub fn create(&mut self, buffer: &EditBuffer) -> Result<TextRecord, TextServiceError> {
        if buffer.is_blank() {
            return Err(TextServiceError::EmptyBody);
        }
        let created = self.store.create(&buffer.to_input())?;
        info!(
            "event=text_create status=ok id={} category={}",
            created.id, created.category
        );
        self.refresh_after_write("create");
        Ok(created)
    }

    /// Encode the buffer and replace record `id` with it
    pub fn update(&mut self, id: i64, buffer: &EditBuffer) -> Result<TextRecord, TextServiceError> {
        if buffer.is_blank() {
            return Err(TextServiceError::EmptyBody);
        }
        let updated = self.store.update(id, &buffer.to_input())?;
        info!(
            "event=text_update status=ok id={} category={}",
            id, updated.category
        );
        self.refresh_after_write("update");
        Ok(updated)
    }

    pub fn delete(&mut self, id: i64) -> Result<(), TextServiceError> {
        self.store.delete(id)?;
        info!("event=text_delete status=ok id={}", id);
        self.refresh_after_write("delete");
        Ok(())
    }
}
