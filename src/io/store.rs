use crate::model::text::{TextInput, TextRecord};

/// Error type for remote store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{op} request failed: {message}")]
    Transport { op: &'static str, message: String },
    #[error("{op} request failed with HTTP {status}")]
    Status { op: &'static str, status: u16 },
    #[error("could not decode {op} response: {message}")]
    Decode { op: &'static str, message: String },
    #[error("text #{0} not found")]
    NotFound(i64),
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// The remote collection of texts.
///
/// Bodies going in and coming out are in storage form; implementations never
/// transform them.
pub trait TextStore {
    /// Every record, in the order the store returns them
    fn list_all(&self) -> Result<Vec<TextRecord>, StoreError>;
    fn create(&self, input: &TextInput) -> Result<TextRecord, StoreError>;
    /// Replace body and category of an existing record
    fn update(&self, id: i64, input: &TextInput) -> Result<TextRecord, StoreError>;
    fn delete(&self, id: i64) -> Result<(), StoreError>;
}

impl<S: TextStore + ?Sized> TextStore for Box<S> {
    fn list_all(&self) -> Result<Vec<TextRecord>, StoreError> {
        (**self).list_all()
    }

    fn create(&self, input: &TextInput) -> Result<TextRecord, StoreError> {
        (**self).create(input)
    }

    fn update(&self, id: i64, input: &TextInput) -> Result<TextRecord, StoreError> {
        (**self).update(id, input)
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        (**self).delete(id)
    }
}
