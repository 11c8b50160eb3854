//! Error types shared by the store and the controller.
//!
//! None of these are fatal: validation errors send the user back to the form,
//! not-found errors are reported and otherwise ignored.

use crate::entry::EntryId;
use thiserror::Error;

/// A draft is missing something an entry must have.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("mood is required")]
    MissingMood,
    #[error("location is required")]
    MissingLocation,
    #[error("invalid answer for '{label}'")]
    InvalidAnswer { label: &'static str },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no entry with id {0}")]
pub struct NotFoundError(pub EntryId);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// Why a form submission did not go through.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("nothing to submit: no entry is being composed or edited")]
    NoDraft,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for SubmitError {
    fn from(e: ValidationError) -> Self {
        SubmitError::Store(StoreError::Validation(e))
    }
}
