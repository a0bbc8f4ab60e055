//! Number validation service.
//!
//! The service owns nothing but its store. It fetches a value and rejects it
//! when it is above [`VALIDATION_THRESHOLD`]. Store failures come back to the
//! caller as the very same value the store produced.
//!
//! Two equivalent ways to build it:
//! - [`NumberService::new`] holds the store in a field.
//! - [`new_get_number`] captures the store in a closure.

use crate::core::error::LookupError;
use crate::core::store::NumberStore;
use thiserror::Error;

/// Values strictly greater than this are rejected.
pub const VALIDATION_THRESHOLD: i64 = 10;

#[derive(Error, Debug)]
pub enum GetNumberError {
    /// The store could not produce a value. Displays exactly as the store's error.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("result too high: {0}")]
    TooHigh(i64),
}

/// Accept or reject a fetched value.
pub fn validate(value: i64) -> Result<(), GetNumberError> {
    if value > VALIDATION_THRESHOLD {
        return Err(GetNumberError::TooHigh(value));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct NumberService<S> {
    store: S,
}

impl<S: NumberStore> NumberService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_number(&self, id: i64) -> Result<(), GetNumberError> {
        let value = self.store.get(id)?;
        validate(value)
    }
}

/// Closure form of [`NumberService::get_number`].
pub fn new_get_number<S: NumberStore>(store: S) -> impl Fn(i64) -> Result<(), GetNumberError> {
    move |id| {
        let value = store.get(id)?;
        validate(value)
    }
}
