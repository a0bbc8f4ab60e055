//! The store capability the number service depends on.
//!
//! A store answers one question: what value is recorded under an identifier.
//! Production wires in [`SqliteStore`](crate::core::db::SqliteStore); tests
//! wire in the mockall-generated `MockNumberStore`.

use crate::core::error::LookupError;
use std::sync::Arc;

/// Lookup-by-identifier contract.
#[cfg_attr(test, mockall::automock)]
pub trait NumberStore {
    /// Returns the value recorded under `id`, or why it could not be fetched.
    fn get(&self, id: i64) -> Result<i64, LookupError>;
}

impl<S: NumberStore + ?Sized> NumberStore for &S {
    fn get(&self, id: i64) -> Result<i64, LookupError> {
        (**self).get(id)
    }
}

impl<S: NumberStore + ?Sized> NumberStore for Box<S> {
    fn get(&self, id: i64) -> Result<i64, LookupError> {
        (**self).get(id)
    }
}

impl<S: NumberStore + ?Sized> NumberStore for Arc<S> {
    fn get(&self, id: i64) -> Result<i64, LookupError> {
        (**self).get(id)
    }
}
