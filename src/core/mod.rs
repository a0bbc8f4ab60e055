//! Shared primitives: the store capability, its SQLite backing, the audited
//! broker in front of it, errors, and configuration.

pub mod broker;
pub mod config;
pub mod db;
pub mod error;
pub mod schemas;
pub mod store;
pub mod time;
