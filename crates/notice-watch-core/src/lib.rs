//! # Notice Watch Core
//!
//! Runtime-agnostic logic for Notice Watch: item models, the error
//! taxonomy, batch deduplication, the item store and notifier
//! abstractions, and the reconciliation engine that ties them together.
//!
//! This crate contains no tokio, sqlx, HTTP, or filesystem I/O. Concrete
//! stores, adapters, and transports live in the `notice-watch` crate.

pub mod dedup;
pub mod engine;
pub mod error;
pub mod models;
pub mod notify;
pub mod store;

pub use error::{Error, Result};
pub use models::{NewItem, RawItem, StoredItem};
