//! Storage abstraction for Notice Watch.
//!
//! The [`ItemStore`] trait is the durable table of every item ever seen,
//! keyed uniquely by link. All reads and writes for one reconciliation
//! cycle go through a single [`StoreTransaction`] obtained from
//! [`ItemStore::begin`], so a cycle either persists all of its new items
//! or none of them.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.
//!
//! # Operations
//!
//! | Method | Purpose |
//! |--------|---------|
//! | [`begin`](ItemStore::begin) | Open the transactional scope for one cycle |
//! | [`is_empty`](StoreTransaction::is_empty) | Bootstrap check at cycle start |
//! | [`exists_by_link`](StoreTransaction::exists_by_link) | Known-item check |
//! | [`insert`](StoreTransaction::insert) | Stage a new row |
//! | [`commit`](StoreTransaction::commit) / [`rollback`](StoreTransaction::rollback) | Close the scope |
//! | [`count`](ItemStore::count) / [`recent`](ItemStore::recent) | Read-only reporting |

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewItem, StoredItem};

/// One cycle's transactional view of the store.
///
/// Dropping a transaction without calling [`commit`](Self::commit) must
/// discard every staged insert. After `commit` or `rollback` the
/// transaction is finished; further calls return an error.
#[async_trait]
pub trait StoreTransaction: Send {
    /// True when the store holds no items at all.
    async fn is_empty(&mut self) -> Result<bool>;

    /// True when an item with this exact link has been stored.
    async fn exists_by_link(&mut self, link: &str) -> Result<bool>;

    /// Stage a new item. Inserting a link that already exists is rejected
    /// with [`Error::Persistence`](crate::Error::Persistence).
    async fn insert(&mut self, item: &NewItem) -> Result<()>;

    /// Make every staged insert durable, atomically.
    async fn commit(&mut self) -> Result<()>;

    /// Discard every staged insert.
    async fn rollback(&mut self) -> Result<()>;
}

/// Durable item store.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Open a transaction for one reconciliation cycle.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>>;

    /// Total number of stored items.
    async fn count(&self) -> Result<i64>;

    /// Most recently stored items, newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<StoredItem>>;
}
