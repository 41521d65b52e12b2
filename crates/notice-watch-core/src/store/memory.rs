//! In-memory [`ItemStore`] implementation for tests and dry runs.
//!
//! Committed rows live in a `Vec` behind `std::sync::RwLock`. Each
//! transaction buffers its inserts locally and applies them in one step on
//! commit, so an uncommitted transaction never changes what other readers
//! see.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{Error, Result};
use crate::models::{NewItem, StoredItem};

use super::{ItemStore, StoreTransaction};

#[derive(Default)]
struct State {
    items: Vec<StoredItem>,
    next_id: i64,
}

/// In-memory store. Cloning shares the same underlying rows.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every committed row, in insertion order.
    pub fn items(&self) -> Vec<StoredItem> {
        self.state
            .read()
            .map(|s| s.items.clone())
            .unwrap_or_default()
    }

    /// Seed committed rows directly, bypassing the engine.
    pub fn seed(&self, items: &[NewItem]) -> Result<()> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        for item in items {
            if state.items.iter().any(|s| s.link == item.link) {
                return Err(duplicate(&item.link));
            }
            push_row(&mut state, item);
        }
        Ok(())
    }
}

fn poisoned() -> Error {
    Error::persistence("in-memory store lock poisoned")
}

fn duplicate(link: &str) -> Error {
    Error::Persistence(format!("UNIQUE constraint failed: notifications.link ({})", link))
}

fn push_row(state: &mut State, item: &NewItem) {
    state.next_id += 1;
    let id = state.next_id;
    state.items.push(StoredItem {
        id,
        title: item.title.clone(),
        link: item.link.clone(),
        date_posted: item.date_posted.clone(),
        is_sent: item.is_sent,
        created_at: Utc::now(),
    });
}

struct InMemoryTransaction {
    state: Arc<RwLock<State>>,
    pending: Vec<NewItem>,
    finished: bool,
}

impl InMemoryTransaction {
    fn ensure_open(&self) -> Result<()> {
        if self.finished {
            return Err(Error::persistence("transaction already finished"));
        }
        Ok(())
    }
}

#[async_trait]
impl StoreTransaction for InMemoryTransaction {
    async fn is_empty(&mut self) -> Result<bool> {
        self.ensure_open()?;
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.items.is_empty() && self.pending.is_empty())
    }

    async fn exists_by_link(&mut self, link: &str) -> Result<bool> {
        self.ensure_open()?;
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.items.iter().any(|i| i.link == link) || self.pending.iter().any(|i| i.link == link))
    }

    async fn insert(&mut self, item: &NewItem) -> Result<()> {
        if self.exists_by_link(&item.link).await? {
            return Err(duplicate(&item.link));
        }
        self.pending.push(item.clone());
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.finished = true;
        let mut state = self.state.write().map_err(|_| poisoned())?;
        if let Some(dup) = self
            .pending
            .iter()
            .find(|p| state.items.iter().any(|s| s.link == p.link))
        {
            return Err(duplicate(&dup.link));
        }
        for item in self.pending.drain(..) {
            push_row(&mut state, &item);
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.finished = true;
        self.pending.clear();
        Ok(())
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>> {
        Ok(Box::new(InMemoryTransaction {
            state: Arc::clone(&self.state),
            pending: Vec::new(),
            finished: false,
        }))
    }

    async fn count(&self) -> Result<i64> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.items.len() as i64)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<StoredItem>> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let limit = usize::try_from(limit.max(0)).unwrap_or(0);
        Ok(state.items.iter().rev().take(limit).cloned().collect())
    }
}
