//! Core data models.
//!
//! [`RawItem`]s flow out of source adapters and live for one cycle.
//! [`NewItem`]s are pending rows built by the reconciliation engine, and
//! [`StoredItem`]s are what the store hands back once a row is durable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};

/// Listing entry produced by an adapter for a single cycle.
///
/// `link` is the natural key: an absolute `http`/`https` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawItem {
    pub source: String,
    pub title: String,
    pub link: String,
}

impl RawItem {
    /// Build a validated item.
    ///
    /// The title is trimmed and must be non-empty. The link must parse as
    /// an absolute `http` or `https` URL.
    pub fn new(
        source: impl Into<String>,
        title: impl AsRef<str>,
        link: impl AsRef<str>,
    ) -> Result<Self> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(Error::InvalidItem("empty title".to_string()));
        }

        let link = link.as_ref().trim();
        let parsed = Url::parse(link)
            .map_err(|e| Error::InvalidItem(format!("bad link '{}': {}", link, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidItem(format!(
                "unsupported scheme '{}' in {}",
                parsed.scheme(),
                link
            )));
        }

        Ok(Self {
            source: source.into(),
            title: title.to_string(),
            link: link.to_string(),
        })
    }
}

/// A row the engine has decided to persist, before the store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    pub link: String,
    /// Date the engine observed the item, formatted `YYYY-MM-DD`.
    pub date_posted: String,
    pub is_sent: bool,
}

impl NewItem {
    /// Build the pending row for a newly discovered item.
    ///
    /// `is_sent` is always true: bootstrap-seeded items count as handled,
    /// and steady-state items are persisted as sent whatever the dispatch
    /// outcome.
    pub fn observed(item: &RawItem, today: NaiveDate) -> Self {
        Self {
            title: item.title.clone(),
            link: item.link.clone(),
            date_posted: today.format("%Y-%m-%d").to_string(),
            is_sent: true,
        }
    }
}

/// Durable record of an item that has been seen at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredItem {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub date_posted: String,
    pub is_sent: bool,
    pub created_at: DateTime<Utc>,
}
