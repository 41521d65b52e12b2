//! Reconciliation engine: decides which items in a deduplicated batch are
//! new, notifies about them, and persists them in one transaction.
//!
//! # State machine
//!
//! ```text
//!   cycle start ──▶ store empty? ──yes──▶ Bootstrap: persist only
//!                        │
//!                        no
//!                        ▼
//!                     Steady: notify, then persist (is_sent = true
//!                             whatever the dispatch outcome)
//! ```
//!
//! The mode is re-evaluated at the start of every cycle and never stored,
//! so a store emptied from outside falls back into bootstrap on the next
//! cycle.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{NewItem, RawItem};
use crate::notify::Notifier;
use crate::store::{ItemStore, StoreTransaction};

/// Seeding progress is logged once per this many items during bootstrap.
const BOOTSTRAP_PROGRESS_EVERY: usize = 50;

/// Engine state for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleMode {
    /// Store was empty at cycle start: seed without notifying.
    Bootstrap,
    /// Store held at least one item: notify and persist.
    Steady,
}

/// Summary of a committed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub mode: CycleMode,
    /// Items handed to the engine (already deduplicated).
    pub unique: usize,
    /// Items skipped because their link was already stored.
    pub known: usize,
    /// Items inserted and committed this cycle.
    pub new_items: usize,
    /// Dispatcher invocations.
    pub notified: usize,
    /// Dispatcher invocations that reported [`Delivery::Failed`].
    pub dispatch_failures: usize,
}

impl CycleReport {
    fn new(mode: CycleMode, unique: usize) -> Self {
        Self {
            mode,
            unique,
            known: 0,
            new_items: 0,
            notified: 0,
            dispatch_failures: 0,
        }
    }
}

/// Reconcile a deduplicated batch against the store.
///
/// `items` must already be unique by link (see [`crate::dedup::dedup`]).
/// `today` becomes the `date_posted` of every new row.
///
/// On success every new item is durable. On any store error the cycle's
/// transaction is rolled back, nothing is persisted, and the error is
/// returned. Notifications already sent for that cycle are not undone; the
/// same items will be seen as new again on the next cycle.
pub async fn reconcile(
    store: &dyn ItemStore,
    notifier: &dyn Notifier,
    items: &[RawItem],
    today: NaiveDate,
) -> Result<CycleReport> {
    let mut tx = store.begin().await?;

    let report = match stage(tx.as_mut(), notifier, items, today).await {
        Ok(report) => report,
        Err(e) => {
            abandon(tx.as_mut()).await;
            return Err(e);
        }
    };

    if let Err(e) = tx.commit().await {
        abandon(tx.as_mut()).await;
        return Err(e);
    }

    Ok(report)
}

async fn stage(
    tx: &mut dyn StoreTransaction,
    notifier: &dyn Notifier,
    items: &[RawItem],
    today: NaiveDate,
) -> Result<CycleReport> {
    let mode = if tx.is_empty().await? {
        CycleMode::Bootstrap
    } else {
        CycleMode::Steady
    };
    let mut report = CycleReport::new(mode, items.len());
    let mut pending: Vec<NewItem> = Vec::new();

    for item in items {
        if tx.exists_by_link(&item.link).await? {
            report.known += 1;
            continue;
        }

        match mode {
            CycleMode::Bootstrap => {
                if reports_progress(pending.len()) {
                    info!("Saving initial history... ({} done)", pending.len());
                }
            }
            CycleMode::Steady => {
                debug!(source = %item.source, link = %item.link, "dispatching new item");
                report.notified += 1;
                if !notifier.notify(item).await.is_delivered() {
                    report.dispatch_failures += 1;
                    warn!(
                        link = %item.link,
                        "notification failed; recording item as sent anyway"
                    );
                }
            }
        }

        pending.push(NewItem::observed(item, today));
    }

    for new_item in &pending {
        tx.insert(new_item).await?;
    }
    report.new_items = pending.len();

    Ok(report)
}

/// Whether a bootstrap progress line is due with `seeded` items already
/// staged.
fn reports_progress(seeded: usize) -> bool {
    seeded % BOOTSTRAP_PROGRESS_EVERY == 0
}

async fn abandon(tx: &mut dyn StoreTransaction) {
    if let Err(e) = tx.rollback().await {
        warn!("rollback after failed cycle also failed: {}", e);
    }
}
