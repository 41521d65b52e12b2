//! In-batch deduplication by link.
//!
//! Listing pages often repeat the same link (a notice pinned in two tabs,
//! a "new" badge next to the regular entry). The batch is collapsed before
//! it reaches the store so the engine never considers one link twice.

use std::collections::HashSet;

use crate::models::RawItem;

/// Collapse `items` to one entry per distinct link.
///
/// The first occurrence of each link wins and the relative order of first
/// occurrences is preserved.
pub fn dedup(items: Vec<RawItem>) -> Vec<RawItem> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.link.clone()))
        .collect()
}
