//! Shelf occupancy bookkeeping shared by package and shipment flows.

use std::collections::BTreeMap;
use tracing::warn;

use crate::domain::entities::Package;
use crate::domain::repositories::ShelfRepository;

/// Counter changes implied by packages moving between states.
///
/// Each pair is `(before, after)`; `None` means the package did not exist on
/// that side. A package occupies a shelf while it is in stock with a shelf set.
pub(crate) fn shelf_deltas<'a, I>(changes: I) -> Vec<(String, i64)>
where
    I: IntoIterator<Item = (Option<&'a Package>, Option<&'a Package>)>,
{
    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    for (before, after) in changes {
        if let Some(shelf) = before.and_then(Package::occupied_shelf) {
            *totals.entry(shelf.to_string()).or_default() -= 1;
        }
        if let Some(shelf) = after.and_then(Package::occupied_shelf) {
            *totals.entry(shelf.to_string()).or_default() += 1;
        }
    }
    totals.into_iter().filter(|(_, d)| *d != 0).collect()
}

/// Applies counter changes. Failures are logged; `recount` repairs drift.
pub(crate) async fn sync_shelves<S: ShelfRepository>(shelves: &S, deltas: Vec<(String, i64)>) {
    if deltas.is_empty() {
        return;
    }
    if let Err(e) = shelves.adjust_counts(deltas).await {
        warn!(error = %e, "Failed to update shelf counters");
    }
}
