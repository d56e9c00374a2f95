//! Builds orders from a query's sort specification.
//!
//! This is the seam between the query layer and the comparator core: one
//! composite order per query execution, fed to a stable sort over the
//! candidate records. The core itself logs nothing; degraded option
//! lookups and the built order are logged here.

use std::collections::HashMap;

use tracing::{debug, warn};

use loomdb_value::Record;

use crate::order::{CustomOrder, KeyOrder, Order, SetOrder};
use crate::sorts::{RelationFormat, SortKey};
use crate::store::OptionStore;

/// Builds one composite order from a query's sort keys.
///
/// Performs the single option-store lookup for each tag/status key; a
/// failed lookup is logged and degraded to an empty label set. Keys that
/// carry a custom value sequence are wrapped in a [`CustomOrder`] over
/// their key order.
#[must_use]
pub fn order_from_keys(space_id: &str, sort_keys: &[SortKey], store: &dyn OptionStore) -> SetOrder {
    let mut set = SetOrder::default();
    for sort_key in sort_keys {
        let labels = resolve_labels(space_id, sort_key, store);
        let key_order = KeyOrder::new(space_id, &sort_key.key)
            .with_direction(sort_key.direction)
            .with_placement(sort_key.empty_placement)
            .with_format(sort_key.format)
            .with_include_time(sort_key.include_time)
            .with_labels(labels);

        if sort_key.custom_order.is_empty() {
            set.push(key_order);
        } else {
            set.push(CustomOrder::new(
                &sort_key.key,
                sort_key.custom_order.iter().cloned(),
                key_order,
            ));
        }
    }
    debug!(order = %set, "built sort order");
    set
}

/// Sorts records in place under an order.
///
/// The sort is stable, so records the order considers equal keep their
/// original relative positions.
pub fn sort_records(records: &mut [Record], order: &Order) {
    records.sort_by(|a, b| order.cmp(a, b));
}

fn resolve_labels(
    space_id: &str,
    sort_key: &SortKey,
    store: &dyn OptionStore,
) -> HashMap<String, String> {
    if !matches!(
        sort_key.format,
        RelationFormat::Tag | RelationFormat::Status
    ) {
        return HashMap::new();
    }
    match store.relation_options(space_id, &sort_key.key) {
        Ok(labels) => labels,
        Err(error) => {
            warn!(key = %sort_key.key, %error, "option lookup failed, sorting with empty labels");
            HashMap::new()
        }
    }
}
