use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::domain::entities::basket::Basket;
use crate::domain::entities::order_line::OrderLine;

/// Group order lines into per-order sets of distinct product titles.
///
/// Buying two of the same item counts once: a basket records what was
/// bought together, not how many. Lines with a non-positive quantity are
/// ignored, and orders left with fewer than two distinct titles are dropped
/// because they cannot form a pair.
pub fn extract_baskets(lines: &[OrderLine]) -> Vec<Basket> {
    let mut by_order: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
    let mut ignored_lines = 0usize;

    for line in lines {
        if !line.is_purchased() {
            ignored_lines += 1;
            continue;
        }
        by_order
            .entry(line.order_id.as_str())
            .or_default()
            .insert(line.product_title.clone());
    }

    let total_orders = by_order.len();
    let baskets: Vec<Basket> = by_order
        .into_iter()
        .filter(|(_, items)| items.len() >= 2)
        .map(|(order_id, items)| Basket {
            order_id: order_id.to_string(),
            items,
        })
        .collect();

    debug!(
        total_orders,
        multi_item_orders = baskets.len(),
        ignored_lines,
        "baskets extracted"
    );
    baskets
}
