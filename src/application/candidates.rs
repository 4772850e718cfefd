//! Candidate filters over the joined table.
//!
//! Independent of the segment rules: each view is a plain predicate on a
//! joined row plus a sort. Cutoffs come from [`Thresholds`]; the pair-count
//! floor here is separate from the one applied to the affinity table.

use std::cmp::Ordering;

use crate::domain::entities::joined_record::JoinedRecord;
use crate::domain::values::thresholds::Thresholds;

/// Safe checkout upsell: the candidate's page converts once buyers reach
/// checkout, and it sees enough cart traffic to trust that rate.
pub fn is_checkout_upsell(record: &JoinedRecord, thresholds: &Thresholds) -> bool {
    record.completion_rate > thresholds.min_completion_rate_for_upsell
        && record.cart_additions >= thresholds.min_cart_additions_for_upsell
        && record.count >= thresholds.min_pair_count_for_candidates
}

/// Post-purchase offer: the candidate's page leaks carts, so it is better
/// pitched after the order than fought for on the product page.
pub fn is_post_purchase(record: &JoinedRecord, thresholds: &Thresholds) -> bool {
    record.abandonment_rate > thresholds.min_abandonment_rate_for_post_purchase
        && record.count >= thresholds.min_pair_count_for_candidates
}

/// Ordered by pair count, then completion rate, both descending.
pub fn checkout_upsells(joined: &[JoinedRecord], thresholds: &Thresholds) -> Vec<JoinedRecord> {
    let mut rows: Vec<JoinedRecord> = joined
        .iter()
        .filter(|r| is_checkout_upsell(r, thresholds))
        .cloned()
        .collect();
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| desc_f64(a.completion_rate, b.completion_rate))
            .then_with(|| by_names(a, b))
    });
    rows
}

/// Ordered by pair count, then abandonment rate, both descending.
pub fn post_purchase(joined: &[JoinedRecord], thresholds: &Thresholds) -> Vec<JoinedRecord> {
    let mut rows: Vec<JoinedRecord> = joined
        .iter()
        .filter(|r| is_post_purchase(r, thresholds))
        .cloned()
        .collect();
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| desc_f64(a.abandonment_rate, b.abandonment_rate))
            .then_with(|| by_names(a, b))
    });
    rows
}

/// The most frequently co-purchased joined pairs.
pub fn bundles(joined: &[JoinedRecord], limit: usize) -> Vec<JoinedRecord> {
    let mut rows = joined.to_vec();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| by_names(a, b)));
    rows.truncate(limit);
    rows
}

fn desc_f64(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn by_names(a: &JoinedRecord, b: &JoinedRecord) -> Ordering {
    a.main_product
        .cmp(&b.main_product)
        .then_with(|| a.upsell_candidate.cmp(&b.upsell_candidate))
        .then_with(|| a.landing_page_path.cmp(&b.landing_page_path))
}
