use tracing::debug;

use crate::domain::entities::funnel_record::{FunnelMetrics, FunnelRecord};

/// Attach completion, abandonment, cart-to-checkout, conversion and
/// add-to-cart rates to every record. Zero denominators give `0.0`.
pub fn derive_metrics(records: Vec<FunnelRecord>) -> Vec<FunnelMetrics> {
    let metrics: Vec<FunnelMetrics> = records.into_iter().map(FunnelMetrics::derive).collect();

    let anomalous = metrics.iter().filter(|m| m.abandonment_rate < 0.0).count();
    if anomalous > 0 {
        debug!(
            anomalous,
            "pages with more checkouts than cart additions (negative abandonment kept as-is)"
        );
    }
    metrics
}

/// Sessions that added to cart but never reached checkout, and sessions that
/// reached checkout but never completed, summed over all pages. Anomalous
/// rows contribute zero rather than a negative count; totals saturate at
/// `u64::MAX`.
pub fn lost_sessions(metrics: &[FunnelMetrics]) -> (u64, u64) {
    metrics.iter().fold((0u64, 0u64), |(cart, checkout), m| {
        let r = &m.record;
        (
            cart.saturating_add(
                r.sessions_with_cart_add
                    .saturating_sub(r.sessions_reached_checkout),
            ),
            checkout.saturating_add(
                r.sessions_reached_checkout
                    .saturating_sub(r.sessions_completed),
            ),
        )
    })
}
