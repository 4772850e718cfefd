use crate::application::funnel_metrics::lost_sessions;
use crate::domain::entities::funnel_record::FunnelMetrics;
use crate::domain::values::revenue::{project_revenue, RevenueAssumptions, RevenueOpportunity};

/// Lost-at-cart, lost-at-checkout and recoverable revenue across all pages.
pub fn revenue_opportunity(
    metrics: &[FunnelMetrics],
    assumptions: &RevenueAssumptions,
) -> RevenueOpportunity {
    let (at_cart, at_checkout) = lost_sessions(metrics);
    project_revenue(at_cart, at_checkout, assumptions)
}
