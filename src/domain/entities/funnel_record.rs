use serde::{Deserialize, Serialize};

use crate::domain::ports::segment_rule::SegmentInput;
use crate::domain::values::rate::percentage;

pub const UNKNOWN_PAGE_TYPE: &str = "Unknown";

/// Raw session counts for one landing page.
///
/// Stage counts are expected to be non-increasing down the funnel, but this
/// is not enforced: exports regularly contain pages where more sessions
/// reached checkout than added to cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelRecord {
    pub path: String,
    pub page_type: String,
    pub sessions: u64,
    pub sessions_with_cart_add: u64,
    pub sessions_reached_checkout: u64,
    pub sessions_completed: u64,
}

impl FunnelRecord {
    pub fn new(
        path: impl Into<String>,
        page_type: Option<String>,
        sessions: u64,
        sessions_with_cart_add: u64,
        sessions_reached_checkout: u64,
        sessions_completed: u64,
    ) -> Self {
        let page_type = page_type
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| UNKNOWN_PAGE_TYPE.to_string());
        Self {
            path: path.into(),
            page_type,
            sessions,
            sessions_with_cart_add,
            sessions_reached_checkout,
            sessions_completed,
        }
    }
}

/// A funnel record with its derived rates, all in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelMetrics {
    #[serde(flatten)]
    pub record: FunnelRecord,
    /// completed / reached checkout
    pub completion_rate: f64,
    /// (cart adds - reached checkout) / cart adds; negative on anomalous rows
    pub abandonment_rate: f64,
    /// reached checkout / cart adds
    pub cart_to_checkout_rate: f64,
    /// completed / sessions
    pub conversion_rate: f64,
    /// cart adds / sessions
    pub add_to_cart_rate: f64,
}

impl FunnelMetrics {
    pub fn derive(record: FunnelRecord) -> Self {
        let sessions = record.sessions as f64;
        let cart = record.sessions_with_cart_add as f64;
        let checkout = record.sessions_reached_checkout as f64;
        let completed = record.sessions_completed as f64;

        Self {
            completion_rate: percentage(completed, checkout),
            abandonment_rate: percentage(cart - checkout, cart),
            cart_to_checkout_rate: percentage(checkout, cart),
            conversion_rate: percentage(completed, sessions),
            add_to_cart_rate: percentage(cart, sessions),
            record,
        }
    }

    pub fn segment_input(&self) -> SegmentInput {
        SegmentInput {
            conversion_rate: self.conversion_rate,
            checkout_completion: self.completion_rate,
            cart_additions: self.record.sessions_with_cart_add,
            cart_to_checkout_rate: self.cart_to_checkout_rate,
            add_to_cart_rate: self.add_to_cart_rate,
        }
    }
}
