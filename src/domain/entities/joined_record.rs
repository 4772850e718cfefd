use serde::Serialize;

use crate::domain::ports::segment_rule::SegmentInput;
use crate::domain::values::match_key::MatchKey;

/// An affinity pair with the funnel performance of the candidate's landing
/// page attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRecord {
    pub main_product: String,
    pub upsell_candidate: String,
    pub count: u64,
    pub match_key: MatchKey,
    pub landing_page_path: String,
    pub completion_rate: f64,
    pub abandonment_rate: f64,
    pub sessions: u64,
    pub cart_additions: u64,
    pub cart_to_checkout_rate: f64,
    pub conversion_rate: f64,
    pub add_to_cart_rate: f64,
}

impl JoinedRecord {
    pub fn segment_input(&self) -> SegmentInput {
        SegmentInput {
            conversion_rate: self.conversion_rate,
            checkout_completion: self.completion_rate,
            cart_additions: self.cart_additions,
            cart_to_checkout_rate: self.cart_to_checkout_rate,
            add_to_cart_rate: self.add_to_cart_rate,
        }
    }
}
