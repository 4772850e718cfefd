//! Tunable cutoffs for the affinity table, the candidate filters and the
//! segment table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum co-occurrence count for a pair to enter the affinity table.
    pub min_pair_count: u64,
    /// Minimum pair count for the checkout-upsell and post-purchase views.
    pub min_pair_count_for_candidates: u64,
    /// Minimum cart-addition sessions on the candidate's page for a checkout upsell.
    pub min_cart_additions_for_upsell: u64,
    /// Completion rate (percent) a checkout upsell page must exceed.
    pub min_completion_rate_for_upsell: f64,
    /// Abandonment rate (percent) a post-purchase page must exceed.
    pub min_abandonment_rate_for_post_purchase: f64,
    /// Pages with fewer sessions are left out of the segment table.
    pub min_sessions_threshold: u64,
    /// Rows kept in the bundle view.
    pub bundle_limit: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_pair_count: 2,
            min_pair_count_for_candidates: 2,
            min_cart_additions_for_upsell: 10,
            min_completion_rate_for_upsell: 20.0,
            min_abandonment_rate_for_post_purchase: 40.0,
            min_sessions_threshold: 10,
            bundle_limit: 15,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("min_completion_rate_for_upsell", self.min_completion_rate_for_upsell),
            (
                "min_abandonment_rate_for_post_purchase",
                self.min_abandonment_rate_for_post_purchase,
            ),
        ] {
            if !value.is_finite() {
                return Err(format!("{name} must be a finite number, got {value}"));
            }
        }
        Ok(())
    }
}
