//! The default segment rules, highest priority first.
//!
//! Thresholds are percentages except `cart_additions`, which is a session
//! count. Each rule is a plain predicate; priority comes only from its
//! position in [`default_rules`].

use crate::domain::ports::segment_rule::{SegmentInput, SegmentRule};
use crate::domain::values::segment::Segment;

/// Converts well and finishes checkout.
pub struct StarRule;

impl SegmentRule for StarRule {
    fn segment(&self) -> Segment {
        Segment::Star
    }

    fn matches(&self, input: &SegmentInput) -> bool {
        input.conversion_rate >= 5.0 && input.checkout_completion >= 60.0
    }
}

/// Plenty of cart activity that rarely turns into orders.
pub struct HighTrafficUnderperformerRule;

impl SegmentRule for HighTrafficUnderperformerRule {
    fn segment(&self) -> Segment {
        Segment::HighTrafficUnderperformer
    }

    fn matches(&self, input: &SegmentInput) -> bool {
        input.cart_additions >= 50 && input.conversion_rate < 3.0
    }
}

/// Buyers who reach checkout finish it, but few carts get there.
pub struct HiddenGemRule;

impl SegmentRule for HiddenGemRule {
    fn segment(&self) -> Segment {
        Segment::HiddenGem
    }

    fn matches(&self, input: &SegmentInput) -> bool {
        input.checkout_completion >= 60.0 && input.cart_to_checkout_rate < 40.0
    }
}

/// Carts reach checkout and die there.
pub struct CheckoutLeakerRule;

impl SegmentRule for CheckoutLeakerRule {
    fn segment(&self) -> Segment {
        Segment::CheckoutLeaker
    }

    fn matches(&self, input: &SegmentInput) -> bool {
        input.cart_to_checkout_rate >= 50.0 && input.checkout_completion < 40.0
    }
}

/// Visitors add to cart readily but leave before checkout.
pub struct CartAbandonerRule;

impl SegmentRule for CartAbandonerRule {
    fn segment(&self) -> Segment {
        Segment::CartAbandoner
    }

    fn matches(&self, input: &SegmentInput) -> bool {
        input.add_to_cart_rate >= 10.0 && input.cart_to_checkout_rate < 50.0
    }
}

pub struct NeedsAttentionRule;

impl SegmentRule for NeedsAttentionRule {
    fn segment(&self) -> Segment {
        Segment::NeedsAttention
    }

    fn matches(&self, input: &SegmentInput) -> bool {
        input.conversion_rate < 2.0
    }
}

pub fn default_rules() -> Vec<Box<dyn SegmentRule>> {
    vec![
        Box::new(StarRule),
        Box::new(HighTrafficUnderperformerRule),
        Box::new(HiddenGemRule),
        Box::new(CheckoutLeakerRule),
        Box::new(CartAbandonerRule),
        Box::new(NeedsAttentionRule),
    ]
}
