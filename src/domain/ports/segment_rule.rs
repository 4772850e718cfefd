//! Segment rule port.
//!
//! Defines the [`SegmentRule`] trait and the [`SegmentInput`] view that rules
//! evaluate. A classifier holds an ordered list of rules and assigns the
//! segment of the first rule that matches.
//!
//! # Overview
//!
//! - Implement [`SegmentRule`] to add a new bucket
//! - Build a [`SegmentInput`] from a funnel or joined record
//! - Rule order is priority order; earlier rules shadow later ones

use serde::Serialize;

use crate::domain::values::segment::Segment;

/// The funnel figures a segment rule can look at. All rates are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SegmentInput {
    pub conversion_rate: f64,
    /// Completed / reached checkout.
    pub checkout_completion: f64,
    /// Sessions with cart additions (a count, not a rate).
    pub cart_additions: u64,
    pub cart_to_checkout_rate: f64,
    pub add_to_cart_rate: f64,
}

/// A single threshold rule mapping to one [`Segment`].
///
/// # Example
///
/// ```ignore
/// struct BigSpender;
///
/// impl SegmentRule for BigSpender {
///     fn segment(&self) -> Segment { Segment::Star }
///     fn matches(&self, input: &SegmentInput) -> bool { input.conversion_rate > 20.0 }
/// }
/// ```
pub trait SegmentRule: Send + Sync {
    /// Bucket assigned when this rule matches.
    fn segment(&self) -> Segment;

    /// Whether the input satisfies this rule's condition.
    fn matches(&self, input: &SegmentInput) -> bool;
}
