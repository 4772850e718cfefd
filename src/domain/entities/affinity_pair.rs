use serde::Serialize;

/// Directional co-occurrence: customers who bought `main_product` also
/// bought `upsell_candidate` in `count` orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AffinityPair {
    pub main_product: String,
    pub upsell_candidate: String,
    pub count: u64,
}
