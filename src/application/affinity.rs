//! Item-to-item co-occurrence counting.
//!
//! Every basket of `n` distinct titles contributes `n × (n − 1)` ordered
//! pairs. Both directions of a pair are kept so that "bought A, offer B"
//! and "bought B, offer A" can be filtered independently downstream.

use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::debug;

use crate::domain::entities::affinity_pair::AffinityPair;
use crate::domain::entities::basket::Basket;

pub struct AffinityAggregator {
    min_pair_count: u64,
}

impl AffinityAggregator {
    pub fn new(min_pair_count: u64) -> Self {
        Self { min_pair_count }
    }

    /// Raw counts for every ordered pair, before the minimum-count cut.
    pub fn count_pairs(baskets: &[Basket]) -> BTreeMap<(String, String), u64> {
        let mut counts: BTreeMap<(String, String), u64> = BTreeMap::new();
        for basket in baskets {
            for pair in basket.items.iter().permutations(2) {
                let key = (pair[0].clone(), pair[1].clone());
                *counts.entry(key).or_default() += 1;
            }
        }
        counts
    }

    /// Affinity table: pairs seen in at least `min_pair_count` baskets,
    /// most frequent first, ties by (main, candidate).
    pub fn aggregate(&self, baskets: &[Basket]) -> Vec<AffinityPair> {
        let counts = Self::count_pairs(baskets);
        let distinct_pairs = counts.len();

        let mut pairs: Vec<AffinityPair> = counts
            .into_iter()
            .filter(|(_, count)| *count >= self.min_pair_count)
            .map(|((main_product, upsell_candidate), count)| AffinityPair {
                main_product,
                upsell_candidate,
                count,
            })
            .collect();

        pairs.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.main_product.cmp(&b.main_product))
                .then_with(|| a.upsell_candidate.cmp(&b.upsell_candidate))
        });

        debug!(
            distinct_pairs,
            kept = pairs.len(),
            min_pair_count = self.min_pair_count,
            "affinity pairs aggregated"
        );
        pairs
    }
}
