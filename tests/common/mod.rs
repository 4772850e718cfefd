//! Shared test helpers.

use basketlens::domain::entities::affinity_pair::AffinityPair;
use basketlens::domain::entities::basket::Basket;
use basketlens::domain::entities::funnel_record::{FunnelMetrics, FunnelRecord};
use basketlens::domain::entities::order_line::OrderLine;

pub fn page(path: &str, sessions: u64, cart: u64, checkout: u64, completed: u64) -> FunnelRecord {
    FunnelRecord::new(path, Some("Product".to_string()), sessions, cart, checkout, completed)
}

pub fn metrics(path: &str, sessions: u64, cart: u64, checkout: u64, completed: u64) -> FunnelMetrics {
    FunnelMetrics::derive(page(path, sessions, cart, checkout, completed))
}

pub fn order(order_id: &str, titles: &[&str]) -> Vec<OrderLine> {
    titles.iter().map(|t| OrderLine::new(order_id, *t)).collect()
}

pub fn basket(order_id: &str, titles: &[&str]) -> Basket {
    Basket {
        order_id: order_id.to_string(),
        items: titles.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn pair(main: &str, candidate: &str, count: u64) -> AffinityPair {
    AffinityPair {
        main_product: main.to_string(),
        upsell_candidate: candidate.to_string(),
        count,
    }
}

pub fn count_of(pairs: &[AffinityPair], main: &str, candidate: &str) -> Option<u64> {
    pairs
        .iter()
        .find(|p| p.main_product == main && p.upsell_candidate == candidate)
        .map(|p| p.count)
}
