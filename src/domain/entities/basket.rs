use serde::Serialize;
use std::collections::BTreeSet;

/// Distinct product titles bought together under one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Basket {
    pub order_id: String,
    pub items: BTreeSet<String>,
}

impl Basket {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
