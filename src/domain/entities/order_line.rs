use serde::{Deserialize, Serialize};

/// One purchased line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: String,
    pub product_title: String,
    /// `None` when the export has no quantity column.
    pub quantity: Option<f64>,
}

impl OrderLine {
    pub fn new(order_id: impl Into<String>, product_title: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            product_title: product_title.into(),
            quantity: None,
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Lines with a recorded non-positive quantity (refunds, removed items)
    /// do not count as purchased.
    pub fn is_purchased(&self) -> bool {
        self.quantity.map_or(true, |q| q > 0.0)
    }
}
