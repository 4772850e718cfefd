pub mod funnel_source;
pub mod order_source;
pub mod schema;

pub use funnel_source::{read_funnel, CsvFunnelSource};
pub use order_source::{read_orders, CsvOrderSource};
