pub mod match_key;
pub mod rate;
pub mod revenue;
pub mod segment;
pub mod thresholds;
