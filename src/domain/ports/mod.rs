pub mod segment_rule;
pub mod table_source;
