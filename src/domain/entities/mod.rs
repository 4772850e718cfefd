pub mod affinity_pair;
pub mod basket;
pub mod funnel_record;
pub mod joined_record;
pub mod order_line;
