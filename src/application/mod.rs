pub mod affinity;
pub mod baskets;
pub mod candidates;
pub mod funnel_metrics;
pub mod join;
pub mod pipeline;
pub mod revenue;
pub mod segments;
