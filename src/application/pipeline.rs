//! Pipeline use case: runs every stage over the two raw tables and
//! assembles the strategy report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::application::affinity::AffinityAggregator;
use crate::application::baskets::extract_baskets;
use crate::application::candidates::{bundles, checkout_upsells, post_purchase};
use crate::application::funnel_metrics::derive_metrics;
use crate::application::join::{join_affinity_funnel, JoinDiagnostics};
use crate::application::revenue::revenue_opportunity;
use crate::application::segments::{SegmentClassifier, SegmentTable};
use crate::domain::entities::affinity_pair::AffinityPair;
use crate::domain::entities::funnel_record::{FunnelMetrics, FunnelRecord};
use crate::domain::entities::joined_record::JoinedRecord;
use crate::domain::entities::order_line::OrderLine;
use crate::domain::error::PipelineError;
use crate::domain::ports::table_source::LoadedTable;
use crate::domain::values::revenue::{RevenueAssumptions, RevenueOpportunity};
use crate::domain::values::thresholds::Thresholds;

/// Rows read and rejected per raw table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    pub funnel_rows: usize,
    pub funnel_skipped_rows: usize,
    pub order_lines: usize,
    pub order_skipped_rows: usize,
    pub baskets: usize,
}

/// Every table the dashboard renders, from one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub generated_at: DateTime<Utc>,
    pub thresholds: Thresholds,
    pub load: LoadSummary,
    pub funnel: Vec<FunnelMetrics>,
    pub affinity: Vec<AffinityPair>,
    pub joined: Vec<JoinedRecord>,
    pub join_diagnostics: JoinDiagnostics,
    pub checkout_upsells: Vec<JoinedRecord>,
    pub post_purchase: Vec<JoinedRecord>,
    pub bundles: Vec<JoinedRecord>,
    pub segments: SegmentTable,
    pub revenue: RevenueOpportunity,
}

pub struct PipelineUseCase {
    thresholds: Thresholds,
    revenue: RevenueAssumptions,
    classifier: SegmentClassifier,
}

impl PipelineUseCase {
    pub fn new(thresholds: Thresholds, revenue: RevenueAssumptions) -> Self {
        Self {
            thresholds,
            revenue,
            classifier: SegmentClassifier::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: SegmentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn classifier(&self) -> &SegmentClassifier {
        &self.classifier
    }

    /// Funnel stage only: derived rates for every page.
    pub fn funnel_metrics(
        &self,
        funnel: LoadedTable<FunnelRecord>,
    ) -> Result<Vec<FunnelMetrics>, PipelineError> {
        require_rows("funnel", &funnel)?;
        Ok(derive_metrics(funnel.rows))
    }

    /// Basket and affinity stages only.
    pub fn affinity(&self, orders: &LoadedTable<OrderLine>) -> Result<Vec<AffinityPair>, PipelineError> {
        require_rows("orders", orders)?;
        let baskets = extract_baskets(&orders.rows);
        Ok(AffinityAggregator::new(self.thresholds.min_pair_count).aggregate(&baskets))
    }

    pub fn execute(
        &self,
        funnel: LoadedTable<FunnelRecord>,
        orders: LoadedTable<OrderLine>,
    ) -> Result<StrategyReport, PipelineError> {
        require_rows("funnel", &funnel)?;
        require_rows("orders", &orders)?;

        for (table, skipped) in [
            ("funnel", funnel.skipped_rows),
            ("orders", orders.skipped_rows),
        ] {
            if skipped > 0 {
                warn!(table, skipped_rows = skipped, "rows skipped while loading");
            }
        }

        let funnel_skipped_rows = funnel.skipped_rows;
        let metrics = derive_metrics(funnel.rows);

        let baskets = extract_baskets(&orders.rows);
        let affinity =
            AffinityAggregator::new(self.thresholds.min_pair_count).aggregate(&baskets);

        let outcome = join_affinity_funnel(&affinity, &metrics);
        let joined = outcome.records;

        let checkout_upsells = checkout_upsells(&joined, &self.thresholds);
        let post_purchase = post_purchase(&joined, &self.thresholds);
        let bundles = bundles(&joined, self.thresholds.bundle_limit);
        let segments = self
            .classifier
            .segment_pages(&metrics, self.thresholds.min_sessions_threshold);
        let revenue = revenue_opportunity(&metrics, &self.revenue);

        info!(
            pages = metrics.len(),
            baskets = baskets.len(),
            affinity_pairs = affinity.len(),
            joined = joined.len(),
            checkout_upsells = checkout_upsells.len(),
            post_purchase = post_purchase.len(),
            "pipeline run complete"
        );

        Ok(StrategyReport {
            generated_at: Utc::now(),
            thresholds: self.thresholds.clone(),
            load: LoadSummary {
                funnel_rows: metrics.len(),
                funnel_skipped_rows,
                order_lines: orders.rows.len(),
                order_skipped_rows: orders.skipped_rows,
                baskets: baskets.len(),
            },
            funnel: metrics,
            affinity,
            joined,
            join_diagnostics: outcome.diagnostics,
            checkout_upsells,
            post_purchase,
            bundles,
            segments,
            revenue,
        })
    }
}

/// A raw table with no usable rows is a structural failure, not an empty
/// result.
fn require_rows<T>(table: &str, loaded: &LoadedTable<T>) -> Result<(), PipelineError> {
    if loaded.rows.is_empty() {
        return Err(PipelineError::EmptyInput(table.to_string()));
    }
    Ok(())
}
