pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::join::{join_affinity_funnel, JoinDiagnostics};
use crate::application::pipeline::{PipelineUseCase, StrategyReport};
use crate::application::segments::{SegmentClassifier, SegmentTable};
use crate::config::AnalyticsConfig;
use crate::domain::entities::affinity_pair::AffinityPair;
use crate::domain::entities::funnel_record::FunnelMetrics;
use crate::domain::error::PipelineError;
use crate::domain::ports::table_source::{FunnelSource, OrderSource};

/// Entry point for hosts: load raw tables through the source ports and run
/// all or part of the pipeline. Every call recomputes from scratch.
pub struct BasketLens {
    pipeline: PipelineUseCase,
}

impl BasketLens {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            pipeline: PipelineUseCase::new(config.thresholds.clone(), config.revenue.clone()),
        }
    }

    pub fn with_classifier(config: &AnalyticsConfig, classifier: SegmentClassifier) -> Self {
        Self {
            pipeline: PipelineUseCase::new(config.thresholds.clone(), config.revenue.clone())
                .with_classifier(classifier),
        }
    }

    pub fn report(
        &self,
        funnel: &dyn FunnelSource,
        orders: &dyn OrderSource,
    ) -> Result<StrategyReport, PipelineError> {
        self.pipeline.execute(funnel.load_funnel()?, orders.load_orders()?)
    }

    pub fn funnel_metrics(&self, funnel: &dyn FunnelSource) -> Result<Vec<FunnelMetrics>, PipelineError> {
        self.pipeline.funnel_metrics(funnel.load_funnel()?)
    }

    pub fn affinity(&self, orders: &dyn OrderSource) -> Result<Vec<AffinityPair>, PipelineError> {
        self.pipeline.affinity(&orders.load_orders()?)
    }

    pub fn segments(&self, funnel: &dyn FunnelSource) -> Result<SegmentTable, PipelineError> {
        let metrics = self.funnel_metrics(funnel)?;
        let min_sessions = self.pipeline.thresholds().min_sessions_threshold;
        Ok(self.pipeline.classifier().segment_pages(&metrics, min_sessions))
    }

    /// Join diagnostics only: row counts and sample keys from both sides.
    pub fn match_keys(
        &self,
        funnel: &dyn FunnelSource,
        orders: &dyn OrderSource,
    ) -> Result<JoinDiagnostics, PipelineError> {
        let metrics = self.funnel_metrics(funnel)?;
        let affinity = self.affinity(orders)?;
        Ok(join_affinity_funnel(&affinity, &metrics).diagnostics)
    }
}
