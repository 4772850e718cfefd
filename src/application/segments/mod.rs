//! Segment classification.
//!
//! Evaluates an ordered list of [`SegmentRule`]s, first match wins, and
//! falls back to [`Segment::AveragePerformer`]. Used for the page-level
//! segment table and, optionally, for joined affinity rows.

pub mod rules;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::domain::entities::funnel_record::FunnelMetrics;
use crate::domain::entities::joined_record::JoinedRecord;
use crate::domain::ports::segment_rule::{SegmentInput, SegmentRule};
use crate::domain::values::segment::Segment;

#[derive(Debug, Clone, Serialize)]
pub struct SegmentedPage {
    pub path: String,
    pub page_type: String,
    pub sessions: u64,
    pub segment: Segment,
    #[serde(flatten)]
    pub input: SegmentInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentedPair {
    pub main_product: String,
    pub upsell_candidate: String,
    pub count: u64,
    pub landing_page_path: String,
    pub segment: Segment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentCount {
    pub segment: Segment,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentTable {
    pub min_sessions: u64,
    /// Pages left out for having fewer than `min_sessions` sessions.
    pub excluded_pages: usize,
    pub pages: Vec<SegmentedPage>,
    pub counts: Vec<SegmentCount>,
}

pub struct SegmentClassifier {
    rules: Vec<Box<dyn SegmentRule>>,
}

impl Default for SegmentClassifier {
    fn default() -> Self {
        Self::new(rules::default_rules())
    }
}

impl SegmentClassifier {
    pub fn new(rules: Vec<Box<dyn SegmentRule>>) -> Self {
        Self { rules }
    }

    pub fn classify(&self, input: &SegmentInput) -> Segment {
        self.rules
            .iter()
            .find(|rule| rule.matches(input))
            .map(|rule| rule.segment())
            .unwrap_or(Segment::AveragePerformer)
    }

    /// Label every page with at least `min_sessions` sessions, ordered by
    /// sessions (desc) then path.
    pub fn segment_pages(&self, metrics: &[FunnelMetrics], min_sessions: u64) -> SegmentTable {
        let mut pages: Vec<SegmentedPage> = metrics
            .iter()
            .filter(|m| m.record.sessions >= min_sessions)
            .map(|m| {
                let input = m.segment_input();
                SegmentedPage {
                    path: m.record.path.clone(),
                    page_type: m.record.page_type.clone(),
                    sessions: m.record.sessions,
                    segment: self.classify(&input),
                    input,
                }
            })
            .collect();
        pages.sort_by(|a, b| b.sessions.cmp(&a.sessions).then_with(|| a.path.cmp(&b.path)));

        let excluded_pages = metrics.len() - pages.len();
        let counts = count_segments(pages.iter().map(|p| p.segment));

        debug!(
            segmented = pages.len(),
            excluded_pages, min_sessions, "pages segmented"
        );

        SegmentTable {
            min_sessions,
            excluded_pages,
            pages,
            counts,
        }
    }

    pub fn segment_pairs(&self, joined: &[JoinedRecord]) -> Vec<SegmentedPair> {
        joined
            .iter()
            .map(|j| SegmentedPair {
                main_product: j.main_product.clone(),
                upsell_candidate: j.upsell_candidate.clone(),
                count: j.count,
                landing_page_path: j.landing_page_path.clone(),
                segment: self.classify(&j.segment_input()),
            })
            .collect()
    }
}

/// Counts per segment in priority order, omitting empty segments.
fn count_segments(segments: impl Iterator<Item = Segment>) -> Vec<SegmentCount> {
    let mut counts: BTreeMap<Segment, usize> = BTreeMap::new();
    for segment in segments {
        *counts.entry(segment).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(segment, count)| SegmentCount { segment, count })
        .collect()
}
