//! Affinity–funnel join.
//!
//! Inner equijoin of affinity pairs (keyed by the slug of the upsell
//! candidate) with funnel pages (keyed by the last path segment). Pairs
//! without a matching page are dropped; the counts reported in
//! [`JoinDiagnostics`] are how an operator tells a healthy join from one
//! where the two exports simply do not share naming.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::entities::affinity_pair::AffinityPair;
use crate::domain::entities::funnel_record::FunnelMetrics;
use crate::domain::entities::joined_record::JoinedRecord;
use crate::domain::values::match_key::MatchKey;

/// Number of sample keys kept per side for the diagnostic preview.
pub const KEY_PREVIEW_LIMIT: usize = 10;

/// One raw value and the key it normalized to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyPreview {
    pub source: String,
    pub match_key: MatchKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinDiagnostics {
    pub affinity_rows: usize,
    pub funnel_rows: usize,
    pub joined_rows: usize,
    /// Affinity rows that found at least one funnel page.
    pub matched_affinity_rows: usize,
    pub affinity_key_preview: Vec<KeyPreview>,
    pub funnel_key_preview: Vec<KeyPreview>,
}

impl JoinDiagnostics {
    /// Share of affinity rows that matched, in percent.
    pub fn match_rate(&self) -> f64 {
        crate::domain::values::rate::percentage(
            self.matched_affinity_rows as f64,
            self.affinity_rows as f64,
        )
    }

    pub fn is_zero_match(&self) -> bool {
        self.joined_rows == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinOutcome {
    pub records: Vec<JoinedRecord>,
    pub diagnostics: JoinDiagnostics,
}

/// Join the affinity table against funnel metrics.
///
/// If several pages share a key every one of them produces a row (fan-out).
/// Empty keys never match: a title made only of symbols and a path ending
/// in `/` would otherwise join on `""`.
pub fn join_affinity_funnel(affinity: &[AffinityPair], funnel: &[FunnelMetrics]) -> JoinOutcome {
    let mut pages_by_key: HashMap<MatchKey, Vec<&FunnelMetrics>> = HashMap::new();
    for page in funnel {
        let key = MatchKey::from_landing_path(&page.record.path);
        if key.is_empty() {
            continue;
        }
        pages_by_key.entry(key).or_default().push(page);
    }

    let mut records = Vec::new();
    let mut matched_affinity_rows = 0usize;

    for pair in affinity {
        let key = MatchKey::from_product_title(&pair.upsell_candidate);
        let Some(pages) = pages_by_key.get(&key) else {
            continue;
        };
        matched_affinity_rows += 1;

        for page in pages {
            records.push(JoinedRecord {
                main_product: pair.main_product.clone(),
                upsell_candidate: pair.upsell_candidate.clone(),
                count: pair.count,
                match_key: key.clone(),
                landing_page_path: page.record.path.clone(),
                completion_rate: page.completion_rate,
                abandonment_rate: page.abandonment_rate,
                sessions: page.record.sessions,
                cart_additions: page.record.sessions_with_cart_add,
                cart_to_checkout_rate: page.cart_to_checkout_rate,
                conversion_rate: page.conversion_rate,
                add_to_cart_rate: page.add_to_cart_rate,
            });
        }
    }

    let diagnostics = JoinDiagnostics {
        affinity_rows: affinity.len(),
        funnel_rows: funnel.len(),
        joined_rows: records.len(),
        matched_affinity_rows,
        affinity_key_preview: affinity
            .iter()
            .take(KEY_PREVIEW_LIMIT)
            .map(|p| KeyPreview {
                source: p.upsell_candidate.clone(),
                match_key: MatchKey::from_product_title(&p.upsell_candidate),
            })
            .collect(),
        funnel_key_preview: funnel
            .iter()
            .take(KEY_PREVIEW_LIMIT)
            .map(|p| KeyPreview {
                source: p.record.path.clone(),
                match_key: MatchKey::from_landing_path(&p.record.path),
            })
            .collect(),
    };

    if diagnostics.is_zero_match() && !affinity.is_empty() && !funnel.is_empty() {
        warn!(
            affinity_rows = diagnostics.affinity_rows,
            funnel_rows = diagnostics.funnel_rows,
            "affinity-funnel join matched nothing; product titles likely do not slugify to landing page handles"
        );
    } else {
        info!(
            affinity_rows = diagnostics.affinity_rows,
            funnel_rows = diagnostics.funnel_rows,
            joined_rows = diagnostics.joined_rows,
            match_rate = diagnostics.match_rate(),
            "affinity-funnel join complete"
        );
    }

    JoinOutcome {
        records,
        diagnostics,
    }
}
