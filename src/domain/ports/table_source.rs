use serde::Serialize;

use crate::domain::entities::funnel_record::FunnelRecord;
use crate::domain::entities::order_line::OrderLine;
use crate::domain::error::PipelineError;

/// Rows read from a raw table plus the rows that were rejected.
///
/// Rows with malformed numeric cells are skipped and counted rather than
/// failing the whole load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedTable<T> {
    pub rows: Vec<T>,
    pub skipped_rows: usize,
    pub skipped_reasons: Vec<String>,
}

impl<T> LoadedTable<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            skipped_rows: 0,
            skipped_reasons: Vec::new(),
        }
    }

    pub fn skip(&mut self, reason: String) {
        self.skipped_rows += 1;
        self.skipped_reasons.push(reason);
    }
}

/// Where landing-page funnel rows come from.
pub trait FunnelSource {
    fn load_funnel(&self) -> Result<LoadedTable<FunnelRecord>, PipelineError>;
}

/// Where order lines come from.
pub trait OrderSource {
    fn load_orders(&self) -> Result<LoadedTable<OrderLine>, PipelineError>;
}

impl FunnelSource for Vec<FunnelRecord> {
    fn load_funnel(&self) -> Result<LoadedTable<FunnelRecord>, PipelineError> {
        Ok(LoadedTable::new(self.clone()))
    }
}

impl OrderSource for Vec<OrderLine> {
    fn load_orders(&self) -> Result<LoadedTable<OrderLine>, PipelineError> {
        Ok(LoadedTable::new(self.clone()))
    }
}
