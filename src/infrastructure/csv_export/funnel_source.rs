use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use tracing::{debug, info};

use super::schema::{parse_count, resolve_columns, ColumnSpec};
use crate::domain::entities::funnel_record::FunnelRecord;
use crate::domain::error::PipelineError;
use crate::domain::ports::table_source::{FunnelSource, LoadedTable};

const PATH: &str = "landing page path";
const PAGE_TYPE: &str = "landing page type";
const SESSIONS: &str = "sessions";
const CART: &str = "sessions with cart additions";
const CHECKOUT: &str = "sessions that reached checkout";
const COMPLETED: &str = "sessions that completed checkout";

pub const FUNNEL_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        field: PATH,
        aliases: &["landing_page_path", "landing_page", "path"],
        tokens: &["landing", "path"],
        required: true,
    },
    ColumnSpec {
        field: PAGE_TYPE,
        aliases: &["landing_page_type", "page_type"],
        tokens: &["landing", "type"],
        required: false,
    },
    ColumnSpec {
        field: SESSIONS,
        aliases: &["sessions", "total_sessions"],
        tokens: &[],
        required: true,
    },
    ColumnSpec {
        field: CART,
        aliases: &["sessions_with_cart_additions", "added_to_cart"],
        tokens: &["cart"],
        required: true,
    },
    ColumnSpec {
        field: CHECKOUT,
        aliases: &["sessions_that_reached_checkout", "reached_checkout"],
        tokens: &["reached", "checkout"],
        required: true,
    },
    ColumnSpec {
        field: COMPLETED,
        aliases: &["sessions_that_completed_checkout", "completed_checkout"],
        tokens: &["completed", "checkout"],
        required: true,
    },
];

/// Landing-page funnel export read from CSV.
pub struct CsvFunnelSource {
    path: PathBuf,
}

impl CsvFunnelSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FunnelSource for CsvFunnelSource {
    fn load_funnel(&self) -> Result<LoadedTable<FunnelRecord>, PipelineError> {
        let file = File::open(&self.path)
            .map_err(|e| PipelineError::Io(format!("{}: {e}", self.path.display())))?;
        let table = read_funnel(file)?;
        info!(
            path = %self.path.display(),
            rows = table.rows.len(),
            skipped = table.skipped_rows,
            "funnel table loaded"
        );
        Ok(table)
    }
}

/// Parse a funnel export. Rows whose session counts are not whole numbers
/// are skipped and counted; a missing page type becomes "Unknown".
pub fn read_funnel<R: Read>(reader: R) -> Result<LoadedTable<FunnelRecord>, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns = resolve_columns("funnel", &headers, FUNNEL_COLUMNS)?;

    let mut table = LoadedTable::new(Vec::new());

    for result in rdr.records() {
        let record = result?;
        // physical line where the record starts, so quoted newlines are counted
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        // An empty path keeps its sessions in the totals; its key never joins.
        let path = columns.cell(&record, PATH).unwrap_or_default();

        let mut counts = [0u64; 4];
        let mut bad = None;
        for (slot, field) in counts.iter_mut().zip([SESSIONS, CART, CHECKOUT, COMPLETED]) {
            match parse_count(columns.cell(&record, field).unwrap_or_default()) {
                Ok(n) => *slot = n,
                Err(e) => {
                    bad = Some(format!("line {line}: {field}: {e}"));
                    break;
                }
            }
        }
        if let Some(reason) = bad {
            debug!(line, %reason, "skipping malformed funnel row");
            table.skip(reason);
            continue;
        }

        let [sessions, cart, checkout, completed] = counts;
        table.rows.push(FunnelRecord::new(
            path,
            columns.cell(&record, PAGE_TYPE).map(String::from),
            sessions,
            cart,
            checkout,
            completed,
        ));
    }

    if table.rows.is_empty() {
        return Err(PipelineError::EmptyInput("funnel".to_string()));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Landing page path,Landing page type,Sessions,Sessions with cart additions,Sessions that reached checkout,Sessions that completed checkout\n";

    #[test]
    fn test_reads_standard_export() {
        let csv = format!("{HEADER}/products/black-abaya,Product,100,20,10,8\n/,Homepage,500,30,12,9\n");
        let table = read_funnel(csv.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped_rows, 0);
        assert_eq!(table.rows[0].path, "/products/black-abaya");
        assert_eq!(table.rows[0].sessions_completed, 8);
    }

    #[test]
    fn test_blank_page_type_becomes_unknown() {
        let csv = format!("{HEADER}/products/dates,,10,2,1,1\n");
        let table = read_funnel(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0].page_type, "Unknown");
    }

    #[test]
    fn test_missing_page_type_column_becomes_unknown() {
        let csv = "Landing page path,Sessions,Sessions with cart additions,Sessions that reached checkout,Sessions that completed checkout\n/products/dates,10,2,1,1\n";
        let table = read_funnel(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0].page_type, "Unknown");
    }

    #[test]
    fn test_malformed_counts_are_skipped_and_counted() {
        let csv = format!(
            "{HEADER}/products/a,Product,abc,2,1,1\n/products/b,Product,10,2,1,1\n/products/c,Product,10,,1,1\n"
        );
        let table = read_funnel(csv.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].path, "/products/b");
        assert_eq!(table.skipped_rows, 2);
        assert!(table.skipped_reasons[0].contains("line 2"));
    }

    #[test]
    fn test_skip_reason_uses_physical_line() {
        let csv = format!(
            "{HEADER}\"/products/a\",\"Product\nPage\",10,2,1,1\n/products/b,Product,x,2,1,1\n"
        );
        let table = read_funnel(csv.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert!(table.skipped_reasons[0].starts_with("line 4:"));
    }

    #[test]
    fn test_empty_path_row_is_kept() {
        let csv = format!("{HEADER},Homepage,50,5,2,1\n/products/a,Product,10,2,1,1\n");
        let table = read_funnel(csv.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped_rows, 0);
        assert_eq!(table.rows[0].path, "");
        assert_eq!(table.rows[0].sessions, 50);
    }

    #[test]
    fn test_counts_beyond_u64_are_skipped() {
        let csv = format!("{HEADER}/a,Product,1e30,1e30,0,0\n/b,Product,1e19,1e19,0,0\n");
        let table = read_funnel(csv.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].path, "/b");
        assert_eq!(table.rows[0].sessions, 10_000_000_000_000_000_000);
        assert_eq!(table.skipped_rows, 1);
    }

    #[test]
    fn test_all_rows_malformed_is_empty_input() {
        let csv = format!("{HEADER}/products/a,Product,x,y,z,w\n");
        let err = read_funnel(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyInput(_)));
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Landing page path,Sessions\n/a,1\n";
        let err = read_funnel(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn { .. }));
    }
}
