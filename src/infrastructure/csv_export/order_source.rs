use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use tracing::{debug, info};

use super::schema::{resolve_columns, ColumnSpec};
use crate::domain::entities::order_line::OrderLine;
use crate::domain::error::PipelineError;
use crate::domain::ports::table_source::{LoadedTable, OrderSource};

const ORDER_NAME: &str = "order name";
const PRODUCT_TITLE: &str = "product title";
const QUANTITY: &str = "quantity";

// Shopify order exports call the order "Name" and the product "Lineitem name".
pub const ORDER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        field: ORDER_NAME,
        aliases: &["order_name", "order_id", "order_number", "name"],
        tokens: &["order", "name"],
        required: true,
    },
    ColumnSpec {
        field: PRODUCT_TITLE,
        aliases: &["product_title", "lineitem_name", "product_name"],
        tokens: &["product", "title"],
        required: true,
    },
    ColumnSpec {
        field: QUANTITY,
        aliases: &["quantity", "lineitem_quantity", "net_quantity", "qty"],
        tokens: &["quantity"],
        required: false,
    },
];

/// Order-line export read from CSV.
pub struct CsvOrderSource {
    path: PathBuf,
}

impl CsvOrderSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OrderSource for CsvOrderSource {
    fn load_orders(&self) -> Result<LoadedTable<OrderLine>, PipelineError> {
        let file = File::open(&self.path)
            .map_err(|e| PipelineError::Io(format!("{}: {e}", self.path.display())))?;
        let table = read_orders(file)?;
        info!(
            path = %self.path.display(),
            rows = table.rows.len(),
            skipped = table.skipped_rows,
            "order table loaded"
        );
        Ok(table)
    }
}

/// Parse an order-line export. Lines without an order or a product title,
/// or with a non-numeric quantity, are skipped and counted. A blank
/// quantity cell is treated as absent.
pub fn read_orders<R: Read>(reader: R) -> Result<LoadedTable<OrderLine>, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns = resolve_columns("orders", &headers, ORDER_COLUMNS)?;

    let mut table = LoadedTable::new(Vec::new());

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let order_id = columns.cell(&record, ORDER_NAME).unwrap_or_default();
        let title = columns.cell(&record, PRODUCT_TITLE).unwrap_or_default();
        if order_id.is_empty() || title.is_empty() {
            debug!(line, "order line without order name or product title");
            table.skip(format!("line {line}: missing order name or product title"));
            continue;
        }

        let quantity = match columns.cell(&record, QUANTITY) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<f64>() {
                Ok(q) if q.is_finite() => Some(q),
                _ => {
                    table.skip(format!("line {line}: quantity '{raw}' is not a number"));
                    continue;
                }
            },
        };

        table.rows.push(OrderLine {
            order_id: order_id.to_string(),
            product_title: title.to_string(),
            quantity,
        });
    }

    if table.rows.is_empty() {
        return Err(PipelineError::EmptyInput("orders".to_string()));
    }
    Ok(table)
}
