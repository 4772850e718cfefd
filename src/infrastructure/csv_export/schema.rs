//! Column mapping for raw exports.
//!
//! Each logical field declares the header names it accepts. Resolution tries
//! the exact aliases in order, then falls back to the first header that
//! contains every token (so `order_name_hash` still resolves "order name").
//! Headers are normalized before comparison.

use std::collections::HashMap;

use csv::StringRecord;

use crate::domain::error::PipelineError;

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub aliases: &'static [&'static str],
    pub tokens: &'static [&'static str],
    pub required: bool,
}

impl ColumnSpec {
    fn resolve(&self, headers: &[String]) -> Option<usize> {
        for alias in self.aliases {
            if let Some(idx) = headers.iter().position(|h| h == alias) {
                return Some(idx);
            }
        }
        if self.tokens.is_empty() {
            return None;
        }
        headers
            .iter()
            .position(|h| self.tokens.iter().all(|t| h.contains(t)))
    }

    fn describe(&self) -> String {
        let mut tried: Vec<String> = self.aliases.iter().map(|a| a.to_string()).collect();
        if !self.tokens.is_empty() {
            tried.push(format!("*{}*", self.tokens.join("*")));
        }
        tried.join(", ")
    }
}

/// Lowercase, trim, spaces to underscores, dots dropped.
pub fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .replace('.', "")
}

/// Resolved positions of the logical fields in one table.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    indices: HashMap<&'static str, usize>,
}

impl ColumnMap {
    pub fn index(&self, field: &str) -> Option<usize> {
        self.indices.get(field).copied()
    }

    /// Trimmed cell for `field`, `None` when the column is absent or the
    /// row is short.
    pub fn cell<'r>(&self, record: &'r StringRecord, field: &str) -> Option<&'r str> {
        self.index(field).and_then(|i| record.get(i)).map(str::trim)
    }
}

pub fn resolve_columns(
    table: &str,
    headers: &StringRecord,
    specs: &[ColumnSpec],
) -> Result<ColumnMap, PipelineError> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    let mut map = ColumnMap::default();

    for spec in specs {
        match spec.resolve(&normalized) {
            Some(idx) => {
                map.indices.insert(spec.field, idx);
            }
            None if spec.required => {
                return Err(PipelineError::MissingColumn {
                    table: table.to_string(),
                    field: spec.field.to_string(),
                    candidates: spec.describe(),
                });
            }
            None => {}
        }
    }
    Ok(map)
}

/// Non-negative whole number that fits in a `u64`; accepts `12` and `12.0`.
pub fn parse_count(cell: &str) -> Result<u64, String> {
    let cell = cell.trim();
    if let Ok(n) = cell.parse::<u64>() {
        return Ok(n);
    }
    match cell.parse::<f64>() {
        // `u64::MAX as f64` rounds up to 2^64, which is itself out of range.
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => {
            Ok(f as u64)
        }
        _ => Err(format!("'{cell}' is not a non-negative whole number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: ColumnSpec = ColumnSpec {
        field: "order name",
        aliases: &["order_name", "name"],
        tokens: &["order", "name"],
        required: true,
    };

    const QTY: ColumnSpec = ColumnSpec {
        field: "quantity",
        aliases: &["quantity"],
        tokens: &[],
        required: false,
    };

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" Order Name "), "order_name");
        assert_eq!(normalize_header("Lineitem qty."), "lineitem_qty");
        assert_eq!(normalize_header("\u{feff}Landing page path"), "landing_page_path");
    }

    #[test]
    fn test_alias_wins_over_token_match() {
        let headers = StringRecord::from(vec!["Shop order name raw", "Order Name"]);
        let map = resolve_columns("orders", &headers, &[ORDER]).unwrap();
        assert_eq!(map.index("order name"), Some(1));
    }

    #[test]
    fn test_token_fallback() {
        let headers = StringRecord::from(vec!["Product", "Order Name (Shopify)"]);
        let map = resolve_columns("orders", &headers, &[ORDER]).unwrap();
        assert_eq!(map.index("order name"), Some(1));
    }

    #[test]
    fn test_missing_required_names_field() {
        let headers = StringRecord::from(vec!["Product title"]);
        let err = resolve_columns("orders", &headers, &[ORDER]).unwrap_err();
        match err {
            PipelineError::MissingColumn { field, table, .. } => {
                assert_eq!(field, "order name");
                assert_eq!(table, "orders");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_optional_is_fine() {
        let headers = StringRecord::from(vec!["Order name"]);
        let map = resolve_columns("orders", &headers, &[ORDER, QTY]).unwrap();
        assert_eq!(map.index("quantity"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12"), Ok(12));
        assert_eq!(parse_count(" 7.0 "), Ok(7));
        assert!(parse_count("n/a").is_err());
        assert!(parse_count("-3").is_err());
        assert!(parse_count("2.5").is_err());
        assert!(parse_count("").is_err());
    }

    #[test]
    fn test_parse_count_rejects_out_of_range() {
        assert_eq!(parse_count("1e19"), Ok(10_000_000_000_000_000_000));
        assert!(parse_count("1e30").is_err());
        assert!(parse_count("18446744073709551616").is_err());
        assert_eq!(parse_count("18446744073709551615"), Ok(u64::MAX));
    }
}
