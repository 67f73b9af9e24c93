//! CSV ingestion of booking-sheet exports.

use std::path::Path;

use serde_json::Value;

use crate::error::Result;

use super::fields::RawRow;

/// Read an exported sheet into raw rows. Cells stay untyped strings; all
/// interpretation happens during normalization. Empty cells are omitted so
/// alias resolution can fall through to the next candidate column.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = RawRow::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            if field.is_empty() {
                continue;
            }
            row.insert(header.to_string(), Value::String(field.to_string()));
        }
        rows.push(row);
    }

    tracing::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
