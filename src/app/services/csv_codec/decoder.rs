//! CSV decoding into header-keyed rows

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::{Error, Result};

use super::reader::read_records;
use super::stats::{CsvRow, DecodeStats, DecodedCsv};

/// Decode CSV text into headers and rows
///
/// Fails only when the text has no header row. Ragged rows and unclosed
/// quotes are repaired and reported through [`DecodeStats::warnings`].
pub fn decode(text: &str) -> Result<DecodedCsv> {
    let scanned = read_records(text)?;
    let mut stats = DecodeStats::new();
    stats.blank_lines = scanned.blank_lines;

    for line in &scanned.unterminated_quote_lines {
        let message = format!(
            "Line {}: quoted value is never closed, line read without quoting",
            line
        );
        warn!("{}", message);
        stats.warnings.push(message);
    }

    let mut records = scanned.records.into_iter();
    let header = records
        .next()
        .ok_or_else(|| Error::parse("CSV input is empty"))?;
    if header.fields.iter().all(String::is_empty) {
        return Err(Error::parse("CSV header row has no column names"));
    }

    let headers = header.fields;
    debug!("CSV headers: {:?}", headers);

    let mut rows = Vec::new();
    for (index, record) in records.enumerate() {
        let row_number = index + 1;
        let mut values = record.fields;

        if values.len() != headers.len() {
            let message = format!(
                "Row {} (line {}): expected {} fields, found {}",
                row_number,
                record.line,
                headers.len(),
                values.len()
            );
            warn!("{}", message);
            stats.warnings.push(message);
            if values.len() < headers.len() {
                stats.rows_padded += 1;
            } else {
                stats.rows_truncated += 1;
            }
            values.resize(headers.len(), String::new());
        }

        let mut fields = HashMap::with_capacity(headers.len());
        for (name, value) in headers.iter().zip(values) {
            // First occurrence of a duplicated header wins
            fields.entry(name.clone()).or_insert(value);
        }

        rows.push(CsvRow {
            row: row_number,
            line: record.line,
            fields,
        });
    }

    stats.rows_decoded = rows.len();
    info!(
        "Decoded {} CSV rows ({} ragged, {} blank lines skipped)",
        stats.rows_decoded,
        stats.ragged_rows(),
        stats.blank_lines
    );

    Ok(DecodedCsv {
        headers,
        rows,
        stats,
    })
}

/// Read and decode a CSV file
pub async fn decode_file(path: &Path) -> Result<DecodedCsv> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(format!("Failed to read CSV file {}", path.display()), e))?;
    decode(&text)
}
