//! CSV encoding with unconditional quoting

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::{Error, Result};

/// One row of `(column, value)` pairs in column order
pub type FieldRow = Vec<(String, String)>;

/// Encode rows as CSV text
///
/// The header is the union of the column names across all rows, in the order
/// they are first seen. A row missing a column gets an empty quoted value.
/// Lines end with LF, including the last one. No rows gives an empty string.
pub fn encode(rows: &[FieldRow]) -> Result<String> {
    let mut headers: Vec<&str> = Vec::new();
    for row in rows {
        for (column, _) in row {
            if !headers.contains(&column.as_str()) {
                headers.push(column);
            }
        }
    }

    if headers.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&headers)?;
    for row in rows {
        writer.write_record(headers.iter().map(|header| {
            row.iter()
                .find(|(column, _)| column.as_str() == *header)
                .map(|(_, value)| value.as_str())
                .unwrap_or("")
        }))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::io("Failed to flush CSV output", e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::parse(format!("CSV output is not UTF-8: {}", e)))
}
