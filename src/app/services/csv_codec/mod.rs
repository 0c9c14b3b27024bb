//! CSV codec for student import and export
//!
//! Converts between CSV text and header-keyed rows on top of the `csv`
//! crate. Encoding quotes every value unconditionally; decoding tolerates the
//! usual spreadsheet quirks instead of failing on them.
//!
//! ## Architecture
//!
//! - [`reader`] - Flexible record reader with unclosed-quote recovery
//! - [`decoder`] - Header extraction, ragged-row repair and row assembly
//! - [`encoder`] - Header union and quoted output
//! - [`stats`] - Decoding statistics and result structures
//!
//! ## Decoding rules
//!
//! - CRLF, CR and LF line endings are treated the same
//! - Commas and line breaks inside double quotes belong to the value
//! - `""` inside a quoted value is a literal quote; a quote in the middle
//!   of an unquoted value is kept as written
//! - Every field is trimmed after extraction
//! - Blank lines are skipped, including a trailing one
//! - A quote that opens a field and never closes only affects its own line:
//!   that line is read without quoting and a warning is recorded
//! - Rows with too few fields are padded, rows with too many are truncated;
//!   both are logged and counted, never rejected
//!
//! Only text with no header at all is a hard failure ([`crate::Error::Parse`]).
//!
//! ## Usage
//!
//! ```rust
//! use roster::app::services::csv_codec::{decode, encode};
//!
//! # fn example() -> roster::Result<()> {
//! let rows = vec![vec![
//!     ("name".to_string(), "Lee, Ann".to_string()),
//!     ("course".to_string(), "Art".to_string()),
//! ]];
//! let text = encode(&rows)?;
//! assert_eq!(text, "\"name\",\"course\"\n\"Lee, Ann\",\"Art\"\n");
//!
//! let decoded = decode(&text)?;
//! assert_eq!(decoded.rows[0].get("name"), Some("Lee, Ann"));
//! # Ok(())
//! # }
//! ```

pub mod decoder;
pub mod encoder;
pub mod reader;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use decoder::{decode, decode_file};
pub use encoder::{FieldRow, encode};
pub use stats::{CsvRow, DecodeStats, DecodedCsv};
