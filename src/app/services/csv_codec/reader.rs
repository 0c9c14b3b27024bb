//! Record reader over the `csv` crate
//!
//! Records are read with flexible widths and trimmed fields; the caller
//! repairs ragged rows against the header. A quote opened at the start of a
//! field and never closed would swallow the rest of the input, so the line it
//! opens on is re-read without quoting and reading resumes on the next line.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::Result;

/// One record with the physical line it starts on (1-based)
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Output of a full read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOutput {
    pub records: Vec<RawRecord>,

    /// Whitespace-only lines skipped. Empty lines never reach us.
    pub blank_lines: usize,

    /// Lines holding a quote that is never closed
    pub unterminated_quote_lines: Vec<usize>,
}

fn reader_builder(quoting: bool) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .quoting(quoting);
    builder
}

/// Read CSV text into records of trimmed fields
pub fn read_records(text: &str) -> Result<ReadOutput> {
    let mut output = ReadOutput::default();
    let mut offset = 0;
    let mut lines_before = 0;

    while offset < text.len() {
        let segment = &text[offset..];
        let mut lines = LineCounter::new(segment, lines_before);

        let mut records = reader_builder(true)
            .from_reader(segment.as_bytes())
            .into_records()
            .collect::<std::result::Result<Vec<StringRecord>, csv::Error>>()?;

        let open_quote = records
            .last()
            .map(|record| record_start(segment, record))
            .filter(|&start| quote_left_open(&segment[start..]));
        if open_quote.is_some() {
            records.pop();
        }

        for record in &records {
            let line = lines.line_at(record_start(segment, record));
            push_record(&mut output, line, record.iter());
        }

        let Some(start) = open_quote else {
            break;
        };

        let line = lines.line_at(start);
        output.unterminated_quote_lines.push(line);

        let (first_line, consumed) = split_first_line(&segment[start..]);
        let literal = reader_builder(false)
            .from_reader(first_line.as_bytes())
            .into_records()
            .collect::<std::result::Result<Vec<StringRecord>, csv::Error>>()?;
        for record in &literal {
            push_record(
                &mut output,
                line,
                record.iter().map(|field| field.trim_matches('"').trim()),
            );
        }

        offset += start + consumed;
        lines_before = line;
    }

    Ok(output)
}

fn push_record<'a>(output: &mut ReadOutput, line: usize, fields: impl Iterator<Item = &'a str>) {
    let fields: Vec<String> = fields.map(str::to_string).collect();
    if fields.len() == 1 && fields[0].is_empty() {
        output.blank_lines += 1;
        return;
    }
    output.records.push(RawRecord { line, fields });
}

/// Byte offset where a record's own text begins
///
/// The reader reports the position right after the previous record, which
/// may sit on a terminator or on empty lines it skipped.
fn record_start(segment: &str, record: &StringRecord) -> usize {
    let from = record
        .position()
        .map(|position| position.byte() as usize)
        .unwrap_or(0)
        .min(segment.len());
    let skipped = segment[from..]
        .bytes()
        .take_while(|b| *b == b'\r' || *b == b'\n')
        .count();
    from + skipped
}

/// True when a quote opened at the start of a field is still open at the end
///
/// Follows the reader's rules: a quote only opens at the start of a field,
/// `""` inside a quoted value is a literal quote, and any other quote is
/// part of the value.
pub fn quote_left_open(text: &str) -> bool {
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if at_field_start => in_quotes = true,
            ',' | '\r' | '\n' if !in_quotes => {
                at_field_start = true;
                continue;
            }
            _ => {}
        }
        at_field_start = false;
    }

    in_quotes
}

/// First physical line of `text` and the bytes it spans with its terminator
fn split_first_line(text: &str) -> (&str, usize) {
    match text.find(|c| c == '\r' || c == '\n') {
        Some(end) => {
            let terminator = if text[end..].starts_with("\r\n") { 2 } else { 1 };
            (&text[..end], end + terminator)
        }
        None => (text, text.len()),
    }
}

/// Count line breaks of any style in `text`
pub fn count_line_breaks(text: &str) -> usize {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n')))
        .count()
}

/// Maps increasing byte offsets in a segment to 1-based physical lines
struct LineCounter<'a> {
    text: &'a str,
    byte: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a str, lines_before: usize) -> Self {
        Self {
            text,
            byte: 0,
            line: lines_before + 1,
        }
    }

    fn line_at(&mut self, byte: usize) -> usize {
        if byte > self.byte {
            self.line += count_line_breaks(&self.text[self.byte..byte]);
            self.byte = byte;
        }
        self.line
    }
}
