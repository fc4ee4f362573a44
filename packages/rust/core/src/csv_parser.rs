//! CSV text → rows.
//!
//! By default every physical line is parsed on its own, so a quoted field
//! cannot span a line break; an unterminated quote simply runs to the end of
//! its line. With [`ParseOptions::multiline_quotes`] the whole text is fed to
//! the reader at once and quoted line breaks are kept inside the field.
//!
//! In both modes fields are trimmed, trailing empty fields are dropped, and a
//! row with no non-empty field produces nothing.

use csv::{ReaderBuilder, StringRecord, Terminator};
use merchimport_shared::{ImportConfig, Row};
use tracing::warn;

/// Knobs for [`parse_csv`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Let quoted fields span line breaks.
    pub multiline_quotes: bool,
}

impl From<&ImportConfig> for ParseOptions {
    fn from(config: &ImportConfig) -> Self {
        Self {
            multiline_quotes: config.multiline_quotes,
        }
    }
}

/// Parse CSV text into rows, in source order.
pub fn parse_csv(content: &str, options: &ParseOptions) -> Vec<Row> {
    if options.multiline_quotes {
        return read_rows(content, Terminator::CRLF);
    }

    // A lone `\r` inside a line is data, not a record break.
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .flat_map(|line| read_rows(line, Terminator::Any(b'\n')))
        .collect()
}

fn read_rows(text: &str, terminator: Terminator) -> Vec<Row> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(terminator)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {
                if let Some(row) = normalize_record(&record) {
                    rows.push(row);
                }
            }
            Ok(false) => break,
            Err(e) => {
                warn!(error = %e, "stopping at unreadable CSV record");
                break;
            }
        }
    }
    rows
}

fn normalize_record(record: &StringRecord) -> Option<Row> {
    let mut fields: Row = record.iter().map(clean_field).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    (!fields.is_empty()).then_some(fields)
}

/// Trim a raw field. The reader only honours a quote at the very start of a
/// field, so `  "abc"  ` arrives with its quotes intact and is unwrapped here.
/// A padded quoted span containing a comma has already been split by then
/// and comes through as separate fields.
fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let padded = trimmed.len() != raw.len();

    if padded && trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        return trimmed[1..trimmed.len() - 1]
            .replace("\"\"", "\"")
            .trim()
            .to_string();
    }
    trimmed.to_string()
}
