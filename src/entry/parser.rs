use std::path::Path;

use crate::entry::model::{Compound, Entry};
use crate::foundation::error::{WallError, WallResult};

/// A source record that did not produce an [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based row (CSV) or line (text) where the record starts.
    pub location: usize,
    /// Human-readable reason.
    pub reason: String,
}

/// Result of parsing one source: valid entries in source order plus the records skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedEntries {
    /// Valid entries.
    pub entries: Vec<Entry>,
    /// Records dropped at parse time. These never count as generation failures.
    pub skipped: Vec<SkippedRecord>,
}

impl ParsedEntries {
    pub(crate) fn accept(&mut self, location: usize, entry: Entry) {
        if entry.is_valid() {
            self.entries.push(entry);
        } else {
            self.skip(location, "missing kanji character");
        }
    }

    pub(crate) fn skip(&mut self, location: usize, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(location, %reason, "skipping invalid record");
        self.skipped.push(SkippedRecord { location, reason });
    }
}

/// Turns one source dialect into the common [`Entry`] model.
pub trait EntryParser: Send + Sync {
    /// Short dialect name for diagnostics.
    fn dialect(&self) -> &'static str;

    /// Parse a whole document held in memory.
    ///
    /// Record-level problems are reported through [`ParsedEntries::skipped`]; an `Err` means the
    /// document as a whole could not be read.
    fn parse_str(&self, input: &str) -> WallResult<ParsedEntries>;

    /// Read and parse a UTF-8 file.
    fn parse_path(&self, path: &Path) -> WallResult<ParsedEntries> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            WallError::parse(format!(
                "read {} source '{}': {e}",
                self.dialect(),
                path.display()
            ))
        })?;
        self.parse_str(&text)
    }
}

/// Supported source dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values with a `kanji,meaning,readings,compounds` header.
    Csv,
    /// Blank-line separated text blocks.
    ScrapedText,
}

impl SourceFormat {
    /// Pick a dialect from the file extension: `.csv` is CSV, anything else is scraped text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::ScrapedText,
        }
    }

    /// Parser implementing this dialect.
    pub fn parser(self) -> Box<dyn EntryParser> {
        match self {
            Self::Csv => Box::new(crate::entry::csv_dialect::CsvEntryParser::new()),
            Self::ScrapedText => Box::new(crate::entry::scraped_dialect::ScrapedTextParser::new()),
        }
    }
}

/// Parse `HEADWORD (READING) = GLOSS`.
///
/// The headword runs up to the first whitespace or `(`; the reading must be non-empty. Anything
/// after `=` (trimmed) is the gloss.
pub fn parse_compound(s: &str) -> Option<Compound> {
    let s = s.trim_start();
    let head_end = s
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(s.len());
    if head_end == 0 {
        return None;
    }
    let (headword, rest) = s.split_at(head_end);

    let rest = rest.trim_start().strip_prefix('(')?;
    let close = rest.find(')')?;
    if close == 0 {
        return None;
    }
    let (reading, rest) = rest.split_at(close);
    let rest = rest[1..].trim_start().strip_prefix('=')?;
    if rest.is_empty() {
        return None;
    }

    Some(Compound::new(headword.trim(), reading.trim(), rest.trim()))
}

/// Parse every `;`-separated compound in `list`, dropping parts that do not match.
pub fn parse_compound_list(list: &str) -> Vec<Compound> {
    list.split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter_map(|p| {
            let c = parse_compound(p);
            if c.is_none() {
                tracing::debug!(part = p, "dropping unrecognized compound");
            }
            c
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/entry/parser.rs"]
mod tests;
