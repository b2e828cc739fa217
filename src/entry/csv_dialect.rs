use serde::Deserialize;

use crate::entry::model::Entry;
use crate::entry::parser::{EntryParser, ParsedEntries, parse_compound_list};
use crate::entry::script::split_readings;
use crate::foundation::error::{WallError, WallResult};

const REQUIRED_COLUMNS: [&str; 4] = ["kanji", "meaning", "readings", "compounds"];

/// CSV rows shaped like
///
/// ```text
/// kanji,meaning,readings,compounds
/// 腕,"arm, ability, talent",ワン; うで,"右腕 (うわん) = right arm; 手腕 (しゅわん) = ability"
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvEntryParser;

impl CsvEntryParser {
    /// Create the parser.
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    kanji: String,
    #[serde(default)]
    meaning: String,
    #[serde(default)]
    readings: String,
    #[serde(default)]
    compounds: String,
}

impl CsvRow {
    fn into_entry(self) -> Entry {
        let readings = split_readings(self.readings.trim(), &[';', ',']);
        Entry {
            character: self.kanji.trim().to_owned(),
            meaning: self.meaning.trim().to_owned(),
            hiragana_readings: readings.hiragana,
            katakana_readings: readings.katakana,
            compounds: parse_compound_list(self.compounds.trim()),
            jis_code: None,
        }
    }
}

impl EntryParser for CsvEntryParser {
    fn dialect(&self) -> &'static str {
        "csv"
    }

    fn parse_str(&self, input: &str) -> WallResult<ParsedEntries> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(input.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| WallError::parse(format!("read csv header: {e}")))?;
        for col in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.trim() == col) {
                return Err(WallError::parse(format!(
                    "csv header is missing column '{col}' (expected {})",
                    REQUIRED_COLUMNS.join(",")
                )));
            }
        }

        let mut out = ParsedEntries::default();
        // Row 1 is the header.
        for (i, row) in rdr.deserialize::<CsvRow>().enumerate() {
            let row_num = i + 2;
            match row {
                Ok(row) => out.accept(row_num, row.into_entry()),
                Err(e) => out.skip(row_num, format!("malformed row: {e}")),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/entry/csv_dialect.rs"]
mod tests;
