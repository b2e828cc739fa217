use crate::entry::model::Entry;
use crate::entry::parser::{EntryParser, ParsedEntries, parse_compound, parse_compound_list};
use crate::entry::script::{Readings, is_kana_line, split_readings};
use crate::foundation::error::WallResult;

/// Plain-text dialect copied from dictionary pages, one block per entry:
///
/// ```text
/// 腕
/// JIS: 5F53
/// arm, ability, talent
/// ワン、うで
/// 右腕 (うわん) = right arm
/// 手腕 (しゅわん) = ability
/// ```
///
/// Blocks are separated by blank lines. The first line is the character; the rest are
/// classified by content, so their order inside a block does not matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrapedTextParser;

impl ScrapedTextParser {
    /// Create the parser.
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug)]
enum LineKind<'a> {
    Jis(&'a str),
    Compounds,
    Readings,
    Text,
}

fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix("JIS") {
        let rest = rest.trim_start();
        let rest = rest
            .strip_prefix(':')
            .or_else(|| rest.strip_prefix('：'))
            .unwrap_or(rest);
        return LineKind::Jis(rest.trim());
    }
    if parse_compound(line).is_some() {
        return LineKind::Compounds;
    }
    if is_kana_line(line) {
        return LineKind::Readings;
    }
    LineKind::Text
}

fn parse_block(lines: &[(usize, &str)], out: &mut ParsedEntries) {
    let Some(&(start, first)) = lines.first() else {
        return;
    };
    if !matches!(classify_line(first), LineKind::Text) {
        out.skip(start, "block does not start with a kanji character");
        return;
    }

    let mut entry = Entry {
        character: first.to_owned(),
        ..Entry::default()
    };
    let mut readings = Readings::default();
    let mut meaning = Vec::<&str>::new();

    for &(_, line) in &lines[1..] {
        match classify_line(line) {
            LineKind::Jis(code) if !code.is_empty() => entry.jis_code = Some(code.to_owned()),
            LineKind::Jis(_) => {}
            LineKind::Compounds => entry.compounds.extend(parse_compound_list(line)),
            LineKind::Readings => {
                let r = split_readings(line, &[';', ',', '、']);
                readings.hiragana.extend(r.hiragana);
                readings.katakana.extend(r.katakana);
            }
            LineKind::Text => meaning.push(line),
        }
    }

    entry.meaning = meaning.join(", ");
    entry.hiragana_readings = readings.hiragana;
    entry.katakana_readings = readings.katakana;
    out.accept(start, entry);
}

impl EntryParser for ScrapedTextParser {
    fn dialect(&self) -> &'static str {
        "scraped-text"
    }

    fn parse_str(&self, input: &str) -> WallResult<ParsedEntries> {
        let mut out = ParsedEntries::default();
        let mut block = Vec::<(usize, &str)>::new();

        for (i, raw) in input.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                parse_block(&block, &mut out);
                block.clear();
            } else {
                block.push((i + 1, line));
            }
        }
        parse_block(&block, &mut out);

        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/entry/scraped_dialect.rs"]
mod tests;
