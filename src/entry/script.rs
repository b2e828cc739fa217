//! Hiragana / katakana classification over Unicode code-point ranges.

/// Script bucket of a single reading string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingScript {
    /// Hiragana only (kun reading).
    Hiragana,
    /// Katakana only (on reading).
    Katakana,
    /// Anything else, including mixed scripts and Latin text.
    Mixed,
}

/// Return `true` for code points in the Hiragana block (U+3040..=U+309F).
pub fn is_hiragana(ch: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&ch)
}

/// Return `true` for code points in the Katakana block (U+30A0..=U+30FF).
pub fn is_katakana(ch: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&ch)
}

fn is_hiragana_run_char(ch: char) -> bool {
    is_hiragana(ch) || matches!(ch, '・' | '.' | ',' | 'ー')
}

fn is_katakana_run_char(ch: char) -> bool {
    is_katakana(ch) || matches!(ch, '・' | ',' | 'ー')
}

/// Classify one reading.
///
/// Whitespace is allowed inside pure readings. Hiragana readings may also carry `.` as the
/// okurigana marker.
pub fn classify_reading(reading: &str) -> ReadingScript {
    if reading.is_empty() {
        return ReadingScript::Mixed;
    }
    if reading
        .chars()
        .all(|c| c.is_whitespace() || is_hiragana_run_char(c))
    {
        return ReadingScript::Hiragana;
    }
    if reading
        .chars()
        .all(|c| c.is_whitespace() || is_katakana_run_char(c))
    {
        return ReadingScript::Katakana;
    }
    ReadingScript::Mixed
}

/// Readings sorted into their script buckets, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Readings {
    /// Hiragana readings.
    pub hiragana: Vec<String>,
    /// Katakana readings.
    pub katakana: Vec<String>,
}

impl Readings {
    /// Classify one already-split reading and append it to the matching bucket.
    ///
    /// Mixed readings contribute their hiragana runs and katakana runs separately; Latin or
    /// other text is dropped.
    pub fn push(&mut self, reading: &str) {
        let reading = reading.trim();
        if reading.is_empty() {
            return;
        }
        match classify_reading(reading) {
            ReadingScript::Hiragana => self.hiragana.push(reading.to_owned()),
            ReadingScript::Katakana => self.katakana.push(reading.to_owned()),
            ReadingScript::Mixed => {
                self.hiragana.extend(runs(reading, is_hiragana_run_char));
                self.katakana.extend(runs(reading, is_katakana_run_char));
            }
        }
    }

    /// Return `true` when neither bucket holds a reading.
    pub fn is_empty(&self) -> bool {
        self.hiragana.is_empty() && self.katakana.is_empty()
    }
}

/// Split a reading list on any of `separators` and classify every part.
pub fn split_readings(list: &str, separators: &[char]) -> Readings {
    let mut out = Readings::default();
    for part in list.split(|c: char| separators.contains(&c)) {
        out.push(part);
    }
    out
}

/// Return `true` when `line` consists only of kana plus reading separators and holds at least
/// one kana character.
pub fn is_kana_line(line: &str) -> bool {
    let mut any_kana = false;
    for ch in line.chars() {
        if is_hiragana(ch) || is_katakana(ch) {
            any_kana = true;
        } else if !(ch.is_whitespace() || matches!(ch, ';' | ',' | '、' | '.' | '・')) {
            return false;
        }
    }
    any_kana
}

/// Maximal runs of characters accepted by `pred`, in order.
fn runs(s: &str, pred: fn(char) -> bool) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    for ch in s.chars() {
        if pred(ch) {
            cur.push(ch);
        } else if !cur.is_empty() {
            out.push(std::mem::take(&mut cur));
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/entry/script.rs"]
mod tests;
