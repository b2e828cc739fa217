use serde::Serialize;
use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

use crate::foundation::error::{WallError, WallResult};
use crate::text::measure::TextMeasurer;
use crate::text::style::{StyledFragment, TextStyle};

/// Share of the line width the character fallback may fill. Absorbs subpixel and metric error.
pub const CHAR_FALLBACK_RATIO: f32 = 0.95;

/// One output line: fragments drawn left to right in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WrappedLine {
    /// Styled runs of the line.
    pub fragments: SmallVec<[StyledFragment; 3]>,
}

impl WrappedLine {
    fn single(text: String, style: TextStyle) -> Self {
        let mut fragments = SmallVec::new();
        fragments.push(StyledFragment { text, style });
        Self { fragments }
    }

    /// Line text with one space between fragments.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Greedy word packer with a character-level fallback for words wider than a line.
pub struct LineWrapper<'m> {
    measurer: &'m mut dyn TextMeasurer,
}

impl<'m> LineWrapper<'m> {
    /// Wrap using `measurer` for all extents.
    pub fn new(measurer: &'m mut dyn TextMeasurer) -> Self {
        Self { measurer }
    }

    /// Wrap a single run of text.
    pub fn wrap_text(
        &mut self,
        text: &str,
        style: TextStyle,
        max_width: f32,
    ) -> WallResult<Vec<WrappedLine>> {
        self.wrap(&[(text, style)], max_width)
    }

    /// Wrap styled fragments into lines no wider than `max_width`.
    ///
    /// Words are whitespace-delimited across all fragments. Consecutive words of one style on a
    /// line share a fragment. A word too wide for a line on its own is split by grapheme
    /// cluster at `max_width * CHAR_FALLBACK_RATIO`; a single cluster wider than that still
    /// gets its own line. Every input character lands on exactly one line, in order.
    pub fn wrap(
        &mut self,
        fragments: &[(&str, TextStyle)],
        max_width: f32,
    ) -> WallResult<Vec<WrappedLine>> {
        if !max_width.is_finite() {
            return Err(WallError::layout("wrap width must be finite"));
        }

        let mut lines = Vec::new();
        let mut acc = Vec::<(&str, TextStyle)>::new();

        for &(text, style) in fragments {
            for word in text.split_whitespace() {
                acc.push((word, style));
                if self.line_width(&build_line(&acc))? <= max_width {
                    continue;
                }
                acc.pop();
                if !acc.is_empty() {
                    lines.push(build_line(&acc));
                    acc.clear();
                }

                if self.measurer.width(word, style)? <= max_width {
                    acc.push((word, style));
                } else {
                    self.split_long_word(word, style, max_width, &mut lines)?;
                }
            }
        }

        if !acc.is_empty() {
            lines.push(build_line(&acc));
        }
        Ok(lines)
    }

    fn split_long_word(
        &mut self,
        word: &str,
        style: TextStyle,
        max_width: f32,
        lines: &mut Vec<WrappedLine>,
    ) -> WallResult<()> {
        let limit = max_width * CHAR_FALLBACK_RATIO;
        let mut cur = String::new();

        for g in word.graphemes(true) {
            let len = cur.len();
            cur.push_str(g);
            if self.measurer.width(&cur, style)? <= limit {
                continue;
            }
            cur.truncate(len);
            if !cur.is_empty() {
                lines.push(WrappedLine::single(std::mem::take(&mut cur), style));
            }
            cur.push_str(g);
        }

        if !cur.is_empty() {
            lines.push(WrappedLine::single(cur, style));
        }
        Ok(())
    }

    /// Sum of fragment widths plus one space (in the following fragment's style) between
    /// adjacent fragments.
    pub fn line_width(&mut self, line: &WrappedLine) -> WallResult<f32> {
        let mut w = 0.0;
        for (i, f) in line.fragments.iter().enumerate() {
            if i > 0 {
                w += self.measurer.width(" ", f.style)?;
            }
            w += self.measurer.width(&f.text, f.style)?;
        }
        Ok(w)
    }
}

fn build_line(words: &[(&str, TextStyle)]) -> WrappedLine {
    let mut line = WrappedLine::default();
    for &(word, style) in words {
        match line.fragments.last_mut() {
            Some(last) if last.style == style => {
                last.text.push(' ');
                last.text.push_str(word);
            }
            _ => line.fragments.push(StyledFragment::new(word, style)),
        }
    }
    line
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
