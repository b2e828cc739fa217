use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::entry::model::Compound;
use crate::foundation::error::{WallError, WallResult};
use crate::layout::wrap::{LineWrapper, WrappedLine};
use crate::text::measure::TextMeasurer;
use crate::text::style::{StyledFragment, TextStyle};

/// Fixed pitches and gaps of the compound block, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockMetrics {
    /// Gap after the headword.
    pub headword_gap: f32,
    /// Gap after the reading.
    pub reading_gap: f32,
    /// Minimum room left after headword + reading before gloss words are packed beside them.
    pub min_gloss_room: f32,
    /// Vertical pitch of one line.
    pub line_spacing: f32,
    /// Inner padding on every side of the box.
    pub padding: f32,
    /// Space kept free below the box.
    pub bottom_margin: f32,
    /// Content height of the box when there are no compounds.
    pub empty_content_height: f32,
}

impl Default for BlockMetrics {
    fn default() -> Self {
        Self {
            headword_gap: 8.0,
            reading_gap: 12.0,
            min_gloss_room: 20.0,
            line_spacing: 30.0,
            padding: 15.0,
            bottom_margin: 30.0,
            empty_content_height: 30.0,
        }
    }
}

impl BlockMetrics {
    /// Reject metrics that would make the height computation meaningless.
    pub fn validate(&self) -> WallResult<()> {
        let all = [
            self.headword_gap,
            self.reading_gap,
            self.min_gloss_room,
            self.line_spacing,
            self.padding,
            self.bottom_margin,
            self.empty_content_height,
        ];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(WallError::validation(
                "block metrics must be finite and >= 0",
            ));
        }
        if self.line_spacing <= 0.0 {
            return Err(WallError::validation("block line_spacing must be > 0"));
        }
        Ok(())
    }
}

/// A fragment with its x-offset from the block's text origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedFragment {
    /// The styled text.
    pub fragment: StyledFragment,
    /// Left edge relative to the text origin.
    pub x: f32,
    /// Measured width.
    pub width: f32,
}

/// A wrapped line of the compound block with positioned fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockLine {
    /// Fragments in draw order.
    pub fragments: SmallVec<[PlacedFragment; 3]>,
}

impl BlockLine {
    /// Right edge of the last fragment.
    pub fn width(&self) -> f32 {
        self.fragments.last().map_or(0.0, |f| f.x + f.width)
    }

    /// Fragment texts joined by single spaces.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.fragment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Wrapped, height-clamped compound lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBlock {
    /// All lines in order, including any that do not fit the box.
    pub lines: Vec<BlockLine>,
    /// Wrap width the lines were laid out for.
    pub box_width: f32,
    /// Outer box height including padding.
    pub box_height: f32,
    /// Inner padding.
    pub padding: f32,
    /// Line pitch.
    pub line_spacing: f32,
}

impl LayoutBlock {
    /// Number of lines drawn: lines are emitted from `padding` at `line_spacing` pitch until
    /// the cursor passes `box_height - padding`.
    pub fn visible_line_count(&self) -> usize {
        let content = self.box_height - 2.0 * self.padding;
        if content < 0.0 || self.line_spacing <= 0.0 {
            return 0;
        }
        let n = (content / self.line_spacing).floor() as usize + 1;
        n.min(self.lines.len())
    }

    /// Lines that are drawn.
    pub fn visible_lines(&self) -> &[BlockLine] {
        &self.lines[..self.visible_line_count()]
    }

    /// Lines laid out but dropped for lack of vertical room.
    pub fn clipped_line_count(&self) -> usize {
        self.lines.len() - self.visible_line_count()
    }
}

/// Lays out compound triples (headword, reading, gloss) inside a fixed-width box.
pub struct CompoundBlockLayout<'m> {
    measurer: &'m mut dyn TextMeasurer,
    metrics: BlockMetrics,
}

impl<'m> CompoundBlockLayout<'m> {
    /// Layout engine measuring with `measurer`.
    pub fn new(measurer: &'m mut dyn TextMeasurer, metrics: BlockMetrics) -> Self {
        Self { measurer, metrics }
    }

    /// Lay out `compounds` for a box `box_width` wide with `canvas_remaining_height` pixels
    /// between the box top and the canvas bottom.
    pub fn layout(
        &mut self,
        compounds: &[Compound],
        box_width: f32,
        canvas_remaining_height: f32,
    ) -> WallResult<LayoutBlock> {
        self.metrics.validate()?;
        if !box_width.is_finite() || !canvas_remaining_height.is_finite() {
            return Err(WallError::layout("block dimensions must be finite"));
        }

        let mut lines = Vec::new();
        for c in compounds {
            self.layout_compound(c, box_width, &mut lines)?;
        }

        let m = self.metrics;
        let available = (canvas_remaining_height - m.bottom_margin).max(0.0);
        let box_height = if lines.is_empty() {
            (m.empty_content_height + 2.0 * m.padding).min(available)
        } else {
            let ideal = lines.len() as f32 * m.line_spacing;
            let content = ideal.min(available - 2.0 * m.padding).max(0.0);
            (content + 2.0 * m.padding).min(available)
        };

        let block = LayoutBlock {
            lines,
            box_width,
            box_height,
            padding: m.padding,
            line_spacing: m.line_spacing,
        };
        if block.clipped_line_count() > 0 {
            tracing::debug!(
                clipped = block.clipped_line_count(),
                total = block.lines.len(),
                "compound lines do not fit the canvas"
            );
        }
        Ok(block)
    }

    fn layout_compound(
        &mut self,
        c: &Compound,
        box_width: f32,
        out: &mut Vec<BlockLine>,
    ) -> WallResult<()> {
        let m = self.metrics;
        let wk = self.measurer.width(&c.headword, TextStyle::CompoundText)?;
        let wr = self.measurer.width(&c.reading, TextStyle::CompoundReading)?;
        let wm = self.measurer.width(&c.gloss, TextStyle::CompoundText)?;

        let kr = wk + m.headword_gap + wr + m.reading_gap;
        if kr + wm <= box_width {
            out.push(self.prefix_line(c, wk, wr, Some((c.gloss.as_str(), wm))));
            return Ok(());
        }

        let room = box_width - kr;
        if kr < box_width && room > m.min_gloss_room {
            let words: Vec<&str> = c.gloss.split_whitespace().collect();
            let mut fit = 0;
            let mut fit_width = 0.0;
            while fit < words.len() {
                let w = self
                    .measurer
                    .width(&words[..=fit].join(" "), TextStyle::CompoundText)?;
                if w > room {
                    break;
                }
                fit += 1;
                fit_width = w;
            }

            if fit > 0 {
                let head = words[..fit].join(" ");
                out.push(self.prefix_line(c, wk, wr, Some((head.as_str(), fit_width))));
                if fit < words.len() {
                    self.wrap_gloss(&words[fit..].join(" "), box_width, out)?;
                }
                return Ok(());
            }
        }

        out.push(self.prefix_line(c, wk, wr, None));
        self.wrap_gloss(&c.gloss, box_width, out)
    }

    /// Headword and reading followed by an optional gloss run. Empty parts take no space.
    fn prefix_line(
        &self,
        c: &Compound,
        wk: f32,
        wr: f32,
        gloss: Option<(&str, f32)>,
    ) -> BlockLine {
        let m = self.metrics;
        let mut line = BlockLine::default();
        let mut x = 0.0;

        if !c.headword.is_empty() {
            line.fragments.push(PlacedFragment {
                fragment: StyledFragment::new(c.headword.as_str(), TextStyle::CompoundText),
                x,
                width: wk,
            });
            x += wk + m.headword_gap;
        }
        if !c.reading.is_empty() {
            line.fragments.push(PlacedFragment {
                fragment: StyledFragment::new(c.reading.as_str(), TextStyle::CompoundReading),
                x,
                width: wr,
            });
            x += wr + m.reading_gap;
        }
        if let Some((text, width)) = gloss
            && !text.is_empty()
        {
            line.fragments.push(PlacedFragment {
                fragment: StyledFragment::new(text, TextStyle::CompoundText),
                x,
                width,
            });
        }
        line
    }

    /// Gloss-only continuation lines.
    fn wrap_gloss(
        &mut self,
        gloss: &str,
        box_width: f32,
        out: &mut Vec<BlockLine>,
    ) -> WallResult<()> {
        let wrapped = LineWrapper::new(&mut *self.measurer).wrap_text(
            gloss,
            TextStyle::CompoundText,
            box_width,
        )?;
        for line in wrapped {
            out.push(self.place_wrapped(line)?);
        }
        Ok(())
    }

    fn place_wrapped(&mut self, line: WrappedLine) -> WallResult<BlockLine> {
        let mut out = BlockLine::default();
        let mut x = 0.0;
        for (i, fragment) in line.fragments.into_iter().enumerate() {
            if i > 0 {
                x += self.measurer.width(" ", fragment.style)?;
            }
            let width = self.measurer.width(&fragment.text, fragment.style)?;
            out.fragments.push(PlacedFragment { fragment, x, width });
            x += width;
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/compound.rs"]
mod tests;
