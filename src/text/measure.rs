//! Text extent measurement.
//!
//! Wrapping and block layout are defined entirely in terms of [`TextMeasurer`] output, so any
//! backend whose widths grow monotonically with the text satisfies them.

use unicode_width::UnicodeWidthStr;

use crate::foundation::error::WallResult;
use crate::text::shaper::{TextBrush, TextShaper};
use crate::text::style::{FontFace, FontSizes, TextStyle};

/// Rendered extent of a text run, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct TextExtent {
    /// Horizontal advance.
    pub width: f32,
    /// Line height.
    pub height: f32,
}

/// Measures rendered text.
pub trait TextMeasurer {
    /// Extent of `text` drawn with `style`.
    fn measure(&mut self, text: &str, style: TextStyle) -> WallResult<TextExtent>;

    /// Width of `text` drawn with `style`.
    fn width(&mut self, text: &str, style: TextStyle) -> WallResult<f32> {
        Ok(self.measure(text, style)?.width)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&mut self, text: &str, style: TextStyle) -> WallResult<TextExtent> {
        (**self).measure(text, style)
    }
}

/// Shaping-based measurer for a loaded font face.
pub struct FontMeasurer {
    shaper: TextShaper,
    sizes: FontSizes,
}

impl FontMeasurer {
    /// Register `face` and measure with the given sizes.
    pub fn new(face: &FontFace, sizes: FontSizes) -> WallResult<Self> {
        Ok(Self {
            shaper: TextShaper::new(face)?,
            sizes,
        })
    }

    /// Family name the face registered under.
    pub fn family_name(&self) -> &str {
        self.shaper.family_name()
    }
}

impl TextMeasurer for FontMeasurer {
    fn measure(&mut self, text: &str, style: TextStyle) -> WallResult<TextExtent> {
        if text.is_empty() {
            return Ok(TextExtent::default());
        }
        let layout =
            self.shaper
                .layout_line(text, self.sizes.size_for(style), TextBrush::default())?;
        // Trailing whitespace counts: wrapping measures the separating space on its own.
        Ok(TextExtent {
            width: layout.full_width(),
            height: layout.height(),
        })
    }
}

/// Cell-based metrics: every column of Unicode display width advances a fixed fraction of the
/// font size, so CJK characters are twice as wide as Latin ones.
///
/// Used for the fallback style and for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceMeasurer {
    sizes: FontSizes,
    cell_px: Option<f32>,
}

impl FixedAdvanceMeasurer {
    /// Half an em per cell.
    pub const EM_PER_CELL: f32 = 0.5;
    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT: f32 = 1.25;

    /// Measurer scaled by `sizes`.
    pub fn new(sizes: FontSizes) -> Self {
        Self {
            sizes,
            cell_px: None,
        }
    }

    /// Measurer with the same `cell_px` advance for every style.
    pub fn uniform(cell_px: f32) -> Self {
        Self {
            sizes: FontSizes::default(),
            cell_px: Some(cell_px),
        }
    }

    /// Advance of one display column for `style`.
    pub fn cell_px(&self, style: TextStyle) -> f32 {
        self.cell_px
            .unwrap_or_else(|| self.sizes.size_for(style) * Self::EM_PER_CELL)
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&mut self, text: &str, style: TextStyle) -> WallResult<TextExtent> {
        if text.is_empty() {
            return Ok(TextExtent::default());
        }
        Ok(TextExtent {
            width: text.width() as f32 * self.cell_px(style),
            height: self.sizes.size_for(style) * Self::LINE_HEIGHT,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
