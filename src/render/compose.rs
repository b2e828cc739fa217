//! Wallpaper composition: places the glyph, meta column, and compound box on a canvas.

use serde::{Deserialize, Serialize};

use crate::entry::model::Entry;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{WallError, WallResult};
use crate::layout::compound::{BlockMetrics, CompoundBlockLayout, LayoutBlock};
use crate::layout::wrap::LineWrapper;
use crate::render::canvas::CanvasRenderer;
use crate::text::measure::TextMeasurer;
use crate::text::style::{StyleSet, TextStyle};

/// Fixed positions of the wallpaper elements, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Left and right canvas margin.
    pub margin_x: f32,
    /// Top margin of the meta column.
    pub margin_y: f32,
    /// Extra gap between stacked elements.
    pub spacing: f32,
    /// Headline glyph origin.
    pub glyph_x: f32,
    /// Headline glyph origin.
    pub glyph_y: f32,
    /// Left edge of the meta column and of the compound text.
    pub column_x: f32,
    /// Advance of one wrapped meaning line.
    pub meaning_line_height: f32,
    /// Advance of a reading line.
    pub reading_line_height: f32,
    /// Width trimmed off the compound box before padding.
    pub box_reserve: f32,
    /// Compound box outline width.
    pub box_outline_width: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            margin_x: 50.0,
            margin_y: 30.0,
            spacing: 15.0,
            glyph_x: 50.0,
            glyph_y: 40.0,
            column_x: 350.0,
            meaning_line_height: 45.0,
            reading_line_height: 40.0,
            box_reserve: 20.0,
            box_outline_width: 2.0,
        }
    }
}

impl Geometry {
    fn check(&self, canvas: Canvas) -> WallResult<()> {
        let all = [
            self.margin_x,
            self.margin_y,
            self.spacing,
            self.glyph_x,
            self.glyph_y,
            self.column_x,
            self.meaning_line_height,
            self.reading_line_height,
            self.box_reserve,
            self.box_outline_width,
        ];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(WallError::validation("geometry values must be finite and >= 0"));
        }
        if self.column_x + self.margin_x >= canvas.width as f32 {
            return Err(WallError::validation(format!(
                "meta column at x={} leaves no room on a {} px wide canvas",
                self.column_x, canvas.width
            )));
        }
        Ok(())
    }
}

/// Text placed in the meta column, before the compound box.
struct ColumnText {
    pos: Point,
    text: String,
    style: TextStyle,
}

struct ColumnPlan {
    texts: Vec<ColumnText>,
    box_top: f32,
}

/// Turns one [`Entry`] into draw calls on a [`CanvasRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageComposer {
    canvas: Canvas,
    geometry: Geometry,
    metrics: BlockMetrics,
}

impl ImageComposer {
    /// Composer for `canvas`, checking that the geometry and block metrics fit it.
    pub fn new(canvas: Canvas, geometry: Geometry, metrics: BlockMetrics) -> WallResult<Self> {
        canvas.validate()?;
        geometry.check(canvas)?;
        metrics.validate()?;
        let composer = Self {
            canvas,
            geometry,
            metrics,
        };
        if composer.box_wrap_width() <= 0.0 {
            return Err(WallError::validation("compound box has no room for text"));
        }
        Ok(composer)
    }

    /// Target canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Element positions.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Compound block metrics.
    pub fn metrics(&self) -> &BlockMetrics {
        &self.metrics
    }

    /// Wrap width of the compound lines.
    pub fn box_wrap_width(&self) -> f32 {
        let g = &self.geometry;
        (self.canvas.width as f32 - g.column_x - g.margin_x - g.box_reserve)
            - 2.0 * self.metrics.padding
    }

    /// Compound block of `entry` exactly as [`ImageComposer::compose`] would lay it out.
    pub fn layout_for(
        &self,
        entry: &Entry,
        measurer: &mut dyn TextMeasurer,
    ) -> WallResult<LayoutBlock> {
        check_entry(entry)?;
        let plan = self.plan_column(entry, measurer)?;
        self.layout_block(entry, plan.box_top, measurer)
    }

    /// Draw `entry` onto `canvas` and return the compound block it used.
    ///
    /// Nothing is drawn when the entry has no headline character.
    pub fn compose(
        &self,
        entry: &Entry,
        styles: &StyleSet,
        measurer: &mut dyn TextMeasurer,
        canvas: &mut dyn CanvasRenderer,
    ) -> WallResult<LayoutBlock> {
        check_entry(entry)?;
        let plan = self.plan_column(entry, measurer)?;
        let block = self.layout_block(entry, plan.box_top, measurer)?;

        for t in &plan.texts {
            canvas.draw_text(t.pos, &t.text, t.style, styles.color_for(t.style))?;
        }

        let g = &self.geometry;
        let palette = styles.palette();
        let box_x0 = g.column_x - self.metrics.padding;
        let box_x1 = self.canvas.width as f32 - g.margin_x;
        canvas.draw_rect(
            Rect::new(
                f64::from(box_x0),
                f64::from(plan.box_top),
                f64::from(box_x1),
                f64::from(plan.box_top + block.box_height),
            ),
            palette.box_fill,
            palette.box_outline,
            f64::from(g.box_outline_width),
        )?;

        let mut y = plan.box_top + block.padding;
        for line in block.visible_lines() {
            for placed in &line.fragments {
                let style = placed.fragment.style;
                canvas.draw_text(
                    Point::new(f64::from(g.column_x + placed.x), f64::from(y)),
                    &placed.fragment.text,
                    style,
                    styles.color_for(style),
                )?;
            }
            y += block.line_spacing;
        }

        Ok(block)
    }

    fn plan_column(
        &self,
        entry: &Entry,
        measurer: &mut dyn TextMeasurer,
    ) -> WallResult<ColumnPlan> {
        let g = &self.geometry;
        let canvas_w = self.canvas.width as f32;
        let mut texts = vec![ColumnText {
            pos: point(g.glyph_x, g.glyph_y),
            text: entry.character.clone(),
            style: TextStyle::Kanji,
        }];

        let mut y = g.margin_y;
        if let Some(jis) = entry.jis_code.as_deref().map(str::trim)
            && !jis.is_empty()
        {
            let w = measurer.width(jis, TextStyle::Caption)?;
            texts.push(ColumnText {
                pos: point(canvas_w - g.margin_x - w, y),
                text: jis.to_owned(),
                style: TextStyle::Caption,
            });
        }

        let column_width = canvas_w - g.column_x - g.margin_x;
        let meaning = LineWrapper::new(&mut *measurer).wrap_text(
            &entry.meaning,
            TextStyle::Meta,
            column_width,
        )?;
        for (i, line) in meaning.iter().enumerate() {
            texts.push(ColumnText {
                pos: point(g.column_x, y + i as f32 * g.meaning_line_height),
                text: line.text(),
                style: TextStyle::Meta,
            });
        }
        y += meaning.len().max(1) as f32 * g.meaning_line_height + g.spacing;

        for readings in [&entry.hiragana_readings, &entry.katakana_readings] {
            if readings.is_empty() {
                continue;
            }
            texts.push(ColumnText {
                pos: point(g.column_x, y),
                text: readings.join(", "),
                style: TextStyle::Meta,
            });
            y += g.reading_line_height + g.spacing;
        }

        Ok(ColumnPlan {
            texts,
            box_top: y + g.spacing,
        })
    }

    fn layout_block(
        &self,
        entry: &Entry,
        box_top: f32,
        measurer: &mut dyn TextMeasurer,
    ) -> WallResult<LayoutBlock> {
        let remaining = self.canvas.height as f32 - box_top;
        CompoundBlockLayout::new(measurer, self.metrics).layout(
            &entry.compounds,
            self.box_wrap_width(),
            remaining,
        )
    }
}

fn check_entry(entry: &Entry) -> WallResult<()> {
    if entry.is_valid() {
        Ok(())
    } else {
        Err(WallError::validation("entry has no kanji character"))
    }
}

fn point(x: f32, y: f32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
