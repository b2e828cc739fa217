use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{WallError, WallResult};
use crate::render::canvas::CanvasRenderer;
use crate::render::raster::RasterImage;
use crate::text::measure::FixedAdvanceMeasurer;
use crate::text::shaper::{TextBrush, TextShaper};
use crate::text::style::{FontSizes, StyleSet, TextStyle};

struct GlyphSource {
    shaper: TextShaper,
    font: vello_cpu::peniko::FontData,
}

/// CPU raster canvas backed by `vello_cpu`.
///
/// Glyphs are shaped with Parley against the style set's font. With the fallback style every
/// visible grapheme is drawn as a solid placeholder box sized by [`FixedAdvanceMeasurer`].
pub struct CpuCanvas {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    glyphs: Option<GlyphSource>,
    sizes: FontSizes,
    fallback: FixedAdvanceMeasurer,
}

impl CpuCanvas {
    /// Create a canvas cleared to the palette background.
    pub fn new(canvas: Canvas, styles: &StyleSet) -> WallResult<Self> {
        canvas.validate()?;
        let (w, h) = surface_size(canvas)?;

        let glyphs = match styles.face() {
            Some(face) => Some(GlyphSource {
                shaper: TextShaper::new(face)?,
                font: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(face.bytes.to_vec()),
                    face.index,
                ),
            }),
            None => None,
        };

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint(paint(styles.palette().background));
        ctx.fill_rect(&cpu_rect(canvas.bounds()));

        Ok(Self {
            canvas,
            ctx,
            glyphs,
            sizes: *styles.sizes(),
            fallback: FixedAdvanceMeasurer::new(*styles.sizes()),
        })
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> WallResult<RasterImage> {
        let (w, h) = surface_size(self.canvas)?;
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.render_to_pixmap(&mut pixmap);
        RasterImage::from_premul_rgba(
            self.canvas.width,
            self.canvas.height,
            pixmap.data_as_u8_slice().to_vec(),
        )
    }

    fn draw_placeholder_text(&mut self, pos: Point, text: &str, style: TextStyle, color: Rgba8) {
        let size = f64::from(self.sizes.size_for(style));
        let cell = f64::from(self.fallback.cell_px(style));
        self.ctx.set_paint(paint(color));

        let mut x = pos.x;
        for g in text.graphemes(true) {
            let advance = g.width() as f64 * cell;
            if !g.trim().is_empty() && advance > 2.0 {
                self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    x + 1.0,
                    pos.y + size * 0.15,
                    x + advance - 1.0,
                    pos.y + size * 0.95,
                ));
            }
            x += advance;
        }
    }
}

impl CanvasRenderer for CpuCanvas {
    fn draw_text(
        &mut self,
        pos: Point,
        text: &str,
        style: TextStyle,
        color: Rgba8,
    ) -> WallResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let Some(src) = self.glyphs.as_mut() else {
            self.draw_placeholder_text(pos, text, style, color);
            return Ok(());
        };

        let layout = src
            .shaper
            .layout_line(text, self.sizes.size_for(style), TextBrush::from(color))?;

        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((pos.x, pos.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&src.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn draw_rect(
        &mut self,
        bounds: Rect,
        fill: Rgba8,
        outline: Rgba8,
        outline_width: f64,
    ) -> WallResult<()> {
        if !outline_width.is_finite() || outline_width < 0.0 {
            return Err(WallError::render("outline width must be finite and >= 0"));
        }
        let inner = bounds.inset(-outline_width);
        if outline_width > 0.0 {
            self.ctx.set_paint(paint(outline));
            self.ctx.fill_rect(&cpu_rect(bounds));
        }
        if inner.width() > 0.0 && inner.height() > 0.0 {
            self.ctx.set_paint(paint(fill));
            self.ctx.fill_rect(&cpu_rect(inner));
        }
        Ok(())
    }
}

fn surface_size(canvas: Canvas) -> WallResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| WallError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| WallError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn paint(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn cpu_rect(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
