use crate::foundation::color::Rgba8;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::WallResult;
use crate::text::style::TextStyle;

/// Drawing surface the composer emits into.
pub trait CanvasRenderer {
    /// Draw `text` with its top-left corner at `pos`.
    fn draw_text(
        &mut self,
        pos: Point,
        text: &str,
        style: TextStyle,
        color: Rgba8,
    ) -> WallResult<()>;

    /// Fill `bounds` and stroke an outline `outline_width` pixels wide inside its edges.
    fn draw_rect(
        &mut self,
        bounds: Rect,
        fill: Rgba8,
        outline: Rgba8,
        outline_width: f64,
    ) -> WallResult<()>;
}

/// One captured draw call.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum DrawOp {
    /// A text run.
    Text {
        /// Top-left position.
        pos: Point,
        /// Text content.
        text: String,
        /// Text style.
        style: TextStyle,
        /// Paint color.
        color: Rgba8,
    },
    /// A filled, outlined rectangle.
    Rect {
        /// Outer bounds.
        bounds: Rect,
        /// Fill color.
        fill: Rgba8,
        /// Outline color.
        outline: Rgba8,
        /// Outline width.
        outline_width: f64,
    },
}

/// Canvas that records draw calls instead of rasterizing them.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured draw calls in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Texts drawn with `style`, in order.
    pub fn texts_with(&self, style: TextStyle) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, style: s, .. } if *s == style => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl CanvasRenderer for RecordingCanvas {
    fn draw_text(
        &mut self,
        pos: Point,
        text: &str,
        style: TextStyle,
        color: Rgba8,
    ) -> WallResult<()> {
        self.ops.push(DrawOp::Text {
            pos,
            text: text.to_owned(),
            style,
            color,
        });
        Ok(())
    }

    fn draw_rect(
        &mut self,
        bounds: Rect,
        fill: Rgba8,
        outline: Rgba8,
        outline_width: f64,
    ) -> WallResult<()> {
        self.ops.push(DrawOp::Rect {
            bounds,
            fill,
            outline,
            outline_width,
        });
        Ok(())
    }
}
