use crate::foundation::error::{WallError, WallResult};

pub use kurbo::{Point, Rect};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Wallpaper size used by all generated images unless overridden.
    pub const WALLPAPER: Canvas = Canvas {
        width: 1260,
        height: 520,
    };

    /// Create a validated canvas.
    ///
    /// Both sides must be non-zero and fit the rasterizer's `u16` surface limits.
    pub fn new(width: u32, height: u32) -> WallResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Check the invariants enforced by [`Canvas::new`].
    pub fn validate(self) -> WallResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WallError::validation("canvas width and height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(WallError::validation(format!(
                "canvas {}x{} exceeds the {} px surface limit",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Full-canvas rectangle anchored at the origin.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::WALLPAPER
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
