//! JSON configuration for a generation run.
//!
//! Every field has a default, so `{}` is a complete config reproducing the stock wallpaper.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::core::Canvas;
use crate::foundation::error::{WallError, WallResult};
use crate::layout::compound::BlockMetrics;
use crate::render::compose::{Geometry, ImageComposer};
use crate::text::style::{FontSizes, Palette, StyleSet};

/// Font lookup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font files tried in order; the first one that loads wins.
    pub candidates: Vec<PathBuf>,
    /// Face index inside collection files.
    pub face_index: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            candidates: [
                "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
                "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/System/Library/Fonts/Hiragino Sans GB.ttc",
                "/Windows/Fonts/msgothic.ttc",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            face_index: 0,
        }
    }
}

/// Output file naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name prefix; files are named `PREFIX_NNNNN.png`.
    pub prefix: String,
    /// Zero-padded width of the index.
    pub index_digits: usize,
    /// Index of the first entry.
    pub start_index: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: "JLPT_N2".to_owned(),
            index_digits: 5,
            start_index: 1,
        }
    }
}

/// Full run configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WallpaperConfig {
    /// Output image size.
    pub canvas: Canvas,
    /// Colors.
    pub palette: Palette,
    /// Font lookup.
    pub fonts: FontConfig,
    /// Per-style font sizes.
    pub sizes: FontSizes,
    /// Element positions.
    pub geometry: Geometry,
    /// Compound block pitches and gaps.
    pub metrics: BlockMetrics,
    /// Output naming.
    pub output: OutputConfig,
}

impl WallpaperConfig {
    /// Parse a JSON config.
    pub fn from_reader(reader: impl Read) -> WallResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| WallError::validation(format!("invalid config JSON: {e}")))
    }

    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> WallResult<Self> {
        let f = std::fs::File::open(path).map_err(|e| {
            WallError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(std::io::BufReader::new(f))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every section for values the layout cannot work with.
    pub fn validate(&self) -> WallResult<()> {
        let sizes = [
            self.sizes.kanji,
            self.sizes.meta,
            self.sizes.compound,
            self.sizes.caption,
        ];
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(WallError::validation("font sizes must be finite and > 0"));
        }
        if self.output.prefix.is_empty() {
            return Err(WallError::validation("output prefix must be non-empty"));
        }
        if self
            .output
            .prefix
            .chars()
            .any(|c| std::path::is_separator(c) || c.is_control())
        {
            return Err(WallError::validation(format!(
                "output prefix '{}' must not contain path separators",
                self.output.prefix
            )));
        }
        if self.output.index_digits == 0 {
            return Err(WallError::validation("output index_digits must be >= 1"));
        }
        self.composer().map(|_| ())
    }

    /// Composer for this canvas, geometry, and block metrics.
    pub fn composer(&self) -> WallResult<ImageComposer> {
        ImageComposer::new(self.canvas, self.geometry, self.metrics)
    }

    /// Load the configured font and build the shared style set.
    pub fn style_set(&self) -> StyleSet {
        StyleSet::load(
            &self.fonts.candidates,
            self.fonts.face_index,
            self.sizes,
            self.palette,
        )
    }
}
