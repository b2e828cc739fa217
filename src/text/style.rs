use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgba8;
use crate::foundation::error::WallResult;
use crate::text::measure::{FixedAdvanceMeasurer, FontMeasurer, TextMeasurer};

/// Typographic role of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    /// The large headline glyph.
    Kanji,
    /// Meaning and reading lines next to the glyph.
    Meta,
    /// Compound headword and gloss.
    CompoundText,
    /// Compound kana reading.
    CompoundReading,
    /// Small corner caption (JIS code).
    Caption,
}

impl TextStyle {
    /// Color role drawn for this style.
    pub fn color_role(self) -> ColorRole {
        match self {
            Self::Kanji => ColorRole::Glyph,
            Self::Meta | Self::Caption => ColorRole::Text,
            Self::CompoundText => ColorRole::CompoundText,
            Self::CompoundReading => ColorRole::Reading,
        }
    }
}

/// Palette slot a fragment is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    /// Headline glyph.
    Glyph,
    /// Meta text.
    Text,
    /// Compound headword and gloss.
    CompoundText,
    /// Compound reading.
    Reading,
}

/// A single styled run of text. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledFragment {
    /// Text content.
    pub text: String,
    /// Style it is measured and drawn with.
    pub style: TextStyle,
}

impl StyledFragment {
    /// Create a fragment.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Color role derived from the style.
    pub fn color_role(&self) -> ColorRole {
        self.style.color_role()
    }
}

/// Font size in pixels for each style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    /// Headline glyph.
    pub kanji: f32,
    /// Meaning and readings.
    pub meta: f32,
    /// Compound headword, reading and gloss.
    pub compound: f32,
    /// JIS caption.
    pub caption: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            kanji: 220.0,
            meta: 32.0,
            compound: 24.0,
            caption: 16.0,
        }
    }
}

impl FontSizes {
    /// Size used for `style`.
    pub fn size_for(&self, style: TextStyle) -> f32 {
        match style {
            TextStyle::Kanji => self.kanji,
            TextStyle::Meta => self.meta,
            TextStyle::CompoundText | TextStyle::CompoundReading => self.compound,
            TextStyle::Caption => self.caption,
        }
    }
}

/// Colors of every role plus the canvas and compound box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Canvas background.
    pub background: Rgba8,
    /// Headline glyph.
    pub glyph: Rgba8,
    /// Meta text.
    pub text: Rgba8,
    /// Compound headword and gloss.
    pub compound_text: Rgba8,
    /// Compound reading.
    pub reading: Rgba8,
    /// Compound box fill.
    pub box_fill: Rgba8,
    /// Compound box outline.
    pub box_outline: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba8::BLACK,
            glyph: Rgba8::WHITE,
            text: Rgba8::WHITE,
            compound_text: Rgba8::WHITE,
            reading: Rgba8::rgb(255, 165, 0),
            box_fill: Rgba8::rgb(20, 20, 20),
            box_outline: Rgba8::WHITE,
        }
    }
}

impl Palette {
    /// Color painted for `role`.
    pub fn color_for(&self, role: ColorRole) -> Rgba8 {
        match role {
            ColorRole::Glyph => self.glyph,
            ColorRole::Text => self.text,
            ColorRole::CompoundText => self.compound_text,
            ColorRole::Reading => self.reading,
        }
    }
}

/// Raw bytes of a loaded font file.
#[derive(Debug, Clone)]
pub struct FontFace {
    /// Where the bytes were read from.
    pub path: PathBuf,
    /// File contents.
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection (`.ttc`); `0` for single-face files.
    pub index: u32,
}

impl FontFace {
    /// Read a font file from disk.
    pub fn read(path: &Path, index: u32) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            bytes: Arc::new(bytes),
            index,
        })
    }
}

/// Immutable font, size, and color set shared by every layout and render call.
///
/// Built once at startup. Safe to share across worker threads; the mutable shaping state lives
/// in the measurers and canvases created from it.
#[derive(Debug, Clone)]
pub struct StyleSet {
    face: Option<FontFace>,
    sizes: FontSizes,
    palette: Palette,
}

impl StyleSet {
    /// Style set backed by a loaded font face.
    pub fn new(face: FontFace, sizes: FontSizes, palette: Palette) -> Self {
        Self {
            face: Some(face),
            sizes,
            palette,
        }
    }

    /// Low-fidelity style set used when no font could be loaded.
    ///
    /// Text is measured with fixed cell advances and drawn as placeholder boxes.
    pub fn fallback(sizes: FontSizes, palette: Palette) -> Self {
        Self {
            face: None,
            sizes,
            palette,
        }
    }

    /// Load the first usable font among `candidates`, falling back to
    /// [`StyleSet::fallback`] when none can be read and registered.
    pub fn load(candidates: &[PathBuf], index: u32, sizes: FontSizes, palette: Palette) -> Self {
        for path in candidates {
            if !path.exists() {
                continue;
            }
            let face = match FontFace::read(path, index) {
                Ok(face) => face,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to read font");
                    continue;
                }
            };
            if let Err(e) = FontMeasurer::new(&face, sizes) {
                tracing::warn!(path = %path.display(), error = %e, "failed to load font");
                continue;
            }
            tracing::info!(path = %path.display(), "loaded font");
            return Self::new(face, sizes, palette);
        }

        tracing::warn!(
            "no usable font found; using fallback style, Japanese text will render as placeholders"
        );
        Self::fallback(sizes, palette)
    }

    /// Loaded font face, or `None` for the fallback style.
    pub fn face(&self) -> Option<&FontFace> {
        self.face.as_ref()
    }

    /// Return `true` when this is the low-fidelity fallback style.
    pub fn is_fallback(&self) -> bool {
        self.face.is_none()
    }

    /// Per-style font sizes.
    pub fn sizes(&self) -> &FontSizes {
        &self.sizes
    }

    /// Color palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Color a fragment of `style` is painted with.
    pub fn color_for(&self, style: TextStyle) -> Rgba8 {
        self.palette.color_for(style.color_role())
    }

    /// Create a measurer consistent with this style set. One per worker.
    pub fn measurer(&self) -> WallResult<Box<dyn TextMeasurer>> {
        match &self.face {
            Some(face) => Ok(Box::new(FontMeasurer::new(face, self.sizes)?)),
            None => Ok(Box::new(FixedAdvanceMeasurer::new(self.sizes))),
        }
    }
}
