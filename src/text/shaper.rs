use crate::foundation::color::Rgba8;
use crate::foundation::error::{WallError, WallResult};
use crate::text::style::FontFace;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley layouts.
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrush {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Family holding the collection face `index`; `faces` pairs each family with its face indices.
pub(crate) fn family_for_index<F: Copy>(faces: &[(F, Vec<u32>)], index: u32) -> Option<F> {
    faces
        .iter()
        .find(|(_, indices)| indices.contains(&index))
        .map(|(id, _)| *id)
}

/// Parley shaping contexts bound to one registered font family.
///
/// The font bytes are registered once at construction; every layout afterwards reuses the
/// family. Not shareable across threads; create one per worker.
pub(crate) struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family_name: String,
}

impl TextShaper {
    /// Register `face` with a fresh font context and bind the family containing `face.index`.
    pub(crate) fn new(face: &FontFace) -> WallResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes.to_vec()), None);
        if families.is_empty() {
            return Err(WallError::font(format!(
                "no font families registered from '{}'",
                face.path.display()
            )));
        }

        let mut faces = Vec::with_capacity(families.len());
        for (id, _) in &families {
            let indices: Vec<u32> = font_ctx
                .collection
                .family(*id)
                .map(|info| info.fonts().iter().map(|f| f.index()).collect())
                .unwrap_or_default();
            faces.push((*id, indices));
        }
        let family_id = family_for_index(&faces, face.index).ok_or_else(|| {
            WallError::font(format!(
                "'{}' has no face with index {}",
                face.path.display(),
                face.index
            ))
        })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| WallError::font("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Family name the font registered under.
    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape `text` on a single unbounded line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrush,
    ) -> WallResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(WallError::layout("text size_px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
