use serde::{Deserialize, Serialize};

/// One character's full vocabulary record.
///
/// Entries are read-only input; layout and rendering derive new values from them and keep no
/// references back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Headline character(s). Must be non-empty for the entry to be valid.
    pub character: String,
    /// English meaning line.
    #[serde(default)]
    pub meaning: String,
    /// Kun readings in hiragana, in source order.
    #[serde(default)]
    pub hiragana_readings: Vec<String>,
    /// On readings in katakana, in source order.
    #[serde(default)]
    pub katakana_readings: Vec<String>,
    /// Example compound words.
    #[serde(default)]
    pub compounds: Vec<Compound>,
    /// Optional JIS code label shown in the top-right corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jis_code: Option<String>,
}

impl Entry {
    /// Return `true` when the entry carries a non-blank headline character.
    pub fn is_valid(&self) -> bool {
        !self.character.trim().is_empty()
    }
}

/// A word built from the entry's character, with its own reading and gloss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compound {
    /// The compound word itself.
    pub headword: String,
    /// Kana reading.
    #[serde(default)]
    pub reading: String,
    /// English gloss.
    #[serde(default)]
    pub gloss: String,
}

impl Compound {
    /// Convenience constructor used by parsers and tests.
    pub fn new(
        headword: impl Into<String>,
        reading: impl Into<String>,
        gloss: impl Into<String>,
    ) -> Self {
        Self {
            headword: headword.into(),
            reading: reading.into(),
            gloss: gloss.into(),
        }
    }
}
