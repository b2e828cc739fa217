pub mod measure;
pub(crate) mod shaper;
pub mod style;
