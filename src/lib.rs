//! Kanji vocabulary wallpapers.
//!
//! Entries are parsed from a CSV or scraped-text source, laid out (headline glyph, meta column,
//! wrapped compound block) and rasterized on the CPU into one PNG each.
//!
//! ```no_run
//! use kanjiwall::{
//!     BatchOpts, BatchRenderer, DirectorySink, EntryParser as _, SourceFormat, WallpaperConfig,
//! };
//!
//! # fn main() -> kanjiwall::WallResult<()> {
//! let config = WallpaperConfig::default();
//! let path = std::path::Path::new("n2.csv");
//! let parsed = SourceFormat::from_path(path).parser().parse_path(path)?;
//! let styles = config.style_set();
//! let renderer = BatchRenderer::new(config.composer()?, &styles, config.output.start_index);
//! let mut sink = DirectorySink::new("out", &config.output)?;
//! let report = renderer.run(&parsed.entries, &mut sink, &BatchOpts::default())?;
//! println!("{} written, {} failed", report.succeeded, report.failed);
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

pub mod batch;
pub mod config;
pub mod entry;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod text;

pub use batch::runner::{BatchOpts, BatchRenderer, BatchReport, EntryFailure};
pub use batch::sink::{DirectorySink, ImageSink, InMemorySink, output_file_name};
pub use config::{FontConfig, OutputConfig, WallpaperConfig};
pub use entry::csv_dialect::CsvEntryParser;
pub use entry::model::{Compound, Entry};
pub use entry::parser::{EntryParser, ParsedEntries, SkippedRecord, SourceFormat};
pub use entry::scraped_dialect::ScrapedTextParser;
pub use foundation::color::Rgba8;
pub use foundation::core::{Canvas, Point, Rect};
pub use foundation::error::{WallError, WallResult};
pub use layout::compound::{
    BlockLine, BlockMetrics, CompoundBlockLayout, LayoutBlock, PlacedFragment,
};
pub use layout::wrap::{LineWrapper, WrappedLine};
pub use render::canvas::{CanvasRenderer, DrawOp, RecordingCanvas};
pub use render::compose::{Geometry, ImageComposer};
pub use render::cpu::CpuCanvas;
pub use render::raster::RasterImage;
pub use text::measure::{FixedAdvanceMeasurer, FontMeasurer, TextExtent, TextMeasurer};
pub use text::style::{
    ColorRole, FontFace, FontSizes, Palette, StyleSet, StyledFragment, TextStyle,
};
