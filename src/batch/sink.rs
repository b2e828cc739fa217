use std::path::{Path, PathBuf};

use crate::config::OutputConfig;
use crate::foundation::error::{WallError, WallResult};
use crate::render::raster::RasterImage;

/// Receives finished images, in index order.
pub trait ImageSink {
    /// Store the image rendered for entry `index`.
    fn deliver(&mut self, index: usize, image: RasterImage) -> WallResult<()>;
}

/// `PREFIX_NNNNN.png`, with `index` zero-padded to `digits`.
pub fn output_file_name(prefix: &str, index: usize, digits: usize) -> String {
    format!("{prefix}_{index:0digits$}.png")
}

/// Writes each image as a PNG file in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    prefix: String,
    digits: usize,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create `dir` (and parents) if needed.
    pub fn new(dir: impl Into<PathBuf>, output: &OutputConfig) -> WallResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            WallError::output(format!("create output dir '{}': {e}", dir.display()))
        })?;
        Ok(Self {
            dir,
            prefix: output.prefix.clone(),
            digits: output.index_digits,
            written: Vec::new(),
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the image for `index` is written to.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir
            .join(output_file_name(&self.prefix, index, self.digits))
    }

    /// Files written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ImageSink for DirectorySink {
    fn deliver(&mut self, index: usize, image: RasterImage) -> WallResult<()> {
        let path = self.path_for(index);
        image.write_png(&path)?;
        tracing::debug!(path = %path.display(), "wrote image");
        self.written.push(path);
        Ok(())
    }
}

/// Keeps images in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    /// Delivered `(index, image)` pairs.
    pub images: Vec<(usize, RasterImage)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageSink for InMemorySink {
    fn deliver(&mut self, index: usize, image: RasterImage) -> WallResult<()> {
        self.images.push((index, image));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/sink.rs"]
mod tests;
