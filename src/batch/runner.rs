use rayon::prelude::*;
use serde::Serialize;

use crate::batch::sink::ImageSink;
use crate::entry::model::Entry;
use crate::foundation::error::{WallError, WallResult};
use crate::render::compose::ImageComposer;
use crate::render::cpu::CpuCanvas;
use crate::render::raster::RasterImage;
use crate::text::measure::TextMeasurer;
use crate::text::style::StyleSet;

/// Sequential or parallel batch settings.
#[derive(Clone, Debug)]
pub struct BatchOpts {
    /// Render on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Worker count; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Entries rendered per parallel chunk before delivery. `0` is treated as `1`.
    pub chunk_size: usize,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_size: 64,
        }
    }
}

/// One entry that produced no image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    /// Output index the entry would have used.
    pub index: usize,
    /// Headline character, possibly empty.
    pub character: String,
    /// Error message.
    pub error: String,
}

/// Aggregate outcome of a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Entries attempted.
    pub total: usize,
    /// Images delivered.
    pub succeeded: usize,
    /// Entries that failed.
    pub failed: usize,
    /// Per-entry failures in index order.
    pub failures: Vec<EntryFailure>,
}

impl BatchReport {
    fn record(&mut self, index: usize, entry: &Entry, outcome: WallResult<()>) {
        self.total += 1;
        match outcome {
            Ok(()) => self.succeeded += 1,
            Err(e) => {
                tracing::warn!(index, character = %entry.character, error = %e, "entry failed");
                self.failed += 1;
                self.failures.push(EntryFailure {
                    index,
                    character: entry.character.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
}

/// Renders entries to images and hands them to an [`ImageSink`].
///
/// Each entry is independent: failures are counted in the [`BatchReport`] and the batch moves
/// on. Images always reach the sink in index order, whether rendered sequentially or not.
pub struct BatchRenderer<'s> {
    composer: ImageComposer,
    styles: &'s StyleSet,
    start_index: usize,
}

impl<'s> BatchRenderer<'s> {
    /// Renderer numbering entries from `start_index`.
    pub fn new(composer: ImageComposer, styles: &'s StyleSet, start_index: usize) -> Self {
        Self {
            composer,
            styles,
            start_index,
        }
    }

    /// Render one entry with a caller-provided measurer.
    pub fn render_one(
        &self,
        entry: &Entry,
        measurer: &mut dyn TextMeasurer,
    ) -> WallResult<RasterImage> {
        let mut canvas = CpuCanvas::new(self.composer.canvas(), self.styles)?;
        self.composer
            .compose(entry, self.styles, measurer, &mut canvas)?;
        canvas.finish()
    }

    /// Render every entry and deliver the images to `sink`.
    ///
    /// Only setup problems (measurer creation, thread pool) are returned as errors.
    #[tracing::instrument(
        skip_all,
        fields(
            entries = entries.len(),
            parallel = opts.parallel,
            fallback = self.styles.is_fallback()
        )
    )]
    pub fn run(
        &self,
        entries: &[Entry],
        sink: &mut dyn ImageSink,
        opts: &BatchOpts,
    ) -> WallResult<BatchReport> {
        let mut report = BatchReport::default();

        if !opts.parallel {
            let mut measurer = self.styles.measurer()?;
            for (pos, entry) in entries.iter().enumerate() {
                let index = self.start_index + pos;
                let outcome = self
                    .render_one(entry, &mut measurer)
                    .and_then(|img| sink.deliver(index, img));
                report.record(index, entry, outcome);
            }
            tracing::info!(
                succeeded = report.succeeded,
                failed = report.failed,
                "batch complete"
            );
            return Ok(report);
        }

        // Font errors surface once here rather than per worker.
        drop(self.styles.measurer()?);
        let pool = build_thread_pool(opts.threads)?;
        let chunk_size = opts.chunk_size.max(1);

        for (chunk_no, chunk) in entries.chunks(chunk_size).enumerate() {
            let rendered = pool.install(|| {
                chunk
                    .par_iter()
                    .map_init(
                        || self.styles.measurer(),
                        |measurer, entry| -> WallResult<RasterImage> {
                            let measurer = measurer
                                .as_mut()
                                .map_err(|e| WallError::font(e.to_string()))?;
                            self.render_one(entry, measurer)
                        },
                    )
                    .collect::<Vec<_>>()
            });

            let base = self.start_index + chunk_no * chunk_size;
            for (offset, (entry, result)) in chunk.iter().zip(rendered).enumerate() {
                let index = base + offset;
                let outcome = result.and_then(|img| sink.deliver(index, img));
                report.record(index, entry, outcome);
            }
            tracing::debug!(chunk = chunk_no, entries = chunk.len(), "chunk delivered");
        }

        tracing::info!(
            succeeded = report.succeeded,
            failed = report.failed,
            "batch complete"
        );
        Ok(report)
    }
}

fn build_thread_pool(threads: Option<usize>) -> WallResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WallError::validation("batch 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WallError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/batch/runner.rs"]
mod tests;
