use super::*;
use crate::batch::sink::InMemorySink;
use crate::entry::model::Compound;
use crate::text::style::{FontSizes, Palette};

fn entry(character: &str) -> Entry {
    Entry {
        character: character.to_owned(),
        meaning: "arm, ability".to_owned(),
        hiragana_readings: vec!["うで".to_owned()],
        katakana_readings: vec!["ワン".to_owned()],
        compounds: vec![Compound::new("右腕", "うわん", "right arm")],
        jis_code: None,
    }
}

fn styles() -> StyleSet {
    StyleSet::fallback(FontSizes::default(), Palette::default())
}

struct RejectingSink {
    reject: usize,
    accepted: Vec<usize>,
}

impl ImageSink for RejectingSink {
    fn deliver(&mut self, index: usize, _image: RasterImage) -> WallResult<()> {
        if index == self.reject {
            return Err(WallError::output("disk full"));
        }
        self.accepted.push(index);
        Ok(())
    }
}

#[test]
fn invalid_entry_is_counted_and_keeps_its_index() {
    let styles = styles();
    let renderer = BatchRenderer::new(ImageComposer::default(), &styles, 1);
    let entries = vec![entry("腕"), entry(""), entry("努")];
    let mut sink = InMemorySink::new();

    let report = renderer
        .run(&entries, &mut sink, &BatchOpts::default())
        .unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures[0].index, 2);
    let indices: Vec<_> = sink.images.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![1, 3]);
    assert_eq!(sink.images[0].1.width, 1260);
    assert_eq!(sink.images[0].1.height, 520);
}

#[test]
fn parallel_matches_sequential() {
    let styles = styles();
    let renderer = BatchRenderer::new(ImageComposer::default(), &styles, 1);
    let entries = vec![entry("腕"), entry("努"), entry(""), entry("漢"), entry("字")];

    let mut seq = InMemorySink::new();
    let seq_report = renderer
        .run(&entries, &mut seq, &BatchOpts::default())
        .unwrap();

    let mut par = InMemorySink::new();
    let opts = BatchOpts {
        parallel: true,
        threads: Some(2),
        chunk_size: 2,
    };
    let par_report = renderer.run(&entries, &mut par, &opts).unwrap();

    assert_eq!(seq_report, par_report);
    assert_eq!(seq.images, par.images);
}

#[test]
fn sink_errors_are_per_entry() {
    let styles = styles();
    let renderer = BatchRenderer::new(ImageComposer::default(), &styles, 1);
    let entries = vec![entry("腕"), entry("努"), entry("漢")];
    let mut sink = RejectingSink {
        reject: 2,
        accepted: Vec::new(),
    };

    let report = renderer
        .run(&entries, &mut sink, &BatchOpts::default())
        .unwrap();
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].error.contains("disk full"));
    assert_eq!(sink.accepted, vec![1, 3]);
}

#[test]
fn zero_threads_is_rejected() {
    let styles = styles();
    let renderer = BatchRenderer::new(ImageComposer::default(), &styles, 1);
    let opts = BatchOpts {
        parallel: true,
        threads: Some(0),
        chunk_size: 4,
    };
    let err = renderer
        .run(&[entry("腕")], &mut InMemorySink::new(), &opts)
        .unwrap_err();
    assert!(matches!(err, WallError::Validation(_)));
}

#[test]
fn start_index_offsets_numbering() {
    let styles = styles();
    let renderer = BatchRenderer::new(ImageComposer::default(), &styles, 10);
    let mut sink = InMemorySink::new();
    renderer
        .run(&[entry("腕")], &mut sink, &BatchOpts::default())
        .unwrap();
    assert_eq!(sink.images[0].0, 10);
}

#[test]
fn fallback_styles_carry_no_face() {
    let styles = styles();
    assert!(styles.is_fallback());
    assert!(styles.face().is_none());
    let renderer = BatchRenderer::new(ImageComposer::default(), &styles, 0);
    let mut sink = InMemorySink::new();
    let report = renderer
        .run(&[entry("腕")], &mut sink, &BatchOpts::default())
        .unwrap();
    assert_eq!(report.succeeded, 1);
}
