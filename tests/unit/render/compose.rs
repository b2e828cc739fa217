use super::*;
use crate::entry::model::Compound;
use crate::foundation::color::Rgba8;
use crate::render::canvas::{DrawOp, RecordingCanvas};
use crate::text::measure::FixedAdvanceMeasurer;
use crate::text::style::{FontSizes, Palette};

// Default sizes under the fixed-advance measurer: Meta cells are 16px, compound cells 12px,
// caption cells 8px.
fn setup() -> (ImageComposer, StyleSet, FixedAdvanceMeasurer) {
    let sizes = FontSizes::default();
    (
        ImageComposer::default(),
        StyleSet::fallback(sizes, Palette::default()),
        FixedAdvanceMeasurer::new(sizes),
    )
}

fn sample() -> Entry {
    Entry {
        character: "努".to_owned(),
        meaning: "toil".to_owned(),
        hiragana_readings: vec!["つと.める".to_owned()],
        katakana_readings: vec!["ド".to_owned()],
        compounds: vec![Compound::new("努力", "どりょく", "effort")],
        jis_code: None,
    }
}

fn text_ops(canvas: &RecordingCanvas) -> Vec<(Point, &str, TextStyle, Rgba8)> {
    canvas
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text {
                pos,
                text,
                style,
                color,
            } => Some((*pos, text.as_str(), *style, *color)),
            DrawOp::Rect { .. } => None,
        })
        .collect()
}

fn rect_bounds(canvas: &RecordingCanvas) -> Vec<Rect> {
    canvas
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Rect { bounds, .. } => Some(*bounds),
            DrawOp::Text { .. } => None,
        })
        .collect()
}

#[test]
fn places_every_element_at_its_fixed_position() {
    let (composer, styles, mut m) = setup();
    let mut canvas = RecordingCanvas::new();
    let block = composer
        .compose(&sample(), &styles, &mut m, &mut canvas)
        .unwrap();

    let texts = text_ops(&canvas);
    assert_eq!(texts[0].0, Point::new(50.0, 40.0));
    assert_eq!(texts[0].1, "努");
    assert_eq!(texts[0].2, TextStyle::Kanji);
    assert_eq!(texts[1].0, Point::new(350.0, 30.0));
    assert_eq!(texts[1].1, "toil");
    assert_eq!(texts[2].0, Point::new(350.0, 90.0));
    assert_eq!(texts[2].1, "つと.める");
    assert_eq!(texts[3].0, Point::new(350.0, 145.0));
    assert_eq!(texts[3].1, "ド");

    // Box top 215, 275 px available below it, one line: 30 + 2 * 15.
    assert_eq!(block.box_height, 60.0);
    assert_eq!(block.box_width, 810.0);
    assert_eq!(rect_bounds(&canvas), vec![Rect::new(335.0, 215.0, 1210.0, 275.0)]);

    assert_eq!(texts[4].0, Point::new(350.0, 230.0));
    assert_eq!(texts[4].1, "努力");
    assert_eq!(texts[5].0, Point::new(406.0, 230.0));
    assert_eq!(texts[5].1, "どりょく");
    assert_eq!(texts[5].3, Rgba8::rgb(255, 165, 0));
    assert_eq!(texts[6].0, Point::new(514.0, 230.0));
    assert_eq!(texts[6].1, "effort");
    assert_eq!(texts[6].3, Rgba8::WHITE);
    assert_eq!(texts.len(), 7);
}

#[test]
fn rect_is_drawn_before_compound_text() {
    let (composer, styles, mut m) = setup();
    let mut canvas = RecordingCanvas::new();
    composer
        .compose(&sample(), &styles, &mut m, &mut canvas)
        .unwrap();
    let rect_at = canvas
        .ops()
        .iter()
        .position(|op| matches!(op, DrawOp::Rect { .. }))
        .unwrap();
    let first_compound = canvas
        .ops()
        .iter()
        .position(|op| matches!(op, DrawOp::Text { style: TextStyle::CompoundText, .. }))
        .unwrap();
    assert!(rect_at < first_compound);
}

#[test]
fn jis_caption_is_right_aligned() {
    let (composer, styles, mut m) = setup();
    let mut entry = sample();
    entry.jis_code = Some(" 4E1D ".to_owned());
    let mut canvas = RecordingCanvas::new();
    composer.compose(&entry, &styles, &mut m, &mut canvas).unwrap();

    let caption = text_ops(&canvas)
        .into_iter()
        .find(|t| t.2 == TextStyle::Caption)
        .unwrap();
    assert_eq!(caption.1, "4E1D");
    assert_eq!(caption.0, Point::new(1260.0 - 50.0 - 32.0, 30.0));
}

#[test]
fn blank_jis_code_draws_nothing() {
    let (composer, styles, mut m) = setup();
    let mut entry = sample();
    entry.jis_code = Some("  ".to_owned());
    let mut canvas = RecordingCanvas::new();
    composer.compose(&entry, &styles, &mut m, &mut canvas).unwrap();
    assert!(canvas.texts_with(TextStyle::Caption).is_empty());
}

#[test]
fn missing_readings_do_not_advance_the_column() {
    let (composer, styles, mut m) = setup();
    let mut entry = sample();
    entry.hiragana_readings.clear();
    entry.katakana_readings.clear();
    let mut canvas = RecordingCanvas::new();
    composer.compose(&entry, &styles, &mut m, &mut canvas).unwrap();

    assert_eq!(canvas.texts_with(TextStyle::Meta), vec!["toil"]);
    assert_eq!(rect_bounds(&canvas)[0].y0, 105.0);
}

#[test]
fn long_meaning_wraps_inside_the_column() {
    let (composer, styles, mut m) = setup();
    let mut entry = sample();
    // 59 cells of 16px against an 860px column.
    entry.meaning = vec!["word"; 12].join(" ");
    let mut canvas = RecordingCanvas::new();
    composer.compose(&entry, &styles, &mut m, &mut canvas).unwrap();

    let meta = text_ops(&canvas)
        .into_iter()
        .filter(|t| t.2 == TextStyle::Meta)
        .collect::<Vec<_>>();
    assert_eq!(meta[0].0, Point::new(350.0, 30.0));
    assert_eq!(meta[1].0, Point::new(350.0, 75.0));
    assert_eq!(format!("{} {}", meta[0].1, meta[1].1), entry.meaning);
    assert_eq!(meta[2].0, Point::new(350.0, 135.0));
}

#[test]
fn overflowing_compounds_are_clipped_to_the_box() {
    let (composer, styles, mut m) = setup();
    let mut entry = sample();
    entry.compounds = (0..20)
        .map(|i| Compound::new("努力", "どりょく", format!("gloss{i}")))
        .collect();
    let mut canvas = RecordingCanvas::new();
    let block = composer.compose(&entry, &styles, &mut m, &mut canvas).unwrap();

    // Box top 215, available 275: content 245 fits floor(245 / 30) + 1 = 9 lines.
    assert_eq!(block.box_height, 275.0);
    assert_eq!(block.lines.len(), 20);
    assert_eq!(block.visible_line_count(), 9);
    assert_eq!(canvas.texts_with(TextStyle::CompoundReading).len(), 9);
    let bounds = rect_bounds(&canvas)[0];
    assert!(bounds.y1 <= 520.0 - 30.0);
}

#[test]
fn entry_without_character_is_rejected() {
    let (composer, styles, mut m) = setup();
    let mut entry = sample();
    entry.character = " ".to_owned();
    let mut canvas = RecordingCanvas::new();
    let err = composer
        .compose(&entry, &styles, &mut m, &mut canvas)
        .unwrap_err();
    assert!(matches!(err, WallError::Validation(_)));
    assert!(canvas.ops().is_empty());
}

#[test]
fn layout_for_matches_compose() {
    let (composer, styles, mut m) = setup();
    let entry = sample();
    let mut canvas = RecordingCanvas::new();
    let drawn = composer.compose(&entry, &styles, &mut m, &mut canvas).unwrap();
    assert_eq!(composer.layout_for(&entry, &mut m).unwrap(), drawn);
}

#[test]
fn rejects_geometry_that_leaves_no_column() {
    let geometry = Geometry {
        column_x: 1250.0,
        ..Geometry::default()
    };
    assert!(ImageComposer::new(Canvas::WALLPAPER, geometry, BlockMetrics::default()).is_err());
    assert!(
        ImageComposer::new(Canvas::WALLPAPER, Geometry::default(), BlockMetrics::default()).is_ok()
    );
}
