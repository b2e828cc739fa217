use super::*;
use crate::text::measure::FixedAdvanceMeasurer;

// With 10px cells: 右腕 = 40, うわん = 60, "right arm" = 90.
fn arm() -> Compound {
    Compound::new("右腕", "うわん", "right arm")
}

fn layout(compounds: &[Compound], box_width: f32, remaining: f32) -> LayoutBlock {
    let mut m = FixedAdvanceMeasurer::uniform(10.0);
    CompoundBlockLayout::new(&mut m, BlockMetrics::default())
        .layout(compounds, box_width, remaining)
        .unwrap()
}

fn offsets(line: &BlockLine) -> Vec<f32> {
    line.fragments.iter().map(|f| f.x).collect()
}

#[test]
fn compound_that_fits_uses_one_line_with_gap_offsets() {
    let block = layout(&[arm()], 400.0, 1000.0);
    assert_eq!(block.lines.len(), 1);

    let line = &block.lines[0];
    assert_eq!(offsets(line), vec![0.0, 48.0, 120.0]);
    let styles: Vec<_> = line.fragments.iter().map(|f| f.fragment.style).collect();
    assert_eq!(
        styles,
        vec![
            TextStyle::CompoundText,
            TextStyle::CompoundReading,
            TextStyle::CompoundText
        ]
    );
    assert_eq!(line.width(), 210.0);
    assert_eq!(block.box_height, 60.0);
}

#[test]
fn narrow_box_puts_gloss_on_following_lines() {
    let block = layout(&[arm()], 60.0, 1000.0);
    let texts: Vec<_> = block.lines.iter().map(BlockLine::text).collect();
    assert_eq!(texts, vec!["右腕 うわん", "right", "arm"]);
    for line in &block.lines[1..] {
        assert!(line.width() <= 60.0);
        assert_eq!(line.fragments[0].x, 0.0);
    }
}

#[test]
fn hybrid_split_keeps_leading_gloss_words_beside_reading() {
    let block = layout(&[arm()], 200.0, 1000.0);
    assert_eq!(block.lines.len(), 2);
    assert_eq!(block.lines[0].text(), "右腕 うわん right");
    assert_eq!(offsets(&block.lines[0]), vec![0.0, 48.0, 120.0]);
    assert_eq!(block.lines[1].text(), "arm");
}

#[test]
fn hybrid_split_with_no_fitting_word_wraps_whole_gloss() {
    // 30px of room: more than the 20px minimum, but "right" needs 50.
    let block = layout(&[arm()], 150.0, 1000.0);
    let texts: Vec<_> = block.lines.iter().map(BlockLine::text).collect();
    assert_eq!(texts, vec!["右腕 うわん", "right arm"]);
}

#[test]
fn room_at_minimum_is_not_used_for_gloss() {
    let block = layout(&[arm()], 140.0, 1000.0);
    assert_eq!(block.lines[0].text(), "右腕 うわん");
    assert_eq!(block.lines[0].fragments.len(), 2);
}

#[test]
fn empty_gloss_emits_only_prefix_line() {
    let block = layout(&[Compound::new("右腕", "うわん", "")], 60.0, 1000.0);
    assert_eq!(block.lines.len(), 1);
    assert_eq!(block.lines[0].fragments.len(), 2);
}

#[test]
fn empty_headword_takes_no_space() {
    let block = layout(&[Compound::new("", "うで", "arm")], 400.0, 1000.0);
    assert_eq!(offsets(&block.lines[0]), vec![0.0, 52.0]);
}

#[test]
fn empty_list_yields_minimum_box() {
    let block = layout(&[], 400.0, 1000.0);
    assert!(block.lines.is_empty());
    assert_eq!(block.box_height, 60.0);
    assert_eq!(block.visible_line_count(), 0);
}

#[test]
fn empty_box_is_clamped_to_available_height() {
    let block = layout(&[], 400.0, 50.0);
    assert_eq!(block.box_height, 20.0);
}

#[test]
fn overflowing_content_is_clamped_and_clipped() {
    let compounds = vec![arm(); 20];
    let block = layout(&compounds, 400.0, 200.0);
    assert_eq!(block.lines.len(), 20);
    assert_eq!(block.box_height, 170.0);
    assert_eq!(block.visible_line_count(), 5);
    assert_eq!(block.clipped_line_count(), 15);
}

#[test]
fn all_lines_visible_when_content_fits() {
    let compounds = vec![arm(); 3];
    let block = layout(&compounds, 400.0, 1000.0);
    assert_eq!(block.box_height, 3.0 * 30.0 + 30.0);
    assert_eq!(block.visible_lines().len(), 3);
}

#[test]
fn invalid_metrics_are_rejected() {
    let mut m = FixedAdvanceMeasurer::uniform(10.0);
    let metrics = BlockMetrics {
        line_spacing: 0.0,
        ..BlockMetrics::default()
    };
    assert!(
        CompoundBlockLayout::new(&mut m, metrics)
            .layout(&[arm()], 400.0, 500.0)
            .is_err()
    );
}
