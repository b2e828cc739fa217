use super::*;
use crate::text::style::{FontSizes, Palette};

fn fallback_canvas(width: u32, height: u32) -> CpuCanvas {
    let styles = StyleSet::fallback(FontSizes::default(), Palette::default());
    CpuCanvas::new(Canvas::new(width, height).unwrap(), &styles).unwrap()
}

#[test]
fn clears_to_background() {
    let img = fallback_canvas(16, 8).finish().unwrap();
    assert_eq!(img.width, 16);
    assert_eq!(img.height, 8);
    assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(img.pixel(15, 7), Some([0, 0, 0, 255]));
}

#[test]
fn rect_has_outline_and_fill() {
    let mut c = fallback_canvas(40, 40);
    c.draw_rect(
        Rect::new(4.0, 4.0, 36.0, 36.0),
        Rgba8::rgb(20, 20, 20),
        Rgba8::WHITE,
        2.0,
    )
    .unwrap();
    let img = c.finish().unwrap();
    assert_eq!(img.pixel(4, 20), Some([255, 255, 255, 255]));
    assert_eq!(img.pixel(20, 5), Some([255, 255, 255, 255]));
    assert_eq!(img.pixel(20, 20), Some([20, 20, 20, 255]));
    assert_eq!(img.pixel(1, 1), Some([0, 0, 0, 255]));
}

#[test]
fn rejects_negative_outline() {
    let mut c = fallback_canvas(8, 8);
    let err = c
        .draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::BLACK, Rgba8::WHITE, -1.0)
        .unwrap_err();
    assert!(matches!(err, WallError::Render(_)));
}

#[test]
fn fallback_text_draws_placeholder_boxes() {
    let mut c = fallback_canvas(100, 60);
    // Meta is 32px, so one cell is 16px wide.
    c.draw_text(Point::new(10.0, 10.0), "A B", TextStyle::Meta, Rgba8::rgb(255, 165, 0))
        .unwrap();
    let img = c.finish().unwrap();
    assert_eq!(img.pixel(18, 25), Some([255, 165, 0, 255]));
    // The space cell stays empty.
    assert_eq!(img.pixel(34, 25), Some([0, 0, 0, 255]));
    assert_eq!(img.pixel(50, 25), Some([255, 165, 0, 255]));
}

#[test]
fn wide_glyphs_take_two_cells() {
    let mut c = fallback_canvas(100, 60);
    c.draw_text(Point::new(0.0, 0.0), "漢", TextStyle::Meta, Rgba8::WHITE)
        .unwrap();
    let img = c.finish().unwrap();
    assert_eq!(img.pixel(28, 16), Some([255, 255, 255, 255]));
    assert_eq!(img.pixel(40, 16), Some([0, 0, 0, 255]));
}
