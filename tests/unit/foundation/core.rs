use super::*;

#[test]
fn wallpaper_canvas_is_default() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (1260, 520));
    assert_eq!(c.rgba_len(), 1260 * 520 * 4);
    assert_eq!(c.bounds(), Rect::new(0.0, 0.0, 1260.0, 520.0));
}

#[test]
fn canvas_rejects_degenerate_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    assert!(Canvas::new(640, 480).is_ok());
}
