use super::*;

#[test]
fn fixed_advance_doubles_wide_characters() {
    let mut m = FixedAdvanceMeasurer::uniform(10.0);
    assert_eq!(m.width("arm", TextStyle::CompoundText).unwrap(), 30.0);
    assert_eq!(m.width("右腕", TextStyle::CompoundText).unwrap(), 40.0);
    assert_eq!(m.width("", TextStyle::CompoundText).unwrap(), 0.0);
}

#[test]
fn fixed_advance_scales_with_style_size() {
    let mut m = FixedAdvanceMeasurer::new(FontSizes::default());
    let small = m.width("a", TextStyle::Caption).unwrap();
    let big = m.width("a", TextStyle::Kanji).unwrap();
    assert_eq!(small, 8.0);
    assert_eq!(big, 110.0);
    let ext = m.measure("a", TextStyle::Meta).unwrap();
    assert_eq!(ext.height, 40.0);
}

#[test]
fn boxed_measurer_forwards() {
    let mut m: Box<dyn TextMeasurer> = Box::new(FixedAdvanceMeasurer::uniform(3.0));
    assert_eq!(m.width("abcd", TextStyle::Meta).unwrap(), 12.0);
}

#[test]
fn font_measurer_with_local_font_if_present() {
    let path = std::path::Path::new("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf");
    let Ok(face) = FontFace::read(path, 0) else {
        return;
    };

    let mut m = FontMeasurer::new(&face, FontSizes::default()).unwrap();
    assert!(!m.family_name().trim().is_empty());
    let short = m.width("arm", TextStyle::CompoundText).unwrap();
    let long = m.width("arm and ability", TextStyle::CompoundText).unwrap();
    assert!(short > 0.0);
    assert!(long > short);
}

#[test]
fn font_measurer_counts_spaces_if_font_present() {
    let path = std::path::Path::new("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf");
    let Ok(face) = FontFace::read(path, 0) else {
        return;
    };

    let mut m = FontMeasurer::new(&face, FontSizes::default()).unwrap();
    let space = m.width(" ", TextStyle::CompoundText).unwrap();
    assert!(space > 0.0);
    let a = m.width("a", TextStyle::CompoundText).unwrap();
    let b = m.width("b", TextStyle::CompoundText).unwrap();
    let ab = m.width("a b", TextStyle::CompoundText).unwrap();
    assert!((ab - (a + space + b)).abs() < 1.0, "{ab} vs {a}+{space}+{b}");
}

#[test]
fn font_measurer_rejects_absent_face_index_if_font_present() {
    let path = std::path::Path::new("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf");
    let Ok(face) = FontFace::read(path, 3) else {
        return;
    };
    assert!(FontMeasurer::new(&face, FontSizes::default()).is_err());
}
