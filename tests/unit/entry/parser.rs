use super::*;

#[test]
fn parses_compound_pattern() {
    let c = parse_compound("右腕 (うわん) = right arm").unwrap();
    assert_eq!(c, Compound::new("右腕", "うわん", "right arm"));

    let c = parse_compound("手腕(しゅわん)=ability, skill").unwrap();
    assert_eq!(c, Compound::new("手腕", "しゅわん", "ability, skill"));
}

#[test]
fn rejects_malformed_compounds() {
    assert!(parse_compound("右腕 = right arm").is_none());
    assert!(parse_compound("右腕 () = right arm").is_none());
    assert!(parse_compound("右腕 (うわん) right arm").is_none());
    assert!(parse_compound("右腕 (うわん) =").is_none());
    assert!(parse_compound("(うわん) = right arm").is_none());
    assert!(parse_compound("右 腕 (うわん) = x").is_none());
}

#[test]
fn whitespace_only_gloss_is_empty() {
    let c = parse_compound("右腕 (うわん) =  ").unwrap();
    assert_eq!(c.gloss, "");
}

#[test]
fn compound_list_drops_unmatched_parts() {
    let list = parse_compound_list("右腕 (うわん) = right arm; ...; 手腕 (しゅわん) = ability;");
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].headword, "手腕");
}

#[test]
fn format_from_extension() {
    assert_eq!(
        SourceFormat::from_path(Path::new("n2.CSV")),
        SourceFormat::Csv
    );
    assert_eq!(
        SourceFormat::from_path(Path::new("n3.txt")),
        SourceFormat::ScrapedText
    );
    assert_eq!(SourceFormat::Csv.parser().dialect(), "csv");
}
