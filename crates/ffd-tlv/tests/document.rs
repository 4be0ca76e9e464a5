use ffd_tlv::{Doc, DocType, TagRegistry};

// Mirrors a real check document: top-level scalar fields plus one
// structured settlement item, rendered to the canonical golden string.
#[test]
fn check_document_builds_and_renders_golden() {
    let reg = TagRegistry::new();
    let mut d = Doc::new(0, DocType::Check);

    assert!(d.append_new(&reg, 1054u16, 1u32).unwrap().err().is_none());
    assert!(d.append_new(&reg, 1055u16, 2u32).unwrap().err().is_none());
    assert!(d.append_new(&reg, 1008u16, "e@ma.il").unwrap().err().is_none());
    assert!(d.append_new(&reg, 1036u16, 102030u32).unwrap().err().is_none());

    let row = d.append_empty(&reg, 1059u16).unwrap();
    assert!(row.append_new(&reg, 1023u16, 1u32).unwrap().err().is_none());
    assert!(row.append_new(&reg, 1030u16, "item").unwrap().err().is_none());
    assert!(row.append_new(&reg, 1079u16, 7u32).unwrap().err().is_none());
    assert!(row.append_new(&reg, 1199u16, 6u32).unwrap().err().is_none());
    assert!(row.append_new(&reg, 1212u16, 1u32).unwrap().err().is_none());
    assert!(row.append_new(&reg, 1214u16, 1u32).unwrap().err().is_none());

    assert_eq!(
        d.to_string(),
        "Doc(#0 Type=3 Props=[(#1054 1) (#1055 2) (#1008 e@ma.il) (#1036 102030) \
         (#1059 [(#1023 1) (#1030 item) (#1079 7) (#1199 6) (#1212 1) (#1214 1)])])"
    );
}

#[test]
fn find_by_tag_reaches_nested_fields() {
    let reg = TagRegistry::new();
    let mut d = Doc::new(3, DocType::Check);
    d.append_new(&reg, 1008u16, "e@ma.il").unwrap();
    let row = d.append_empty(&reg, 1059u16).unwrap();
    row.append_new(&reg, 1030u16, "item").unwrap();
    row.append_new(&reg, 1079u16, 7u32).unwrap();

    // Present only inside the nested structured child.
    let price = d.find_by_tag(1079u16).expect("nested field");
    assert_eq!(price.as_u64(), Ok(7));
    assert_eq!(d.find_by_tag(1008u16).unwrap().string(), Ok("e@ma.il"));
    assert!(d.find_by_tag(1040u16).is_none());
}

#[test]
fn unknown_top_level_tag_aborts_the_append() {
    let reg = TagRegistry::new();
    let mut d = Doc::new(0, DocType::Check);
    assert!(d.append_new(&reg, 9u16, 1u32).is_err());
    assert!(d.props().is_empty());
}
