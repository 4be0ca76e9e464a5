use ffd_tlv::{DocType, TagRegistry};
use ffd_wire::{decode_doc, encode_doc, FieldRecord};
use serde_json::json;

// Trimmed-down version of a real device response: display-formatted
// quantity, device-layout timestamp, numbers for money fields.
const CHECK_FIELDS: &str = r#"[
  {"caption": "ИНН", "printable": "ИНН\t7725225244", "tag": 1018, "value": "7725225244  "},
  {"printable": "25.01.20 06:18", "tag": 1012, "value": "25 Jan 2020 06:18:19 +0300"},
  {"caption": "ИТОГ", "printable": "ИТОГ\t2,00", "tag": 1020, "value": 200},
  {"tag": 1054, "value": 1},
  {"tag": 1055, "value": 2},
  {"fiscprops": [
     {"tag": 1030, "value": "item"},
     {"printable": "2,00", "tag": 1079, "value": 200},
     {"printable": "1", "tag": 1023, "value": "1,000"},
     {"tag": 1199, "value": 6}
   ],
   "tag": 1059},
  {"caption": "ФП", "tag": 1077, "value": "1765583868"},
  {"caption": "ФД", "tag": 1040, "value": 8493}
]"#;

#[test]
fn device_response_fields_decode_into_a_typed_document() {
    let reg = TagRegistry::new();
    let records: Vec<FieldRecord> = serde_json::from_str(CHECK_FIELDS).unwrap();
    let doc = decode_doc(&reg, 8493, DocType::Check, &records).unwrap();

    // Fixed-width INN keeps internal content, loses wire padding.
    assert_eq!(doc.find_by_tag(1018u16).unwrap().string(), Ok("7725225244"));
    // Device-layout timestamp normalized to UTC.
    assert_eq!(
        doc.find_by_tag(1012u16).unwrap().as_time().unwrap().timestamp(),
        1_579_922_299
    );
    // Money and counters as integers.
    assert_eq!(doc.find_by_tag(1020u16).unwrap().as_u64(), Ok(200));
    assert_eq!(doc.find_by_tag(1040u16).unwrap().as_u32(), Ok(8493));
    // Comma-decimal quantity reachable inside the structured item.
    assert_eq!(doc.find_by_tag(1023u16).unwrap().as_f64(), Ok(1.0));
    assert_eq!(doc.find_by_tag(1079u16).unwrap().as_u64(), Ok(200));
    // Captions survive.
    assert_eq!(doc.find_by_tag(1077u16).unwrap().caption, "ФП");
    assert_eq!(doc.find_by_tag(1077u16).unwrap().as_bytes(), Ok(&b"1765583868"[..]));
}

#[test]
fn decoded_documents_encode_back_in_order() {
    let reg = TagRegistry::new();
    let records: Vec<FieldRecord> = serde_json::from_str(CHECK_FIELDS).unwrap();
    let doc = decode_doc(&reg, 8493, DocType::Check, &records).unwrap();

    let out = encode_doc(&doc).unwrap();
    let tags: Vec<u16> = out.iter().map(|r| r.tag.0).collect();
    assert_eq!(tags, vec![1018, 1012, 1020, 1054, 1055, 1059, 1077, 1040]);

    // Scalar values come back as plain JSON shapes.
    assert_eq!(out[2].value, Some(json!(200)));
    assert_eq!(out[0].value, Some(json!("7725225244")));
    assert_eq!(out[1].value, Some(json!("2020-01-25T03:18:19Z")));
    // The fiscal sign was carried as decimal text bytes; it round-trips
    // as their hex rendering.
    assert_eq!(out[6].value, Some(json!("31373635353833383638")));

    let item = &out[5];
    assert!(item.value.is_none());
    assert_eq!(item.children.len(), 4);
    assert_eq!(item.children[2].value, Some(json!(1.0)));
}

#[test]
fn records_serialize_with_wire_field_names() {
    let rec = FieldRecord::structured(
        1059u16,
        vec![FieldRecord::new(1030u16, json!("item"))],
    );
    let encoded = serde_json::to_value(&rec).unwrap();
    assert_eq!(
        encoded,
        json!({"tag": 1059, "fiscprops": [{"tag": 1030, "value": "item"}]})
    );
}
