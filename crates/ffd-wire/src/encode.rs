use chrono::SecondsFormat;
use ffd_tlv::{Doc, Payload, Tlv};
use serde_json::{Number, Value as JsonValue};

use crate::errors::WireError;
use crate::record::FieldRecord;

/// Encodes one typed node back into a wire field record.
///
/// The reverse of [`crate::decode::decode_field`]: scalars become plain
/// JSON values (bytes as lowercase hex text, timestamps as RFC3339),
/// structured nodes become child record lists in insertion order. A node
/// carrying a captured coercion error cannot be emitted.
pub fn encode_field(node: &Tlv) -> Result<FieldRecord, WireError> {
    let tag = node.tag();
    let payload = match node.payload() {
        Ok(p) => p,
        Err(source) => {
            return Err(WireError::Field {
                tag,
                source: source.clone(),
            })
        }
    };

    let mut record = FieldRecord {
        tag,
        caption: node.caption.clone(),
        printable: node.printable.clone(),
        ..FieldRecord::default()
    };

    match payload {
        Payload::Empty => {}
        Payload::Bool(b) => record.value = Some(JsonValue::Bool(*b)),
        Payload::U32(n) => record.value = Some(JsonValue::Number((*n).into())),
        Payload::U64(n) => record.value = Some(JsonValue::Number((*n).into())),
        Payload::F64(v) => {
            let n = Number::from_f64(*v).ok_or(WireError::NonFiniteNumber { tag, value: *v })?;
            record.value = Some(JsonValue::Number(n));
        }
        Payload::Time(t) => {
            record.value = Some(JsonValue::String(
                t.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        Payload::Text(_) => {
            // string() trims the fixed-width padding; the device re-pads.
            let s = node.string().map_err(|source| WireError::Field { tag, source })?;
            record.value = Some(JsonValue::String(s.to_string()));
        }
        Payload::Bytes(b) => {
            let mut hex = String::with_capacity(b.len() * 2);
            for byte in b {
                hex.push_str(&format!("{byte:02x}"));
            }
            record.value = Some(JsonValue::String(hex));
        }
        Payload::Children(list) => {
            record.children = list.iter().map(encode_field).collect::<Result<_, _>>()?;
        }
    }
    Ok(record)
}

/// Encodes a document's fields back into wire records, preserving
/// insertion order.
pub fn encode_doc(doc: &Doc) -> Result<Vec<FieldRecord>, WireError> {
    doc.props().iter().map(encode_field).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffd_tlv::{DocType, TagRegistry};
    use serde_json::json;

    #[test]
    fn scalars_emit_plain_json_values() {
        let reg = TagRegistry::new();
        let mut doc = Doc::new(0, DocType::Check);
        doc.append_new(&reg, 1054u16, 1u32).unwrap();
        doc.append_new(&reg, 1008u16, "e@ma.il").unwrap();
        doc.append_new(&reg, 1002u16, false).unwrap();
        doc.append_new(&reg, 1077u16, vec![0xba, 0xbe]).unwrap();

        let records = encode_doc(&doc).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].value, Some(json!(1)));
        assert_eq!(records[1].value, Some(json!("e@ma.il")));
        assert_eq!(records[2].value, Some(json!(false)));
        assert_eq!(records[3].value, Some(json!("babe")));
    }

    #[test]
    fn structured_nodes_emit_child_records() {
        let reg = TagRegistry::new();
        let mut doc = Doc::new(0, DocType::Check);
        let row = doc.append_empty(&reg, 1059u16).unwrap();
        row.append_new(&reg, 1030u16, "item").unwrap();
        row.append_new(&reg, 1079u16, 7u32).unwrap();

        let records = encode_doc(&doc).unwrap();
        assert_eq!(records[0].children.len(), 2);
        assert_eq!(records[0].children[1].value, Some(json!(7)));
        assert!(records[0].value.is_none());
    }

    #[test]
    fn failed_nodes_refuse_to_encode() {
        let reg = TagRegistry::new();
        let mut doc = Doc::new(0, DocType::Check);
        doc.append_new(&reg, 1023u16, "not a number").unwrap();
        assert!(encode_doc(&doc).is_err());
    }
}
