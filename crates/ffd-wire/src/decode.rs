use chrono::{DateTime, Utc};
use ffd_tlv::{DataKind, Doc, DocType, RawValue, Tag, TagRegistry, Tlv};
use regex::Regex;
use serde_json::Value as JsonValue;

use crate::errors::{fold_errors, WireError};
use crate::record::FieldRecord;

/// Timestamp layout some devices use instead of RFC3339,
/// e.g. `14 Jul 2017 05:40:00 +0300`.
pub const DEVICE_TIME_LAYOUT: &str = "%d %b %Y %H:%M:%S %z";

/// Decodes one field record into a typed node.
///
/// Device quirks are normalized here, before the core coercion runs:
/// booleans standing in for numeric flags, JSON numbers arriving as floats,
/// fixed-point fields arriving as formatted display strings, and byte
/// fields arriving as numbers. Structured records recurse; the first
/// failing child aborts the whole subtree.
pub fn decode_field(registry: &TagRegistry, record: &FieldRecord) -> Result<Tlv, WireError> {
    let mut node = Tlv::new(registry, record.tag).map_err(|source| WireError::Field {
        tag: record.tag,
        source,
    })?;

    if node.kind() == DataKind::Stlv {
        for child in &record.children {
            let sub = decode_field(registry, child)?;
            node.append(sub).map_err(|source| WireError::Field {
                tag: record.tag,
                source,
            })?;
        }
    } else if let Some(value) = &record.value {
        let raw = normalize(record.tag, node.kind(), value)?;
        node.set_value(raw);
        if let Some(source) = node.err() {
            return Err(WireError::Field {
                tag: record.tag,
                source: source.clone(),
            });
        }
    }

    node.caption = record.caption.clone();
    node.printable = record.printable.clone();
    Ok(node)
}

/// Decodes a record list into a document, collecting every per-field
/// failure and reporting them together instead of aborting on the first
/// bad field.
pub fn decode_doc(
    registry: &TagRegistry,
    number: u32,
    doc_type: DocType,
    records: &[FieldRecord],
) -> Result<Doc, WireError> {
    let mut doc = Doc::new(number, doc_type);
    let mut errs = Vec::new();
    for record in records {
        match decode_field(registry, record) {
            Ok(node) => {
                if let Err(source) = doc.append(node) {
                    errs.push(WireError::Field {
                        tag: record.tag,
                        source,
                    });
                }
            }
            Err(e) => errs.push(e),
        }
    }
    fold_errors(errs)?;
    Ok(doc)
}

fn normalize(tag: Tag, kind: DataKind, value: &JsonValue) -> Result<RawValue, WireError> {
    match (kind, value) {
        // Some devices send boolean flags for single-byte numeric fields.
        (DataKind::Uint, JsonValue::Bool(b)) => Ok(RawValue::Uint(u64::from(*b))),
        // JSON decoding yields floats for integer tokens; the declared
        // width makes truncation the intended reading.
        (DataKind::Uint | DataKind::Vln, JsonValue::Number(n)) => Ok(RawValue::Uint(as_u64(n))),
        // Byte fields occasionally arrive as numbers in forced print
        // format; carry the decimal text bytes.
        (DataKind::Bytes, JsonValue::Number(n)) => {
            Ok(RawValue::Bytes(as_u64(n).to_string().into_bytes()))
        }
        (DataKind::Fvln, JsonValue::String(s)) => Ok(RawValue::Text(normalize_decimal(s))),
        (DataKind::Time, JsonValue::String(s)) => {
            match DateTime::parse_from_str(s, DEVICE_TIME_LAYOUT) {
                Ok(t) => Ok(RawValue::Time(t.with_timezone(&Utc))),
                // Not the device layout; the core handles RFC3339.
                Err(_) => Ok(RawValue::Text(s.clone())),
            }
        }
        (_, JsonValue::Bool(b)) => Ok(RawValue::Bool(*b)),
        (_, JsonValue::Number(n)) => {
            if let Some(u) = n.as_u64() {
                Ok(RawValue::Uint(u))
            } else if let Some(i) = n.as_i64() {
                Ok(RawValue::Int(i))
            } else {
                Ok(RawValue::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        (_, JsonValue::String(s)) => Ok(RawValue::Text(s.clone())),
        (_, other) => Err(WireError::Shape {
            tag,
            kind,
            found: json_type_name(other),
        }),
    }
}

fn as_u64(n: &serde_json::Number) -> u64 {
    if let Some(u) = n.as_u64() {
        u
    } else if let Some(i) = n.as_i64() {
        i as u64
    } else {
        n.as_f64().unwrap_or(0.0) as u64
    }
}

/// Rewrites a formatted decimal display string (`"1 333,500"`) into plain
/// decimal form (`"1333.500"`). Strings that do not look display-formatted
/// pass through untouched.
fn normalize_decimal(s: &str) -> String {
    let display = Regex::new(r"^[0-9\u{a0} ]+(,[0-9]+)?$").expect("invalid regex");
    if !display.is_match(s) {
        return s.to_string();
    }
    s.chars()
        .filter(|c| *c != ' ' && *c != '\u{a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
