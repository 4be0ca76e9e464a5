use ffd_tlv::Tag;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One loosely-typed field record as it appears on the JSON wire: a tag id
/// and whatever value shape the device produced, plus optional display
/// metadata and nested records for structured fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FieldRecord {
    /// Human-readable caption supplied by the device.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub caption: String,
    /// Pre-formatted print representation supplied by the device.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub printable: String,
    /// Child records of a structured field.
    #[serde(rename = "fiscprops", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldRecord>,
    /// Tag id.
    pub tag: Tag,
    /// Raw value: bool, number, or string. Absent for structured fields
    /// and for rows created empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
}

impl FieldRecord {
    /// A bare record for `tag` carrying `value`.
    pub fn new(tag: impl Into<Tag>, value: JsonValue) -> Self {
        Self {
            tag: tag.into(),
            value: Some(value),
            ..Self::default()
        }
    }

    /// A structured record for `tag` with the given child records.
    pub fn structured(tag: impl Into<Tag>, children: Vec<FieldRecord>) -> Self {
        Self {
            tag: tag.into(),
            children,
            ..Self::default()
        }
    }
}
