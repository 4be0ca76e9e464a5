use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::errors::TlvError;
use crate::registry::{DataKind, Tag, TagDesc, TagRegistry};

/// Loosely-typed input to [`Tlv::set_value`].
///
/// The wire layer hands over whatever shape the external representation
/// produced; the coercion engine matches it exhaustively against the node's
/// declared kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Boolean input.
    Bool(bool),
    /// Unsigned integer input, any native width.
    Uint(u64),
    /// Signed integer input, any native width.
    Int(i64),
    /// Floating-point input.
    Float(f64),
    /// String input.
    Text(String),
    /// Raw byte input.
    Bytes(Vec<u8>),
    /// Ready-made timestamp input.
    Time(DateTime<Utc>),
    /// An already-built ordered child list, for structured fields.
    Children(Vec<Tlv>),
}

impl RawValue {
    /// Stable variant name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RawValue::Bool(_) => "bool",
            RawValue::Uint(_) => "uint",
            RawValue::Int(_) => "int",
            RawValue::Float(_) => "float",
            RawValue::Text(_) => "text",
            RawValue::Bytes(_) => "bytes",
            RawValue::Time(_) => "time",
            RawValue::Children(_) => "children",
        }
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}
impl From<u16> for RawValue {
    fn from(value: u16) -> Self {
        RawValue::Uint(value.into())
    }
}
impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Uint(value.into())
    }
}
impl From<u64> for RawValue {
    fn from(value: u64) -> Self {
        RawValue::Uint(value)
    }
}
impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(value.into())
    }
}
impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}
impl From<f32> for RawValue {
    fn from(value: f32) -> Self {
        RawValue::Float(value.into())
    }
}
impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}
impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}
impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}
impl From<&[u8]> for RawValue {
    fn from(value: &[u8]) -> Self {
        RawValue::Bytes(value.to_vec())
    }
}
impl From<Vec<u8>> for RawValue {
    fn from(value: Vec<u8>) -> Self {
        RawValue::Bytes(value)
    }
}
impl From<DateTime<Utc>> for RawValue {
    fn from(value: DateTime<Utc>) -> Self {
        RawValue::Time(value)
    }
}
impl From<Vec<Tlv>> for RawValue {
    fn from(value: Vec<Tlv>) -> Self {
        RawValue::Children(value)
    }
}

/// Coerced payload of a [`Tlv`] node.
///
/// The variant always matches the node's declared kind; a failed coercion
/// is stored as the `Err` arm of the node's payload slot instead, so it can
/// never be misread as one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No value set yet.
    Empty,
    /// Boolean flag.
    Bool(bool),
    /// 32-bit storage: `Uint` fields and `Vln` fields declared ≤ 6 bytes.
    U32(u32),
    /// 64-bit storage: `Vln` fields declared > 6 bytes.
    U64(u64),
    /// Fixed-point decimal.
    F64(f64),
    /// Timestamp.
    Time(DateTime<Utc>),
    /// Text.
    Text(String),
    /// Byte string.
    Bytes(Vec<u8>),
    /// Ordered children of a structured node.
    Children(Vec<Tlv>),
}

impl Payload {
    /// Stable variant name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Payload::Empty => "empty",
            Payload::Bool(_) => "bool",
            Payload::U32(_) => "u32",
            Payload::U64(_) => "u64",
            Payload::F64(_) => "f64",
            Payload::Time(_) => "time",
            Payload::Text(_) => "text",
            Payload::Bytes(_) => "bytes",
            Payload::Children(_) => "children",
        }
    }
}

/// One tagged value: descriptor, device-supplied metadata, and a payload
/// slot that holds either the coerced value or the captured coercion error.
#[derive(Debug, Clone, PartialEq)]
pub struct Tlv {
    desc: TagDesc,
    /// Human-readable caption supplied by the device, if any.
    pub caption: String,
    /// Pre-formatted print representation supplied by the device, if any.
    pub printable: String,
    payload: Result<Payload, TlvError>,
}

impl Tlv {
    /// Creates an empty node for `tag`, failing closed if the tag is absent
    /// from both the override and the builtin table.
    ///
    /// Structured nodes start with an empty child list; every other kind
    /// starts with [`Payload::Empty`].
    pub fn new(registry: &TagRegistry, tag: impl Into<Tag>) -> Result<Self, TlvError> {
        let tag = tag.into();
        let desc = *registry.find(tag).ok_or(TlvError::UnknownTag(tag))?;
        Ok(Self::from_desc(desc))
    }

    pub(crate) fn from_desc(desc: TagDesc) -> Self {
        let payload = if desc.kind == DataKind::Stlv {
            Payload::Children(Vec::new())
        } else {
            Payload::Empty
        };
        Self {
            desc,
            caption: String::new(),
            printable: String::new(),
            payload: Ok(payload),
        }
    }

    /// The node's descriptor.
    pub fn desc(&self) -> TagDesc {
        self.desc
    }

    /// The node's tag id.
    pub fn tag(&self) -> Tag {
        self.desc.tag
    }

    /// The node's declared kind.
    pub fn kind(&self) -> DataKind {
        self.desc.kind
    }

    /// The payload slot: the coerced value, or the captured coercion error.
    pub fn payload(&self) -> &Result<Payload, TlvError> {
        &self.payload
    }

    /// The captured coercion error, if the last `set_value` failed.
    ///
    /// Callers must check this before reading any scalar accessor when the
    /// input came from an untrusted source.
    pub fn err(&self) -> Option<&TlvError> {
        self.payload.as_ref().err()
    }

    /// Coerces `value` into this node's declared kind.
    ///
    /// On failure the error replaces the payload (fail-in-place); nothing is
    /// returned so that document assembly can continue and collect all
    /// failures at the end. Overwriting an existing value re-runs the same
    /// validation.
    pub fn set_value(&mut self, value: impl Into<RawValue>) {
        self.payload = coerce(&self.desc, value.into());
    }

    /// Appends `child` to a structured node, returning a reference to the
    /// stored copy.
    pub fn append(&mut self, child: Tlv) -> Result<&mut Tlv, TlvError> {
        match &mut self.payload {
            Ok(Payload::Children(list)) => {
                let idx = list.len();
                list.push(child);
                Ok(&mut list[idx])
            }
            _ => Err(TlvError::StructuralMisuse {
                kind: self.desc.kind,
                tag: self.desc.tag,
            }),
        }
    }

    /// Creates a node for `tag`, coerces `value` into it, and appends it.
    ///
    /// A failed coercion is captured on the appended node, not returned;
    /// only an unknown tag or a non-structured parent produce an `Err`.
    pub fn append_new(
        &mut self,
        registry: &TagRegistry,
        tag: impl Into<Tag>,
        value: impl Into<RawValue>,
    ) -> Result<&mut Tlv, TlvError> {
        let mut node = Tlv::new(registry, tag)?;
        node.set_value(value);
        self.append(node)
    }

    /// Creates an empty node for `tag` and appends it, typically to
    /// pre-create a structured row that is filled incrementally.
    pub fn append_empty(
        &mut self,
        registry: &TagRegistry,
        tag: impl Into<Tag>,
    ) -> Result<&mut Tlv, TlvError> {
        let node = Tlv::new(registry, tag)?;
        self.append(node)
    }

    /// Ordered children of a structured node; `None` for any other kind.
    pub fn children(&self) -> Option<&[Tlv]> {
        match &self.payload {
            Ok(Payload::Children(list)) => Some(list),
            _ => None,
        }
    }

    /// Pre-order depth-first search: returns self on a tag match, otherwise
    /// recurses into children left to right. The first match wins even when
    /// duplicate tags exist at different depths.
    pub fn find_by_tag(&self, tag: impl Into<Tag>) -> Option<&Tlv> {
        let tag = tag.into();
        if self.desc.tag == tag {
            return Some(self);
        }
        if let Ok(Payload::Children(list)) = &self.payload {
            for child in list {
                if let Some(found) = child.find_by_tag(tag) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn ok_payload(&self) -> Result<&Payload, TlvError> {
        self.payload.as_ref().map_err(Clone::clone)
    }

    fn mismatch(&self, expected: DataKind, found: &Payload) -> TlvError {
        TlvError::KindMismatch {
            expected,
            found: found.name(),
        }
    }

    /// Reads a boolean payload.
    pub fn as_bool(&self) -> Result<bool, TlvError> {
        match self.ok_payload()? {
            Payload::Bool(b) => Ok(*b),
            other => Err(self.mismatch(DataKind::Bool, other)),
        }
    }

    /// Reads a 32-bit unsigned payload (`Uint` fields, `Vln` fields ≤ 6).
    pub fn as_u32(&self) -> Result<u32, TlvError> {
        match self.ok_payload()? {
            Payload::U32(n) => Ok(*n),
            other => Err(self.mismatch(DataKind::Uint, other)),
        }
    }

    /// Reads an unsigned payload at full width, widening 32-bit storage.
    pub fn as_u64(&self) -> Result<u64, TlvError> {
        match self.ok_payload()? {
            Payload::U32(n) => Ok((*n).into()),
            Payload::U64(n) => Ok(*n),
            other => Err(self.mismatch(DataKind::Vln, other)),
        }
    }

    /// Reads a fixed-point decimal payload.
    pub fn as_f64(&self) -> Result<f64, TlvError> {
        match self.ok_payload()? {
            Payload::F64(v) => Ok(*v),
            other => Err(self.mismatch(DataKind::Fvln, other)),
        }
    }

    /// Reads a timestamp payload.
    pub fn as_time(&self) -> Result<DateTime<Utc>, TlvError> {
        match self.ok_payload()? {
            Payload::Time(t) => Ok(*t),
            other => Err(self.mismatch(DataKind::Time, other)),
        }
    }

    /// Reads a byte-string payload.
    pub fn as_bytes(&self) -> Result<&[u8], TlvError> {
        match self.ok_payload()? {
            Payload::Bytes(b) => Ok(b),
            other => Err(self.mismatch(DataKind::Bytes, other)),
        }
    }

    fn raw_text(&self) -> Result<&str, TlvError> {
        match self.ok_payload()? {
            Payload::Text(s) => Ok(s),
            other => Err(self.mismatch(DataKind::String, other)),
        }
    }

    /// Reads a text payload with trailing ASCII spaces trimmed. The wire
    /// format right-pads fixed-width fields with spaces; internal spaces
    /// are preserved.
    pub fn fixed_string(&self) -> Result<&str, TlvError> {
        Ok(self.raw_text()?.trim_end_matches(' '))
    }

    /// Reads a text payload: trimmed for fixed-width fields, raw for
    /// variable-length ones.
    pub fn string(&self) -> Result<&str, TlvError> {
        if self.desc.varlen {
            self.raw_text()
        } else {
            self.fixed_string()
        }
    }
}

fn coerce(desc: &TagDesc, value: RawValue) -> Result<Payload, TlvError> {
    use DataKind as K;
    match (desc.kind, value) {
        (K::Bool, RawValue::Bool(b)) => Ok(Payload::Bool(b)),

        (K::Bytes, RawValue::Bytes(b)) => Ok(Payload::Bytes(b)),
        (K::Bytes, RawValue::Text(s)) => Ok(Payload::Bytes(s.into_bytes())),

        (K::Fvln, RawValue::Float(v)) => Ok(Payload::F64(v)),
        (K::Fvln, RawValue::Uint(n)) => Ok(Payload::F64(n as f64)),
        (K::Fvln, RawValue::Int(n)) => Ok(Payload::F64(n as f64)),
        (K::Fvln, RawValue::Text(s)) => match s.parse::<f64>() {
            Ok(v) => Ok(Payload::F64(v)),
            Err(e) => Err(TlvError::Parse {
                kind: K::Fvln,
                value: s,
                reason: e.to_string(),
            }),
        },

        (K::Stlv, RawValue::Children(list)) => Ok(Payload::Children(list)),

        (K::String, RawValue::Text(s)) => Ok(Payload::Text(s)),
        (K::String, RawValue::Bytes(b)) => match String::from_utf8(b) {
            Ok(s) => Ok(Payload::Text(s)),
            Err(e) => Err(TlvError::Parse {
                kind: K::String,
                value: format!("{:?}", e.as_bytes()),
                reason: "invalid UTF-8".to_string(),
            }),
        },
        (K::String, RawValue::Uint(n)) => Ok(Payload::Text(n.to_string())),
        (K::String, RawValue::Int(n)) => Ok(Payload::Text(n.to_string())),

        (K::Time, RawValue::Time(t)) => Ok(Payload::Time(t)),
        (K::Time, RawValue::Text(s)) => match DateTime::parse_from_rfc3339(&s) {
            Ok(t) => Ok(Payload::Time(t.with_timezone(&Utc))),
            Err(e) => Err(TlvError::Parse {
                kind: K::Time,
                value: s,
                reason: e.to_string(),
            }),
        },
        (K::Time, RawValue::Uint(n)) => epoch_seconds(n as i64),
        (K::Time, RawValue::Int(n)) => epoch_seconds(n),

        // Narrowing to the declared 32-bit width is intentional, not an
        // error; the field's storage is fixed by the format.
        (K::Uint, RawValue::Uint(n)) => Ok(Payload::U32(n as u32)),
        (K::Uint, RawValue::Int(n)) => Ok(Payload::U32(n as u32)),

        (K::Vln, RawValue::Uint(n)) => Ok(vln_payload(desc.length, n)),
        (K::Vln, RawValue::Int(n)) => Ok(vln_payload(desc.length, n as u64)),

        (kind, value) => Err(TlvError::UnsupportedInput {
            kind,
            input: value.kind_name(),
        }),
    }
}

fn epoch_seconds(secs: i64) -> Result<Payload, TlvError> {
    match DateTime::<Utc>::from_timestamp(secs, 0) {
        Some(t) => Ok(Payload::Time(t)),
        None => Err(TlvError::Parse {
            kind: DataKind::Time,
            value: secs.to_string(),
            reason: "epoch seconds out of range".to_string(),
        }),
    }
}

fn vln_payload(length: u16, n: u64) -> Payload {
    if length <= 6 {
        Payload::U32(n as u32)
    } else {
        Payload::U64(n)
    }
}

impl fmt::Display for Tlv {
    /// Canonical rendering: `(#<tag> <value>)` for scalars and
    /// `(#<tag> [<child> <child>])` for structured nodes.
    ///
    /// Downstream consumers depend on this format bit-for-bit: bool as
    /// `true`/`false`, bytes as lowercase hex, fixed-point rounded to an
    /// integer, timestamps as RFC3339, `Uint` as lowercase hex, `Vln` as
    /// decimal, text via [`Tlv::string`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(#{}", self.desc.tag)?;
        match &self.payload {
            Err(e) => write!(f, " <error: {e}>")?,
            Ok(Payload::Empty) => {}
            Ok(Payload::Bool(b)) => write!(f, " {b}")?,
            Ok(Payload::Bytes(b)) => {
                f.write_str(" ")?;
                for byte in b {
                    write!(f, "{byte:02x}")?;
                }
            }
            Ok(Payload::F64(v)) => write!(f, " {v:.0}")?,
            Ok(Payload::Time(t)) => {
                write!(f, " {}", t.to_rfc3339_opts(SecondsFormat::Secs, true))?
            }
            Ok(Payload::Text(_)) => {
                // Payload::Text only exists under a String-kind descriptor.
                write!(f, " {}", self.string().map_err(|_| fmt::Error)?)?
            }
            Ok(Payload::U32(n)) => {
                if self.desc.kind == DataKind::Uint {
                    write!(f, " {n:x}")?;
                } else {
                    write!(f, " {n}")?;
                }
            }
            Ok(Payload::U64(n)) => write!(f, " {n}")?,
            Ok(Payload::Children(list)) => {
                f.write_str(" [")?;
                for (i, child) in list.iter().enumerate() {
                    if i != 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str("]")?;
            }
        }
        f.write_str(")")
    }
}
