//! Loosely-typed JSON field-record mapping for FFD fiscal documents.
//!
//! This crate sits between a device transport and the typed tree in
//! `ffd-tlv`. It provides:
//! - `FieldRecord`: the raw wire shape of one field (tag + JSON value +
//!   display metadata + nested records)
//! - Decoding with device-quirk normalization: booleans standing in for
//!   numeric flags, JSON numbers arriving as floats, fixed-point fields
//!   arriving as comma-decimal display strings, byte fields arriving as
//!   numbers, and an alternate device timestamp layout
//! - Batch document assembly that collects every per-field failure and
//!   reports them together
//! - The reverse walk: typed tree back to plain wire records, order
//!   preserved
//!
//! The device envelope (status DTO, request framing, HTTP transport) is
//! not part of this crate.
//!
#![deny(missing_docs)]

/// Record decoding and document assembly.
pub mod decode;
/// Record encoding from the typed tree.
pub mod encode;
/// Error types for wire mapping.
pub mod errors;
/// The raw field record DTO.
pub mod record;

pub use decode::{decode_doc, decode_field, DEVICE_TIME_LAYOUT};
pub use encode::{encode_doc, encode_field};
pub use errors::WireError;
pub use record::FieldRecord;
