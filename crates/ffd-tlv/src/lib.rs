//! Tagged-value (TLV) data model for FFD fiscal documents.
//!
//! This crate provides:
//! - A tag registry: builtin descriptors plus a one-shot override table,
//!   binary-searched on every node construction
//! - A recursive value tree (`Tlv`) with eight value kinds, including
//!   structured nodes holding ordered child lists
//! - A coercion engine turning loosely-typed wire inputs into the tag's
//!   declared kind, capturing failures in place for batch reporting
//! - A document container (`Doc`) and canonical text rendering
//!
//! Core invariants:
//! - An unknown tag fails closed before any value work happens
//! - A node's payload variant always matches its declared kind; a failed
//!   coercion occupies the payload slot as an error and is never readable
//!   as a value
//! - Child order is insertion order and is semantically meaningful
//! - Tree search is pre-order depth-first; the first match wins
//!
//! No operation here performs I/O or blocks; transport and the device JSON
//! envelope live in collaborating crates.
//!
#![deny(missing_docs)]

mod builtin;
/// Document container and document type codes.
pub mod document;
/// Error taxonomy for lookup, construction, and coercion.
pub mod errors;
/// Tag descriptors and the descriptor registry.
pub mod registry;
/// The tagged-value node, coercion engine, and tree operations.
pub mod tlv;

pub use document::{Doc, DocType, UnknownDocType};
pub use errors::TlvError;
pub use registry::{DataKind, Tag, TagDesc, TagRegistry};
pub use tlv::{Payload, RawValue, Tlv};
