use thiserror::Error;

use crate::registry::{DataKind, Tag};

/// Errors produced by tag lookup, tree construction, and value coercion.
///
/// Coercion failures (`UnsupportedInput`, `Parse`) are captured on the node
/// they occurred on rather than returned, so a document can be assembled
/// field by field and all failures collected at the end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TlvError {
    /// Tag id is absent from both the override and the builtin table.
    #[error("unknown tag #{0}")]
    UnknownTag(Tag),
    /// A kind-specific accessor was called on a payload of a different kind.
    #[error("kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// Kind the accessor expected.
        expected: DataKind,
        /// Name of the payload variant actually present.
        found: &'static str,
    },
    /// `set_value` received an input with no coercion rule for this kind.
    #[error("no {kind} coercion for {input} input")]
    UnsupportedInput {
        /// Declared kind of the node.
        kind: DataKind,
        /// Name of the offending input variant.
        input: &'static str,
    },
    /// A string input could not be parsed as the kind's representation.
    #[error("cannot parse '{value}' as {kind}: {reason}")]
    Parse {
        /// Declared kind of the node.
        kind: DataKind,
        /// Offending input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// A child operation was attempted on a non-structured node.
    #[error("tag #{tag} is {kind}, not a structured node")]
    StructuralMisuse {
        /// Declared kind of the node.
        kind: DataKind,
        /// Tag of the offending node.
        tag: Tag,
    },
}
