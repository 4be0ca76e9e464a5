use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::TlvError;
use crate::registry::{DataKind, Tag, TagDesc, TagRegistry};
use crate::tlv::{RawValue, Tlv};

/// Fiscal document category, with the fixed small integer code the format
/// assigns to each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum DocType {
    /// Registration report.
    Registration,
    /// Shift open report.
    CycleOpen,
    /// Check (receipt).
    Check,
    /// Strict reporting form (BSO).
    Bso,
    /// Shift close report.
    CycleClose,
    /// Fiscal storage close report.
    StorageClose,
    /// Operator confirmation.
    OperatorConfirmation,
    /// Registration change report.
    RegChange,
    /// Current state report.
    StateReport,
    /// Correction check.
    CorrectionCheck,
    /// Correction strict reporting form.
    CorrectionBso,
}

impl DocType {
    /// The fixed wire code for this document type.
    pub fn code(self) -> u16 {
        match self {
            DocType::Registration => 1,
            DocType::CycleOpen => 2,
            DocType::Check => 3,
            DocType::Bso => 4,
            DocType::CycleClose => 5,
            DocType::StorageClose => 6,
            DocType::OperatorConfirmation => 7,
            DocType::RegChange => 11,
            DocType::StateReport => 21,
            DocType::CorrectionCheck => 31,
            DocType::CorrectionBso => 41,
        }
    }
}

/// Error for document type codes outside the closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown document type code {0}")]
pub struct UnknownDocType(pub u16);

impl TryFrom<u16> for DocType {
    type Error = UnknownDocType;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(DocType::Registration),
            2 => Ok(DocType::CycleOpen),
            3 => Ok(DocType::Check),
            4 => Ok(DocType::Bso),
            5 => Ok(DocType::CycleClose),
            6 => Ok(DocType::StorageClose),
            7 => Ok(DocType::OperatorConfirmation),
            11 => Ok(DocType::RegChange),
            21 => Ok(DocType::StateReport),
            31 => Ok(DocType::CorrectionCheck),
            41 => Ok(DocType::CorrectionBso),
            other => Err(UnknownDocType(other)),
        }
    }
}

impl From<DocType> for u16 {
    fn from(value: DocType) -> Self {
        value.code()
    }
}

// The synthetic root is never produced by tag lookup: tag 0 is absent from
// every table, and find_by_tag skips the root node itself.
const ROOT_DESC: TagDesc = TagDesc {
    kind: DataKind::Stlv,
    tag: Tag(0),
    length: 0,
    varlen: true,
};

/// A named, numbered fiscal document wrapping one structured tagged-value
/// tree. Field insertion order is preserved and round-trips.
#[derive(Debug, Clone, PartialEq)]
pub struct Doc {
    /// Fiscal document number.
    pub number: u32,
    /// Document category.
    pub doc_type: DocType,
    root: Tlv,
}

impl Doc {
    /// Creates an empty document with a structured root.
    pub fn new(number: u32, doc_type: DocType) -> Self {
        Self {
            number,
            doc_type,
            root: Tlv::from_desc(ROOT_DESC),
        }
    }

    /// Top-level fields, in insertion order.
    pub fn props(&self) -> &[Tlv] {
        // The root is structured by construction.
        self.root.children().unwrap_or(&[])
    }

    /// Appends a pre-built top-level field.
    pub fn append(&mut self, node: Tlv) -> Result<&mut Tlv, TlvError> {
        self.root.append(node)
    }

    /// Creates, coerces, and appends a top-level field; see
    /// [`Tlv::append_new`] for the error contract.
    pub fn append_new(
        &mut self,
        registry: &TagRegistry,
        tag: impl Into<Tag>,
        value: impl Into<RawValue>,
    ) -> Result<&mut Tlv, TlvError> {
        self.root.append_new(registry, tag, value)
    }

    /// Creates and appends an empty top-level field, typically a structured
    /// row to be filled incrementally.
    pub fn append_empty(
        &mut self,
        registry: &TagRegistry,
        tag: impl Into<Tag>,
    ) -> Result<&mut Tlv, TlvError> {
        self.root.append_empty(registry, tag)
    }

    /// Pre-order depth-first search over the document's fields.
    pub fn find_by_tag(&self, tag: impl Into<Tag>) -> Option<&Tlv> {
        let tag = tag.into();
        self.props().iter().find_map(|child| child.find_by_tag(tag))
    }

    /// The captured coercion errors of every field in the tree, in
    /// pre-order. Empty means the whole document coerced cleanly.
    pub fn errors(&self) -> Vec<&TlvError> {
        fn walk<'a>(node: &'a Tlv, out: &mut Vec<&'a TlvError>) {
            if let Some(e) = node.err() {
                out.push(e);
            }
            for child in node.children().unwrap_or(&[]) {
                walk(child, out);
            }
        }
        let mut out = Vec::new();
        for child in self.props() {
            walk(child, &mut out);
        }
        out
    }
}

impl fmt::Display for Doc {
    /// Canonical rendering: `Doc(#<number> Type=<code> Props=[...])`,
    /// fields rendered via [`Tlv`]'s canonical format, space-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Doc(#{} Type={} Props=[", self.number, self.doc_type.code())?;
        for (i, child) in self.props().iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{child}")?;
        }
        f.write_str("])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_type_codes_round_trip() {
        for doc_type in [
            DocType::Registration,
            DocType::CycleOpen,
            DocType::Check,
            DocType::Bso,
            DocType::CycleClose,
            DocType::StorageClose,
            DocType::OperatorConfirmation,
            DocType::RegChange,
            DocType::StateReport,
            DocType::CorrectionCheck,
            DocType::CorrectionBso,
        ] {
            assert_eq!(DocType::try_from(doc_type.code()), Ok(doc_type));
        }
        assert_eq!(DocType::try_from(99), Err(UnknownDocType(99)));
    }

    #[test]
    fn empty_doc_renders_empty_props() {
        let d = Doc::new(17, DocType::CycleOpen);
        assert_eq!(d.to_string(), "Doc(#17 Type=2 Props=[])");
    }

    #[test]
    fn find_by_tag_never_matches_the_synthetic_root() {
        let d = Doc::new(0, DocType::Check);
        assert!(d.find_by_tag(0u16).is_none());
    }

    #[test]
    fn errors_collects_failures_across_the_tree() {
        let reg = TagRegistry::new();
        let mut d = Doc::new(0, DocType::Check);
        d.append_new(&reg, 1008u16, "ok").unwrap();
        d.append_new(&reg, 1023u16, "not a number").unwrap();
        let row = d.append_empty(&reg, 1059u16).unwrap();
        row.append_new(&reg, 1079u16, "also bad").unwrap();

        let errs = d.errors();
        assert_eq!(errs.len(), 2);
    }
}
