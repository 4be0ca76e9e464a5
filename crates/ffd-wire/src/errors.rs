use ffd_tlv::{DataKind, Tag, TlvError};
use thiserror::Error;

/// Errors produced while mapping wire field records to and from the typed
/// tree.
#[derive(Debug, Error)]
pub enum WireError {
    /// A field failed tag lookup or value coercion.
    #[error("field #{tag}: {source}")]
    Field {
        /// Tag of the offending field record.
        tag: Tag,
        /// The underlying lookup or coercion error.
        #[source]
        source: TlvError,
    },
    /// A field record carried a JSON shape with no mapping for its kind.
    #[error("field #{tag}: unsupported {found} value for a {kind} field")]
    Shape {
        /// Tag of the offending field record.
        tag: Tag,
        /// Declared kind of the field.
        kind: DataKind,
        /// JSON value type actually present.
        found: &'static str,
    },
    /// A non-finite float cannot be emitted as a JSON number.
    #[error("field #{tag}: non-finite number {value} is not representable")]
    NonFiniteNumber {
        /// Tag of the offending field.
        tag: Tag,
        /// The non-finite value.
        value: f64,
    },
    /// Several fields failed; every failure is collected before reporting.
    #[error("multiple errors:{}", format_multiple(.0))]
    Multiple(Vec<WireError>),
}

fn format_multiple(errs: &[WireError]) -> String {
    errs.iter().map(|e| format!("\n- {e}")).collect()
}

/// Folds collected per-field errors: nothing on an empty list, the error
/// itself for one, a combined report otherwise.
pub(crate) fn fold_errors(mut errs: Vec<WireError>) -> Result<(), WireError> {
    match errs.len() {
        0 => Ok(()),
        1 => Err(errs.remove(0)),
        _ => Err(WireError::Multiple(errs)),
    }
}
