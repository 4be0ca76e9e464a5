use std::fmt;

use serde::{Deserialize, Serialize};

use crate::builtin::BUILTIN_TAGS;

/// FFD field tag, globally meaningful per the national fiscal format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Tag(pub u16);

impl From<u16> for Tag {
    fn from(value: u16) -> Self {
        Tag(value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of value a tagged field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataKind {
    /// Placeholder for descriptors that carry no usable kind.
    Invalid,
    /// Structured: an ordered list of child tagged values.
    Stlv,
    /// Boolean flag.
    Bool,
    /// Unsigned integer, fixed 32-bit storage.
    Uint,
    /// Variable-length number; storage width follows the declared length.
    Vln,
    /// Fixed-point decimal carried as a 64-bit float.
    Fvln,
    /// Timestamp with second precision.
    Time,
    /// Text, fixed-width (space-padded) or variable-length.
    String,
    /// Raw byte string.
    Bytes,
}

impl DataKind {
    /// Stable lowercase name, used in error messages and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            DataKind::Invalid => "invalid",
            DataKind::Stlv => "stlv",
            DataKind::Bool => "bool",
            DataKind::Uint => "uint",
            DataKind::Vln => "vln",
            DataKind::Fvln => "fvln",
            DataKind::Time => "time",
            DataKind::String => "string",
            DataKind::Bytes => "bytes",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable descriptor of one tag: its kind, declared byte length, and
/// whether the length is variable.
///
/// `length` disambiguates [`DataKind::Vln`] storage width (≤ 6 bytes ⇒
/// 32-bit, else 64-bit) and governs fixed-width text trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDesc {
    /// Value kind this tag carries.
    pub kind: DataKind,
    /// Tag id.
    pub tag: Tag,
    /// Declared byte length.
    pub length: u16,
    /// Whether the field length is variable.
    pub varlen: bool,
}

/// Descriptor table: the builtin tag set plus an optional override table
/// consulted first.
///
/// Construct one registry at startup and pass it by reference to whichever
/// layer builds nodes. `register_overrides` needs exclusive access;
/// `find` is a pure read and may be shared freely once the table is stable.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    overrides: Vec<TagDesc>,
}

impl TagRegistry {
    /// Creates a registry over the builtin table, with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin descriptor table, sorted ascending by tag id.
    pub fn builtin() -> &'static [TagDesc] {
        BUILTIN_TAGS
    }

    /// Stable-sorts `table` ascending by tag id, installs it as the override
    /// table, and returns the previous one (empty on first call).
    pub fn register_overrides(&mut self, mut table: Vec<TagDesc>) -> Vec<TagDesc> {
        table.sort_by_key(|d| d.tag);
        std::mem::replace(&mut self.overrides, table)
    }

    /// Looks a tag up in the override table first, then in the builtin one.
    pub fn find(&self, tag: Tag) -> Option<&TagDesc> {
        if !self.overrides.is_empty() {
            if let Some(desc) = search_sorted(tag, &self.overrides) {
                return Some(desc);
            }
        }
        search_sorted(tag, BUILTIN_TAGS)
    }
}

// Binary search with an early exact-match return. find() sits on the hot
// path of every node construction; tag ids are unique within each table.
fn search_sorted(tag: Tag, xs: &[TagDesc]) -> Option<&TagDesc> {
    let (mut i, mut j) = (0usize, xs.len());
    while i < j {
        let h = (i + j) >> 1;
        let item = &xs[h];
        if item.tag == tag {
            return Some(item);
        } else if item.tag < tag {
            i = h + 1;
        } else {
            j = h;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(tag: u16, kind: DataKind) -> TagDesc {
        TagDesc {
            kind,
            tag: Tag(tag),
            length: 4,
            varlen: false,
        }
    }

    #[test]
    fn builtin_table_is_sorted_and_unique() {
        let table = TagRegistry::builtin();
        for pair in table.windows(2) {
            assert!(pair[0].tag < pair[1].tag, "table out of order at {:?}", pair);
        }
    }

    #[test]
    fn find_hits_every_builtin_tag() {
        let reg = TagRegistry::new();
        for desc in TagRegistry::builtin() {
            assert_eq!(reg.find(desc.tag), Some(desc));
        }
    }

    #[test]
    fn find_misses_absent_tags() {
        let reg = TagRegistry::new();
        assert_eq!(reg.find(Tag(1)), None);
        assert_eq!(reg.find(Tag(65535)), None);
    }

    #[test]
    fn overrides_win_over_builtin() {
        let mut reg = TagRegistry::new();
        let prev = reg.register_overrides(vec![
            desc(1008, DataKind::Bytes),
            desc(60000, DataKind::Vln),
        ]);
        assert!(prev.is_empty());

        assert_eq!(reg.find(Tag(1008)).map(|d| d.kind), Some(DataKind::Bytes));
        assert_eq!(reg.find(Tag(60000)).map(|d| d.kind), Some(DataKind::Vln));
        // Tags absent from the override table still resolve via builtin.
        assert_eq!(reg.find(Tag(1030)).map(|d| d.kind), Some(DataKind::String));
    }

    #[test]
    fn register_overrides_sorts_and_returns_previous() {
        let mut reg = TagRegistry::new();
        reg.register_overrides(vec![desc(60010, DataKind::Uint), desc(60001, DataKind::Uint)]);
        // Out-of-order input still resolves through the binary search.
        assert!(reg.find(Tag(60001)).is_some());
        assert!(reg.find(Tag(60010)).is_some());

        let prev = reg.register_overrides(Vec::new());
        assert_eq!(prev.len(), 2);
        assert_eq!(prev[0].tag, Tag(60001));
        assert_eq!(reg.find(Tag(60001)), None);
    }
}
