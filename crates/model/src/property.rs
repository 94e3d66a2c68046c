//! Static property metadata.
//!
//! Every variant declares its properties through compile-time
//! [`PropertyDescriptor`] tables. A descriptor pairs the wire name with its
//! precomputed hash (see [`crate::hash::property_hash`]), the declared
//! cardinality, and the declared value kind. Tables are ordinary consts, so
//! they are immutable after variant definition and safe to read from any
//! thread without synchronization.

use crate::hash::property_hash;

/// How many values a property may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// At most one value.
    Single,
    /// An ordered sequence, optionally bounded.
    Repeated {
        /// Upper bound on the number of entries, when the definition has one.
        max: Option<u32>,
    },
}

/// The declared kind of a property's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A primitive scalar variant, named by its canonical type name.
    Primitive(&'static str),
    /// A nested complex variant, named by its canonical type name.
    Complex(&'static str),
    /// A polymorphic slot that accepts any element variant.
    Any,
}

/// Static metadata describing one declared property of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Property name in declaration (wire) form.
    pub name: &'static str,
    /// Precomputed stable hash of `name`.
    pub hash: u64,
    /// Declared cardinality.
    pub cardinality: Cardinality,
    /// Declared value kind.
    pub kind: ValueKind,
}

impl PropertyDescriptor {
    /// Declares a single-valued property.
    pub const fn scalar(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            hash: property_hash(name),
            cardinality: Cardinality::Single,
            kind,
        }
    }

    /// Declares an unbounded repeated property.
    pub const fn repeated(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            hash: property_hash(name),
            cardinality: Cardinality::Repeated { max: None },
            kind,
        }
    }

    /// Declares a repeated property with an upper bound.
    pub const fn repeated_max(name: &'static str, kind: ValueKind, max: u32) -> Self {
        Self {
            name,
            hash: property_hash(name),
            cardinality: Cardinality::Repeated { max: Some(max) },
            kind,
        }
    }
}

/// Fails const evaluation if two descriptors in `table` share a hash.
///
/// Variants evaluate this over their full table (inherited entries plus
/// their own), which turns a property-hash collision into an error at
/// variant-definition time rather than a runtime surprise.
pub const fn assert_distinct_hashes(table: &[PropertyDescriptor]) {
    let mut i = 0;
    while i < table.len() {
        let mut j = i + 1;
        while j < table.len() {
            if table[i].hash == table[j].hash {
                panic!("property hash collision within one variant's table");
            }
            j += 1;
        }
        i += 1;
    }
}

/// A property identity: the declared name or its stable hash.
///
/// Both forms resolve to the same hash, so generic code may carry whichever
/// it has; dispatch inside the variants is always hash-based.
#[derive(Debug, Clone, Copy)]
pub enum PropertyId<'a> {
    /// The property's wire name.
    Name(&'a str),
    /// The property's precomputed hash.
    Hash(u64),
}

impl PropertyId<'_> {
    /// Reduces the identity to its hash.
    pub fn hash(&self) -> u64 {
        match self {
            PropertyId::Name(name) => property_hash(name),
            PropertyId::Hash(hash) => *hash,
        }
    }

    /// Renders the identity for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            PropertyId::Name(name) => (*name).to_string(),
            PropertyId::Hash(hash) => format!("#{hash:016x}"),
        }
    }
}

impl<'a> From<&'a str> for PropertyId<'a> {
    fn from(name: &'a str) -> Self {
        PropertyId::Name(name)
    }
}

impl From<u64> for PropertyId<'_> {
    fn from(hash: u64) -> Self {
        PropertyId::Hash(hash)
    }
}
