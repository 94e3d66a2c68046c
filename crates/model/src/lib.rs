//! # Meridian Interchange Model
//!
//! This crate contains the typed element tree at the core of the Meridian
//! clinical data interchange model, together with the structural-reflection
//! protocol that lets generic tooling (serializers, validators, differs,
//! copiers) operate over any variant without a variant-specific code path.
//!
//! ## Architecture
//!
//! - **Property tables**: every variant declares its properties as const
//!   [`PropertyDescriptor`] tables. A property's identity is its name plus
//!   a precomputed FNV-1a hash of that name ([`property_hash`]) — a pure
//!   function of the name, so independently compiled producers and
//!   consumers agree on every identity. Collisions inside one variant's
//!   table fail const evaluation at definition time.
//! - **Composition, not inheritance**: each variant embeds the shared
//!   [`BaseElement`] block by value; backbone-family variants expose their
//!   modifier-extension list through the
//!   [`Element::modifier_extensions`] capability.
//! - **Uniform protocol**: the object-safe [`Element`] trait carries
//!   `list_properties`, `get_property`/`set_property` (name- or
//!   hash-addressed), `add_child`, `is_empty`, `copy`,
//!   `equals_deep`/`equals_shallow` and the fail-closed
//!   [`Element::check_no_modifiers`] safety gate.
//! - **Precision-preserving decimals**: [`PreciseDecimal`] keeps the
//!   verbatim source text of every decimal next to its parsed value, so
//!   serialization can emit exactly what was recorded.
//!
//! ## Examples
//!
//! ```ignore
//! use meridian_model::{Dosage, Element, PropertyId, StringElement};
//!
//! let mut dosage = Dosage::default();
//! dosage.set_property(
//!     PropertyId::Name("text"),
//!     Box::new(StringElement::from("one tablet daily")),
//! )?;
//!
//! // Generic access, no static knowledge of the variant:
//! let element: &dyn Element = &dosage;
//! assert!(!element.is_empty());
//! let copy = element.copy();
//! assert!(copy.equals_deep(element));
//! element.check_no_modifiers("Dosage", "serialize")?;
//! ```

pub mod decimal;
pub mod dosage;
pub mod element;
pub mod error;
pub mod hash;
pub mod primitive;
pub mod property;
pub mod types;

pub use decimal::PreciseDecimal;
pub use dosage::Dosage;
pub use element::{
    BaseElement, BoxedElement, ConcreteElement, Element, MODIFIER_EXTENSION, PrimitiveValue, cast,
};
pub use error::{ModelError, UnrecognizedModifier};
pub use hash::property_hash;
pub use primitive::{BooleanElement, DecimalElement, IntegerElement, StringElement};
pub use property::{Cardinality, PropertyDescriptor, PropertyId, ValueKind, assert_distinct_hashes};
pub use types::{Coding, Extension, Quantity};
