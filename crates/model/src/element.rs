//! The element tree and its structural-reflection protocol.
//!
//! Every node of an interchange document is a variant implementing
//! [`Element`]. Generic tooling — serializers, validators, differs, copiers
//! — manipulates nodes exclusively through this protocol, with no
//! variant-specific code paths: properties are enumerated through static
//! descriptor tables and accessed by name or by stable hash.
//!
//! Instead of an inheritance chain, every variant embeds the shared
//! [`BaseElement`] property block by value and delegates to it before
//! handling its own declared properties. Variants in the backbone family
//! additionally expose their modifier-extension list through the
//! [`Element::modifier_extensions`] capability, which powers the
//! fail-closed [`Element::check_no_modifiers`] safety gate.

use std::any::Any;
use std::fmt;

use crate::decimal::PreciseDecimal;
use crate::error::{ModelError, UnrecognizedModifier};
use crate::hash::property_hash;
use crate::property::{PropertyDescriptor, PropertyId, ValueKind};
use crate::types::Extension;

/// An owned element of statically unknown variant.
pub type BoxedElement = Box<dyn Element>;

/// A borrowed view of a primitive variant's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue<'a> {
    /// A string scalar.
    String(&'a str),
    /// A boolean scalar.
    Boolean(bool),
    /// A signed 32-bit integer scalar.
    Integer(i32),
    /// A precision-preserving decimal scalar.
    Decimal(&'a PreciseDecimal),
}

/// The uniform property protocol implemented by every variant.
///
/// The trait is object safe: generic consumers hold `&dyn Element` /
/// [`BoxedElement`] and never need to know the concrete variant. Each
/// variant also keeps ordinary strongly-typed fields and accessors for
/// callers that do know it; those are a convenience, not part of this
/// contract.
pub trait Element: Any + fmt::Debug {
    /// Canonical type name of this variant.
    ///
    /// Recorded when a polymorphic slot must say which variant it holds.
    fn type_name(&self) -> &'static str;

    /// The shared base property block.
    fn base(&self) -> &BaseElement;

    /// Mutable access to the shared base property block.
    fn base_mut(&mut self) -> &mut BaseElement;

    /// Declared properties: inherited entries first, then this variant's
    /// own, in declaration order. This order is what serialization and
    /// diffing iterate, so it is stable by contract.
    fn list_properties(&self) -> Vec<PropertyDescriptor>;

    /// Resolves a property to its current values.
    ///
    /// Returns an empty sequence when the property is absent or empty, a
    /// one-element sequence for a populated scalar, and the full ordered
    /// sequence for repeated properties. Fails with
    /// [`ModelError::UnknownProperty`] when `id` resolves to nothing
    /// declared on this variant or its base.
    fn get_property(&self, id: PropertyId<'_>) -> Result<Vec<&dyn Element>, ModelError>;

    /// Stores `value` into a property: scalars are overwritten, repeated
    /// properties appended to.
    ///
    /// Fails with [`ModelError::TypeMismatch`] when the value's variant is
    /// not assignable to the declared kind (values are never coerced), and
    /// with [`ModelError::UnknownProperty`] for an unrecognized id.
    fn set_property(&mut self, id: PropertyId<'_>, value: BoxedElement) -> Result<(), ModelError>;

    /// Creates, stores and returns a fresh child for the named property.
    ///
    /// Works for repeated element properties and scalar complex properties
    /// (a fresh child replaces a scalar); polymorphic slots take the
    /// variant from the name (`valueString`, `valueCoding`, ...). Fails
    /// with [`ModelError::UnknownProperty`] otherwise, including for
    /// primitive scalars.
    fn add_child(&mut self, name: &str) -> Result<&mut dyn Element, ModelError>;

    /// True iff every declared property (own and inherited) is absent or
    /// empty and the variant's identity/value fields are unset.
    ///
    /// This is the primitive that decides whether an optional substructure
    /// is omitted entirely during serialization.
    fn is_empty(&self) -> bool;

    /// Produces a fully independent deep copy, sharing nothing with `self`.
    fn copy(&self) -> BoxedElement;

    /// Deep equality: same concrete variant and every declared property
    /// recursively equal. Absent and present-but-empty compare equal;
    /// order matters for repeated properties.
    fn equals_deep(&self, other: &dyn Element) -> bool;

    /// Cheap variant-identity equality: same concrete variant plus the
    /// identity/primitive value fields of that variant, without recursing
    /// into nested elements.
    fn equals_shallow(&self, other: &dyn Element) -> bool;

    /// The scalar carried by a primitive variant, `None` on complex ones.
    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        None
    }

    /// Whether this variant is a primitive scalar, independent of whether
    /// a value is currently set.
    fn is_primitive(&self) -> bool {
        false
    }

    /// The modifier-extension list, on variants in the backbone family.
    ///
    /// `None` means the variant has no such list at all, which is distinct
    /// from an empty list on a backbone variant.
    fn modifier_extensions(&self) -> Option<&[Extension]> {
        None
    }

    /// The element's identity within its document.
    fn id(&self) -> Option<&str> {
        self.base().id.as_deref()
    }

    /// True iff the modifier-extension list holds at least one non-empty
    /// entry.
    fn has_modifier_extension(&self) -> bool {
        self.modifier_extensions()
            .is_some_and(|entries| entries.iter().any(|e| !e.is_empty()))
    }

    /// Fail-closed gate for consumers that do not implement
    /// extension-specific handling.
    ///
    /// A modifier extension changes the meaning of its container, so a
    /// caller that cannot interpret it must refuse to proceed rather than
    /// silently carry on. Callers invoke this before treating an element
    /// as fully understood; `noun` and `verb` describe the element and the
    /// operation for the resulting report.
    fn check_no_modifiers(&self, noun: &str, verb: &str) -> Result<(), UnrecognizedModifier> {
        if self.has_modifier_extension() {
            Err(UnrecognizedModifier {
                noun: noun.to_string(),
                verb: verb.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Upcast for downcast-based dispatch.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcast-based dispatch.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Consuming upcast, used when storing values through the protocol.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl Clone for BoxedElement {
    fn clone(&self) -> Self {
        self.copy()
    }
}

/// Implemented by every concrete variant; carries the type name at the
/// type level for dispatch-failure reporting.
pub trait ConcreteElement: Element + Sized {
    /// Canonical type name, equal to what `Element::type_name` returns.
    const TYPE_NAME: &'static str;
}

/// Descriptor for the backbone family's `modifierExtension` property.
pub const MODIFIER_EXTENSION: PropertyDescriptor =
    PropertyDescriptor::repeated("modifierExtension", ValueKind::Complex("Extension"));

pub(crate) const MODIFIER_EXTENSION_HASH: u64 = property_hash("modifierExtension");

/// The property block shared by every variant: the `id` identity field and
/// the ordinary (non-modifier) extension list.
///
/// Embedded by value in each concrete variant. The generic operations fall
/// back to it after the variant's own dispatch, and `properties()` leads
/// every variant's listing, which keeps inherited properties ahead of
/// declared ones.
///
/// `id` is an identity field, not a declared property: it is reached
/// through [`Element::id`] and serialized by name, so `get_property("id")`
/// reports `UnknownProperty`.
#[derive(Debug, Clone, Default)]
pub struct BaseElement {
    /// Identity of this element within its document, if any.
    pub id: Option<String>,
    /// Additional content not covered by the variant's declared fields.
    pub extension: Vec<Extension>,
}

impl BaseElement {
    /// Descriptor for the shared `extension` property.
    pub const EXTENSION: PropertyDescriptor =
        PropertyDescriptor::repeated("extension", ValueKind::Complex("Extension"));

    pub(crate) const EXTENSION_HASH: u64 = property_hash("extension");

    /// Properties declared by the shared base, in declaration order.
    pub fn properties() -> Vec<PropertyDescriptor> {
        vec![Self::EXTENSION]
    }

    /// Resolves a base property; unknown ids are reported against
    /// `type_name`, the concrete variant the caller actually touched.
    pub fn get_property(
        &self,
        id: PropertyId<'_>,
        type_name: &'static str,
    ) -> Result<Vec<&dyn Element>, ModelError> {
        match id.hash() {
            Self::EXTENSION_HASH => Ok(elements(&self.extension)),
            _ => Err(unknown_property(type_name, id)),
        }
    }

    /// Stores into a base property.
    pub fn set_property(
        &mut self,
        id: PropertyId<'_>,
        value: BoxedElement,
        type_name: &'static str,
    ) -> Result<(), ModelError> {
        match id.hash() {
            Self::EXTENSION_HASH => {
                self.extension.push(cast::<Extension>(value)?);
                Ok(())
            }
            _ => Err(unknown_property(type_name, id)),
        }
    }

    /// Creates a child on a base property.
    pub fn add_child(
        &mut self,
        name: &str,
        type_name: &'static str,
    ) -> Result<&mut dyn Element, ModelError> {
        if name == "extension" {
            Ok(push_and_borrow(&mut self.extension, Extension::default()))
        } else {
            Err(unknown_property(type_name, PropertyId::Name(name)))
        }
    }

    /// True iff the identity field is unset and all extensions are empty.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && all_empty(&self.extension)
    }

    /// Deep equality over the base block.
    pub fn equals_deep(&self, other: &Self) -> bool {
        self.id == other.id && eq_deep_slice(&self.extension, &other.extension)
    }

    /// Shallow equality over the base block: identity only.
    pub fn equals_shallow(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Downcasts a boxed element to the concrete variant `T`, reporting
/// [`ModelError::TypeMismatch`] (never coercing) when the variant differs.
pub fn cast<T: ConcreteElement>(value: BoxedElement) -> Result<T, ModelError> {
    let actual = value.type_name();
    match value.into_any().downcast::<T>() {
        Ok(value) => Ok(*value),
        Err(_) => Err(ModelError::TypeMismatch {
            expected: T::TYPE_NAME,
            actual,
        }),
    }
}

/// Borrows a repeated property as protocol elements.
pub(crate) fn elements<T: Element>(values: &[T]) -> Vec<&dyn Element> {
    values.iter().map(|v| v as &dyn Element).collect()
}

/// Borrows a scalar property as a zero- or one-element sequence.
pub(crate) fn element_opt<T: Element>(value: &Option<T>) -> Vec<&dyn Element> {
    value.iter().map(|v| v as &dyn Element).collect()
}

/// True iff every entry of a repeated property is itself empty.
pub(crate) fn all_empty<T: Element>(values: &[T]) -> bool {
    values.iter().all(|v| v.is_empty())
}

/// True iff a scalar property is absent or holds an empty element.
pub(crate) fn opt_empty<T: Element>(value: &Option<T>) -> bool {
    value.as_ref().is_none_or(|v| v.is_empty())
}

/// Deep equality at a scalar position; absent and present-but-empty are
/// equal.
pub(crate) fn eq_deep_opt<T: Element>(a: &Option<T>, b: &Option<T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.equals_deep(b),
        (Some(present), None) | (None, Some(present)) => present.is_empty(),
    }
}

/// Deep equality at a polymorphic scalar position.
pub(crate) fn eq_deep_any(a: &Option<BoxedElement>, b: &Option<BoxedElement>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.equals_deep(b.as_ref()),
        (Some(present), None) | (None, Some(present)) => present.is_empty(),
    }
}

/// Deep equality at a repeated position; order matters.
pub(crate) fn eq_deep_slice<T: Element>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals_deep(y))
}

/// Shallow equality at a scalar position, with the same absent vs
/// present-but-empty treatment as the deep form.
pub(crate) fn eq_shallow_opt<T: Element>(a: &Option<T>, b: &Option<T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.equals_shallow(b),
        (Some(present), None) | (None, Some(present)) => present.is_empty(),
    }
}

pub(crate) fn unknown_property(type_name: &'static str, id: PropertyId<'_>) -> ModelError {
    ModelError::UnknownProperty {
        type_name,
        property: id.describe(),
    }
}

/// Appends `value` and returns it as a protocol element.
pub(crate) fn push_and_borrow<T: Element>(values: &mut Vec<T>, value: T) -> &mut dyn Element {
    values.push(value);
    let end = values.len() - 1;
    &mut values[end]
}
