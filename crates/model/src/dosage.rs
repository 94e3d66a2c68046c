//! Backbone-family variant: how a medication should be taken.
//!
//! `Dosage` is the representative of the backbone family: variants that
//! carry a modifier-extension list on top of the shared base block. A
//! modifier extension changes the meaning of its container, so generic
//! consumers must go through `Element::check_no_modifiers` before treating
//! a backbone element as fully understood.

use std::any::Any;

use crate::element::{
    BaseElement, BoxedElement, ConcreteElement, Element, MODIFIER_EXTENSION,
    MODIFIER_EXTENSION_HASH, all_empty, cast, element_opt, elements, eq_deep_opt, eq_deep_slice,
    eq_shallow_opt, opt_empty, push_and_borrow,
};
use crate::error::ModelError;
use crate::hash::property_hash;
use crate::primitive::{IntegerElement, StringElement};
use crate::property::{PropertyDescriptor, PropertyId, ValueKind};
use crate::types::{Coding, Extension, Quantity};

const DOSAGE_SEQUENCE: u64 = property_hash("sequence");
const DOSAGE_TEXT: u64 = property_hash("text");
const DOSAGE_ROUTE: u64 = property_hash("route");
const DOSAGE_DOSE: u64 = property_hash("dose");

/// How a medication should be taken.
#[derive(Debug, Clone, Default)]
pub struct Dosage {
    /// Shared base block.
    pub base: BaseElement,
    /// Extensions that cannot be ignored even if unrecognized.
    pub modifier_extension: Vec<Extension>,
    /// Order of this instruction among its siblings.
    pub sequence: Option<IntegerElement>,
    /// Free-text dosage instruction.
    pub text: Option<StringElement>,
    /// How the medication enters the body.
    pub route: Option<Coding>,
    /// Amount administered per dose.
    pub dose: Option<Quantity>,
}

impl Dosage {
    /// Descriptor for `sequence`.
    pub const SEQUENCE: PropertyDescriptor =
        PropertyDescriptor::scalar("sequence", ValueKind::Primitive("integer"));
    /// Descriptor for `text`.
    pub const TEXT: PropertyDescriptor =
        PropertyDescriptor::scalar("text", ValueKind::Primitive("string"));
    /// Descriptor for `route`.
    pub const ROUTE: PropertyDescriptor =
        PropertyDescriptor::scalar("route", ValueKind::Complex("Coding"));
    /// Descriptor for `dose`.
    pub const DOSE: PropertyDescriptor =
        PropertyDescriptor::scalar("dose", ValueKind::Complex("Quantity"));

    /// Appends a modifier extension and returns `self` for chaining.
    pub fn add_modifier_extension(&mut self, extension: Extension) -> &mut Self {
        self.modifier_extension.push(extension);
        self
    }
}

const _: () = crate::property::assert_distinct_hashes(&[
    BaseElement::EXTENSION,
    MODIFIER_EXTENSION,
    Dosage::SEQUENCE,
    Dosage::TEXT,
    Dosage::ROUTE,
    Dosage::DOSE,
]);

impl ConcreteElement for Dosage {
    const TYPE_NAME: &'static str = "Dosage";
}

impl Element for Dosage {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn base(&self) -> &BaseElement {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseElement {
        &mut self.base
    }

    fn list_properties(&self) -> Vec<PropertyDescriptor> {
        let mut properties = BaseElement::properties();
        properties.push(MODIFIER_EXTENSION);
        properties.extend([Self::SEQUENCE, Self::TEXT, Self::ROUTE, Self::DOSE]);
        properties
    }

    fn get_property(&self, id: PropertyId<'_>) -> Result<Vec<&dyn Element>, ModelError> {
        match id.hash() {
            MODIFIER_EXTENSION_HASH => Ok(elements(&self.modifier_extension)),
            DOSAGE_SEQUENCE => Ok(element_opt(&self.sequence)),
            DOSAGE_TEXT => Ok(element_opt(&self.text)),
            DOSAGE_ROUTE => Ok(element_opt(&self.route)),
            DOSAGE_DOSE => Ok(element_opt(&self.dose)),
            _ => self.base.get_property(id, Self::TYPE_NAME),
        }
    }

    fn set_property(&mut self, id: PropertyId<'_>, value: BoxedElement) -> Result<(), ModelError> {
        match id.hash() {
            MODIFIER_EXTENSION_HASH => {
                self.modifier_extension.push(cast::<Extension>(value)?);
                Ok(())
            }
            DOSAGE_SEQUENCE => {
                self.sequence = Some(cast::<IntegerElement>(value)?);
                Ok(())
            }
            DOSAGE_TEXT => {
                self.text = Some(cast::<StringElement>(value)?);
                Ok(())
            }
            DOSAGE_ROUTE => {
                self.route = Some(cast::<Coding>(value)?);
                Ok(())
            }
            DOSAGE_DOSE => {
                self.dose = Some(cast::<Quantity>(value)?);
                Ok(())
            }
            _ => self.base.set_property(id, value, Self::TYPE_NAME),
        }
    }

    fn add_child(&mut self, name: &str) -> Result<&mut dyn Element, ModelError> {
        match name {
            "modifierExtension" => Ok(push_and_borrow(
                &mut self.modifier_extension,
                Extension::default(),
            )),
            "route" => Ok(self.route.insert(Coding::default())),
            "dose" => Ok(self.dose.insert(Quantity::default())),
            _ => self.base.add_child(name, Self::TYPE_NAME),
        }
    }

    fn is_empty(&self) -> bool {
        self.base.is_empty()
            && all_empty(&self.modifier_extension)
            && opt_empty(&self.sequence)
            && opt_empty(&self.text)
            && opt_empty(&self.route)
            && opt_empty(&self.dose)
    }

    fn copy(&self) -> BoxedElement {
        Box::new(self.clone())
    }

    fn equals_deep(&self, other: &dyn Element) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };
        self.base.equals_deep(&other.base)
            && eq_deep_slice(&self.modifier_extension, &other.modifier_extension)
            && eq_deep_opt(&self.sequence, &other.sequence)
            && eq_deep_opt(&self.text, &other.text)
            && eq_deep_opt(&self.route, &other.route)
            && eq_deep_opt(&self.dose, &other.dose)
    }

    fn equals_shallow(&self, other: &dyn Element) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };
        self.base.equals_shallow(&other.base)
            && eq_shallow_opt(&self.sequence, &other.sequence)
            && eq_shallow_opt(&self.text, &other.text)
    }

    fn modifier_extensions(&self) -> Option<&[Extension]> {
        Some(&self.modifier_extension)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
