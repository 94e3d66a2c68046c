//! Complex datatype variants.
//!
//! Each variant follows the same mechanical pattern: a struct embedding
//! [`BaseElement`], a const property table (collision-checked at
//! definition time), and hash-dispatched protocol implementations that
//! fall back to the base block for inherited properties.

use std::any::Any;

use crate::element::{
    BaseElement, BoxedElement, ConcreteElement, Element, cast, element_opt, eq_deep_any,
    eq_deep_opt, eq_shallow_opt, opt_empty,
};
use crate::error::ModelError;
use crate::hash::property_hash;
use crate::primitive::{BooleanElement, DecimalElement, IntegerElement, StringElement};
use crate::property::{PropertyDescriptor, PropertyId, ValueKind};

const EXTENSION_URL: u64 = property_hash("url");
const EXTENSION_VALUE: u64 = property_hash("value");

/// Additional content that is not part of a variant's basic definition.
///
/// Every extension names its meaning with `url` and may carry a value of
/// any element variant. Whether an extension modifies the meaning of its
/// container depends on where it is held: entries in a backbone variant's
/// modifier list are modifier extensions, entries in the shared base list
/// are not.
#[derive(Debug, Clone, Default)]
pub struct Extension {
    /// Shared base block (extensions nest).
    pub base: BaseElement,
    /// Identifies the meaning of the extension.
    pub url: Option<StringElement>,
    /// Value carried by the extension; any element variant.
    pub value: Option<BoxedElement>,
}

impl Extension {
    /// Descriptor for `url`.
    pub const URL: PropertyDescriptor =
        PropertyDescriptor::scalar("url", ValueKind::Primitive("string"));
    /// Descriptor for the polymorphic `value`.
    pub const VALUE: PropertyDescriptor = PropertyDescriptor::scalar("value", ValueKind::Any);

    /// Creates an extension naming `url`, with no value yet.
    pub fn new(url: &str) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Creates an extension carrying `value`.
    pub fn with_value(url: &str, value: BoxedElement) -> Self {
        Self {
            base: BaseElement::default(),
            url: Some(url.into()),
            value: Some(value),
        }
    }

    /// The extension's url text, when set.
    pub fn url(&self) -> Option<&str> {
        self.url.as_ref().and_then(|u| u.value.as_deref())
    }
}

const _: () = crate::property::assert_distinct_hashes(&[
    BaseElement::EXTENSION,
    Extension::URL,
    Extension::VALUE,
]);

impl ConcreteElement for Extension {
    const TYPE_NAME: &'static str = "Extension";
}

impl Element for Extension {
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
        properties.extend([Self::URL, Self::VALUE]);
        properties
    }

    fn get_property(&self, id: PropertyId<'_>) -> Result<Vec<&dyn Element>, ModelError> {
        match id.hash() {
            EXTENSION_URL => Ok(element_opt(&self.url)),
            EXTENSION_VALUE => Ok(self.value.iter().map(|v| v.as_ref()).collect()),
            _ => self.base.get_property(id, Self::TYPE_NAME),
        }
    }

    fn set_property(&mut self, id: PropertyId<'_>, value: BoxedElement) -> Result<(), ModelError> {
        match id.hash() {
            EXTENSION_URL => {
                self.url = Some(cast::<StringElement>(value)?);
                Ok(())
            }
            // Polymorphic slot: any variant is assignable.
            EXTENSION_VALUE => {
                self.value = Some(value);
                Ok(())
            }
            _ => self.base.set_property(id, value, Self::TYPE_NAME),
        }
    }

    fn add_child(&mut self, name: &str) -> Result<&mut dyn Element, ModelError> {
        let created: BoxedElement = match name {
            "valueString" => Box::new(StringElement::default()),
            "valueBoolean" => Box::new(BooleanElement::default()),
            "valueInteger" => Box::new(IntegerElement::default()),
            "valueDecimal" => Box::new(DecimalElement::default()),
            "valueCoding" => Box::new(Coding::default()),
            "valueQuantity" => Box::new(Quantity::default()),
            _ => return self.base.add_child(name, Self::TYPE_NAME),
        };
        let slot = self.value.insert(created);
        Ok(slot.as_mut())
    }

    fn is_empty(&self) -> bool {
        self.base.is_empty()
            && opt_empty(&self.url)
            && self.value.as_ref().is_none_or(|v| v.is_empty())
    }

    fn copy(&self) -> BoxedElement {
        Box::new(self.clone())
    }

    fn equals_deep(&self, other: &dyn Element) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };
        self.base.equals_deep(&other.base)
            && eq_deep_opt(&self.url, &other.url)
            && eq_deep_any(&self.value, &other.value)
    }

    fn equals_shallow(&self, other: &dyn Element) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };
        self.base.equals_shallow(&other.base) && eq_shallow_opt(&self.url, &other.url)
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

const CODING_SYSTEM: u64 = property_hash("system");
const CODING_CODE: u64 = property_hash("code");
const CODING_DISPLAY: u64 = property_hash("display");
const CODING_USER_SELECTED: u64 = property_hash("userSelected");

/// A reference to a code defined by a terminology system.
#[derive(Debug, Clone, Default)]
pub struct Coding {
    /// Shared base block.
    pub base: BaseElement,
    /// Identity of the terminology system.
    pub system: Option<StringElement>,
    /// Symbol in the system's syntax.
    pub code: Option<StringElement>,
    /// Representation defined by the system.
    pub display: Option<StringElement>,
    /// Whether this coding was chosen directly by the user.
    pub user_selected: Option<BooleanElement>,
}

impl Coding {
    /// Descriptor for `system`.
    pub const SYSTEM: PropertyDescriptor =
        PropertyDescriptor::scalar("system", ValueKind::Primitive("string"));
    /// Descriptor for `code`.
    pub const CODE: PropertyDescriptor =
        PropertyDescriptor::scalar("code", ValueKind::Primitive("string"));
    /// Descriptor for `display`.
    pub const DISPLAY: PropertyDescriptor =
        PropertyDescriptor::scalar("display", ValueKind::Primitive("string"));
    /// Descriptor for `userSelected`.
    pub const USER_SELECTED: PropertyDescriptor =
        PropertyDescriptor::scalar("userSelected", ValueKind::Primitive("boolean"));

    /// Creates a coding from a system/code pair.
    pub fn new(system: &str, code: &str) -> Self {
        Self {
            system: Some(system.into()),
            code: Some(code.into()),
            ..Self::default()
        }
    }
}

const _: () = crate::property::assert_distinct_hashes(&[
    BaseElement::EXTENSION,
    Coding::SYSTEM,
    Coding::CODE,
    Coding::DISPLAY,
    Coding::USER_SELECTED,
]);

impl ConcreteElement for Coding {
    const TYPE_NAME: &'static str = "Coding";
}

impl Element for Coding {
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
        properties.extend([Self::SYSTEM, Self::CODE, Self::DISPLAY, Self::USER_SELECTED]);
        properties
    }

    fn get_property(&self, id: PropertyId<'_>) -> Result<Vec<&dyn Element>, ModelError> {
        match id.hash() {
            CODING_SYSTEM => Ok(element_opt(&self.system)),
            CODING_CODE => Ok(element_opt(&self.code)),
            CODING_DISPLAY => Ok(element_opt(&self.display)),
            CODING_USER_SELECTED => Ok(element_opt(&self.user_selected)),
            _ => self.base.get_property(id, Self::TYPE_NAME),
        }
    }

    fn set_property(&mut self, id: PropertyId<'_>, value: BoxedElement) -> Result<(), ModelError> {
        match id.hash() {
            CODING_SYSTEM => {
                self.system = Some(cast::<StringElement>(value)?);
                Ok(())
            }
            CODING_CODE => {
                self.code = Some(cast::<StringElement>(value)?);
                Ok(())
            }
            CODING_DISPLAY => {
                self.display = Some(cast::<StringElement>(value)?);
                Ok(())
            }
            CODING_USER_SELECTED => {
                self.user_selected = Some(cast::<BooleanElement>(value)?);
                Ok(())
            }
            _ => self.base.set_property(id, value, Self::TYPE_NAME),
        }
    }

    fn add_child(&mut self, name: &str) -> Result<&mut dyn Element, ModelError> {
        self.base.add_child(name, Self::TYPE_NAME)
    }

    fn is_empty(&self) -> bool {
        self.base.is_empty()
            && opt_empty(&self.system)
            && opt_empty(&self.code)
            && opt_empty(&self.display)
            && opt_empty(&self.user_selected)
    }

    fn copy(&self) -> BoxedElement {
        Box::new(self.clone())
    }

    fn equals_deep(&self, other: &dyn Element) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };
        self.base.equals_deep(&other.base)
            && eq_deep_opt(&self.system, &other.system)
            && eq_deep_opt(&self.code, &other.code)
            && eq_deep_opt(&self.display, &other.display)
            && eq_deep_opt(&self.user_selected, &other.user_selected)
    }

    fn equals_shallow(&self, other: &dyn Element) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };
        self.base.equals_shallow(&other.base)
            && eq_shallow_opt(&self.system, &other.system)
            && eq_shallow_opt(&self.code, &other.code)
            && eq_shallow_opt(&self.display, &other.display)
            && eq_shallow_opt(&self.user_selected, &other.user_selected)
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

const QUANTITY_VALUE: u64 = property_hash("value");
const QUANTITY_UNIT: u64 = property_hash("unit");
const QUANTITY_SYSTEM: u64 = property_hash("system");
const QUANTITY_CODE: u64 = property_hash("code");

/// A measured amount: a decimal magnitude with a unit.
///
/// The magnitude is a [`DecimalElement`], so the amount serializes with
/// exactly the precision it was recorded with.
#[derive(Debug, Clone, Default)]
pub struct Quantity {
    /// Shared base block.
    pub base: BaseElement,
    /// Numerical magnitude.
    pub value: Option<DecimalElement>,
    /// Human-readable unit representation.
    pub unit: Option<StringElement>,
    /// System that defines the coded unit form.
    pub system: Option<StringElement>,
    /// Coded form of the unit.
    pub code: Option<StringElement>,
}

impl Quantity {
    /// Descriptor for `value`.
    pub const VALUE: PropertyDescriptor =
        PropertyDescriptor::scalar("value", ValueKind::Primitive("decimal"));
    /// Descriptor for `unit`.
    pub const UNIT: PropertyDescriptor =
        PropertyDescriptor::scalar("unit", ValueKind::Primitive("string"));
    /// Descriptor for `system`.
    pub const SYSTEM: PropertyDescriptor =
        PropertyDescriptor::scalar("system", ValueKind::Primitive("string"));
    /// Descriptor for `code`.
    pub const CODE: PropertyDescriptor =
        PropertyDescriptor::scalar("code", ValueKind::Primitive("string"));

    /// Creates a quantity from a decimal literal and a unit.
    pub fn parse(value: &str, unit: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Self {
            value: Some(DecimalElement::parse(value)?),
            unit: Some(unit.into()),
            ..Self::default()
        })
    }
}

const _: () = crate::property::assert_distinct_hashes(&[
    BaseElement::EXTENSION,
    Quantity::VALUE,
    Quantity::UNIT,
    Quantity::SYSTEM,
    Quantity::CODE,
]);

impl ConcreteElement for Quantity {
    const TYPE_NAME: &'static str = "Quantity";
}

impl Element for Quantity {
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
        properties.extend([Self::VALUE, Self::UNIT, Self::SYSTEM, Self::CODE]);
        properties
    }

    fn get_property(&self, id: PropertyId<'_>) -> Result<Vec<&dyn Element>, ModelError> {
        match id.hash() {
            QUANTITY_VALUE => Ok(element_opt(&self.value)),
            QUANTITY_UNIT => Ok(element_opt(&self.unit)),
            QUANTITY_SYSTEM => Ok(element_opt(&self.system)),
            QUANTITY_CODE => Ok(element_opt(&self.code)),
            _ => self.base.get_property(id, Self::TYPE_NAME),
        }
    }

    fn set_property(&mut self, id: PropertyId<'_>, value: BoxedElement) -> Result<(), ModelError> {
        match id.hash() {
            QUANTITY_VALUE => {
                self.value = Some(cast::<DecimalElement>(value)?);
                Ok(())
            }
            QUANTITY_UNIT => {
                self.unit = Some(cast::<StringElement>(value)?);
                Ok(())
            }
            QUANTITY_SYSTEM => {
                self.system = Some(cast::<StringElement>(value)?);
                Ok(())
            }
            QUANTITY_CODE => {
                self.code = Some(cast::<StringElement>(value)?);
                Ok(())
            }
            _ => self.base.set_property(id, value, Self::TYPE_NAME),
        }
    }

    fn add_child(&mut self, name: &str) -> Result<&mut dyn Element, ModelError> {
        self.base.add_child(name, Self::TYPE_NAME)
    }

    fn is_empty(&self) -> bool {
        self.base.is_empty()
            && opt_empty(&self.value)
            && opt_empty(&self.unit)
            && opt_empty(&self.system)
            && opt_empty(&self.code)
    }

    fn copy(&self) -> BoxedElement {
        Box::new(self.clone())
    }

    fn equals_deep(&self, other: &dyn Element) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };
        self.base.equals_deep(&other.base)
            && eq_deep_opt(&self.value, &other.value)
            && eq_deep_opt(&self.unit, &other.unit)
            && eq_deep_opt(&self.system, &other.system)
            && eq_deep_opt(&self.code, &other.code)
    }

    fn equals_shallow(&self, other: &dyn Element) -> bool {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            return false;
        };
        self.base.equals_shallow(&other.base)
            && eq_shallow_opt(&self.value, &other.value)
            && eq_shallow_opt(&self.unit, &other.unit)
            && eq_shallow_opt(&self.system, &other.system)
            && eq_shallow_opt(&self.code, &other.code)
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
