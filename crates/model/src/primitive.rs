//! Primitive element variants.
//!
//! Primitives are full elements: they carry the shared base block (id and
//! extensions) alongside their value, so metadata rides on a scalar the
//! same way it rides on a complex element. The value itself is an
//! identity/value field reached through `primitive_value()`, not a
//! declared property — a primitive's property table is the shared base
//! table.

use std::any::Any;

use crate::decimal::PreciseDecimal;
use crate::element::{BaseElement, BoxedElement, ConcreteElement, Element, PrimitiveValue};
use crate::error::ModelError;
use crate::property::{PropertyDescriptor, PropertyId};

macro_rules! primitive_element {
    (
        $(#[$doc:meta])*
        $name:ident, $type_name:literal, $value:ty, $borrow:expr
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            /// Shared base block.
            pub base: BaseElement,
            /// The scalar value, when set.
            pub value: Option<$value>,
        }

        impl $name {
            /// Creates a primitive holding `value`.
            pub fn new(value: $value) -> Self {
                Self {
                    base: BaseElement::default(),
                    value: Some(value),
                }
            }
        }

        impl From<$value> for $name {
            fn from(value: $value) -> Self {
                Self::new(value)
            }
        }

        impl ConcreteElement for $name {
            const TYPE_NAME: &'static str = $type_name;
        }

        impl Element for $name {
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
                BaseElement::properties()
            }

            fn get_property(
                &self,
                id: PropertyId<'_>,
            ) -> Result<Vec<&dyn Element>, ModelError> {
                self.base.get_property(id, Self::TYPE_NAME)
            }

            fn set_property(
                &mut self,
                id: PropertyId<'_>,
                value: BoxedElement,
            ) -> Result<(), ModelError> {
                self.base.set_property(id, value, Self::TYPE_NAME)
            }

            fn add_child(&mut self, name: &str) -> Result<&mut dyn Element, ModelError> {
                self.base.add_child(name, Self::TYPE_NAME)
            }

            fn is_empty(&self) -> bool {
                self.base.is_empty() && self.value.is_none()
            }

            fn copy(&self) -> BoxedElement {
                Box::new(self.clone())
            }

            fn equals_deep(&self, other: &dyn Element) -> bool {
                let Some(other) = other.as_any().downcast_ref::<Self>() else {
                    return false;
                };
                self.base.equals_deep(&other.base) && self.value == other.value
            }

            fn equals_shallow(&self, other: &dyn Element) -> bool {
                let Some(other) = other.as_any().downcast_ref::<Self>() else {
                    return false;
                };
                self.base.equals_shallow(&other.base) && self.value == other.value
            }

            fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
                self.value.as_ref().map($borrow)
            }

            fn is_primitive(&self) -> bool {
                true
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
    };
}

primitive_element!(
    /// A string scalar.
    StringElement,
    "string",
    String,
    |value| PrimitiveValue::String(value)
);

primitive_element!(
    /// A boolean scalar.
    BooleanElement,
    "boolean",
    bool,
    |value| PrimitiveValue::Boolean(*value)
);

primitive_element!(
    /// A signed 32-bit integer scalar.
    IntegerElement,
    "integer",
    i32,
    |value| PrimitiveValue::Integer(*value)
);

primitive_element!(
    /// A decimal scalar that serializes with its exact source text.
    DecimalElement,
    "decimal",
    PreciseDecimal,
    |value| PrimitiveValue::Decimal(value)
);

impl From<&str> for StringElement {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl DecimalElement {
    /// Parses a decimal literal, keeping its text verbatim.
    pub fn parse(text: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Self::new(PreciseDecimal::parse(text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_primitives_are_empty() {
        assert!(StringElement::default().is_empty());
        assert!(DecimalElement::default().is_empty());
        assert!(!StringElement::from("x").is_empty());
    }

    #[test]
    fn id_alone_makes_a_primitive_non_empty() {
        let mut element = BooleanElement::default();
        element.base.id = Some("b1".to_string());
        assert!(!element.is_empty());
        assert!(element.primitive_value().is_none());
    }

    #[test]
    fn primitive_values_borrow_the_stored_scalar() {
        let element = IntegerElement::from(7);
        assert_eq!(element.primitive_value(), Some(PrimitiveValue::Integer(7)));

        let element = DecimalElement::parse("1.50").unwrap();
        match element.primitive_value() {
            Some(PrimitiveValue::Decimal(d)) => assert_eq!(d.original_text(), "1.50"),
            other => panic!("unexpected value: {other:?}"),
        }
    }
}
