//! Element tree serialization.
//!
//! Walks any element through the structural-reflection protocol and drives
//! the streaming [`JsonWriter`]. This module is the mediator between the
//! two core components: the model never sees the writer and the writer
//! never sees the model.
//!
//! Layout rules for the interchange format:
//!
//! - An element whose `is_empty()` is true produces no output at all.
//! - A complex element is an object: its `id`, then every non-empty
//!   declared property in declaration order.
//! - A primitive property writes its value token under the property name;
//!   id/extension metadata on the primitive goes into a `"_name"`
//!   companion object.
//! - A repeated primitive property writes index-aligned `name` / `"_name"`
//!   arrays, null-padded on either side where entries lack a value or
//!   metadata.
//! - A polymorphic property takes its member name from the stored
//!   variant's `type_name()` (`value` + `Quantity` → `valueQuantity`).

use std::io::Write;

use meridian_model::{Cardinality, Element, PrimitiveValue, PropertyDescriptor, PropertyId, ValueKind};
use tracing::trace;

use crate::error::{Result, SerdeError};
use crate::json::utils::{choice_member_name, metadata_member_name};
use crate::json::writer::JsonWriter;

/// Serializes an element tree to a compact JSON string.
///
/// # Examples
///
/// ```ignore
/// use meridian_model::Quantity;
/// use meridian_serde::to_json_string;
///
/// let dose = Quantity::parse("1.50", "mg")?;
/// assert_eq!(to_json_string(&dose)?, r#"{"value":1.50,"unit":"mg"}"#);
/// ```
pub fn to_json_string(element: &dyn Element) -> Result<String> {
    let mut buffer = Vec::new();
    to_json_writer(element, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| SerdeError::Custom(e.to_string()))
}

/// Serializes an element tree to a pretty-printed JSON string.
pub fn to_json_string_pretty(element: &dyn Element) -> Result<String> {
    let mut buffer = Vec::new();
    to_json_writer_pretty(element, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| SerdeError::Custom(e.to_string()))
}

/// Serializes an element tree to a compact JSON byte vector.
pub fn to_json_vec(element: &dyn Element) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_json_writer(element, &mut buffer)?;
    Ok(buffer)
}

/// Serializes an element tree, compact, to any [`Write`] sink.
pub fn to_json_writer<W: Write>(element: &dyn Element, writer: W) -> Result<()> {
    let mut writer = JsonWriter::new(writer);
    write_document(&mut writer, element)
}

/// Serializes an element tree, pretty-printed, to any [`Write`] sink.
pub fn to_json_writer_pretty<W: Write>(element: &dyn Element, writer: W) -> Result<()> {
    let mut writer = JsonWriter::new_pretty(writer);
    write_document(&mut writer, element)
}

fn write_document<W: Write>(writer: &mut JsonWriter<W>, element: &dyn Element) -> Result<()> {
    trace!(type_name = element.type_name(), "serializing element tree");
    write_object(writer, element)?;
    writer.finish()
}

/// Writes one element as a JSON object.
///
/// A primitive reached in object position (the document root, or a generic
/// fallback) carries its scalar as an explicit `"value"` member.
fn write_object<W: Write>(writer: &mut JsonWriter<W>, element: &dyn Element) -> Result<()> {
    writer.begin_object()?;
    if let Some(id) = element.id() {
        writer.name("id")?;
        writer.value_str(id)?;
    }
    if let Some(value) = element.primitive_value() {
        writer.name("value")?;
        write_primitive_token(writer, value)?;
    }
    for property in element.list_properties() {
        write_property(writer, element, &property)?;
    }
    writer.end_object()
}

fn write_property<W: Write>(
    writer: &mut JsonWriter<W>,
    element: &dyn Element,
    property: &PropertyDescriptor,
) -> Result<()> {
    let values = element.get_property(PropertyId::Hash(property.hash))?;
    if values.iter().all(|v| v.is_empty()) {
        return Ok(());
    }
    match property.cardinality {
        Cardinality::Single => {
            let Some(value) = values.first() else {
                return Ok(());
            };
            write_member(writer, property, *value)
        }
        Cardinality::Repeated { .. } => write_repeated(writer, property, &values),
    }
}

/// Writes a populated scalar property.
fn write_member<W: Write>(
    writer: &mut JsonWriter<W>,
    property: &PropertyDescriptor,
    value: &dyn Element,
) -> Result<()> {
    let member = member_name(property, value);
    if value.is_primitive() {
        if let Some(primitive) = value.primitive_value() {
            writer.name(&member)?;
            write_primitive_token(writer, primitive)?;
        }
        if !value.base().is_empty() {
            writer.name(&metadata_member_name(&member))?;
            write_metadata_object(writer, value)?;
        }
        Ok(())
    } else {
        writer.name(&member)?;
        write_object(writer, value)
    }
}

fn write_repeated<W: Write>(
    writer: &mut JsonWriter<W>,
    property: &PropertyDescriptor,
    values: &[&dyn Element],
) -> Result<()> {
    match property.kind {
        ValueKind::Primitive(_) => write_primitive_array(writer, property, values),
        _ => {
            writer.name(property.name)?;
            writer.begin_array()?;
            for value in values.iter().filter(|v| !v.is_empty()) {
                write_object(writer, *value)?;
            }
            writer.end_array()
        }
    }
}

/// Writes a repeated primitive property as index-aligned value and
/// metadata arrays.
fn write_primitive_array<W: Write>(
    writer: &mut JsonWriter<W>,
    property: &PropertyDescriptor,
    values: &[&dyn Element],
) -> Result<()> {
    let any_value = values.iter().any(|v| v.primitive_value().is_some());
    let any_metadata = values.iter().any(|v| !v.base().is_empty());
    if any_value {
        writer.name(property.name)?;
        writer.begin_array()?;
        for value in values {
            match value.primitive_value() {
                Some(primitive) => write_primitive_token(writer, primitive)?,
                None => writer.null_value()?,
            }
        }
        writer.end_array()?;
    }
    if any_metadata {
        writer.name(&metadata_member_name(property.name))?;
        writer.begin_array()?;
        for value in values {
            if value.base().is_empty() {
                writer.null_value()?;
            } else {
                write_metadata_object(writer, *value)?;
            }
        }
        writer.end_array()?;
    }
    Ok(())
}

/// Writes the `{id, extension}` companion object of a primitive.
fn write_metadata_object<W: Write>(writer: &mut JsonWriter<W>, value: &dyn Element) -> Result<()> {
    writer.begin_object()?;
    if let Some(id) = value.id() {
        writer.name("id")?;
        writer.value_str(id)?;
    }
    let extensions = &value.base().extension;
    if !extensions.iter().all(|e| e.is_empty()) {
        writer.name("extension")?;
        writer.begin_array()?;
        for extension in extensions.iter().filter(|e| !e.is_empty()) {
            write_object(writer, extension)?;
        }
        writer.end_array()?;
    }
    writer.end_object()
}

fn write_primitive_token<W: Write>(
    writer: &mut JsonWriter<W>,
    value: PrimitiveValue<'_>,
) -> Result<()> {
    match value {
        PrimitiveValue::String(text) => writer.value_str(text),
        PrimitiveValue::Boolean(value) => writer.value_bool(value),
        PrimitiveValue::Integer(value) => writer.value_int(i64::from(value)),
        PrimitiveValue::Decimal(value) => writer.value_num(value.original_text()),
    }
}

fn member_name(property: &PropertyDescriptor, value: &dyn Element) -> String {
    match property.kind {
        ValueKind::Any => choice_member_name(property.name, value.type_name()),
        _ => property.name.to_string(),
    }
}
