//! Member-naming helpers for the interchange JSON format.

/// Builds the member name that records which variant a polymorphic
/// property holds: the property name with the variant's type name appended
/// in upper camel case (`value` + `string` → `valueString`).
pub fn choice_member_name(property: &str, type_name: &str) -> String {
    let mut name = String::with_capacity(property.len() + type_name.len());
    name.push_str(property);
    let mut chars = type_name.chars();
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}

/// Builds the `_name` companion member that carries a primitive's id and
/// extensions alongside its value.
pub fn metadata_member_name(property: &str) -> String {
    format!("_{property}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_member_name() {
        assert_eq!(choice_member_name("value", "string"), "valueString");
        assert_eq!(choice_member_name("value", "boolean"), "valueBoolean");
        assert_eq!(choice_member_name("value", "Quantity"), "valueQuantity");
        assert_eq!(choice_member_name("value", "Coding"), "valueCoding");
    }

    #[test]
    fn test_metadata_member_name() {
        assert_eq!(metadata_member_name("birthDate"), "_birthDate");
        assert_eq!(metadata_member_name("url"), "_url");
    }
}
