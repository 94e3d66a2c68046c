//! The fail-closed modifier-extension policy: consumers that do not
//! implement extension-specific handling must detect modifier extensions
//! and refuse to proceed.

use meridian_model::{BooleanElement, Coding, Dosage, Element, Extension};

#[test]
fn no_modifiers_passes_silently() {
    let dosage = Dosage::default();
    assert!(!dosage.has_modifier_extension());
    dosage.check_no_modifiers("Dosage", "serialize").unwrap();
}

#[test]
fn empty_entries_are_filtered_out() {
    let mut dosage = Dosage::default();
    dosage.modifier_extension.push(Extension::default());
    assert!(!dosage.has_modifier_extension());
    dosage.check_no_modifiers("Dosage", "serialize").unwrap();
}

#[test]
fn a_real_modifier_fails_closed() {
    let mut dosage = Dosage::default();
    dosage.add_modifier_extension(Extension::with_value(
        "http://example.com/do-not-substitute",
        Box::new(BooleanElement::from(true)),
    ));
    assert!(dosage.has_modifier_extension());

    let err = dosage
        .check_no_modifiers("Dosage", "serialize")
        .unwrap_err();
    assert_eq!(err.noun, "Dosage");
    assert_eq!(err.verb, "serialize");
    assert_eq!(
        err.to_string(),
        "cannot serialize Dosage: unrecognized modifier extensions are present"
    );
}

#[test]
fn the_check_works_through_the_generic_protocol() {
    let mut dosage = Dosage::default();
    dosage.add_modifier_extension(Extension::new("http://example.com/flag"));

    let element: &dyn Element = &dosage;
    assert!(element.modifier_extensions().is_some());
    assert!(element.check_no_modifiers("element", "diff").is_err());
}

#[test]
fn variants_without_the_capability_always_pass() {
    let coding = Coding::new("http://loinc.org", "29463-7");
    assert!(coding.modifier_extensions().is_none());
    assert!(!coding.has_modifier_extension());
    coding.check_no_modifiers("Coding", "compare").unwrap();
}
