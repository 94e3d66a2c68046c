//! Deep copy and equality semantics: copies share nothing with their
//! source, absent and present-but-empty compare equal, and repeated
//! property order matters.

use meridian_model::{
    Coding, DecimalElement, Dosage, Element, Extension, Quantity, StringElement,
};

fn sample_dosage() -> Dosage {
    let mut dosage = Dosage::default();
    dosage.sequence = Some(1.into());
    dosage.text = Some("one tablet daily".into());
    dosage.route = Some(Coding::new("http://snomed.info/sct", "26643006"));
    dosage.dose = Some(Quantity::parse("1.50", "tablet").unwrap());
    dosage.base.extension.push(Extension::with_value(
        "http://example.com/note",
        Box::new(StringElement::from("after food")),
    ));
    dosage
}

#[test]
fn copy_is_deep_and_equal() {
    let original = sample_dosage();
    let copy = original.copy();
    assert!(copy.equals_deep(&original));
    assert!(original.equals_deep(copy.as_ref()));
}

#[test]
fn mutating_the_copy_never_affects_the_original() {
    let original = sample_dosage();
    let mut copy = original.copy();
    let copied = copy.as_any_mut().downcast_mut::<Dosage>().unwrap();
    copied.text = Some("two tablets".into());
    copied
        .modifier_extension
        .push(Extension::new("http://example.com/flag"));
    copied.base.extension[0].url = Some("http://example.com/changed".into());

    assert!(!copy.equals_deep(&original));
    assert_eq!(
        original.text.as_ref().unwrap().value.as_deref(),
        Some("one tablet daily")
    );
    assert!(original.modifier_extension.is_empty());
    assert_eq!(
        original.base.extension[0].url(),
        Some("http://example.com/note")
    );
}

#[test]
fn absent_and_present_but_empty_compare_equal() {
    let mut with_empty = Coding::default();
    with_empty.system = Some(StringElement::default());
    let without = Coding::default();
    assert!(with_empty.equals_deep(&without));
    assert!(without.equals_deep(&with_empty));
}

#[test]
fn repeated_property_order_matters() {
    let first = Extension::new("http://example.com/a");
    let second = Extension::new("http://example.com/b");

    let mut forward = Quantity::default();
    forward.base.extension = vec![first.clone(), second.clone()];
    let mut reversed = Quantity::default();
    reversed.base.extension = vec![second, first];

    assert!(!forward.equals_deep(&reversed));
}

#[test]
fn equals_shallow_ignores_nested_content() {
    let a = Extension::with_value(
        "http://example.com/ext",
        Box::new(StringElement::from("first")),
    );
    let b = Extension::with_value(
        "http://example.com/ext",
        Box::new(StringElement::from("second")),
    );
    assert!(a.equals_shallow(&b));
    assert!(!a.equals_deep(&b));
}

#[test]
fn equality_requires_the_same_variant() {
    let coding = Coding::default();
    let quantity = Quantity::default();
    assert!(!coding.equals_deep(&quantity));
    assert!(!coding.equals_shallow(&quantity));
}

#[test]
fn decimal_equality_includes_scale() {
    let short = DecimalElement::parse("1.5").unwrap();
    let long = DecimalElement::parse("1.50").unwrap();
    assert!(!short.equals_deep(&long));
    assert!(long.equals_deep(&DecimalElement::parse("1.50").unwrap()));
}

#[test]
fn untouched_and_explicitly_empty_sequences_are_one_state() {
    let mut dosage = Dosage::default();
    assert!(dosage.is_empty());

    // An explicitly assigned empty sequence is indistinguishable from one
    // that was never touched.
    dosage.modifier_extension = Vec::new();
    assert!(dosage.is_empty());
    assert!(dosage.equals_deep(&Dosage::default()));

    // Entries that are themselves empty do not make the element non-empty.
    dosage.base.extension.push(Extension::default());
    assert!(dosage.is_empty());

    dosage.base.id = Some("d1".to_string());
    assert!(!dosage.is_empty());
}
