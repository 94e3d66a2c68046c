//! Tests for the streaming JSON writer: separator state machine, exact
//! compact/pretty layout, verbatim numeric output, and structural
//! strictness.

use meridian_serde::{JsonWriter, SerdeError};
use rust_decimal_macros::dec;

fn output(writer: JsonWriter<Vec<u8>>) -> String {
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn compact_object_layout_is_exact() {
    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_object().unwrap();
    writer.name("a").unwrap();
    writer.value_str("b").unwrap();
    writer.end_object().unwrap();
    writer.finish().unwrap();
    assert_eq!(output(writer), r#"{"a":"b"}"#);
}

#[test]
fn pretty_object_layout_is_exact() {
    let mut writer = JsonWriter::new_pretty(Vec::new());
    writer.begin_object().unwrap();
    writer.name("a").unwrap();
    writer.value_str("b").unwrap();
    writer.end_object().unwrap();
    writer.finish().unwrap();
    assert_eq!(output(writer), "{\r\n  \"a\" : \"b\"\r\n}");
}

#[test]
fn pretty_nesting_indents_one_unit_per_object() {
    let mut writer = JsonWriter::new_pretty(Vec::new());
    writer.begin_object().unwrap();
    writer.name("a").unwrap();
    writer.begin_object().unwrap();
    writer.name("b").unwrap();
    writer.value_int(1).unwrap();
    writer.end_object().unwrap();
    writer.end_object().unwrap();
    writer.finish().unwrap();
    assert_eq!(
        output(writer),
        "{\r\n  \"a\" : {\r\n    \"b\" : 1\r\n  }\r\n}"
    );
}

#[test]
fn numeric_literals_pass_through_verbatim() {
    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_object().unwrap();
    writer.name("d").unwrap();
    writer.value_num("1.50").unwrap();
    writer.name("tiny").unwrap();
    writer.value_num("0.000001000").unwrap();
    writer.end_object().unwrap();
    writer.finish().unwrap();
    // Not 1.5, not 1.500000 — the exact text handed in.
    assert_eq!(output(writer), r#"{"d":1.50,"tiny":0.000001000}"#);
}

#[test]
fn decimal_values_keep_their_scale() {
    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_object().unwrap();
    writer.name("d").unwrap();
    writer.value_decimal(&dec!(1.50)).unwrap();
    writer.end_object().unwrap();
    writer.finish().unwrap();
    assert_eq!(output(writer), r#"{"d":1.50}"#);
}

#[test]
fn exactly_one_comma_separates_siblings() {
    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_object().unwrap();
    writer.name("x").unwrap();
    writer.value_int(1).unwrap();
    writer.name("y").unwrap();
    writer.value_int(2).unwrap();
    writer.end_object().unwrap();
    writer.finish().unwrap();
    assert_eq!(output(writer), r#"{"x":1,"y":2}"#);
}

#[test]
fn arrays_are_inline_and_unnamed() {
    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_object().unwrap();
    writer.name("list").unwrap();
    writer.begin_array().unwrap();
    writer.value_int(1).unwrap();
    writer.value_int(2).unwrap();
    writer.end_array().unwrap();
    writer.end_object().unwrap();
    writer.finish().unwrap();
    assert_eq!(output(writer), r#"{"list":[1,2]}"#);
}

#[test]
fn siblings_after_closed_containers_get_their_comma() {
    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_object().unwrap();
    writer.name("a").unwrap();
    writer.begin_object().unwrap();
    writer.end_object().unwrap();
    writer.name("b").unwrap();
    writer.begin_array().unwrap();
    writer.end_array().unwrap();
    writer.name("c").unwrap();
    writer.value_int(1).unwrap();
    writer.end_object().unwrap();
    writer.finish().unwrap();
    assert_eq!(output(writer), r#"{"a":{},"b":[],"c":1}"#);
}

#[test]
fn nulls_and_booleans_use_their_literal_tokens() {
    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_object().unwrap();
    writer.name("t").unwrap();
    writer.value_bool(true).unwrap();
    writer.name("f").unwrap();
    writer.value_bool(false).unwrap();
    writer.name("n").unwrap();
    writer.null_value().unwrap();
    writer.end_object().unwrap();
    writer.finish().unwrap();
    assert_eq!(output(writer), r#"{"t":true,"f":false,"n":null}"#);
}

#[test]
fn strings_are_escaped_per_json_rules() {
    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_object().unwrap();
    writer.name("s").unwrap();
    writer.value_str("say \"hi\"\nback\\slash").unwrap();
    writer.end_object().unwrap();
    writer.finish().unwrap();

    let text = output(writer);
    assert_eq!(text, "{\"s\":\"say \\\"hi\\\"\\nback\\\\slash\"}");
    // The output must stay parseable JSON carrying the original text.
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["s"], "say \"hi\"\nback\\slash");
}

#[test]
fn mismatched_closes_are_unbalanced() {
    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_object().unwrap();
    assert!(matches!(
        writer.end_array().unwrap_err(),
        SerdeError::UnbalancedStructure(_)
    ));

    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_array().unwrap();
    assert!(matches!(
        writer.end_object().unwrap_err(),
        SerdeError::UnbalancedStructure(_)
    ));
}

#[test]
fn closing_more_than_was_opened_is_unbalanced() {
    let mut writer = JsonWriter::new(Vec::new());
    assert!(matches!(
        writer.end_object().unwrap_err(),
        SerdeError::UnbalancedStructure(_)
    ));
}

#[test]
fn member_names_outside_objects_are_unbalanced() {
    let mut writer = JsonWriter::new(Vec::new());
    assert!(matches!(
        writer.name("a").unwrap_err(),
        SerdeError::UnbalancedStructure(_)
    ));

    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_array().unwrap();
    assert!(matches!(
        writer.name("a").unwrap_err(),
        SerdeError::UnbalancedStructure(_)
    ));
}

#[test]
fn finish_with_open_structures_is_unbalanced() {
    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_object().unwrap();
    assert!(matches!(
        writer.finish().unwrap_err(),
        SerdeError::UnbalancedStructure(_)
    ));
}

#[test]
fn every_operation_after_finish_fails_closed() {
    let mut writer = JsonWriter::new(Vec::new());
    writer.begin_object().unwrap();
    writer.end_object().unwrap();
    writer.finish().unwrap();

    assert!(matches!(
        writer.begin_object().unwrap_err(),
        SerdeError::WriterClosed
    ));
    assert!(matches!(
        writer.value_num("1").unwrap_err(),
        SerdeError::WriterClosed
    ));
    assert!(matches!(writer.finish().unwrap_err(), SerdeError::WriterClosed));
}

#[test]
fn depth_tracks_open_containers() {
    let mut writer = JsonWriter::new(Vec::new());
    assert_eq!(writer.depth(), 0);
    writer.begin_object().unwrap();
    writer.name("a").unwrap();
    writer.begin_array().unwrap();
    assert_eq!(writer.depth(), 2);
    writer.end_array().unwrap();
    writer.end_object().unwrap();
    assert_eq!(writer.depth(), 0);
}
