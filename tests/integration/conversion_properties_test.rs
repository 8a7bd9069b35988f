//! Behavioural properties of the converters and the format dispatcher

use assert_matches::assert_matches;
use dataconv::conversion::ConversionEngine;
use dataconv::{
    convert, convert_formats, tree_to_value, value_to_tree, ConversionConfig, ConversionErrorKind,
    Format, Mapping, Node, Value,
};
use pretty_assertions::assert_eq;

fn parse_json(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

fn strings(items: &[&str]) -> Value {
    Value::Sequence(items.iter().map(|s| Value::from(*s)).collect())
}

fn compact(from: Format, to: Format, input: &str) -> String {
    ConversionEngine::new(ConversionConfig::compact())
        .convert(from, to, input)
        .unwrap()
        .content
}

#[test]
fn same_format_conversion_is_idempotent() {
    let samples = [
        (
            Format::Json,
            r#"{"b": [1, 2.5, true, null], "a": {"c": "x", "e": {}}, "s": "caf\u00e9"}"#,
        ),
        (
            Format::Yaml,
            "b:\n  - 1\n  - 2.5\n  - true\n  - ~\na:\n  c: x\n  'n': 'yes'\n",
        ),
        (
            Format::Xml,
            "<root a=\"1\">\n  <x>1</x>\n  <x>two &amp; three</x>\n  <y/>\n  <z>  </z>\n</root>",
        ),
    ];

    for (format, input) in samples {
        let once = convert_formats(format, format, input).unwrap();
        let twice = convert_formats(format, format, &once).unwrap();
        assert_eq!(once, twice, "{} normalization is not stable", format);
    }
}

#[test]
fn attributes_are_lost_on_the_way_back() {
    let node = Node::new("item")
        .with_attribute("id", "7")
        .with_attribute("kind", "book")
        .with_child(Node::leaf("title", "Dune"));

    let rebuilt = value_to_tree(&tree_to_value(&node), &node.tag);
    assert!(rebuilt.attributes.is_empty());
    assert_eq!(rebuilt.tag, "item");
    let tags: Vec<&str> = rebuilt.children.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, vec!["id", "kind", "title"]);
}

#[test]
fn repeated_tags_fold_and_unfold_in_order() {
    let texts = ["v1", "v2", "v3", "v4"];
    let node = Node::new("list").with_children(texts.iter().map(|t| Node::leaf("T", *t)));

    let value = tree_to_value(&node);
    let expected: Value = vec![("T", strings(&texts))].into_iter().collect();
    assert_eq!(value, expected);

    let rebuilt = value_to_tree(&value, "list");
    assert_eq!(rebuilt, node);
}

#[test]
fn single_occurrence_is_not_wrapped() {
    let node = Node::new("r").with_child(Node::leaf("T", "only"));
    let value = tree_to_value(&node);
    assert_eq!(value.get("T"), Some(&Value::from("only")));
}

#[test]
fn empty_leaf_is_empty_mapping() {
    assert_eq!(tree_to_value(&Node::new("x")), Value::Mapping(Mapping::new()));
    assert_eq!(compact(Format::Xml, Format::Json, "<x/>"), "{}");
    assert_eq!(compact(Format::Xml, Format::Json, "<x></x>"), "{}");
}

#[test]
fn json_through_xml_loses_scalar_types() {
    let xml = convert("json", "xml", r#"{"a": 1, "b": [2, 3]}"#).unwrap();
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<data>\n    <a>1</a>\n    <b>2</b>\n    <b>3</b>\n</data>"
    );

    let back = convert("xml", "json", &xml).unwrap();
    assert_eq!(parse_json(&back), parse_json(r#"{"a": "1", "b": ["2", "3"]}"#));
}

#[test]
fn xml_repeated_items_become_a_list() {
    let json = convert("xml", "json", "<root><item>1</item><item>2</item></root>").unwrap();
    assert_eq!(parse_json(&json), parse_json(r#"{"item": ["1", "2"]}"#));
}

#[test]
fn yaml_scalars_become_text_in_xml() {
    let xml = compact(
        Format::Yaml,
        Format::Xml,
        "flag: true\ndisabled: false\nnothing: ~\nratio: 0.25\n",
    );
    assert_eq!(
        xml,
        "<data><flag>true</flag><disabled>false</disabled><nothing/><ratio>0.25</ratio></data>"
    );

    let yaml = convert("xml", "yaml", &xml).unwrap();
    let back: Value = serde_yaml::from_str(&yaml).unwrap();
    let expected: Value = vec![
        ("flag", Value::from("true")),
        ("disabled", Value::from("false")),
        ("nothing", Value::mapping()),
        ("ratio", Value::from("0.25")),
    ]
    .into_iter()
    .collect();
    assert_eq!(back, expected);
}

#[test]
fn attribute_and_child_with_same_name_fold() {
    assert_eq!(
        compact(Format::Xml, Format::Json, r#"<r a="x"><a>y</a></r>"#),
        r#"{"a":["x","y"]}"#
    );
    assert_eq!(
        compact(Format::Xml, Format::Json, r#"<r a="x"><a>y</a><a>z</a></r>"#),
        r#"{"a":["x","y","z"]}"#
    );
}

#[test]
fn attributes_come_before_children() {
    assert_eq!(
        compact(
            Format::Xml,
            Format::Json,
            r#"<book id="1" lang="en"><title>Dune</title><year>1965</year></book>"#
        ),
        r#"{"id":"1","lang":"en","title":"Dune","year":"1965"}"#
    );
}

#[test]
fn top_level_sequence_uses_root_tag() {
    let xml = compact(Format::Json, Format::Xml, "[1, 2]");
    assert_eq!(xml, "<data><data>1</data><data>2</data></data>");
    assert_eq!(compact(Format::Xml, Format::Json, &xml), r#"{"data":["1","2"]}"#);
}

#[test]
fn namespaces_are_kept_as_names() {
    assert_eq!(
        compact(
            Format::Xml,
            Format::Json,
            r#"<ns:a xmlns:ns="urn:x"><ns:b>1</ns:b></ns:a>"#
        ),
        r#"{"xmlns:ns":"urn:x","ns:b":"1"}"#
    );
}

#[test]
fn unsupported_identifier_is_rejected() {
    let err = convert("txt", "json", "anything").unwrap_err();
    assert!(err.is_unsupported_format());
    let err = convert("json", "toml", "{}").unwrap_err();
    assert!(err.is_unsupported_format());
}

#[test]
fn identifiers_are_case_insensitive() {
    assert_eq!(
        convert("JSON", ".Yml", r#"{"k": "v"}"#).unwrap(),
        "k: v\n"
    );
}

#[test]
fn deep_documents_hit_the_depth_guard() {
    let depth = 5_000;
    let xml = format!("{}{}", "<n>".repeat(depth), "</n>".repeat(depth));
    let err = convert("xml", "json", &xml).unwrap_err();
    assert_matches!(
        err.kind(),
        Some(ConversionErrorKind::StructuralAmbiguity { limit: 1000, .. })
    );

    let yaml = format!("{}1{}", "[".repeat(40), "]".repeat(40));
    let engine = ConversionEngine::new(ConversionConfig::default().with_max_depth(Some(10)));
    let err = engine.convert(Format::Yaml, Format::Json, &yaml).unwrap_err();
    assert_matches!(
        err.kind(),
        Some(ConversionErrorKind::StructuralAmbiguity { depth: 11, limit: 10 })
    );
}

#[test]
fn invalid_element_names_are_reported() {
    let err = convert("json", "xml", r#"{"": 1}"#).unwrap_err();
    assert_matches!(err, dataconv::ConversionError::FormattingError(_));
    let err = convert("yaml", "xml", "first name: Ada\n").unwrap_err();
    assert!(err.user_message().contains("first name"));
}

#[test]
fn whole_floats_keep_their_decimal_point_in_xml() {
    let xml = compact(Format::Json, Format::Xml, r#"{"x": 1.0, "y": 2.50, "n": 3}"#);
    assert_eq!(xml, "<data><x>1.0</x><y>2.5</y><n>3</n></data>");

    let back = compact(Format::Xml, Format::Json, &xml);
    assert_eq!(back, r#"{"x":"1.0","y":"2.5","n":"3"}"#);
}

#[test]
fn integer_and_float_yaml_keys_stay_distinct() {
    let json = compact(Format::Yaml, Format::Json, "1: a\n1.0: b\n");
    assert_eq!(json, r#"{"1":"a","1.0":"b"}"#);
}
