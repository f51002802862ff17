//! Integration test: end-to-end check runs over realistic documents.
//!
//! Covers the reference scenarios (empty name, bad array item, missing
//! node), repeatability, schema files, composite masks, and hooks wired
//! through configs.

use jnav_core::{Document, TypeMask};
use jnav_schema::{
    check, check_document, hooks, schema_from_yaml, ErrorKind, NodeConfig, Schema, SchemaError,
    Violation,
};

fn schema<const N: usize>(entries: [(&str, NodeConfig); N]) -> Schema {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn violations(source: &str, schema: &Schema) -> Vec<Violation> {
    match check(source, schema) {
        Ok(()) => Vec::new(),
        Err(SchemaError::ValidationFailed { violations }) => violations.into_inner(),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_required_string_is_one_bad_value() {
    let s = schema([("user.name", NodeConfig::new(TypeMask::STRING))]);
    assert_eq!(
        violations(r#"{"user":{"name":""}}"#, &s),
        [Violation::new("user.name", ErrorKind::BadValue)]
    );
}

#[test]
fn wrong_item_field_is_one_bad_format() {
    let s = schema([(
        "items",
        NodeConfig::new(TypeMask::ARRAY).children([("id", NodeConfig::new(TypeMask::INT))]),
    )]);
    assert_eq!(
        violations(r#"{"items":[{"id":1},{"id":"x"}]}"#, &s),
        [Violation::new("items[1].id", ErrorKind::BadFormat)]
    );
}

#[test]
fn required_missing_node() {
    let s = schema([("missing.node", NodeConfig::new(TypeMask::INT))]);
    assert_eq!(
        violations(r#"{"present": 1}"#, &s),
        [Violation::new("missing.node", ErrorKind::MissingNode)]
    );
}

#[test]
fn unsigned_node_matches_integer_categories() {
    let mut doc = Document::new();
    doc.set("n", 7u32).unwrap();
    for mask in [TypeMask::INT, TypeMask::UINT32, TypeMask::INT32, TypeMask::UINT] {
        let s = schema([("n", NodeConfig::new(mask))]);
        assert!(check_document(&doc, &s).is_empty(), "{mask} should match");
    }
    let s = schema([("n", NodeConfig::new(TypeMask::STRING))]);
    assert_eq!(
        check_document(&doc, &s).into_inner(),
        [Violation::new("n", ErrorKind::BadFormat)]
    );
}

#[test]
fn violations_accumulate_across_siblings_in_schema_order() {
    let s = schema([
        ("b", NodeConfig::new(TypeMask::STRING)),
        ("a", NodeConfig::new(TypeMask::INT)),
        ("list", NodeConfig::new(TypeMask::ARRAY)),
        ("obj", NodeConfig::new(TypeMask::OBJECT)),
    ]);
    let found = violations(r#"{"a": "x", "b": "", "list": [], "obj": null}"#, &s);
    let kinds: Vec<(&str, ErrorKind)> = found.iter().map(|v| (v.path.as_str(), v.kind)).collect();
    assert_eq!(
        kinds,
        [
            ("b", ErrorKind::BadValue),
            ("a", ErrorKind::BadFormat),
            ("list", ErrorKind::EmptyArray),
            ("obj", ErrorKind::UnableToGet),
        ]
    );
}

#[test]
fn repeated_runs_are_identical() {
    let s = schema([
        (
            "services",
            NodeConfig::new(TypeMask::ARRAY).children([
                ("name", NodeConfig::new(TypeMask::STRING)),
                ("port", NodeConfig::new(TypeMask::INT).hook(hooks::integer_range(1, 65535))),
            ]),
        ),
        ("owner", NodeConfig::new(TypeMask::STRING)),
    ]);
    let source = r#"{"services": [{"name": "", "port": 0}, {"port": "80"}, 3]}"#;
    let first = violations(source, &s);
    let second = violations(source, &s);
    assert_eq!(first, second);
    assert_eq!(
        first,
        [
            Violation::new("services[0].name", ErrorKind::BadValue),
            Violation::new("services[0].port", ErrorKind::OutOfRange),
            Violation::new("services[1].name", ErrorKind::MissingNode),
            Violation::new("services[1].port", ErrorKind::BadFormat),
            Violation::new("services[2]", ErrorKind::BadFormat),
            Violation::new("owner", ErrorKind::MissingNode),
        ]
    );
}

#[test]
fn yaml_schema_with_code_hooks_attached() {
    let mut s = schema_from_yaml(
        r#"
level:
  type: STRING
tags:
  type: ARRAY
  min_items: 1
  max_items: 2
meta:
  type: OBJECT
  allow_unknown: false
  children:
    version: { type: INT }
"#,
    )
    .unwrap();
    if let Some(level) = s.get_mut("level") {
        level.callback = Some(hooks::one_of(["debug", "info", "warn"]));
    }

    let found = violations(
        r#"{"level": "loud", "tags": ["a", "b", "c"], "meta": {"version": 1, "extra": true}}"#,
        &s,
    );
    assert_eq!(
        found,
        [
            Violation::new("level", ErrorKind::BadValue),
            Violation::new("tags", ErrorKind::TooManyItems),
            Violation::new("meta.extra", ErrorKind::UnexpectedNode),
        ]
    );
}

#[test]
fn strict_violation_suppresses_hook_but_not_children() {
    let s = schema([(
        "cfg",
        NodeConfig::new(TypeMask::OBJECT)
            .strict()
            .children([("n", NodeConfig::new(TypeMask::INT))])
            .hook_fn(|_, path, errors| {
                errors.push(Violation::new(path, ErrorKind::BadValue));
                Ok(())
            }),
    )]);
    assert_eq!(
        violations(r#"{"cfg": {"n": "x", "other": 1}}"#, &s),
        [
            Violation::new("cfg.other", ErrorKind::UnexpectedNode),
            Violation::new("cfg.n", ErrorKind::BadFormat),
        ]
    );
}

#[test]
fn hook_waits_for_a_clean_subtree() {
    let counted = || {
        NodeConfig::new(TypeMask::ARRAY)
            .children([("port", NodeConfig::new(TypeMask::INT))])
            .hook_fn(|doc, path, errors| {
                if doc.size(path) > 1 {
                    errors.push(Violation::new(path, ErrorKind::TooManyItems));
                }
                Ok(())
            })
    };
    let s = schema([("a", counted()), ("b", counted()), ("c", counted())]);
    assert_eq!(
        violations(
            r#"{"a": ["x", {"port": 1}], "b": [{"port": "p"}, {"port": 2}], "c": [{"port": 1}, {"port": 2}]}"#,
            &s,
        ),
        [
            Violation::new("a[0]", ErrorKind::BadFormat),
            Violation::new("b[0].port", ErrorKind::BadFormat),
            Violation::new("c", ErrorKind::TooManyItems),
        ]
    );
}

#[test]
fn composite_mask_from_yaml_accepts_either_kind_as_is() {
    let s = schema_from_yaml(
        r#"
flag:
  type: STRING | BOOL
list:
  type: ARRAY | STRING
  children:
    id: { type: INT }
"#,
    )
    .unwrap();
    assert!(violations(r#"{"flag": "", "list": []}"#, &s).is_empty());
    assert!(violations(r#"{"flag": false, "list": [{"id": "x"}, 3]}"#, &s).is_empty());
    assert_eq!(
        violations(r#"{"flag": 1, "list": {}}"#, &s),
        [
            Violation::new("flag", ErrorKind::BadFormat),
            Violation::new("list", ErrorKind::BadFormat),
        ]
    );
}

#[test]
fn source_errors() {
    let s = schema([("a", NodeConfig::new(TypeMask::INT))]);
    assert!(matches!(check("", &s), Err(SchemaError::EmptySource)));
    assert!(matches!(check("[1,", &s), Err(SchemaError::Parse(_))));
}
