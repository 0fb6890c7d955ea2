use std::path::Path;

use schema_mdgen::load::{load_paths, registry_from_str, Loader};
use schema_mdgen::schema::{CompositeKind, NamedType, TypeRef};
use schema_mdgen::SchemaError;

#[test]
fn fields_keep_document_order() {
    let registry = registry_from_str(
        r#"{ "types": [{ "kind": "object", "name": "T",
             "fields": { "zeta": "Int", "alpha": "[String!]!", "mid": "T" } }] }"#,
    )
    .unwrap();
    let t = registry.get("T").and_then(NamedType::as_composite).unwrap();
    assert_eq!(t.kind, CompositeKind::Object);
    let names: Vec<&str> = t.fields.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    assert_eq!(
        t.fields["alpha"].ty,
        TypeRef::required(TypeRef::list(TypeRef::required(TypeRef::named("String"))))
    );
}

#[test]
fn malformed_modifier_names_the_field() {
    let err = registry_from_str(
        r#"{ "types": [{ "kind": "object", "name": "Post", "fields": { "ok": "Int", "tags": "[]" } }] }"#,
    )
    .unwrap_err();
    match err {
        SchemaError::InvalidTypeRef { owner, field, notation, .. } => {
            assert_eq!((owner.as_str(), field.as_str(), notation.as_str()), ("Post", "tags", "[]"));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn unknown_kind_reports_json_path() {
    let err = registry_from_str(r#"{ "types": [{ "kind": "union", "name": "U" }] }"#).unwrap_err();
    match err {
        SchemaError::Json { message, .. } => assert!(message.contains("types[0]"), "{message}"),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn misspelled_declaration_key_is_rejected() {
    let err = registry_from_str(
        r#"{ "types": [{ "kind": "object", "name": "Post", "directive": ["md"] }] }"#,
    )
    .unwrap_err();
    match err {
        SchemaError::Json { message, .. } => assert!(message.contains("directive"), "{message}"),
        other => panic!("unexpected error {other}"),
    }
    for decl in [
        r#"{ "kind": "enum", "name": "E", "value": ["A"] }"#,
        r#"{ "kind": "scalar", "name": "S", "fields": {} }"#,
    ] {
        let source = format!(r#"{{ "types": [{decl}] }}"#);
        assert!(matches!(registry_from_str(&source), Err(SchemaError::Json { .. })), "{decl}");
    }
}

#[test]
fn documents_merge_and_reject_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    std::fs::write(&a, r#"{ "types": [{ "kind": "object", "name": "A", "fields": { "b": "B" } }] }"#).unwrap();
    std::fs::write(&b, r#"{ "types": [{ "kind": "object", "name": "B" }] }"#).unwrap();

    let registry = load_paths([&a, &b], None).unwrap();
    let names: Vec<&str> = registry.iter().map(NamedType::name).skip(5).collect();
    assert_eq!(names, vec!["A", "B"]);

    let err = load_paths([&a, &a], None).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateType { name } if name == "A"));
}

#[test]
fn json_pointer_selects_subtree() {
    let source = r#"{ "data": { "schema": { "types": [{ "kind": "scalar", "name": "Url" }] } } }"#;
    let mut loader = Loader::new().with_json_pointer(Some("/data/schema".into()));
    loader.load_str(source, Path::new("wrapped.json")).unwrap();
    assert!(loader.finish().contains("Url"));

    let mut loader = Loader::new().with_json_pointer(Some("/missing".into()));
    let err = loader.load_str(source, Path::new("wrapped.json")).unwrap_err();
    assert!(matches!(err, SchemaError::Pointer { pointer, .. } if pointer == "/missing"));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_paths(["/definitely/not/here.json"], None).unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
}
