use pretty_assertions::assert_eq;

use schema_mdgen::load::registry_from_str;
use schema_mdgen::select::{select, RenderedDocument, SelectOptions, Selector};

const SCHEMA: &str = r#"{ "types": [
    { "kind": "object", "name": "Post", "directives": ["md"],
      "fields": { "title": "String!", "tags": "[String]", "author": "User!" } },
    { "kind": "object", "name": "User", "fields": { "name": "String" } },
    { "kind": "interface", "name": "Node", "directives": ["md"], "fields": { "id": "ID!" } },
    { "kind": "enum", "name": "Status", "values": ["DRAFT", "PUBLISHED"] },
    { "kind": "object", "name": "Draft", "directives": ["md", "deprecated"],
      "fields": { "status": "Status!" } },
    { "kind": "object", "name": "Blank", "directives": ["md"] }
] }"#;

#[test]
fn end_to_end_documents() {
    let registry = registry_from_str(SCHEMA).unwrap();
    let docs = select(&registry).unwrap();
    assert_eq!(
        docs,
        vec![
            RenderedDocument {
                identifier: "Post.generated.md".into(),
                content: "\n* `title` (type: `String`, required)\n* `tags` (type: `Array<String>`)\n* `author` (type: `object`, required): \n  * `name` (type: `String`)".into(),
            },
            RenderedDocument {
                identifier: "Draft.generated.md".into(),
                content: "\n* `status` (type: `String (DRAFT | PUBLISHED)`, required)".into(),
            },
            RenderedDocument {
                identifier: "Blank.generated.md".into(),
                content: "\n".into(),
            },
        ]
    );
}

#[test]
fn unmarked_schema_selects_nothing() {
    let registry = registry_from_str(r#"{ "types": [{ "kind": "object", "name": "A" }] }"#).unwrap();
    assert!(select(&registry).unwrap().is_empty());
}

#[test]
fn alternate_marker() {
    let registry = registry_from_str(SCHEMA).unwrap();
    let selector = Selector::with_options(
        &registry,
        SelectOptions { marker: "deprecated".into(), ..SelectOptions::default() },
    );
    let names: Vec<&str> = selector.candidates().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Draft"]);
}

#[test]
fn output_only_uses_outline_characters() {
    let registry = registry_from_str(SCHEMA).unwrap();
    for doc in select(&registry).unwrap() {
        assert!(
            doc.content.chars().all(|c| c.is_alphanumeric() || "*` |()<>,:_\n".contains(c)),
            "{}",
            doc.content
        );
    }
}

#[test]
fn documents_serialize_as_pairs() {
    let doc = RenderedDocument { identifier: "A.generated.md".into(), content: "\n".into() };
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json, serde_json::json!({ "identifier": "A.generated.md", "content": "\n" }));
}
