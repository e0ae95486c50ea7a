use serde_json::{json, Value};

use dtcg_core::{
    capture_alias_path, extract_alias_path, extract_alias_path_segments, hash_token_value,
    match_is_alias, match_is_group, match_is_token, resolve_alias, traverse_json_value,
    CaptureAliasError, JsonPathSegment, ParseOptions, ResolveError,
};

#[test]
fn test_match_is_alias() {
    assert!(match_is_alias(&json!("{colors.primary}")));
    assert!(match_is_alias(&json!("{base}")));
    assert!(match_is_alias(&json!("{}")));

    assert!(!match_is_alias(&json!("colors.primary")));
    assert!(!match_is_alias(&json!("{colors.primary")));
    assert!(!match_is_alias(&json!("colors.primary}")));
    assert!(!match_is_alias(&json!(42)));
    assert!(!match_is_alias(&json!(["{colors.primary}"])));
}

#[test]
fn test_extract_alias_path() {
    assert_eq!(extract_alias_path("{colors.primary}"), "colors.primary");
    assert_eq!(extract_alias_path("{base}"), "base");
    // Non-alias input comes back unchanged.
    assert_eq!(extract_alias_path("colors.primary"), "colors.primary");
}

#[test]
fn test_extract_alias_path_segments() {
    assert_eq!(
        extract_alias_path_segments("{a.b.c}"),
        vec!["a", "b", "c"]
    );
    assert_eq!(extract_alias_path_segments("{base}"), vec!["base"]);
}

#[test]
fn test_capture_alias_path() {
    assert_eq!(
        capture_alias_path(&json!("{colors.primary}")).unwrap(),
        vec!["colors".to_string(), "primary".to_string()]
    );

    match capture_alias_path(&json!(42)) {
        Err(CaptureAliasError::NotAString { kind }) => assert_eq!(kind, "number"),
        other => panic!("Expected NotAString, but got {other:?}"),
    }
    match capture_alias_path(&json!("plain text")) {
        Err(CaptureAliasError::NotAnAlias { value }) => assert_eq!(value, "plain text"),
        other => panic!("Expected NotAnAlias, but got {other:?}"),
    }
}

#[test]
fn test_match_is_token_and_group() {
    assert!(match_is_token(&json!({ "$value": 1 })));
    assert!(match_is_token(&json!({ "$value": null })));
    assert!(!match_is_token(&json!({ "$type": "color" })));
    assert!(!match_is_token(&json!("a string")));

    assert!(match_is_group(&json!({})));
    assert!(match_is_group(&json!({ "$type": "color" })));
    assert!(!match_is_group(&json!({ "$value": 1 })));
    assert!(!match_is_group(&json!(null)));
}

#[test]
fn test_hash_token_value_is_stable() {
    let color = json!("#0000ff");
    let weight = json!(700);

    let first = hash_token_value(&[&color, &weight]);
    let second = hash_token_value(&[&color, &weight]);
    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_hash_token_value_is_order_sensitive() {
    let color = json!("#0000ff");
    let weight = json!(700);

    let forward = hash_token_value(&[&color, &weight]);
    let backward = hash_token_value(&[&weight, &color]);
    assert_ne!(forward, backward);
}

#[test]
fn test_hash_of_no_values() {
    // SHA-256 of the empty input.
    assert_eq!(
        hash_token_value(&[]),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_traverse_json_value_visits_depth_first() {
    let value = json!({
        "a": { "b": [1, 2] },
        "c": true
    });

    let mut visited = Vec::new();
    traverse_json_value(&value, |_, path| {
        visited.push(path.to_vec());
        true
    });

    use JsonPathSegment::{Index, Key};
    assert_eq!(
        visited,
        vec![
            vec![],
            vec![Key("a".to_string())],
            vec![Key("a".to_string()), Key("b".to_string())],
            vec![Key("a".to_string()), Key("b".to_string()), Index(0)],
            vec![Key("a".to_string()), Key("b".to_string()), Index(1)],
            vec![Key("c".to_string())],
        ]
    );
}

#[test]
fn test_traverse_json_value_prunes_on_false() {
    let value = json!({
        "a": { "b": [1, 2] },
        "c": true
    });

    let mut visited = Vec::new();
    traverse_json_value(&value, |_, path| {
        visited.push(path.to_vec());
        // Skip everything below "a".
        path != [JsonPathSegment::Key("a".to_string())]
    });

    use JsonPathSegment::Key;
    assert_eq!(
        visited,
        vec![vec![], vec![Key("a".to_string())], vec![Key("c".to_string())]]
    );
}

fn color_context() -> Value {
    json!({
        "colors": {
            "$type": "color",
            "primary": { "$value": "#0000ff" }
        }
    })
}

#[test]
fn test_resolve_alias_eagerly() {
    let context = color_context();
    let context = context.as_object().unwrap();

    let options = ParseOptions {
        resolve_aliases: true,
        publish_metadata: false,
    };
    let resolved = resolve_alias("{colors.primary}", options, context).unwrap();

    assert_eq!(
        serde_json::to_value(&resolved).unwrap(),
        json!({ "$type": "color", "$value": "#0000ff" })
    );
}

#[test]
fn test_resolve_alias_deferred() {
    let context = color_context();
    let context = context.as_object().unwrap();

    let resolved = resolve_alias("{colors.primary}", ParseOptions::default(), context).unwrap();

    assert_eq!(
        serde_json::to_value(&resolved).unwrap(),
        json!("{colors.primary}")
    );
}

#[test]
fn test_resolve_alias_with_metadata() {
    let context = color_context();
    let context = context.as_object().unwrap();

    let options = ParseOptions {
        resolve_aliases: true,
        publish_metadata: true,
    };
    let resolved = resolve_alias("{colors.primary}", options, context).unwrap();

    assert_eq!(
        serde_json::to_value(&resolved).unwrap(),
        json!({
            "$type": "color",
            "$value": "#0000ff",
            "_kind": "alias",
            "_name": "primary",
            "_path": ["colors", "primary"]
        })
    );
}

#[test]
fn test_resolve_alias_rejects_non_alias_input() {
    let context = color_context();
    let context = context.as_object().unwrap();

    match resolve_alias("colors.primary", ParseOptions::default(), context) {
        Err(ResolveError::InvalidAlias { value }) => assert_eq!(value, "colors.primary"),
        other => panic!("Expected InvalidAlias, but got {other:?}"),
    }
}

#[test]
fn test_resolve_alias_missing_target() {
    let context = color_context();
    let context = context.as_object().unwrap();

    match resolve_alias("{colors.missing}", ParseOptions::default(), context) {
        Err(ResolveError::AliasNotFound { path, .. }) => assert_eq!(path, "colors.missing"),
        other => panic!("Expected AliasNotFound, but got {other:?}"),
    }
}
