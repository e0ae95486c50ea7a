// Integration tests for dtcg-core using test fixtures
use dtcg_core::{parse_tokens_str, ParseOptions};
use std::fs;
use std::path::PathBuf;

fn get_test_file_path(subdir: &str, filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(subdir)
        .join(filename)
}

fn read_test_file(subdir: &str, filename: &str) -> String {
    let path = get_test_file_path(subdir, filename);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read test file: {:?}", path))
}

fn all_options() -> [ParseOptions; 4] {
    [
        ParseOptions {
            resolve_aliases: false,
            publish_metadata: false,
        },
        ParseOptions {
            resolve_aliases: false,
            publish_metadata: true,
        },
        ParseOptions {
            resolve_aliases: true,
            publish_metadata: false,
        },
        ParseOptions {
            resolve_aliases: true,
            publish_metadata: true,
        },
    ]
}

// Tests for valid documents that should resolve under every option set
mod ok_tests {
    use super::*;
    use dtcg_core::TokenTypeName;
    use serde_json::json;

    #[test]
    fn test_full_document_parses_in_every_mode() {
        let source = read_test_file("ok", "full-document.json");

        for options in all_options() {
            let result = parse_tokens_str(&source, options);
            assert!(
                result.is_ok(),
                "Should resolve with {:?}: {:?}",
                options,
                result.err()
            );

            let result = result.unwrap();
            assert!(result.to_json().is_ok(), "Should serialize to JSON");
            assert!(result.to_yaml().is_ok(), "Should serialize to YAML");
        }
    }

    #[test]
    fn test_full_document_resolves_composites() {
        let source = read_test_file("ok", "full-document.json");
        let options = ParseOptions {
            resolve_aliases: true,
            publish_metadata: false,
        };

        let result = parse_tokens_str(&source, options).unwrap();

        let shadow = result
            .tree
            .get("shadow.low")
            .and_then(|node| node.as_token())
            .expect("shadow.low is a token");
        assert_eq!(shadow.token_type, TokenTypeName::Shadow);

        let value = result.to_value();
        assert_eq!(value["shadow"]["low"]["$value"]["color"]["$value"], "#00000088");
        assert_eq!(value["border"]["focus-ring"]["$value"]["style"]["$value"], "dashed");
        assert_eq!(
            value["typography"]["body"]["$value"]["fontFamily"]["$value"],
            json!(["Helvetica", "Arial", "sans-serif"])
        );
        assert_eq!(
            value["motion"]["transition"]["emphasis"]["$value"]["timingFunction"]["$value"],
            json!([0.4, 0, 0.2, 1])
        );
    }

    #[test]
    fn test_full_document_reparses_identically_when_deferred() {
        let source = read_test_file("ok", "full-document.json");

        for options in [
            ParseOptions::default(),
            ParseOptions {
                resolve_aliases: false,
                publish_metadata: true,
            },
        ] {
            let first = parse_tokens_str(&source, options).unwrap();
            let serialized = first.to_json().unwrap();
            let second = parse_tokens_str(&serialized, options).unwrap();
            assert_eq!(first.to_value(), second.to_value());
        }
    }

    #[test]
    fn test_alias_chains_resolve() {
        let source = read_test_file("ok", "aliases.json");
        let options = ParseOptions {
            resolve_aliases: true,
            publish_metadata: false,
        };

        let value = parse_tokens_str(&source, options).unwrap().to_value();

        // highlight -> accent -> base.primary
        assert_eq!(
            value["theme"]["highlight"]["$value"]["$value"]["$value"],
            "#0000ff"
        );
        assert_eq!(value["theme"]["highlight"]["$type"], "color");
        // A group target is inlined with its children.
        assert_eq!(
            value["palette"]["$value"]["primary"],
            json!({ "$type": "color", "$value": "#0000ff" })
        );
    }

    #[test]
    fn test_aliases_stay_verbatim_when_deferred() {
        let source = read_test_file("ok", "aliases.json");

        let value = parse_tokens_str(&source, ParseOptions::default())
            .unwrap()
            .to_value();

        assert_eq!(value["theme"]["accent"]["$value"], "{base.primary}");
        assert_eq!(value["theme"]["highlight"]["$value"], "{theme.accent}");
        assert_eq!(value["palette"]["$value"], "{base}");
    }
}

// Tests for documents that must be rejected
mod err_tests {
    use super::*;
    use dtcg_core::{DtcgError, ResolveError};

    fn parse_err(subdir: &str, filename: &str, options: ParseOptions) -> DtcgError {
        let source = read_test_file(subdir, filename);
        match parse_tokens_str(&source, options) {
            Ok(_) => panic!("Expected {filename} to fail"),
            Err(err) => err,
        }
    }

    #[test]
    fn test_dangling_alias() {
        let err = parse_err("err", "dangling-alias.json", ParseOptions::default());
        match err {
            DtcgError::Resolve(ResolveError::AliasNotFound { path, .. }) => {
                assert_eq!(path, "missing.target");
            }
            other => panic!("Expected AliasNotFound, but got {other:?}"),
        }
    }

    #[test]
    fn test_circular_alias() {
        let options = ParseOptions {
            resolve_aliases: true,
            publish_metadata: false,
        };
        let err = parse_err("err", "circular-alias.json", options);
        match err {
            DtcgError::Resolve(ResolveError::CircularAlias { cycle }) => {
                assert!(!cycle.is_empty());
            }
            other => panic!("Expected CircularAlias, but got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_color() {
        let err = parse_err("err", "invalid-color.json", ParseOptions::default());
        match err {
            DtcgError::Resolve(ResolveError::Validation(_)) => {}
            other => panic!("Expected a validation error, but got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_name() {
        let err = parse_err("err", "invalid-name.json", ParseOptions::default());
        match err {
            DtcgError::Resolve(ResolveError::InvalidName { name }) => {
                assert_eq!(name, "bad.name");
            }
            other => panic!("Expected InvalidName, but got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type() {
        let err = parse_err("err", "unknown-type.json", ParseOptions::default());
        match err {
            DtcgError::Resolve(ResolveError::UnknownType { name, path }) => {
                assert_eq!(name, "colour");
                assert_eq!(path, "colors");
            }
            other => panic!("Expected UnknownType, but got {other:?}"),
        }
    }
}
