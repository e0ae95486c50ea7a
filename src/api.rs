use crate::error::{DtcgError, ResolveError};
use crate::resolver::Resolver;
use crate::serialization::to_value;
use crate::tree::{ParseOptions, ResolvedTokenTree, TokenTree};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// The result of a successful parse of a tokens document.
/// Holds the fully resolved tree alongside the raw input it was built from,
/// and provides the serialization surface most consumers want.
pub struct ParseResult {
    pub tree: ResolvedTokenTree,
    pub unresolved: TokenTree,
}

impl Serialize for ParseResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.tree.serialize(serializer)
    }
}

impl ParseResult {
    /// Serializes the resolved tree into a generic `serde_json::Value`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        to_value(&self.tree)
    }

    /// Serializes the resolved tree into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }

    /// Serializes the resolved tree into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self)
    }
}

/// Resolves an in-memory token tree with the given options.
///
/// This is the primary entry point when the document is already parsed
/// JSON; [`parse_tokens_str`] wraps it for raw text.
///
/// # Errors
///
/// Returns a [`ResolveError`] if any name, alias, type or value in the tree
/// fails resolution. Resolution is all-or-nothing: no partial tree is ever
/// returned.
pub fn parse_tokens_tree(
    tree: &TokenTree,
    options: ParseOptions,
) -> Result<ResolvedTokenTree, ResolveError> {
    let mut resolver = Resolver::new(tree, options);
    resolver.resolve_tree()
}

/// Parses a JSON string as a tokens document and resolves it.
///
/// # Errors
///
/// Returns [`DtcgError::Json`] when the text is not a JSON object, and
/// [`DtcgError::Resolve`] when tree resolution fails.
pub fn parse_tokens_str(source: &str, options: ParseOptions) -> Result<ParseResult, DtcgError> {
    let unresolved: TokenTree = serde_json::from_str(source)?;
    let tree = parse_tokens_tree(&unresolved, options)?;
    Ok(ParseResult { tree, unresolved })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_parse_to_json() {
        let source = r##"{
            "colors": {
                "$type": "color",
                "primary": { "$value": "#0000ff" }
            }
        }"##;

        let expected = serde_json::json!({
            "colors": {
                "$type": "color",
                "primary": { "$type": "color", "$value": "#0000ff" }
            }
        });

        let result = parse_tokens_str(source, ParseOptions::default()).unwrap();
        let json = result.to_json().unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, expected);
        assert_eq!(result.to_value(), expected);
    }

    #[test]
    fn test_simple_parse_to_yaml() {
        let source = r#"{ "border-width": { "$type": "dimension", "$value": "2px" } }"#;
        let expected_yaml = "border-width:\n  $type: dimension\n  $value: 2px\n";

        let result = parse_tokens_str(source, ParseOptions::default()).unwrap();
        let yaml = result.to_yaml().unwrap();

        assert_eq!(yaml, expected_yaml);
    }

    #[test]
    fn test_parse_keeps_unresolved_input() {
        let source = r##"{
            "colors": {
                "$type": "color",
                "primary": { "$value": "#0000ff" },
                "secondary": { "$value": "{colors.primary}" }
            }
        }"##;

        let result = parse_tokens_str(
            source,
            ParseOptions {
                resolve_aliases: true,
                publish_metadata: false,
            },
        )
        .unwrap();

        // The raw input stays reachable next to the resolved tree.
        assert!(result.unresolved.contains_key("colors"));
        assert!(result.tree.get("colors.primary").is_some());
        assert!(result.tree.get("colors.secondary").is_some());
    }

    #[test]
    fn test_parse_rejects_non_object_documents() {
        let result = parse_tokens_str("[1, 2, 3]", ParseOptions::default());
        assert!(matches!(result, Err(DtcgError::Json(_))));
    }
}
