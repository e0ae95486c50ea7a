use crate::tree::ResolvedTokenTree;
use serde_json::Value;

/// Converts a resolved tree into a plain `serde_json::Value`.
///
/// Children are stored sorted, so the produced value (and anything
/// serialized from it) is deterministic for a given input tree.
pub(crate) fn to_value(tree: &ResolvedTokenTree) -> Value {
    // A resolved tree is always JSON-representable: its values were built
    // from JSON input and its maps are string-keyed.
    serde_json::to_value(tree).unwrap_or(Value::Null)
}
