use serde_json::Value;
use sha2::{Digest, Sha256};

/// One step of a JSON traversal path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonPathSegment {
    Key(String),
    Index(usize),
}

/// Digests one or more token values into a stable hex string.
///
/// Values are serialized to compact JSON and fed through SHA-256 in order,
/// so the digest is sensitive to both content and argument order. Useful
/// for caching and change detection in downstream tooling.
#[must_use]
pub fn hash_token_value(values: &[&Value]) -> String {
    let mut hasher = Sha256::new();
    for value in values {
        hasher.update(value.to_string().as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Walks a JSON value depth-first, calling `callback` with every value and
/// its path from the root. Returning `false` from the callback skips the
/// descent into that value's children.
pub fn traverse_json_value<F>(value: &Value, mut callback: F)
where
    F: FnMut(&Value, &[JsonPathSegment]) -> bool,
{
    let mut path = Vec::new();
    walk(value, &mut path, &mut callback);
}

fn walk<F>(value: &Value, path: &mut Vec<JsonPathSegment>, callback: &mut F)
where
    F: FnMut(&Value, &[JsonPathSegment]) -> bool,
{
    if !callback(value, path) {
        return;
    }
    match value {
        Value::Object(fields) => {
            for (key, field) in fields {
                path.push(JsonPathSegment::Key(key.clone()));
                walk(field, path, callback);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push(JsonPathSegment::Index(index));
                walk(item, path, callback);
                path.pop();
            }
        }
        _ => {}
    }
}
