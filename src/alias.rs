use crate::error::CaptureAliasError;
use crate::grammar::infer_json_type;
use serde_json::Value;

/// Separator between path segments inside an alias reference.
/// `{colors.primary}` names the `primary` node inside the `colors` group.
pub const ALIAS_PATH_SEPARATOR: char = '.';

/// Opening delimiter of an alias reference.
pub const ALIAS_OPEN: char = '{';

/// Closing delimiter of an alias reference.
pub const ALIAS_CLOSE: char = '}';

/// Returns true iff the value is a string whose first character is the alias
/// open-delimiter and whose last character is the alias close-delimiter.
///
/// This is a purely lexical check: the interior path is not inspected here.
/// Whether the path actually resolves is the resolver's concern.
#[must_use]
pub fn match_is_alias(value: &Value) -> bool {
    value.as_str().is_some_and(is_alias_str)
}

pub(crate) fn is_alias_str(s: &str) -> bool {
    s.starts_with(ALIAS_OPEN) && s.ends_with(ALIAS_CLOSE)
}

/// Strips the alias delimiters, yielding the dot-separated path string.
///
/// Callers are expected to have checked [`match_is_alias`] first; a
/// non-alias input is returned unchanged.
#[must_use]
pub fn extract_alias_path(alias: &str) -> &str {
    alias
        .strip_prefix(ALIAS_OPEN)
        .and_then(|rest| rest.strip_suffix(ALIAS_CLOSE))
        .unwrap_or(alias)
}

/// Splits an alias reference into its path segments.
/// `"{colors.primary}"` yields `["colors", "primary"]`.
#[must_use]
pub fn extract_alias_path_segments(alias: &str) -> Vec<&str> {
    extract_alias_path(alias).split(ALIAS_PATH_SEPARATOR).collect()
}

/// Checked form of alias-path extraction for arbitrary JSON values.
///
/// # Errors
///
/// Returns [`CaptureAliasError::NotAString`] when the value is not a string,
/// and [`CaptureAliasError::NotAnAlias`] when the string is not enclosed in
/// the alias delimiters.
pub fn capture_alias_path(value: &Value) -> Result<Vec<String>, CaptureAliasError> {
    let Some(raw) = value.as_str() else {
        return Err(CaptureAliasError::NotAString {
            kind: infer_json_type(value).to_string(),
        });
    };
    if !match_is_alias(value) {
        return Err(CaptureAliasError::NotAnAlias {
            value: raw.to_string(),
        });
    }
    Ok(extract_alias_path_segments(raw)
        .into_iter()
        .map(str::to_string)
        .collect())
}
