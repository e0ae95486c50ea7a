use crate::grammar::TokenTypeName;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DtcgError {
    #[error("Failed to parse the document as JSON")]
    #[diagnostic(
        code(dtcg::invalid_json),
        help("The tokens document must be a JSON object at the top level.")
    )]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ResolveError {
    #[error("Invalid node name \"{name}\"")]
    #[diagnostic(
        code(resolver::invalid_name),
        help("Token or Group name cannot contain \".\", \"{{\" and \"}}\".")
    )]
    InvalidName { name: String },

    #[error("Alias \"{path}\" not found in context: {context}")]
    #[diagnostic(
        code(resolver::alias_not_found),
        help("An alias must reference the path of an existing token or group, e.g. \"{{colors.primary}}\".")
    )]
    AliasNotFound { path: String, context: String },

    #[error("Type mismatch at \"{path}\": declared \"{expected}\" but the alias target resolves to \"{found}\"")]
    #[diagnostic(
        code(resolver::type_mismatch),
        help("A token referencing another token must declare the same type as its target, or none at all.")
    )]
    TypeMismatch {
        expected: TokenTypeName,
        found: TokenTypeName,
        path: String,
    },

    #[error("Circular alias reference: {}", .cycle.join(" -> "))]
    #[diagnostic(
        code(resolver::circular_alias),
        help("Alias resolution re-entered a path that is still being resolved.")
    )]
    CircularAlias { cycle: Vec<String> },

    #[error("Unknown token type \"{name}\" at \"{path}\"")]
    #[diagnostic(
        code(resolver::unknown_type),
        help("Expected one of the Design Tokens type names, e.g. \"color\", \"dimension\", \"shadow\".")
    )]
    UnknownType { name: String, path: String },

    #[error("Invalid alias \"{value}\"")]
    #[diagnostic(
        code(resolver::invalid_alias),
        help("An alias is a dot-delimited path enclosed in curly braces: \"{{path.to.token}}\".")
    )]
    InvalidAlias { value: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ValidationError {
    #[error("Expected {expected}, received {found} at \"{path}\"")]
    #[diagnostic(
        code(grammar::mismatch),
        help("The value does not conform to the grammar of its token type.")
    )]
    Mismatch {
        expected: String,
        found: String,
        path: String,
    },

    #[error("Number {found} outside [{min}, {max}] at \"{path}\"")]
    #[diagnostic(
        code(grammar::out_of_range),
        help("The numeric component is restricted to a closed interval by its token type.")
    )]
    OutOfRange {
        found: f64,
        min: f64,
        max: f64,
        path: String,
    },

    #[error("Missing required field \"{field}\" in {composite} value at \"{path}\"")]
    #[diagnostic(
        code(grammar::missing_field),
        help("Composite token values must carry every field their type declares.")
    )]
    MissingField {
        field: &'static str,
        composite: TokenTypeName,
        path: String,
    },

    #[error("Unexpected keyword \"{found}\" at \"{path}\": expected one of {allowed}")]
    #[diagnostic(
        code(grammar::unknown_keyword),
        help("Keyword components are drawn from a closed set of names.")
    )]
    UnknownKeyword {
        found: String,
        allowed: String,
        path: String,
    },
}

impl ValidationError {
    /// Prepends the token's tree path to the value-relative path carried by
    /// the error, so failures surfaced through the resolver point at the
    /// offending node.
    pub(crate) fn prefixed(self, prefix: &str) -> Self {
        match self {
            Self::Mismatch {
                expected,
                found,
                path,
            } => Self::Mismatch {
                expected,
                found,
                path: join_prefix(prefix, &path),
            },
            Self::OutOfRange {
                found,
                min,
                max,
                path,
            } => Self::OutOfRange {
                found,
                min,
                max,
                path: join_prefix(prefix, &path),
            },
            Self::MissingField {
                field,
                composite,
                path,
            } => Self::MissingField {
                field,
                composite,
                path: join_prefix(prefix, &path),
            },
            Self::UnknownKeyword {
                found,
                allowed,
                path,
            } => Self::UnknownKeyword {
                found,
                allowed,
                path: join_prefix(prefix, &path),
            },
        }
    }
}

fn join_prefix(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        path.to_string()
    } else if path.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}.{path}")
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CaptureAliasError {
    #[error("Expected a string value. Got {kind}.")]
    #[diagnostic(
        code(alias::type_error),
        help("Only string values can carry an alias reference.")
    )]
    NotAString { kind: String },

    #[error("Expected a string value enclosed in curly braces, using dot notation: {{path.to.token}}. Got \"{value}\".")]
    #[diagnostic(
        code(alias::format_error),
        help("An alias starts with \"{{\" and ends with \"}}\".")
    )]
    NotAnAlias { value: String },
}
