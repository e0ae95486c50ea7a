use crate::alias::{match_is_alias, ALIAS_CLOSE, ALIAS_OPEN, ALIAS_PATH_SEPARATOR};
use crate::error::{ResolveError, ValidationError};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The closed set of type tags a token or group can declare.
///
/// Six base tags mirror the JSON value kinds; the rest are the composite
/// value shapes of the Design Tokens format. `number` is both a base tag and
/// a format-level name, so the two sets share a single variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenTypeName {
    String,
    Number,
    Boolean,
    Null,
    Object,
    Array,
    Color,
    Dimension,
    FontFamily,
    FontWeight,
    Duration,
    CubicBezier,
    Shadow,
    StrokeStyle,
    Border,
    Transition,
    Gradient,
    Typography,
}

/// The type names defined by the Design Tokens format itself, as published
/// for schema tooling. The base JSON tags other than `number` are not part
/// of this list even though [`TokenTypeName::from_name`] accepts them.
pub const DESIGN_TOKEN_TYPE_NAMES: [&str; 13] = [
    "color",
    "dimension",
    "fontFamily",
    "fontWeight",
    "duration",
    "cubicBezier",
    "number",
    "strokeStyle",
    "border",
    "transition",
    "shadow",
    "gradient",
    "typography",
];

/// Named font weights accepted by the `fontWeight` grammar.
pub const FONT_WEIGHT_NAMES: [&str; 18] = [
    "thin",
    "hairline",
    "extra-light",
    "ultra-light",
    "light",
    "normal",
    "regular",
    "book",
    "medium",
    "semi-bold",
    "demi-bold",
    "bold",
    "extra-bold",
    "ultra-bold",
    "black",
    "heavy",
    "extra-black",
    "ultra-black",
];

/// Keyword form of the `strokeStyle` grammar.
pub const STROKE_STYLE_KEYWORDS: [&str; 8] = [
    "solid", "dashed", "dotted", "double", "groove", "ridge", "outset", "inset",
];

/// Accepted `lineCap` values in the object form of `strokeStyle`.
pub const STROKE_STYLE_LINE_CAPS: [&str; 3] = ["round", "butt", "square"];

const SHADOW_FIELDS: [(&str, TokenTypeName); 5] = [
    ("color", TokenTypeName::Color),
    ("offsetX", TokenTypeName::Dimension),
    ("offsetY", TokenTypeName::Dimension),
    ("blur", TokenTypeName::Dimension),
    ("spread", TokenTypeName::Dimension),
];

const BORDER_FIELDS: [(&str, TokenTypeName); 3] = [
    ("color", TokenTypeName::Color),
    ("width", TokenTypeName::Dimension),
    ("style", TokenTypeName::StrokeStyle),
];

const TRANSITION_FIELDS: [(&str, TokenTypeName); 3] = [
    ("duration", TokenTypeName::Duration),
    ("delay", TokenTypeName::Duration),
    ("timingFunction", TokenTypeName::CubicBezier),
];

const TYPOGRAPHY_FIELDS: [(&str, TokenTypeName); 5] = [
    ("fontFamily", TokenTypeName::FontFamily),
    ("fontSize", TokenTypeName::Dimension),
    ("fontWeight", TokenTypeName::FontWeight),
    ("letterSpacing", TokenTypeName::Dimension),
    ("lineHeight", TokenTypeName::String),
];

pub(crate) const GRADIENT_STOP_FIELDS: [(&str, TokenTypeName); 2] = [
    ("color", TokenTypeName::Color),
    ("position", TokenTypeName::Number),
];

/// The declared type of a named field inside a composite value shape, used
/// by the resolver to reconcile eagerly dereferenced sub-field aliases.
pub(crate) fn composite_field_type(tag: TokenTypeName, field: &str) -> Option<TokenTypeName> {
    let fields: &[(&str, TokenTypeName)] = match tag {
        TokenTypeName::Shadow => &SHADOW_FIELDS,
        TokenTypeName::Border => &BORDER_FIELDS,
        TokenTypeName::Transition => &TRANSITION_FIELDS,
        TokenTypeName::Typography => &TYPOGRAPHY_FIELDS,
        _ => return None,
    };
    fields
        .iter()
        .find(|(name, _)| *name == field)
        .map(|&(_, field_tag)| field_tag)
}

impl TokenTypeName {
    /// Every tag in the closed set, base and composite.
    pub const ALL: [TokenTypeName; 18] = [
        TokenTypeName::String,
        TokenTypeName::Number,
        TokenTypeName::Boolean,
        TokenTypeName::Null,
        TokenTypeName::Object,
        TokenTypeName::Array,
        TokenTypeName::Color,
        TokenTypeName::Dimension,
        TokenTypeName::FontFamily,
        TokenTypeName::FontWeight,
        TokenTypeName::Duration,
        TokenTypeName::CubicBezier,
        TokenTypeName::Shadow,
        TokenTypeName::StrokeStyle,
        TokenTypeName::Border,
        TokenTypeName::Transition,
        TokenTypeName::Gradient,
        TokenTypeName::Typography,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenTypeName::String => "string",
            TokenTypeName::Number => "number",
            TokenTypeName::Boolean => "boolean",
            TokenTypeName::Null => "null",
            TokenTypeName::Object => "object",
            TokenTypeName::Array => "array",
            TokenTypeName::Color => "color",
            TokenTypeName::Dimension => "dimension",
            TokenTypeName::FontFamily => "fontFamily",
            TokenTypeName::FontWeight => "fontWeight",
            TokenTypeName::Duration => "duration",
            TokenTypeName::CubicBezier => "cubicBezier",
            TokenTypeName::Shadow => "shadow",
            TokenTypeName::StrokeStyle => "strokeStyle",
            TokenTypeName::Border => "border",
            TokenTypeName::Transition => "transition",
            TokenTypeName::Gradient => "gradient",
            TokenTypeName::Typography => "typography",
        }
    }

    /// Looks a tag up by its canonical spelling. Returns `None` for names
    /// outside the closed set.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        TokenTypeName::ALL
            .into_iter()
            .find(|tag| tag.as_str() == name)
    }

    /// True for the six tags that map directly onto JSON value kinds.
    #[must_use]
    pub const fn is_base_json_type(self) -> bool {
        matches!(
            self,
            TokenTypeName::String
                | TokenTypeName::Number
                | TokenTypeName::Boolean
                | TokenTypeName::Null
                | TokenTypeName::Object
                | TokenTypeName::Array
        )
    }
}

impl fmt::Display for TokenTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true iff the string is one of the Design Tokens format type names.
#[must_use]
pub fn match_is_token_type_name(name: &str) -> bool {
    DESIGN_TOKEN_TYPE_NAMES.contains(&name)
}

/// Maps a raw JSON value onto its base type tag.
///
/// Total over `serde_json::Value`: every representable value has exactly one
/// of the six base tags.
#[must_use]
pub const fn infer_json_type(value: &Value) -> TokenTypeName {
    match value {
        Value::Null => TokenTypeName::Null,
        Value::Bool(_) => TokenTypeName::Boolean,
        Value::Number(_) => TokenTypeName::Number,
        Value::String(_) => TokenTypeName::String,
        Value::Array(_) => TokenTypeName::Array,
        Value::Object(_) => TokenTypeName::Object,
    }
}

/// Checks a token or group name for the reserved path and alias characters.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidName`] when the name contains `.`, `{`
/// or `}`.
pub fn validate_node_name(name: &str) -> Result<(), ResolveError> {
    if name.contains([ALIAS_PATH_SEPARATOR, ALIAS_OPEN, ALIAS_CLOSE]) {
        return Err(ResolveError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Validates a raw token value against the grammar of a type tag.
///
/// An alias string is accepted for any tag after a purely syntactic check;
/// whether its target carries the right type is decided during tree
/// resolution, where the target is actually known. Everything else is
/// dispatched to the tag's structural rule below.
///
/// # Errors
///
/// Returns a [`ValidationError`] describing the first rule the value breaks.
/// Paths in the error are relative to the value (rooted at `$value`).
pub fn validate_token_value(type_name: TokenTypeName, value: &Value) -> Result<(), ValidationError> {
    if match_is_alias(value) {
        return Ok(());
    }
    validate_by_tag(type_name, value, "$value")
}

/// Sub-value validation inside composite shapes: aliases are accepted for
/// every tag except `fontWeight`, which is a closed union of its own.
fn validate_sub_value(tag: TokenTypeName, value: &Value, path: &str) -> Result<(), ValidationError> {
    if tag != TokenTypeName::FontWeight && match_is_alias(value) {
        return Ok(());
    }
    validate_by_tag(tag, value, path)
}

/// The finite dispatch table: one arm per tag in the closed set.
fn validate_by_tag(tag: TokenTypeName, value: &Value, path: &str) -> Result<(), ValidationError> {
    match tag {
        TokenTypeName::String => expect_json(value.is_string(), "a string", value, path),
        TokenTypeName::Number => expect_json(value.is_number(), "a number", value, path),
        TokenTypeName::Boolean => expect_json(value.is_boolean(), "a boolean", value, path),
        TokenTypeName::Null => expect_json(value.is_null(), "null", value, path),
        TokenTypeName::Object => expect_json(value.is_object(), "an object", value, path),
        TokenTypeName::Array => expect_json(value.is_array(), "an array", value, path),
        TokenTypeName::Color => validate_color(value, path),
        TokenTypeName::Dimension => validate_dimension(value, path),
        TokenTypeName::FontFamily => validate_font_family(value, path),
        TokenTypeName::FontWeight => validate_font_weight(value, path),
        TokenTypeName::Duration => validate_duration(value, path),
        TokenTypeName::CubicBezier => validate_cubic_bezier(value, path),
        TokenTypeName::Shadow => validate_object_fields(tag, value, path, &SHADOW_FIELDS),
        TokenTypeName::StrokeStyle => validate_stroke_style(value, path),
        TokenTypeName::Border => validate_object_fields(tag, value, path, &BORDER_FIELDS),
        TokenTypeName::Transition => validate_object_fields(tag, value, path, &TRANSITION_FIELDS),
        TokenTypeName::Gradient => validate_gradient(value, path),
        TokenTypeName::Typography => validate_object_fields(tag, value, path, &TYPOGRAPHY_FIELDS),
    }
}

fn expect_json(
    ok: bool,
    expected: &str,
    value: &Value,
    path: &str,
) -> Result<(), ValidationError> {
    if ok {
        Ok(())
    } else {
        Err(mismatch(expected, value, path))
    }
}

fn mismatch(expected: &str, value: &Value, path: &str) -> ValidationError {
    ValidationError::Mismatch {
        expected: expected.to_string(),
        found: infer_json_type(value).to_string(),
        path: path.to_string(),
    }
}

fn string_mismatch(expected: &str, found: &str, path: &str) -> ValidationError {
    ValidationError::Mismatch {
        expected: expected.to_string(),
        found: format!("\"{found}\""),
        path: path.to_string(),
    }
}

fn sub_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn index_path(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

fn validate_color(value: &Value, path: &str) -> Result<(), ValidationError> {
    let s = value
        .as_str()
        .ok_or_else(|| mismatch("a string", value, path))?;
    let is_hex = s
        .strip_prefix('#')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit()));
    if is_hex {
        Ok(())
    } else {
        Err(string_mismatch("a \"#\"-prefixed hex color", s, path))
    }
}

fn is_dimension_string(s: &str) -> bool {
    s.strip_suffix("px")
        .or_else(|| s.strip_suffix("rem"))
        .is_some_and(|magnitude| magnitude.parse::<f64>().is_ok())
}

fn validate_dimension(value: &Value, path: &str) -> Result<(), ValidationError> {
    let s = value
        .as_str()
        .ok_or_else(|| mismatch("a string", value, path))?;
    if is_dimension_string(s) {
        Ok(())
    } else {
        Err(string_mismatch(
            "a dimension with \"px\" or \"rem\" suffix",
            s,
            path,
        ))
    }
}

fn validate_font_family(value: &Value, path: &str) -> Result<(), ValidationError> {
    match value {
        Value::String(_) => Ok(()),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(mismatch("a string", item, &index_path(path, i)));
                }
            }
            Ok(())
        }
        _ => Err(mismatch("a string or an array of strings", value, path)),
    }
}

fn validate_font_weight(value: &Value, path: &str) -> Result<(), ValidationError> {
    match value {
        Value::Number(n) => {
            let weight = n.as_f64().unwrap_or(f64::NAN);
            if !(1.0..=1000.0).contains(&weight) {
                return Err(ValidationError::OutOfRange {
                    found: weight,
                    min: 1.0,
                    max: 1000.0,
                    path: path.to_string(),
                });
            }
            if weight.fract() != 0.0 {
                return Err(string_mismatch("an integer font weight", &n.to_string(), path));
            }
            Ok(())
        }
        Value::String(s) => {
            if FONT_WEIGHT_NAMES.contains(&s.as_str()) {
                Ok(())
            } else {
                Err(ValidationError::UnknownKeyword {
                    found: s.clone(),
                    allowed: FONT_WEIGHT_NAMES.join(", "),
                    path: path.to_string(),
                })
            }
        }
        _ => Err(mismatch(
            "a number or a font weight keyword",
            value,
            path,
        )),
    }
}

fn validate_duration(value: &Value, path: &str) -> Result<(), ValidationError> {
    let s = value
        .as_str()
        .ok_or_else(|| mismatch("a string", value, path))?;
    // "ms" first: every "ms" string also ends with "s".
    let ok = s
        .strip_suffix("ms")
        .or_else(|| s.strip_suffix('s'))
        .is_some_and(|magnitude| magnitude.parse::<f64>().is_ok());
    if ok {
        Ok(())
    } else {
        Err(string_mismatch(
            "a duration with \"ms\" or \"s\" suffix",
            s,
            path,
        ))
    }
}

fn validate_cubic_bezier(value: &Value, path: &str) -> Result<(), ValidationError> {
    let items = value
        .as_array()
        .ok_or_else(|| mismatch("an array of 4 numbers", value, path))?;
    if items.len() != 4 {
        return Err(ValidationError::Mismatch {
            expected: "an array of 4 numbers".to_string(),
            found: format!("an array of {}", items.len()),
            path: path.to_string(),
        });
    }
    for (i, item) in items.iter().enumerate() {
        let component = item
            .as_f64()
            .ok_or_else(|| mismatch("a number", item, &index_path(path, i)))?;
        // The curve's x coordinates (1st and 3rd components) must stay
        // within the unit interval; y coordinates are unconstrained.
        if (i == 0 || i == 2) && !(0.0..=1.0).contains(&component) {
            return Err(ValidationError::OutOfRange {
                found: component,
                min: 0.0,
                max: 1.0,
                path: index_path(path, i),
            });
        }
    }
    Ok(())
}

fn validate_stroke_style(value: &Value, path: &str) -> Result<(), ValidationError> {
    match value {
        Value::String(s) => {
            if STROKE_STYLE_KEYWORDS.contains(&s.as_str()) {
                Ok(())
            } else {
                Err(ValidationError::UnknownKeyword {
                    found: s.clone(),
                    allowed: STROKE_STYLE_KEYWORDS.join(", "),
                    path: path.to_string(),
                })
            }
        }
        Value::Object(obj) => {
            let Some(dash_array) = obj.get("dashArray") else {
                return Err(ValidationError::MissingField {
                    field: "dashArray",
                    composite: TokenTypeName::StrokeStyle,
                    path: path.to_string(),
                });
            };
            let dash_path = sub_path(path, "dashArray");
            let items = dash_array
                .as_array()
                .ok_or_else(|| mismatch("an array of dimensions", dash_array, &dash_path))?;
            for (i, item) in items.iter().enumerate() {
                validate_sub_value(TokenTypeName::Dimension, item, &index_path(&dash_path, i))?;
            }
            let Some(line_cap) = obj.get("lineCap") else {
                return Err(ValidationError::MissingField {
                    field: "lineCap",
                    composite: TokenTypeName::StrokeStyle,
                    path: path.to_string(),
                });
            };
            let cap_path = sub_path(path, "lineCap");
            let cap = line_cap
                .as_str()
                .ok_or_else(|| mismatch("a string", line_cap, &cap_path))?;
            if STROKE_STYLE_LINE_CAPS.contains(&cap) {
                Ok(())
            } else {
                Err(ValidationError::UnknownKeyword {
                    found: cap.to_string(),
                    allowed: STROKE_STYLE_LINE_CAPS.join(", "),
                    path: cap_path,
                })
            }
        }
        _ => Err(mismatch(
            "a stroke style keyword or an object",
            value,
            path,
        )),
    }
}

fn validate_gradient(value: &Value, path: &str) -> Result<(), ValidationError> {
    let stops = value
        .as_array()
        .ok_or_else(|| mismatch("an array of gradient stops", value, path))?;
    for (i, stop) in stops.iter().enumerate() {
        let stop_path = index_path(path, i);
        let obj = stop
            .as_object()
            .ok_or_else(|| mismatch("an object", stop, &stop_path))?;
        let Some(color) = obj.get("color") else {
            return Err(ValidationError::MissingField {
                field: "color",
                composite: TokenTypeName::Gradient,
                path: stop_path,
            });
        };
        validate_sub_value(TokenTypeName::Color, color, &sub_path(&stop_path, "color"))?;
        let Some(position) = obj.get("position") else {
            return Err(ValidationError::MissingField {
                field: "position",
                composite: TokenTypeName::Gradient,
                path: stop_path,
            });
        };
        let position_path = sub_path(&stop_path, "position");
        if match_is_alias(position) {
            continue;
        }
        let p = position
            .as_f64()
            .ok_or_else(|| mismatch("a number", position, &position_path))?;
        if !(0.0..=1.0).contains(&p) {
            return Err(ValidationError::OutOfRange {
                found: p,
                min: 0.0,
                max: 1.0,
                path: position_path,
            });
        }
    }
    Ok(())
}

fn validate_object_fields(
    tag: TokenTypeName,
    value: &Value,
    path: &str,
    fields: &[(&'static str, TokenTypeName)],
) -> Result<(), ValidationError> {
    let obj = value
        .as_object()
        .ok_or_else(|| mismatch("an object", value, path))?;
    for &(field, field_tag) in fields {
        let Some(field_value) = obj.get(field) else {
            return Err(ValidationError::MissingField {
                field,
                composite: tag,
                path: path.to_string(),
            });
        };
        validate_sub_value(field_tag, field_value, &sub_path(path, field))?;
    }
    Ok(())
}
