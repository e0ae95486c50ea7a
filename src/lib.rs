pub mod alias;
pub mod api;
pub mod error;
pub mod grammar;
pub mod resolver;
pub mod tree;
pub mod utils;
mod serialization;

pub use alias::{
    capture_alias_path, extract_alias_path, extract_alias_path_segments, match_is_alias,
    ALIAS_CLOSE, ALIAS_OPEN, ALIAS_PATH_SEPARATOR,
};
pub use api::{parse_tokens_str, parse_tokens_tree, ParseResult};
pub use error::{CaptureAliasError, DtcgError, ResolveError, ValidationError};
pub use grammar::{
    infer_json_type, match_is_token_type_name, validate_node_name, validate_token_value,
    TokenTypeName, DESIGN_TOKEN_TYPE_NAMES, FONT_WEIGHT_NAMES, STROKE_STYLE_KEYWORDS,
    STROKE_STYLE_LINE_CAPS,
};
pub use resolver::{resolve_alias, Resolver};
pub use tree::{
    match_is_group, match_is_token, NodeKind, NodeMeta, ParseOptions, ResolvedGroup, ResolvedNode,
    ResolvedToken, ResolvedTokenTree, ResolvedValue, TokenTree,
};
pub use utils::{hash_token_value, traverse_json_value, JsonPathSegment};
