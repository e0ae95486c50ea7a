use crate::alias::{extract_alias_path, is_alias_str, match_is_alias, ALIAS_PATH_SEPARATOR};
use crate::error::ResolveError;
use crate::grammar::{
    composite_field_type, infer_json_type, validate_node_name, validate_token_value,
    TokenTypeName, GRADIENT_STOP_FIELDS,
};
use crate::tree::{
    NodeKind, NodeMeta, ParseOptions, ResolvedGroup, ResolvedNode, ResolvedToken,
    ResolvedTokenTree, ResolvedValue, TokenTree,
};
use log::{debug, trace};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Walks a raw token tree and produces the normalized output tree.
///
/// The resolver borrows the original, unresolved root for the whole walk:
/// every alias lookup goes against that context, never against partially
/// resolved output. A stack of in-flight alias paths rejects cyclic
/// reference graphs instead of recursing until the call stack gives out.
pub struct Resolver<'t> {
    options: ParseOptions,
    // The original root tree; alias lookups resolve against it.
    context: &'t TokenTree,
    // Alias paths currently being dereferenced, for cycle detection.
    resolving_stack: Vec<String>,
}

impl<'t> Resolver<'t> {
    #[must_use]
    pub fn new(context: &'t TokenTree, options: ParseOptions) -> Self {
        Resolver {
            options,
            context,
            resolving_stack: Vec::new(),
        }
    }

    /// Resolves the whole context tree from the root.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResolveError`] encountered; nothing is emitted
    /// for a tree that fails anywhere.
    pub fn resolve_tree(&mut self) -> Result<ResolvedTokenTree, ResolveError> {
        let root = self.context;
        let nodes = self.resolve_children(root, None, &[])?;
        Ok(ResolvedTokenTree { nodes })
    }

    /// Resolves every child entry of `tree`, with `parent` as the type
    /// inheritance source for each of them.
    fn resolve_children(
        &mut self,
        tree: &TokenTree,
        parent: Option<&TokenTree>,
        path: &[String],
    ) -> Result<BTreeMap<String, ResolvedNode>, ResolveError> {
        let mut nodes = BTreeMap::new();
        for (name, value) in tree {
            // $-prefixed keys are the node's own fields, not children.
            if name.starts_with('$') {
                continue;
            }
            validate_node_name(name)?;
            let Some(node) = value.as_object() else {
                debug!(
                    "skipping non-node entry \"{}\" under \"{}\"",
                    name,
                    join_path(path)
                );
                continue;
            };
            let mut node_path = path.to_vec();
            node_path.push(name.clone());
            let resolved = self.resolve_node(node, parent, &node_path)?;
            nodes.insert(name.clone(), resolved);
        }
        Ok(nodes)
    }

    /// Resolves a single node already known to be a plain object, living at
    /// `path`. Classification happens here and nowhere else: a `$value` key
    /// makes it a token, anything else is a group.
    fn resolve_node(
        &mut self,
        node: &TokenTree,
        parent: Option<&TokenTree>,
        path: &[String],
    ) -> Result<ResolvedNode, ResolveError> {
        // Candidate type: own declared tag first, else the immediate
        // parent's. Inheritance reads the parent's original fields, so it
        // never travels more than one level.
        let candidate = match declared_type(node, path)? {
            Some(own) => Some(own),
            None => match parent {
                Some(parent) => declared_type(parent, path)?,
                None => None,
            },
        };

        if let Some(raw_value) = node.get("$value") {
            return self.resolve_token(node, raw_value, candidate, path);
        }

        let children = self.resolve_children(node, Some(node), path)?;
        let meta = self.options.publish_metadata.then(|| NodeMeta {
            kind: NodeKind::Group,
            name: None,
            path: path.to_vec(),
        });
        Ok(ResolvedNode::Group(ResolvedGroup {
            group_type: candidate,
            description: string_field(node, "$description"),
            meta,
            children,
        }))
    }

    fn resolve_token(
        &mut self,
        node: &TokenTree,
        raw_value: &Value,
        candidate: Option<TokenTypeName>,
        path: &[String],
    ) -> Result<ResolvedNode, ResolveError> {
        let is_top_alias = match_is_alias(raw_value);
        let value = self.resolve_value(raw_value, path)?;

        // An eagerly dereferenced alias carries the target's tag; reconcile
        // it against whatever this token declared or inherited.
        let mut token_type = candidate;
        if is_top_alias {
            if let ResolvedValue::Reference(target) = &value {
                if let Some(target_type) = target.node_type() {
                    match token_type {
                        None => token_type = Some(target_type),
                        Some(declared) if declared != target_type => {
                            return Err(ResolveError::TypeMismatch {
                                expected: declared,
                                found: target_type,
                                path: join_path(path),
                            });
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        let token_type = match token_type {
            Some(tag) => tag,
            None => infer_json_type(raw_value),
        };

        // Validation always runs on the raw value: a deferred alias string
        // passes by syntax, everything else by its tag's grammar.
        validate_token_value(token_type, raw_value)
            .map_err(|err| err.prefixed(&join_path(path)))?;

        // Dereferenced sub-field aliases carry their target's tag too;
        // composite shapes pin what each field may reference.
        self.reconcile_value_types(token_type, &value, path)?;

        let meta = self.options.publish_metadata.then(|| NodeMeta {
            kind: NodeKind::Token,
            name: None,
            path: path.to_vec(),
        });
        Ok(ResolvedNode::Token(ResolvedToken {
            token_type,
            value,
            description: string_field(node, "$description"),
            extensions: object_field(node, "$extensions"),
            deprecated: node.get("$deprecated").cloned(),
            meta,
        }))
    }

    /// Three-way value dispatch: alias strings are dereferenced, arrays and
    /// objects are resolved element-wise, literals pass through.
    fn resolve_value(&mut self, value: &Value, path: &[String]) -> Result<ResolvedValue, ResolveError> {
        trace!("resolving value at \"{}\"", join_path(path));
        match value {
            Value::String(s) if is_alias_str(s) => self.resolve_alias_value(s),
            Value::Array(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let mut item_path = path.to_vec();
                    item_path.push(format!("[{i}]"));
                    resolved.push(self.resolve_value(item, &item_path)?);
                }
                Ok(ResolvedValue::Array(resolved))
            }
            Value::Object(fields) => {
                let mut resolved = BTreeMap::new();
                for (key, field) in fields {
                    let mut field_path = path.to_vec();
                    field_path.push(key.clone());
                    resolved.insert(key.clone(), self.resolve_value(field, &field_path)?);
                }
                Ok(ResolvedValue::Object(resolved))
            }
            _ => Ok(ResolvedValue::Literal(value.clone())),
        }
    }

    /// Dereferences one alias string against the context.
    pub(crate) fn resolve_alias_value(&mut self, raw: &str) -> Result<ResolvedValue, ResolveError> {
        let alias_path = extract_alias_path(raw);
        let Some(target) = lookup(self.context, alias_path) else {
            return Err(self.alias_not_found(alias_path));
        };

        if !self.options.resolve_aliases {
            // Deferred: the reference must exist but stays verbatim.
            return Ok(ResolvedValue::Literal(Value::String(raw.to_string())));
        }

        if self.resolving_stack.iter().any(|p| p == alias_path) {
            let mut cycle = self.resolving_stack.clone();
            cycle.push(alias_path.to_string());
            return Err(ResolveError::CircularAlias { cycle });
        }

        // Only token and group nodes are addressable targets.
        let Some(target_node) = target.as_object() else {
            return Err(self.alias_not_found(alias_path));
        };

        debug!("dereferencing alias \"{raw}\"");

        let segments: Vec<String> = alias_path
            .split(ALIAS_PATH_SEPARATOR)
            .map(str::to_string)
            .collect();
        let Some((target_name, parent_segments)) = segments.split_last() else {
            return Err(self.alias_not_found(alias_path));
        };
        let target_name = target_name.clone();

        // The target inherits from its own parent group, if it has one.
        let parent = if parent_segments.is_empty() {
            None
        } else {
            lookup_segments(self.context, parent_segments).and_then(Value::as_object)
        };

        self.resolving_stack.push(alias_path.to_string());
        let result = self.resolve_node(target_node, parent, &segments);
        self.resolving_stack.pop();
        let mut node = result?;

        // From the referencing site's perspective this is a dereference,
        // not a definition: the alias annotation replaces whatever kind the
        // nested resolution recorded.
        if self.options.publish_metadata {
            let meta = NodeMeta {
                kind: NodeKind::Alias,
                name: Some(target_name),
                path: segments,
            };
            match &mut node {
                ResolvedNode::Token(token) => token.meta = Some(meta),
                ResolvedNode::Group(group) => group.meta = Some(meta),
            }
        }
        Ok(ResolvedValue::Reference(Box::new(node)))
    }

    /// Checks dereferenced aliases inside a composite value against the
    /// field types its shape declares. A shadow's `color` field may
    /// reference another token, but that token has to be a color.
    fn reconcile_value_types(
        &self,
        tag: TokenTypeName,
        value: &ResolvedValue,
        path: &[String],
    ) -> Result<(), ResolveError> {
        match (tag, value) {
            (TokenTypeName::Gradient, ResolvedValue::Array(stops)) => {
                for (i, stop) in stops.iter().enumerate() {
                    let ResolvedValue::Object(fields) = stop else {
                        continue;
                    };
                    for (name, field_value) in fields {
                        let Some(&(_, expected)) = GRADIENT_STOP_FIELDS
                            .iter()
                            .find(|(field, _)| *field == name.as_str())
                        else {
                            continue;
                        };
                        let mut field_path = path.to_vec();
                        match field_path.last_mut() {
                            Some(last) => last.push_str(&format!("[{i}]")),
                            None => field_path.push(format!("[{i}]")),
                        }
                        field_path.push(name.clone());
                        self.check_field_reference(expected, field_value, &field_path)?;
                    }
                }
                Ok(())
            }
            (TokenTypeName::StrokeStyle, ResolvedValue::Object(fields)) => {
                let Some(ResolvedValue::Array(dashes)) = fields.get("dashArray") else {
                    return Ok(());
                };
                for (i, dash) in dashes.iter().enumerate() {
                    let mut dash_path = path.to_vec();
                    dash_path.push(format!("dashArray[{i}]"));
                    self.check_field_reference(TokenTypeName::Dimension, dash, &dash_path)?;
                }
                Ok(())
            }
            (_, ResolvedValue::Object(fields)) => {
                for (name, field_value) in fields {
                    let Some(expected) = composite_field_type(tag, name) else {
                        continue;
                    };
                    let mut field_path = path.to_vec();
                    field_path.push(name.clone());
                    self.check_field_reference(expected, field_value, &field_path)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn check_field_reference(
        &self,
        expected: TokenTypeName,
        value: &ResolvedValue,
        path: &[String],
    ) -> Result<(), ResolveError> {
        match value {
            ResolvedValue::Reference(node) => match node.node_type() {
                Some(found) if found != expected => Err(ResolveError::TypeMismatch {
                    expected,
                    found,
                    path: join_path(path),
                }),
                _ => Ok(()),
            },
            ResolvedValue::Object(_) | ResolvedValue::Array(_) => {
                self.reconcile_value_types(expected, value, path)
            }
            ResolvedValue::Literal(_) => Ok(()),
        }
    }

    fn alias_not_found(&self, alias_path: &str) -> ResolveError {
        ResolveError::AliasNotFound {
            path: alias_path.to_string(),
            context: serde_json::to_string_pretty(self.context).unwrap_or_default(),
        }
    }
}

/// Dereferences a single alias outside a full-tree resolution.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidAlias`] when the input is not alias
/// syntax, and otherwise any error tree resolution of the target can raise.
pub fn resolve_alias(
    raw_alias: &str,
    options: ParseOptions,
    context: &TokenTree,
) -> Result<ResolvedValue, ResolveError> {
    if !is_alias_str(raw_alias) {
        return Err(ResolveError::InvalidAlias {
            value: raw_alias.to_string(),
        });
    }
    let mut resolver = Resolver::new(context, options);
    resolver.resolve_alias_value(raw_alias)
}

/// Reads and parses a node's own `$type` field.
fn declared_type(node: &TokenTree, path: &[String]) -> Result<Option<TokenTypeName>, ResolveError> {
    match node.get("$type") {
        None => Ok(None),
        Some(Value::String(name)) => match TokenTypeName::from_name(name) {
            Some(tag) => Ok(Some(tag)),
            None => Err(ResolveError::UnknownType {
                name: name.clone(),
                path: join_path(path),
            }),
        },
        Some(other) => Err(ResolveError::UnknownType {
            name: other.to_string(),
            path: join_path(path),
        }),
    }
}

fn string_field(node: &TokenTree, key: &str) -> Option<String> {
    node.get(key).and_then(Value::as_str).map(str::to_string)
}

fn object_field(node: &TokenTree, key: &str) -> Option<Map<String, Value>> {
    node.get(key).and_then(Value::as_object).cloned()
}

fn join_path(path: &[String]) -> String {
    path.join(".")
}

/// Walks a dot-separated path through nested objects.
fn lookup<'a>(tree: &'a TokenTree, path: &str) -> Option<&'a Value> {
    let mut segments = path.split(ALIAS_PATH_SEPARATOR);
    let mut current = tree.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn lookup_segments<'a>(tree: &'a TokenTree, segments: &[String]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let mut current = tree.get(first)?;
    for segment in rest {
        current = current.as_object()?.get(segment.as_str())?;
    }
    Some(current)
}
