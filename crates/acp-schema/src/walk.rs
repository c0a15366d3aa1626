//! # Schema Tree Walker
//!
//! Recursive descent over a schema tree, collecting the [`FieldPath`] of every
//! node a predicate flags. Traversal order at each node:
//!
//! 1. the node itself,
//! 2. each `properties` child (path extended by the property name),
//! 3. `items` (`[items]`),
//! 4. each `oneOf`, `anyOf`, `allOf` branch in declared order (`[oneOf[k]]`),
//! 5. `additionalProperties` when it is a schema (`[additionalProperties]`).
//!
//! The walker is pure: it reads the tree and returns paths. Callers attach
//! version/family/model context and turn each path into a finding.

use serde_json::Value;

use crate::node::{NodeShape, SchemaNode};
use crate::path::{FieldPath, PathSegment};

/// Exemptions applied by [`lacks_description`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Never flag the root node of the walk.
    pub skip_top_level: bool,
    /// Never flag `$ref` nodes.
    pub skip_refs: bool,
}

impl WalkOptions {
    /// Options for JSON Schema `$defs`: every typed node must be described.
    pub const JSON_SCHEMA: Self = Self {
        skip_top_level: false,
        skip_refs: false,
    };

    /// Options for OpenAPI `components.schemas`: reusable top-level schemas
    /// and `$ref` nodes need no description of their own.
    pub const OPENAPI: Self = Self {
        skip_top_level: true,
        skip_refs: true,
    };
}

/// Walk the tree rooted at `value`, returning the path of every node for
/// which `is_violation` holds. `root` labels the starting node.
///
/// Non-object values (boolean schemas, tuple `items`) are not descended into.
pub fn walk<'a, P>(value: &'a Value, root: FieldPath, mut is_violation: P) -> Vec<FieldPath>
where
    P: FnMut(SchemaNode<'a>, &FieldPath) -> bool,
{
    let mut found = Vec::new();
    if let Some(node) = SchemaNode::new(value) {
        let mut path = root;
        descend(node, &mut path, &mut is_violation, &mut found);
    }
    found
}

fn descend<'a, P>(
    node: SchemaNode<'a>,
    path: &mut FieldPath,
    is_violation: &mut P,
    found: &mut Vec<FieldPath>,
) where
    P: FnMut(SchemaNode<'a>, &FieldPath) -> bool,
{
    if is_violation(node, path) {
        found.push(path.clone());
    }

    for (name, child) in node.properties() {
        path.push(PathSegment::Property(name.to_string()));
        descend(child, path, is_violation, found);
        path.pop();
    }

    if let Some(items) = node.items() {
        path.push(PathSegment::Items);
        descend(items, path, is_violation, found);
        path.pop();
    }

    for (kind, idx, branch) in node.branches() {
        path.push(PathSegment::Branch(kind, idx));
        descend(branch, path, is_violation, found);
        path.pop();
    }

    if let Some(extra) = node.additional_properties() {
        path.push(PathSegment::AdditionalProperties);
        descend(extra, path, is_violation, found);
        path.pop();
    }
}

/// The description rule for a single node.
///
/// A node needs a description iff it declares a primitive `type`, has no
/// description, and is not exempt: enum/const and composition nodes are
/// self-explanatory, `$ref` nodes are exempt under `skip_refs`, and the root
/// is exempt under `skip_top_level`.
pub fn lacks_description(node: SchemaNode<'_>, path: &FieldPath, options: WalkOptions) -> bool {
    if node.declared_type().is_none() || node.description().is_some() {
        return false;
    }
    if options.skip_top_level && path.is_root() {
        return false;
    }
    match node.shape() {
        NodeShape::Enumerated | NodeShape::Composite(_) => false,
        NodeShape::Reference(_) => !options.skip_refs,
        NodeShape::Object | NodeShape::Array | NodeShape::Leaf(_) | NodeShape::Untyped => true,
    }
}

/// Every path below (and including) `value` that lacks a description.
pub fn missing_descriptions(value: &Value, root: FieldPath, options: WalkOptions) -> Vec<FieldPath> {
    walk(value, root, |node, path| lacks_description(node, path, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Map};

    fn rendered(paths: &[FieldPath]) -> Vec<String> {
        paths.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn undescribed_string_field_is_reported() {
        let order = json!({
            "type": "object",
            "description": "An order.",
            "properties": {
                "status": {"type": "string"}
            }
        });
        let paths = missing_descriptions(&order, FieldPath::root("Order"), WalkOptions::JSON_SCHEMA);
        assert_eq!(rendered(&paths), ["Order.status"]);
    }

    #[test]
    fn enum_field_is_exempt() {
        let order = json!({
            "type": "object",
            "description": "An order.",
            "properties": {
                "status": {"type": "string", "enum": ["created", "shipped"]}
            }
        });
        let paths = missing_descriptions(&order, FieldPath::root("Order"), WalkOptions::JSON_SCHEMA);
        assert!(paths.is_empty(), "unexpected: {paths:?}");
    }

    #[test]
    fn const_and_composition_fields_are_exempt() {
        let schema = json!({
            "type": "object",
            "description": "Payment.",
            "properties": {
                "kind": {"type": "string", "const": "card"},
                "method": {"type": "object", "oneOf": [{"$ref": "#/$defs/Card"}]}
            }
        });
        let paths = missing_descriptions(&schema, FieldPath::root("Payment"), WalkOptions::JSON_SCHEMA);
        assert!(paths.is_empty(), "unexpected: {paths:?}");
    }

    #[test]
    fn untyped_nodes_are_never_flagged() {
        let schema = json!({"properties": {"anything": {}}});
        let paths = missing_descriptions(&schema, FieldPath::root("Loose"), WalkOptions::JSON_SCHEMA);
        assert!(paths.is_empty());
    }

    #[test]
    fn root_without_description_flagged_for_json_schema_only() {
        let schema = json!({"type": "object", "properties": {}});
        let json_paths = missing_descriptions(&schema, FieldPath::root("Order"), WalkOptions::JSON_SCHEMA);
        assert_eq!(rendered(&json_paths), ["Order"]);
        let openapi_paths = missing_descriptions(&schema, FieldPath::root("Order"), WalkOptions::OPENAPI);
        assert!(openapi_paths.is_empty());
    }

    #[test]
    fn typed_refs_depend_on_skip_refs() {
        let schema = json!({
            "type": "object",
            "description": "Cart.",
            "properties": {
                "total": {"$ref": "#/components/schemas/Total", "type": "object"}
            }
        });
        let json_paths = missing_descriptions(&schema, FieldPath::root("Cart"), WalkOptions::JSON_SCHEMA);
        assert_eq!(rendered(&json_paths), ["Cart.total"]);
        let openapi_paths = missing_descriptions(&schema, FieldPath::root("Cart"), WalkOptions::OPENAPI);
        assert!(openapi_paths.is_empty());
    }

    #[test]
    fn traversal_order_and_markers() {
        let schema = json!({
            "type": "object",
            "description": "Root.",
            "properties": {
                "a": {"type": "string"},
                "list": {
                    "type": "array",
                    "description": "List.",
                    "items": {"type": "integer"}
                }
            },
            "items": {"type": "string"},
            "oneOf": [{"type": "string"}, {"type": "integer", "description": "ok"}],
            "anyOf": [{"type": "boolean"}],
            "allOf": [{"type": "number"}],
            "additionalProperties": {"type": "string"}
        });
        // Root is a composition node and therefore exempt itself.
        let paths = missing_descriptions(&schema, FieldPath::root("R"), WalkOptions::JSON_SCHEMA);
        assert_eq!(
            rendered(&paths),
            [
                "R.a",
                "R.list.[items]",
                "R.[items]",
                "R.[oneOf[0]]",
                "R.[anyOf[0]]",
                "R.[allOf[0]]",
                "R.[additionalProperties]",
            ]
        );
    }

    #[test]
    fn generic_walk_accepts_any_predicate() {
        let schema = json!({
            "type": "object",
            "properties": {
                "amount": {"type": "number"},
                "nested": {"type": "object", "properties": {"amount": {"type": "integer"}}}
            }
        });
        let paths = walk(&schema, FieldPath::root("Price"), |node, path| {
            path.segments().last() == Some(&PathSegment::Property("amount".into()))
                && node.declared_type().is_some_and(|t| !t.is("integer"))
        });
        assert_eq!(rendered(&paths), ["Price.amount"]);
    }

    #[test]
    fn non_object_root_yields_nothing() {
        let paths = missing_descriptions(&json!(true), FieldPath::root("X"), WalkOptions::JSON_SCHEMA);
        assert!(paths.is_empty());
    }

    fn node_keywords() -> impl Strategy<Value = Map<String, Value>> {
        (
            prop::option::of(prop_oneof![
                Just("string"),
                Just("integer"),
                Just("object"),
                Just("array"),
                Just("boolean"),
            ]),
            any::<bool>(),
            0u8..5,
        )
            .prop_map(|(ty, described, marker)| {
                let mut keywords = Map::new();
                if let Some(ty) = ty {
                    keywords.insert("type".into(), json!(ty));
                }
                if described {
                    keywords.insert("description".into(), json!("Described."));
                }
                match marker {
                    1 => {
                        keywords.insert("enum".into(), json!(["a", "b"]));
                    }
                    2 => {
                        keywords.insert("const".into(), json!("a"));
                    }
                    3 => {
                        keywords.insert("$ref".into(), json!("#/$defs/Other"));
                    }
                    _ => {}
                }
                keywords
            })
    }

    fn schema_tree() -> impl Strategy<Value = Value> {
        node_keywords()
            .prop_map(Value::Object)
            .prop_recursive(4, 64, 6, |inner| {
                (
                    node_keywords(),
                    prop::collection::btree_map("[a-z]{1,6}", inner.clone(), 0..4),
                    prop::option::of(inner.clone()),
                    prop::collection::vec(inner.clone(), 0..3),
                    prop::option::of(inner),
                )
                    .prop_map(|(mut keywords, props, items, one_of, additional)| {
                        if !props.is_empty() {
                            let props: Map<String, Value> = props.into_iter().collect();
                            keywords.insert("properties".into(), Value::Object(props));
                        }
                        if let Some(items) = items {
                            keywords.insert("items".into(), items);
                        }
                        if !one_of.is_empty() {
                            keywords.insert("oneOf".into(), Value::Array(one_of));
                        }
                        if let Some(additional) = additional {
                            keywords.insert("additionalProperties".into(), additional);
                        }
                        Value::Object(keywords)
                    })
            })
    }

    proptest! {
        /// Every reported path resolves to a typed, undescribed, non-exempt node.
        #[test]
        fn reported_paths_are_real_violations(
            tree in schema_tree(),
            skip_top_level in any::<bool>(),
            skip_refs in any::<bool>(),
        ) {
            let options = WalkOptions { skip_top_level, skip_refs };
            for path in missing_descriptions(&tree, FieldPath::root("Root"), options) {
                let node = path.resolve(&tree);
                prop_assert!(node.is_some(), "path {} does not resolve", path);
                let node = node.unwrap();
                prop_assert!(node.declared_type().is_some());
                prop_assert!(node.description().is_none());
                prop_assert!(!node.is_enumerated());
                prop_assert!(node.composition().is_none());
                if skip_refs {
                    prop_assert!(node.reference().is_none());
                }
                if skip_top_level {
                    prop_assert!(!path.is_root());
                }
            }
        }

        /// Walking is deterministic.
        #[test]
        fn walk_is_idempotent(tree in schema_tree()) {
            let a = missing_descriptions(&tree, FieldPath::root("Root"), WalkOptions::JSON_SCHEMA);
            let b = missing_descriptions(&tree, FieldPath::root("Root"), WalkOptions::JSON_SCHEMA);
            prop_assert_eq!(a, b);
        }
    }
}
