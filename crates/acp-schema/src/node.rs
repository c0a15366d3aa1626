//! # Schema Nodes
//!
//! A read-only view over one JSON Schema / OpenAPI schema object. The tree is
//! recursively homogeneous: a top-level definition and a deeply nested field
//! schema have the same shape, so one [`SchemaNode`] type serves both.
//!
//! [`SchemaNode::shape`] classifies a node into a [`NodeShape`] so that the
//! exemption rules of the authoring checks become a pattern match instead of
//! scattered keyword lookups.

use serde_json::{Map, Value};

/// The three composition keywords, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Composition {
    /// `oneOf`
    OneOf,
    /// `anyOf`
    AnyOf,
    /// `allOf`
    AllOf,
}

impl Composition {
    /// Every composition keyword, in traversal order.
    pub const ALL: [Composition; 3] = [Self::OneOf, Self::AnyOf, Self::AllOf];

    /// The JSON Schema keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::OneOf => "oneOf",
            Self::AnyOf => "anyOf",
            Self::AllOf => "allOf",
        }
    }
}

/// The declared primitive `type` of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeDecl<'a> {
    /// `"type": "integer"`
    Single(&'a str),
    /// `"type": ["integer", "null"]`
    Union(&'a [Value]),
}

impl<'a> TypeDecl<'a> {
    /// Whether the declaration is exactly the single type `name`.
    ///
    /// A union never matches, even if it contains `name`.
    pub fn is(&self, name: &str) -> bool {
        matches!(self, Self::Single(t) if *t == name)
    }

    /// The type names in declaration order.
    pub fn names(&self) -> Vec<&'a str> {
        match self {
            Self::Single(t) => vec![*t],
            Self::Union(items) => items.iter().filter_map(Value::as_str).collect(),
        }
    }
}

impl std::fmt::Display for TypeDecl<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.names().join(","))
    }
}

/// Classification of a node by what carries its meaning.
///
/// Variants are checked in declaration order, so a node with both `enum`
/// and `$ref` is [`NodeShape::Enumerated`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeShape<'a> {
    /// Meaning carried by `enum` or `const`.
    Enumerated,
    /// Meaning carried by `oneOf` / `anyOf` / `allOf` (first present keyword).
    Composite(Composition),
    /// A `$ref` to another schema.
    Reference(&'a str),
    /// An object schema: `type: object` or a `properties` table.
    Object,
    /// An array schema: `type: array` or an `items` schema.
    Array,
    /// Any other declared primitive type.
    Leaf(TypeDecl<'a>),
    /// No type information at all.
    Untyped,
}

/// A borrowed view over one schema object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemaNode<'a> {
    keywords: &'a Map<String, Value>,
}

impl<'a> SchemaNode<'a> {
    /// View `value` as a schema node. Returns `None` for anything that is
    /// not a JSON object (boolean schemas, tuple `items` arrays, scalars).
    pub fn new(value: &'a Value) -> Option<Self> {
        value.as_object().map(|keywords| Self { keywords })
    }

    /// The raw keyword table.
    pub fn keywords(&self) -> &'a Map<String, Value> {
        self.keywords
    }

    fn present(&self, keyword: &str) -> Option<&'a Value> {
        self.keywords.get(keyword).filter(|v| !v.is_null())
    }

    /// The declared `type`. An empty string or a non-string, non-array value
    /// counts as undeclared.
    pub fn declared_type(&self) -> Option<TypeDecl<'a>> {
        match self.keywords.get("type")? {
            Value::String(t) if !t.is_empty() => Some(TypeDecl::Single(t)),
            Value::Array(items) => Some(TypeDecl::Union(items)),
            _ => None,
        }
    }

    /// The `description`, if it contains any non-whitespace text.
    pub fn description(&self) -> Option<&'a str> {
        self.keywords
            .get("description")
            .and_then(Value::as_str)
            .filter(|d| !d.trim().is_empty())
    }

    /// The `$ref` target.
    pub fn reference(&self) -> Option<&'a str> {
        self.keywords.get("$ref").and_then(Value::as_str)
    }

    /// Whether the node carries `enum` or `const`.
    pub fn is_enumerated(&self) -> bool {
        self.has_enum() || self.keywords.contains_key("const")
    }

    /// Whether the node carries a non-null `enum`. Unlike
    /// [`is_enumerated`](Self::is_enumerated), `const` does not count.
    pub fn has_enum(&self) -> bool {
        self.present("enum").is_some()
    }

    /// The first composition keyword present on this node.
    pub fn composition(&self) -> Option<Composition> {
        Composition::ALL
            .into_iter()
            .find(|c| self.present(c.keyword()).is_some())
    }

    /// Whether the real type of this node lives behind an indirection
    /// (`$ref`, `oneOf`, `anyOf`, `allOf`).
    pub fn is_indirect(&self) -> bool {
        self.present("$ref").is_some() || self.composition().is_some()
    }

    /// Whether the node carries an `example` or `examples` keyword.
    pub fn has_example(&self) -> bool {
        self.present("example").is_some() || self.present("examples").is_some()
    }

    /// Child schemas of `properties`, in map order. Non-object children
    /// are skipped.
    pub fn properties(&self) -> impl Iterator<Item = (&'a str, SchemaNode<'a>)> + 'a {
        self.keywords
            .get("properties")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|props| props.iter())
            .filter_map(|(name, value)| SchemaNode::new(value).map(|node| (name.as_str(), node)))
    }

    /// A single child of `properties`.
    pub fn property(&self, name: &str) -> Option<SchemaNode<'a>> {
        self.keywords
            .get("properties")
            .and_then(|props| props.get(name))
            .and_then(SchemaNode::new)
    }

    /// The `items` schema, when it is a single schema object.
    pub fn items(&self) -> Option<SchemaNode<'a>> {
        self.keywords.get("items").and_then(SchemaNode::new)
    }

    /// Every composition branch, keyword by keyword in traversal order.
    pub fn branches(&self) -> impl Iterator<Item = (Composition, usize, SchemaNode<'a>)> + 'a {
        let keywords = self.keywords;
        Composition::ALL.into_iter().flat_map(move |kind| {
            keywords
                .get(kind.keyword())
                .and_then(Value::as_array)
                .into_iter()
                .flat_map(|branches| branches.iter().enumerate())
                .filter_map(move |(idx, value)| SchemaNode::new(value).map(|node| (kind, idx, node)))
        })
    }

    /// `additionalProperties` when it is itself a schema (not a boolean).
    pub fn additional_properties(&self) -> Option<SchemaNode<'a>> {
        self.keywords
            .get("additionalProperties")
            .and_then(SchemaNode::new)
    }

    /// Names listed in `required`, in declaration order.
    pub fn required(&self) -> Vec<&'a str> {
        self.keywords
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Classify the node.
    pub fn shape(&self) -> NodeShape<'a> {
        if self.is_enumerated() {
            return NodeShape::Enumerated;
        }
        if let Some(kind) = self.composition() {
            return NodeShape::Composite(kind);
        }
        if let Some(target) = self.reference() {
            return NodeShape::Reference(target);
        }
        let declared = self.declared_type();
        match declared {
            Some(t) if t.is("object") => NodeShape::Object,
            Some(t) if t.is("array") => NodeShape::Array,
            Some(t) => NodeShape::Leaf(t),
            None if self.keywords.contains_key("properties") => NodeShape::Object,
            None if self.keywords.contains_key("items") => NodeShape::Array,
            None => NodeShape::Untyped,
        }
    }
}
