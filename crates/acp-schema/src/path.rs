//! # Field Paths
//!
//! A [`FieldPath`] locates a node inside a named schema: the root label (the
//! definition or OpenAPI schema name) followed by segments. Rendered
//! dot-joined, with synthetic markers bracketed:
//!
//! ```text
//! Order.line_items.[items].total
//! PaymentMethod.[oneOf[1]].card_number
//! Metadata.[additionalProperties]
//! ```

use serde_json::Value;

use crate::node::{Composition, SchemaNode};

/// One step from a node to a child node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named entry of `properties`.
    Property(String),
    /// The `items` schema of an array.
    Items,
    /// Branch `k` of a composition keyword.
    Branch(Composition, usize),
    /// The `additionalProperties` schema.
    AdditionalProperties,
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Property(name) => f.write_str(name),
            Self::Items => f.write_str("[items]"),
            Self::Branch(kind, idx) => write!(f, "[{}[{idx}]]", kind.keyword()),
            Self::AdditionalProperties => f.write_str("[additionalProperties]"),
        }
    }
}

/// Location of a node below a named root schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    root: String,
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// A path pointing at the root schema itself.
    pub fn root(label: impl Into<String>) -> Self {
        Self {
            root: label.into(),
            segments: Vec::new(),
        }
    }

    /// The root label.
    pub fn label(&self) -> &str {
        &self.root
    }

    /// Segments below the root.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether the path points at the root schema.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Remove the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// A new path one segment deeper.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Follow the segments from `root`, the value the root label names.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<SchemaNode<'a>> {
        let mut node = SchemaNode::new(root)?;
        for segment in &self.segments {
            node = match segment {
                PathSegment::Property(name) => node.property(name)?,
                PathSegment::Items => node.items()?,
                PathSegment::Branch(kind, idx) => node
                    .keywords()
                    .get(kind.keyword())
                    .and_then(Value::as_array)
                    .and_then(|branches| branches.get(*idx))
                    .and_then(SchemaNode::new)?,
                PathSegment::AdditionalProperties => node.additional_properties()?,
            };
        }
        Some(node)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.root)?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 || !self.root.is_empty() {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
