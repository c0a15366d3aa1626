#![deny(missing_docs)]

//! # acp-schema — Documents, Tree Walking & Conformance
//!
//! Everything the lint rules need to read a corpus, without any rule logic
//! of its own.
//!
//! ## Schema Trees (`node`, `path`, `walk`)
//!
//! A JSON Schema definition and a nested field schema have the same shape,
//! so one borrowed view, [`SchemaNode`], covers both. [`SchemaNode::shape`]
//! classifies a node into a [`NodeShape`] (enumerated, composite, reference,
//! object, array, leaf, untyped). The generic [`walk`] descends
//! `properties`, `items`, composition branches and `additionalProperties`,
//! tracking a [`FieldPath`], and returns the path of every node a predicate
//! flags.
//!
//! ## Documents & Corpus (`document`, `corpus`)
//!
//! [`JsonSchemaDocument`], [`OpenApiDocument`] and [`ExampleSet`] parse the
//! three artifact kinds. [`Corpus`] maps corpus coordinates onto paths and
//! builds a [`CorpusSnapshot`], loading every artifact of a run once.
//!
//! ## Conformance (`conformance`)
//!
//! [`ConformanceOracle`] validates example payloads against one named
//! definition through the `jsonschema` crate, resolving references locally.
//!
//! ## Crate Policy
//!
//! - Depends only on `acp-core` internally.
//! - Never touches the network; unknown reference targets resolve to the
//!   permissive empty schema.

pub mod conformance;
pub mod corpus;
pub mod document;
pub mod node;
pub mod path;
pub mod walk;

pub use conformance::{detect_draft, document_base, ConformanceError, ConformanceOracle, Verdict};
pub use corpus::{Artifact, Corpus, CorpusSnapshot, FamilyArtifacts, VersionSnapshot};
pub use document::{yaml_to_json_value, DocumentError, ExampleSet, JsonSchemaDocument, OpenApiDocument};
pub use node::{Composition, NodeShape, SchemaNode, TypeDecl};
pub use path::{FieldPath, PathSegment};
pub use walk::{lacks_description, missing_descriptions, walk, WalkOptions};
