//! # Schema Conformance Oracle
//!
//! Decides whether an example payload satisfies one named definition of a
//! JSON Schema document. The actual validation is delegated to the
//! `jsonschema` crate.
//!
//! ## Schema Resolution
//!
//! Each document gets its own oracle, so identical `$id`s in different
//! versions never collide. The document is served under its base URI
//! (its absolute `$id`, or `https://acp-lint.local/<version>/<family>.json`
//! when it has none) by a local retriever. A definition is validated through
//! the wrapper schema:
//!
//! ```json
//! { "$ref": "<base>#/$defs/<Name>" }
//! ```
//!
//! with `<Name>` escaped as a JSON Pointer token and percent-encoded.
//!
//! Every other URI, meta-schemas included, resolves to the permissive empty
//! schema. No network request is ever made and the document itself is never
//! validated against its meta-schema.
//!
//! Format assertions (`date-time`, `email`, `uri`, ...) are enabled; formats
//! the validator does not know are ignored.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use acp_core::{SpecFamily, VersionTag, Violation};
use jsonschema::{Draft, Retrieve, Uri, Validator};
use serde_json::{json, Value};
use thiserror::Error;

use crate::document::JsonSchemaDocument;

/// Encode a `$defs` key as one JSON Pointer reference token inside a URI
/// fragment: `~` and `/` are escaped first (RFC 6901), then every byte that
/// is not a fragment character is percent-encoded (RFC 3986).
fn pointer_token(name: &str) -> String {
    let escaped = name.replace('~', "~0").replace('/', "~1");
    let mut token = String::with_capacity(escaped.len());
    for byte in escaped.bytes() {
        let keep = byte.is_ascii_alphanumeric() || b"-._~!$&'()*+,;=:@".contains(&byte);
        if keep {
            token.push(char::from(byte));
        } else {
            token.push_str(&format!("%{byte:02X}"));
        }
    }
    token
}

/// Host of the synthetic base URIs given to documents without an `$id`.
pub const SYNTHETIC_BASE_HOST: &str = "https://acp-lint.local";

/// Why a definition could not be checked at all.
///
/// Both cases are resolution gaps, not policy violations: callers skip the
/// example silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConformanceError {
    /// The document has no such definition.
    #[error("definition \"{0}\" not found in $defs")]
    UnknownDefinition(String),

    /// The validator could not be compiled for the definition.
    #[error("cannot compile validator for \"{definition}\": {reason}")]
    Compile {
        /// Definition name.
        definition: String,
        /// Compiler message.
        reason: String,
    },
}

/// Result of checking one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The instance satisfies the definition.
    Conforms,
    /// Every structural mismatch, in validator order.
    Violations(Vec<Violation>),
}

impl Verdict {
    /// Whether the instance conforms.
    pub fn is_conforming(&self) -> bool {
        matches!(self, Self::Conforms)
    }
}

/// Serves one in-memory document and answers everything else with `{}`.
struct LocalDocumentRetriever {
    documents: HashMap<String, Arc<Value>>,
}

impl Retrieve for LocalDocumentRetriever {
    fn retrieve(&self, uri: &Uri<&str>) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let without_fragment = uri_str.split_once('#').map_or(uri_str, |(base, _)| base);

        if let Some(document) = self.documents.get(without_fragment) {
            return Ok(document.as_ref().clone());
        }

        tracing::trace!(uri = uri_str, "unresolved reference treated as permissive schema");
        Ok(json!({}))
    }
}

/// The JSON Schema draft a document declares through `$schema`.
///
/// Anything unrecognised, or no `$schema` at all, means Draft 2020-12.
pub fn detect_draft(dialect: Option<&str>) -> Draft {
    match dialect {
        Some(uri) if uri.contains("draft-04") => Draft::Draft4,
        Some(uri) if uri.contains("draft-06") => Draft::Draft6,
        Some(uri) if uri.contains("draft-07") => Draft::Draft7,
        Some(uri) if uri.contains("2019-09") => Draft::Draft201909,
        _ => Draft::Draft202012,
    }
}

/// Base URI a document is served under.
pub fn document_base(document: &JsonSchemaDocument, version: &VersionTag, family: &SpecFamily) -> String {
    match document.id() {
        Some(id) if id.contains("://") => id.split_once('#').map_or(id, |(base, _)| base).to_string(),
        _ => format!("{SYNTHETIC_BASE_HOST}/{version}/{family}.json"),
    }
}

/// Conformance checks against the definitions of one document.
///
/// Compiled validators are cached per definition, so checking many
/// examples against the same definition compiles it once.
pub struct ConformanceOracle {
    document: Arc<Value>,
    base: String,
    draft: Draft,
    validators: BTreeMap<String, Validator>,
}

impl std::fmt::Debug for ConformanceOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConformanceOracle")
            .field("base", &self.base)
            .field("draft", &self.draft)
            .field("compiled", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ConformanceOracle {
    /// An oracle for `document`, served under `base`.
    ///
    /// A relative or absent `$id` is dropped from the served copy so that
    /// internal `#/$defs/...` references resolve against `base`.
    pub fn new(document: &JsonSchemaDocument, base: impl Into<String>) -> Self {
        let base = base.into();
        let mut served = document.as_value().clone();
        let keeps_id = document.id().is_some_and(|id| id.starts_with(base.as_str()));
        if !keeps_id {
            if let Some(root) = served.as_object_mut() {
                root.remove("$id");
            }
        }
        Self {
            document: Arc::new(served),
            base,
            draft: detect_draft(document.dialect()),
            validators: BTreeMap::new(),
        }
    }

    /// The base URI the document is served under.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The draft used for compilation.
    pub fn draft(&self) -> Draft {
        self.draft
    }

    fn has_definition(&self, definition: &str) -> bool {
        self.document
            .get("$defs")
            .and_then(|defs| defs.get(definition))
            .is_some()
    }

    fn compile(&self, definition: &str) -> Result<Validator, ConformanceError> {
        let mut documents = HashMap::new();
        documents.insert(self.base.clone(), Arc::clone(&self.document));

        let mut opts = jsonschema::options();
        opts.with_draft(self.draft);
        opts.with_retriever(LocalDocumentRetriever { documents });
        opts.should_validate_formats(true);
        opts.should_ignore_unknown_formats(true);

        let wrapper = json!({ "$ref": format!("{}#/$defs/{}", self.base, pointer_token(definition)) });
        opts.build(&wrapper).map_err(|e| ConformanceError::Compile {
            definition: definition.to_string(),
            reason: e.to_string(),
        })
    }

    /// Check `instance` against the definition named `definition`.
    ///
    /// # Errors
    ///
    /// [`ConformanceError::UnknownDefinition`] when `$defs` has no such
    /// entry, [`ConformanceError::Compile`] when the validator cannot be
    /// built. Neither says anything about the instance.
    pub fn check(&mut self, definition: &str, instance: &Value) -> Result<Verdict, ConformanceError> {
        if !self.has_definition(definition) {
            return Err(ConformanceError::UnknownDefinition(definition.to_string()));
        }
        if !self.validators.contains_key(definition) {
            let validator = self.compile(definition)?;
            self.validators.insert(definition.to_string(), validator);
        }
        let Some(validator) = self.validators.get(definition) else {
            return Err(ConformanceError::UnknownDefinition(definition.to_string()));
        };

        let violations: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(Verdict::Conforms)
        } else {
            Ok(Verdict::Violations(violations))
        }
    }
}
