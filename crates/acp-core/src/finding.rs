//! # Findings
//!
//! A [`Finding`] is one recorded error or warning: the rule that produced
//! it, its [`Severity`], a human message, and a structured
//! [`FindingContext`] naming where in the corpus it was found.
//!
//! Findings are append-only. Once a rule emits one it is never mutated or
//! removed; the [`Report`](crate::Report) only accumulates them.

use serde::{Deserialize, Serialize};

use crate::family::{ArtifactKind, SpecFamily};
use crate::version::VersionTag;

/// Severity of a finding. Errors fail the run; warnings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory only, never fails the run.
    Warning,
    /// Fails the run.
    Error,
}

impl Severity {
    /// Console prefix for this severity.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// Identifies the rule that produced a finding.
///
/// Variants are listed in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// JSON Schema documents parse and declare `$schema`.
    JsonSchemaSyntax,
    /// OpenAPI documents parse and declare `openapi`, `info`, `paths`.
    OpenApiSyntax,
    /// Forbidden definitions are absent from a family's JSON Schema.
    ProhibitedSchema,
    /// Monetary amount fields are typed `integer`.
    AmountType,
    /// Unreleased JSON Schema definitions and fields carry descriptions.
    FieldDescription,
    /// Unreleased JSON Schema definitions carry an example.
    ModelExample,
    /// Unreleased OpenAPI schema fields carry descriptions.
    OpenApiDescription,
    /// Unreleased top-level OpenAPI object schemas carry an example.
    OpenApiExample,
    /// Named examples conform to the definition they resolve to.
    ExampleConformance,
    /// `required` lists agree between JSON Schema and OpenAPI.
    RequiredConsistency,
}

impl RuleId {
    /// Every rule, in execution order.
    pub const ALL: [RuleId; 10] = [
        Self::JsonSchemaSyntax,
        Self::OpenApiSyntax,
        Self::ProhibitedSchema,
        Self::AmountType,
        Self::FieldDescription,
        Self::ModelExample,
        Self::OpenApiDescription,
        Self::OpenApiExample,
        Self::ExampleConformance,
        Self::RequiredConsistency,
    ];

    /// Stable snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JsonSchemaSyntax => "json_schema_syntax",
            Self::OpenApiSyntax => "openapi_syntax",
            Self::ProhibitedSchema => "prohibited_schema",
            Self::AmountType => "amount_type",
            Self::FieldDescription => "field_description",
            Self::ModelExample => "model_example",
            Self::OpenApiDescription => "openapi_description",
            Self::OpenApiExample => "openapi_example",
            Self::ExampleConformance => "example_conformance",
            Self::RequiredConsistency => "required_consistency",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structural mismatch reported by the conformance oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// JSON Pointer to the violating value in the example payload.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Human-readable description of the mismatch.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Structured context attached to a finding.
///
/// Every key is optional; unset keys are omitted when serialized so the
/// printed context only names what the rule actually knew.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingContext {
    /// Corpus revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionTag>,
    /// API surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<SpecFamily>,
    /// Which artifact of the family the finding concerns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<ArtifactKind>,
    /// Definition or OpenAPI schema name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Definition name, for model-level authoring rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Property name or dotted field path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Declared type of the offending field.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Example name within an example set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Why the finding applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Conformance mismatches, in validator order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Violation>,
}

impl FindingContext {
    /// Context scoped to one (version, family) pair.
    pub fn scoped(version: &VersionTag, spec: &SpecFamily) -> Self {
        Self {
            version: Some(version.clone()),
            spec: Some(spec.clone()),
            ..Self::default()
        }
    }

    /// Context scoped to a version only.
    pub fn for_version(version: &VersionTag) -> Self {
        Self {
            version: Some(version.clone()),
            ..Self::default()
        }
    }

    /// Set the artifact kind.
    pub fn artifact(mut self, kind: ArtifactKind) -> Self {
        self.artifact = Some(kind);
        self
    }

    /// Set the schema/definition name.
    pub fn schema(mut self, name: impl Into<String>) -> Self {
        self.schema = Some(name.into());
        self
    }

    /// Set the model name.
    pub fn model(mut self, name: impl Into<String>) -> Self {
        self.model = Some(name.into());
        self
    }

    /// Set the field name or path.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the declared field type.
    pub fn field_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    /// Set the example name.
    pub fn example(mut self, name: impl Into<String>) -> Self {
        self.example = Some(name.into());
        self
    }

    /// Set the reason.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach conformance mismatches.
    pub fn errors(mut self, errors: Vec<Violation>) -> Self {
        self.errors = errors;
        self
    }

    /// Whether no context key is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One recorded error or warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The rule that produced this finding.
    pub rule: RuleId,
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Where in the corpus the finding applies.
    pub context: FindingContext,
}

impl Finding {
    /// An error finding.
    pub fn error(rule: RuleId, message: impl Into<String>, context: FindingContext) -> Self {
        Self {
            rule,
            severity: Severity::Error,
            message: message.into(),
            context,
        }
    }

    /// A warning finding.
    pub fn warning(rule: RuleId, message: impl Into<String>, context: FindingContext) -> Self {
        Self {
            rule,
            severity: Severity::Warning,
            message: message.into(),
            context,
        }
    }

    /// Whether this finding fails the run.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity.label(), self.message)
    }
}
