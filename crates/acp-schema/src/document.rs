//! # Parsed Documents
//!
//! The three artifact shapes of the corpus, each parsed into a
//! `serde_json::Value` tree whose root is guaranteed to be an object:
//!
//! - [`JsonSchemaDocument`]: dialect marker, optional `$id`, `$defs` table.
//! - [`OpenApiDocument`]: YAML, converted to JSON; `openapi`, `info`,
//!   `paths`, and the `components.schemas` table.
//! - [`ExampleSet`]: a flat mapping of example name to payload.
//!
//! YAML is converted with [`yaml_to_json_value`] so that every rule works on
//! one tree type regardless of the artifact it came from.

use serde_json::{Map, Value};
use thiserror::Error;

/// Error while reading or parsing one artifact.
///
/// Parser variants carry the raw parser message; rules embed it verbatim in
/// the finding they record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Malformed JSON.
    #[error("{0}")]
    Json(String),

    /// Malformed YAML.
    #[error("{0}")]
    Yaml(String),

    /// YAML parsed but cannot be represented as JSON.
    #[error("YAML-to-JSON conversion failed: {0}")]
    YamlConversion(String),

    /// Well-formed, but the root is not a mapping.
    #[error("expected an object at the document root, found {found}")]
    NotAnObject {
        /// JSON kind of the root value.
        found: &'static str,
    },

    /// The file exists but cannot be read.
    #[error("cannot read {path}: {reason}")]
    Unreadable {
        /// Path of the artifact.
        path: String,
        /// Underlying IO error.
        reason: String,
    },
}

/// JSON kind name of a value, for diagnostics.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn require_object(value: Value) -> Result<Map<String, Value>, DocumentError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DocumentError::NotAnObject {
            found: kind_of(&other),
        }),
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

fn named_table<'a>(table: Option<&'a Value>) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
    table
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|map| map.iter())
        .map(|(name, value)| (name.as_str(), value))
}

/// A parsed `schema.<family>.json` document.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSchemaDocument {
    root: Value,
}

impl JsonSchemaDocument {
    /// Parse JSON text.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DocumentError::Json(e.to_string()))?;
        Self::from_value(value)
    }

    /// Wrap an already-parsed value. The root must be an object.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let map = require_object(value)?;
        Ok(Self {
            root: Value::Object(map),
        })
    }

    /// Whether the document declares a non-empty `$schema` marker.
    pub fn declares_dialect(&self) -> bool {
        truthy(self.root.get("$schema"))
    }

    /// The `$schema` URI, when it is a string.
    pub fn dialect(&self) -> Option<&str> {
        self.root.get("$schema").and_then(Value::as_str)
    }

    /// The document's own `$id`.
    pub fn id(&self) -> Option<&str> {
        self.root
            .get("$id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Every entry of `$defs`, in name order.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Value)> {
        named_table(self.root.get("$defs"))
    }

    /// One definition by name.
    pub fn definition(&self, name: &str) -> Option<&Value> {
        self.root.get("$defs").and_then(|defs| defs.get(name))
    }

    /// Whether `$defs` contains `name`.
    pub fn has_definition(&self, name: &str) -> bool {
        self.definition(name).is_some()
    }

    /// The whole document.
    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

/// A parsed `openapi.<family>.yaml` document.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument {
    root: Value,
}

impl OpenApiDocument {
    /// Top-level keys every OpenAPI document must declare.
    pub const REQUIRED_TOP_LEVEL_KEYS: [&'static str; 3] = ["openapi", "info", "paths"];

    /// Parse YAML text (JSON is a subset and parses too).
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| DocumentError::Yaml(e.to_string()))?;
        let value = yaml_to_json_value(&yaml).map_err(DocumentError::YamlConversion)?;
        Self::from_value(value)
    }

    /// Wrap an already-converted value. The root must be an object.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let map = require_object(value)?;
        Ok(Self {
            root: Value::Object(map),
        })
    }

    /// Mandatory top-level keys that are absent or empty, in declaration order.
    pub fn missing_top_level_keys(&self) -> Vec<&'static str> {
        Self::REQUIRED_TOP_LEVEL_KEYS
            .into_iter()
            .filter(|key| !truthy(self.root.get(*key)))
            .collect()
    }

    /// Every entry of `components.schemas`, in name order.
    pub fn schemas(&self) -> impl Iterator<Item = (&str, &Value)> {
        named_table(
            self.root
                .get("components")
                .and_then(|components| components.get("schemas")),
        )
    }

    /// One component schema by name.
    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.root
            .get("components")
            .and_then(|components| components.get("schemas"))
            .and_then(|schemas| schemas.get(name))
    }

    /// The whole document.
    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

/// A parsed `examples.<family>.json` file: example name to payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExampleSet {
    entries: Map<String, Value>,
}

impl ExampleSet {
    /// Parse JSON text. The root must be an object.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DocumentError::Json(e.to_string()))?;
        Self::from_value(value)
    }

    /// Wrap an already-parsed value.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        Ok(Self {
            entries: require_object(value)?,
        })
    }

    /// Examples in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// One example by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped and the inner value kept. Numeric and boolean mapping
/// keys are stringified. Floats that JSON cannot represent (NaN, infinities)
/// and non-scalar keys are rejected.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                object.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
