//! # Corpus Locator
//!
//! Maps (version, family, artifact kind) coordinates onto the on-disk corpus
//! layout and loads every artifact of a run exactly once:
//!
//! ```text
//! <root>/spec/<version>/json-schema/schema.<family>.json
//! <root>/spec/<version>/openapi/openapi.<family>.yaml
//! <root>/examples/<version>/examples.<family>.json
//! ```
//!
//! The result is a [`CorpusSnapshot`]: for every requested version, every
//! discovered family, and every artifact kind, an [`Artifact`] that is
//! parsed, missing, or malformed. Rules consume the snapshot and never touch
//! the file system themselves.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use acp_core::{ArtifactKind, SpecFamily, VersionTag};

use crate::document::{DocumentError, ExampleSet, JsonSchemaDocument, OpenApiDocument};

/// Load state of one artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact<T> {
    /// The file exists and parsed.
    Parsed(T),
    /// No file at the expected path.
    Missing,
    /// The file exists but could not be read or parsed.
    Malformed(DocumentError),
}

impl<T> Artifact<T> {
    /// The parsed document, if any.
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Self::Parsed(doc) => Some(doc),
            _ => None,
        }
    }

    /// The parse failure, if any.
    pub fn malformed(&self) -> Option<&DocumentError> {
        match self {
            Self::Malformed(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the file is absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl<T> Default for Artifact<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> From<Result<T, DocumentError>> for Artifact<T> {
    fn from(result: Result<T, DocumentError>) -> Self {
        match result {
            Ok(doc) => Self::Parsed(doc),
            Err(err) => Self::Malformed(err),
        }
    }
}

/// The three artifacts of one (version, family) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyArtifacts {
    /// `schema.<family>.json`
    pub json_schema: Artifact<JsonSchemaDocument>,
    /// `openapi.<family>.yaml`
    pub openapi: Artifact<OpenApiDocument>,
    /// `examples.<family>.json`
    pub examples: Artifact<ExampleSet>,
}

/// Every family of one version.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionSnapshot {
    version: VersionTag,
    present: bool,
    families: BTreeMap<SpecFamily, FamilyArtifacts>,
}

impl VersionSnapshot {
    /// A version whose `spec/<version>` directory exists.
    pub fn new(version: VersionTag) -> Self {
        Self {
            version,
            present: true,
            families: BTreeMap::new(),
        }
    }

    /// A version with no `spec/<version>` directory at all.
    pub fn absent(version: VersionTag) -> Self {
        Self {
            version,
            present: false,
            families: BTreeMap::new(),
        }
    }

    /// Add (or replace) a family's artifacts.
    pub fn with_family(mut self, family: SpecFamily, artifacts: FamilyArtifacts) -> Self {
        self.families.insert(family, artifacts);
        self
    }

    /// The version tag.
    pub fn version(&self) -> &VersionTag {
        &self.version
    }

    /// Whether the version directory exists.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Families in name order.
    pub fn families(&self) -> impl Iterator<Item = (&SpecFamily, &FamilyArtifacts)> {
        self.families.iter()
    }

    /// One family's artifacts.
    pub fn family(&self, family: &SpecFamily) -> Option<&FamilyArtifacts> {
        self.families.get(family)
    }
}

/// Everything one run reads, in configured version order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusSnapshot {
    versions: Vec<VersionSnapshot>,
}

impl CorpusSnapshot {
    /// Snapshot from already-built version entries.
    pub fn new(versions: Vec<VersionSnapshot>) -> Self {
        Self { versions }
    }

    /// Versions in run order.
    pub fn versions(&self) -> &[VersionSnapshot] {
        &self.versions
    }

    /// One version by tag.
    pub fn version(&self, tag: &VersionTag) -> Option<&VersionSnapshot> {
        self.versions.iter().find(|v| v.version() == tag)
    }
}

impl FromIterator<VersionSnapshot> for CorpusSnapshot {
    fn from_iter<I: IntoIterator<Item = VersionSnapshot>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A corpus rooted at a directory containing `spec/` and `examples/`.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
}

impl Corpus {
    /// Corpus rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The corpus root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/spec/<version>`.
    pub fn version_dir(&self, version: &VersionTag) -> PathBuf {
        self.root.join("spec").join(version.as_str())
    }

    /// Whether `spec/<version>` exists.
    pub fn has_version(&self, version: &VersionTag) -> bool {
        self.version_dir(version).is_dir()
    }

    fn artifact_dir(&self, version: &VersionTag, kind: ArtifactKind) -> PathBuf {
        match kind {
            ArtifactKind::JsonSchema | ArtifactKind::OpenApi => {
                self.version_dir(version).join(kind.as_str())
            }
            ArtifactKind::Examples => self.root.join("examples").join(version.as_str()),
        }
    }

    /// Expected path of one artifact.
    pub fn artifact_path(
        &self,
        version: &VersionTag,
        family: &SpecFamily,
        kind: ArtifactKind,
    ) -> PathBuf {
        let file = match kind {
            ArtifactKind::JsonSchema => format!("schema.{family}.json"),
            ArtifactKind::OpenApi => format!("openapi.{family}.yaml"),
            ArtifactKind::Examples => format!("examples.{family}.json"),
        };
        self.artifact_dir(version, kind).join(file)
    }

    /// Families publishing an artifact of `kind` for `version`, sorted.
    ///
    /// A missing directory yields nothing. File names that do not form a
    /// valid family name are skipped with a warning.
    pub fn families(&self, version: &VersionTag, kind: ArtifactKind) -> Vec<SpecFamily> {
        let (prefix, suffix) = match kind {
            ArtifactKind::JsonSchema => ("schema.", ".json"),
            ArtifactKind::OpenApi => ("openapi.", ".yaml"),
            ArtifactKind::Examples => ("examples.", ".json"),
        };
        let dir = self.artifact_dir(version, kind);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot list artifact directory");
                return Vec::new();
            }
        };

        let mut families = BTreeSet::new();
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(stem) = name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(suffix))
            else {
                continue;
            };
            match SpecFamily::new(stem) {
                Ok(family) => {
                    families.insert(family);
                }
                Err(e) => {
                    tracing::warn!(file = name, error = %e, "skipping artifact with unusable family name");
                }
            }
        }
        families.into_iter().collect()
    }

    /// Families publishing a JSON Schema or an OpenAPI artifact, sorted.
    pub fn spec_families(&self, version: &VersionTag) -> Vec<SpecFamily> {
        let mut families: BTreeSet<SpecFamily> = self
            .families(version, ArtifactKind::JsonSchema)
            .into_iter()
            .collect();
        families.extend(self.families(version, ArtifactKind::OpenApi));
        families.into_iter().collect()
    }

    fn load<T>(
        &self,
        version: &VersionTag,
        family: &SpecFamily,
        kind: ArtifactKind,
        parse: impl FnOnce(&str) -> Result<T, DocumentError>,
    ) -> Artifact<T> {
        let path = self.artifact_path(version, family, kind);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "artifact not present");
            return Artifact::Missing;
        }
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                return Artifact::Malformed(DocumentError::Unreadable {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };
        let artifact = Artifact::from(parse(&text));
        tracing::debug!(
            path = %path.display(),
            parsed = artifact.parsed().is_some(),
            "loaded artifact"
        );
        artifact
    }

    /// Load `schema.<family>.json`.
    pub fn load_json_schema(
        &self,
        version: &VersionTag,
        family: &SpecFamily,
    ) -> Artifact<JsonSchemaDocument> {
        self.load(version, family, ArtifactKind::JsonSchema, JsonSchemaDocument::parse)
    }

    /// Load `openapi.<family>.yaml`.
    pub fn load_openapi(&self, version: &VersionTag, family: &SpecFamily) -> Artifact<OpenApiDocument> {
        self.load(version, family, ArtifactKind::OpenApi, OpenApiDocument::parse)
    }

    /// Load `examples.<family>.json`.
    pub fn load_examples(&self, version: &VersionTag, family: &SpecFamily) -> Artifact<ExampleSet> {
        self.load(version, family, ArtifactKind::Examples, ExampleSet::parse)
    }

    /// Load every artifact of one version.
    pub fn snapshot_version(&self, version: &VersionTag) -> VersionSnapshot {
        if !self.has_version(version) {
            tracing::debug!(version = %version, "version directory absent");
            return VersionSnapshot::absent(version.clone());
        }
        self.spec_families(version)
            .into_iter()
            .fold(VersionSnapshot::new(version.clone()), |snapshot, family| {
                let artifacts = FamilyArtifacts {
                    json_schema: self.load_json_schema(version, &family),
                    openapi: self.load_openapi(version, &family),
                    examples: self.load_examples(version, &family),
                };
                snapshot.with_family(family, artifacts)
            })
    }

    /// Load every artifact of every listed version, preserving order.
    pub fn snapshot(&self, versions: &[VersionTag]) -> CorpusSnapshot {
        versions.iter().map(|v| self.snapshot_version(v)).collect()
    }
}
