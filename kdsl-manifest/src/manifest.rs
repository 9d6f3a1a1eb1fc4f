//! kdsl.toml manifest types and parsing.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{
    Error, Result,
    error::{SourceContext, find_quoted_span},
};

/// Supertype every builder of the default host library implements.
pub const DEFAULT_SUPERTYPE: &str = "software.amazon.awssdk.utils.builder.SdkBuilder";

/// Root manifest for kdsl.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Where builders are discovered
    pub source: SourceConfig,

    /// Where the generated units go
    pub target: TargetConfig,

    /// Scanner and transformer tuning
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Root namespace of the scanned library
    pub namespace: String,

    /// Generic supertype whose arguments are (builder, target)
    #[serde(default = "default_supertype")]
    pub supertype: String,

    /// Universe snapshot (JSON)
    pub universe: PathBuf,

    /// Documentation export (JSON), optional
    pub docs: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Root namespace of the generated units
    pub namespace: String,

    /// Output root, cleared on every run
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Qualified host type → rendered Kotlin type
    #[serde(default)]
    pub type_mapping: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Method names that never become DSL members
    #[serde(default = "default_excluded_methods")]
    pub excluded_methods: Vec<String>,

    /// Return type name suffixes that mark a builder-shaped return
    #[serde(default = "default_builder_suffixes")]
    pub builder_suffixes: Vec<String>,

    /// Packages whose direct members never need an import
    #[serde(default = "default_implicit_imports")]
    pub implicit_imports: Vec<String>,

    /// What to do when two units end up at the same path
    #[serde(default)]
    pub collisions: CollisionPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            excluded_methods: default_excluded_methods(),
            builder_suffixes: default_builder_suffixes(),
            implicit_imports: default_implicit_imports(),
            collisions: CollisionPolicy::default(),
        }
    }
}

/// Handling of unit name collisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Abort the run.
    #[default]
    Fail,
    /// Prefix the unit name with its enclosing or key type names.
    Qualify,
}

fn default_supertype() -> String {
    DEFAULT_SUPERTYPE.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("generated")
}

pub fn default_excluded_methods() -> Vec<String> {
    vec!["applyMutation".to_string(), "copy".to_string()]
}

pub fn default_builder_suffixes() -> Vec<String> {
    vec!["Builder".to_string()]
}

pub fn default_implicit_imports() -> Vec<String> {
    vec!["java.lang".to_string(), "java.util".to_string()]
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "kdsl.toml")
    }
}

impl Manifest {
    /// Parse a kdsl.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a kdsl.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate_manifest(&manifest, &ctx)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    validate_namespace(&manifest.source.namespace, "source.namespace", ctx)?;
    validate_namespace(&manifest.target.namespace, "target.namespace", ctx)?;
    validate_namespace(&manifest.source.supertype, "source.supertype", ctx)?;

    for name in &manifest.scan.excluded_methods {
        if !is_java_identifier(name) {
            return Err(ctx.validation_error(
                format!("excluded method '{}' is not a valid method name", name),
                find_quoted_span(ctx.src(), name),
            ));
        }
    }
    if manifest.scan.builder_suffixes.iter().any(String::is_empty) {
        return Err(ctx.validation_error(
            "builder suffixes must not be empty",
            find_quoted_span(ctx.src(), ""),
        ));
    }
    Ok(())
}

fn validate_namespace(value: &str, key: &str, ctx: &SourceContext) -> Result<()> {
    if value.split('.').all(is_java_identifier) {
        return Ok(());
    }
    Err(ctx.validation_error(
        format!("{} '{}' is not a dotted Java name", key, value),
        find_quoted_span(ctx.src(), value),
    ))
}

/// Returns true if the name is a valid Java identifier (ASCII subset).
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// A kdsl.toml file together with the directory its relative paths resolve against.
#[derive(Debug, Clone)]
pub struct KdslToml {
    path: PathBuf,
    manifest: Manifest,
}

impl KdslToml {
    /// Open and parse a kdsl.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let manifest = Manifest::from_file(&path)?;
        Ok(Self { path, manifest })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory containing the manifest.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Universe snapshot path, resolved against the manifest directory.
    pub fn universe_path(&self) -> PathBuf {
        self.resolve(&self.manifest.source.universe)
    }

    /// Documentation export path, resolved against the manifest directory.
    pub fn docs_path(&self) -> Option<PathBuf> {
        self.manifest.source.docs.as_deref().map(|p| self.resolve(p))
    }

    /// Output root, resolved against the manifest directory.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.manifest.target.output)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }
}
