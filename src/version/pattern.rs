//! Pattern sets describing each distribution's version-in-filename convention

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::version::error::PatternError;

/// Pattern table shipped with the binary, used to seed the user's patterns file
pub const BUILTIN_PATTERNS: &str = include_str!("patterns/builtin.toml");

/// Written above the built-in table when the user's patterns file is created
const PATTERNS_FILE_HEADER: &str = r#"# SDK version parsing patterns
#
# Each [[patterns]] table describes how one distribution spells versions in
# its artifact file names.
#
#   name        = "temurin"      # unique name of the pattern set
#   type        = "jdk"          # SDK type, or "*" to apply to every type
#   description = "..."          # optional
#   patterns    = ["..."]        # regexes with exactly one capture group
#
# Pattern sets are tried top to bottom and regexes left to right; the first
# regex that captures a non-empty version wins. Put specific patterns before
# generic ones. Prefix a regex with (?i) for case-insensitive matching.

"#;

/// SDK type a pattern set applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum SdkType {
    /// Applies to every SDK type (written as "*")
    Any,
    /// Applies to one SDK type (e.g., "jdk", "node")
    Specific(String),
}

impl SdkType {
    const WILDCARD: &'static str = "*";

    /// Returns true if this pattern set should be tried for `requested`.
    pub fn applies_to(&self, requested: &str) -> bool {
        match self {
            SdkType::Any => true,
            SdkType::Specific(sdk_type) => sdk_type == requested,
        }
    }
}

impl From<String> for SdkType {
    fn from(value: String) -> Self {
        if value == Self::WILDCARD {
            SdkType::Any
        } else {
            SdkType::Specific(value)
        }
    }
}

impl From<&str> for SdkType {
    fn from(value: &str) -> Self {
        SdkType::from(value.to_string())
    }
}

impl From<SdkType> for String {
    fn from(value: SdkType) -> Self {
        match value {
            SdkType::Any => SdkType::WILDCARD.to_string(),
            SdkType::Specific(sdk_type) => sdk_type,
        }
    }
}

impl fmt::Display for SdkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdkType::Any => f.write_str(Self::WILDCARD),
            SdkType::Specific(sdk_type) => f.write_str(sdk_type),
        }
    }
}

/// A named, type-tagged, ordered list of version regexes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatternSet {
    pub name: String,
    #[serde(rename = "type")]
    pub sdk_type: SdkType,
    #[serde(default)]
    pub description: String,
    /// Regex sources, tried in order
    pub patterns: Vec<String>,
}

impl PatternSet {
    pub fn new(name: &str, sdk_type: impl Into<SdkType>, patterns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            sdk_type: sdk_type.into(),
            description: String::new(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Ordered pattern sets as read from a patterns file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatternTable {
    #[serde(default)]
    patterns: Vec<PatternSet>,
}

impl PatternTable {
    pub fn new(patterns: Vec<PatternSet>) -> Self {
        Self { patterns }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, PatternError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse the table embedded in the binary
    pub fn builtin() -> Result<Self, PatternError> {
        Self::from_toml_str(BUILTIN_PATTERNS)
    }

    pub fn load(path: &Path) -> Result<Self, PatternError> {
        let content = std::fs::read_to_string(path).map_err(|source| PatternError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_toml_str(&content)?;
        debug!("Loaded {} pattern sets from {:?}", table.len(), path);
        Ok(table)
    }

    /// Place `custom` pattern sets ahead of the loaded ones so they win
    /// under first-match-wins.
    pub fn with_custom(mut self, custom: Vec<PatternSet>) -> Self {
        let custom_count = custom.len();
        self.patterns.splice(0..0, custom);
        debug!(
            "Added {} custom pattern sets (total: {})",
            custom_count,
            self.patterns.len()
        );
        self
    }

    pub fn pattern_sets(&self) -> &[PatternSet] {
        &self.patterns
    }

    pub fn into_pattern_sets(self) -> Vec<PatternSet> {
        self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Create the patterns file from the built-in table if it does not exist yet.
///
/// Returns true if a new file was written.
pub fn ensure_patterns_file(path: &Path) -> Result<bool, PatternError> {
    if path.exists() {
        debug!("Patterns file already exists: {:?}", path);
        return Ok(false);
    }

    let write_error = |source| PatternError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let content = format!("{}{}", PATTERNS_FILE_HEADER, BUILTIN_PATTERNS);
    std::fs::write(path, content).map_err(write_error)?;

    info!("Created default patterns file at {:?}", path);
    Ok(true)
}
