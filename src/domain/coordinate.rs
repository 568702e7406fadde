//! Coordinate domain type
//!
//! Identity of a dependency: `groupId:artifactId:version:type[:classifier]`
//! plus the scope it was declared with. Equality and hashing deliberately
//! ignore `type` and `scope`, so two declarations that only differ in
//! packaging or visibility collapse to one entry in sets and maps.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::string_utils::is_blank;
use crate::error::{ModelError, Result, argument};

/// Packaging type used when a declaration does not name one
pub const DEFAULT_ARTIFACT_TYPE: &str = "jar";

/// Classifier of artifacts loaded in their own plugin class loader
pub const MULE_PLUGIN_CLASSIFIER: &str = "mule-plugin";

/// Classifier of shared domain artifacts an application may reference
pub const MULE_DOMAIN_CLASSIFIER: &str = "mule-domain";

/// Dependency scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Provided => "provided",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
            Scope::System => "system",
            Scope::Import => "import",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "compile" => Ok(Scope::Compile),
            "provided" => Ok(Scope::Provided),
            "runtime" => Ok(Scope::Runtime),
            "test" => Ok(Scope::Test),
            "system" => Ok(Scope::System),
            "import" => Ok(Scope::Import),
            other => Err(argument::invalid(format!("Unknown scope '{other}'"))),
        }
    }
}

/// Identity of an artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCoordinate")]
pub struct Coordinate {
    group_id: String,
    artifact_id: String,
    version: String,
    #[serde(rename = "type")]
    artifact_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    classifier: Option<String>,
    #[serde(skip)]
    scope: Option<Scope>,
}

/// Unvalidated wire form of a [`Coordinate`]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCoordinate {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    #[serde(rename = "type")]
    artifact_type: Option<String>,
    classifier: Option<String>,
    scope: Option<Scope>,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = ModelError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        let mut coordinate = Coordinate::new(
            raw.group_id.unwrap_or_default(),
            raw.artifact_id.unwrap_or_default(),
            raw.version.unwrap_or_default(),
        )?;
        if let Some(artifact_type) = raw.artifact_type {
            coordinate = coordinate.with_type(artifact_type)?;
        }
        coordinate.classifier = normalize_classifier(raw.classifier);
        coordinate.scope = raw.scope;
        Ok(coordinate)
    }
}

fn require(field: &str, value: String) -> Result<String> {
    if is_blank(&value) {
        return Err(argument::blank_field(field));
    }
    Ok(value)
}

fn normalize_classifier(classifier: Option<String>) -> Option<String> {
    classifier.filter(|c| !is_blank(c))
}

impl Coordinate {
    /// Create a coordinate with the default type and no classifier or scope
    ///
    /// # Errors
    ///
    /// Returns `ModelError::BlankField` naming the first blank field.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            group_id: require("groupId", group_id.into())?,
            artifact_id: require("artifactId", artifact_id.into())?,
            version: require("version", version.into())?,
            artifact_type: DEFAULT_ARTIFACT_TYPE.to_string(),
            classifier: None,
            scope: None,
        })
    }

    /// Parse the colon form `g:a:v[:type[:classifier]]`
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.trim().split(':').collect();
        if !(3..=5).contains(&parts.len()) {
            return Err(argument::invalid(format!(
                "Expected groupId:artifactId:version[:type[:classifier]], got '{input}'"
            )));
        }
        let mut coordinate = Coordinate::new(parts[0], parts[1], parts[2])?;
        if let Some(artifact_type) = parts.get(3) {
            coordinate = coordinate.with_type(*artifact_type)?;
        }
        if let Some(classifier) = parts.get(4) {
            coordinate = coordinate.with_classifier(*classifier);
        }
        Ok(coordinate)
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn artifact_type(&self) -> &str {
        &self.artifact_type
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    #[allow(dead_code)]
    pub fn with_group_id(&self, group_id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            group_id: require("groupId", group_id.into())?,
            ..self.clone()
        })
    }

    #[allow(dead_code)]
    pub fn with_artifact_id(&self, artifact_id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            artifact_id: require("artifactId", artifact_id.into())?,
            ..self.clone()
        })
    }

    #[allow(dead_code)]
    pub fn with_version(&self, version: impl Into<String>) -> Result<Self> {
        Ok(Self {
            version: require("version", version.into())?,
            ..self.clone()
        })
    }

    pub fn with_type(&self, artifact_type: impl Into<String>) -> Result<Self> {
        Ok(Self {
            artifact_type: require("type", artifact_type.into())?,
            ..self.clone()
        })
    }

    /// A blank classifier is treated as absent
    pub fn with_classifier(&self, classifier: impl Into<String>) -> Self {
        Self {
            classifier: normalize_classifier(Some(classifier.into())),
            ..self.clone()
        }
    }

    #[allow(dead_code)] // used in tests
    pub fn with_scope(&self, scope: Scope) -> Self {
        Self {
            scope: Some(scope),
            ..self.clone()
        }
    }

    /// `groupId:artifactId`, the identity shared by every version of an artifact
    pub fn ga(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    pub fn same_ga(&self, other: &Coordinate) -> bool {
        self.group_id == other.group_id && self.artifact_id == other.artifact_id
    }

    pub fn is_mule_plugin(&self) -> bool {
        self.classifier.as_deref() == Some(MULE_PLUGIN_CLASSIFIER)
    }

    pub fn is_mule_domain(&self) -> bool {
        self.classifier.as_deref() == Some(MULE_DOMAIN_CLASSIFIER)
    }

    /// Leading numeric component of the version
    pub fn major(&self) -> Option<u64> {
        major_version(&self.version)
    }

    /// File name of this artifact in a Maven repository
    pub fn file_name(&self) -> String {
        let extension = match self.artifact_type.as_str() {
            "mule-application" | "mule-domain" | "mule-domain-bundle" | "mule-policy" => "jar",
            other => other,
        };
        match &self.classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                self.artifact_id, self.version, classifier, extension
            ),
            None => format!("{}-{}.{}", self.artifact_id, self.version, extension),
        }
    }
}

/// Extract the major component of a version string
///
/// Strict semver is tried first; otherwise the leading run of digits is used,
/// which accepts Maven forms like `4.1`, `1` or `2.0-SNAPSHOT`.
pub fn major_version(version: &str) -> Option<u64> {
    if let Ok(parsed) = semver::Version::parse(version.trim()) {
        return Some(parsed.major);
    }
    let digits: String = version
        .trim()
        .trim_start_matches(['v', 'V'])
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.group_id == other.group_id
            && self.artifact_id == other.artifact_id
            && self.version == other.version
            && self.classifier == other.classifier
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group_id.hash(state);
        self.artifact_id.hash(state);
        self.version.hash(state);
        self.classifier.hash(state);
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.artifact_type
        )?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}
