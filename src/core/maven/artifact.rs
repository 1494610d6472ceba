use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{ResolverError, ResolverResult};

/// A Maven coordinate as written in build metadata files.
///
/// Supported formats:
///   `group:name:version`
///   `group:name:version:classifier`
///   `group:name:version:classifier@extension`
///   `group:name:version@extension`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MavenArtifact {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    /// File extension; `None` means the default `jar`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl MavenArtifact {
    /// Parse a Maven coordinate string.
    ///
    /// # Examples
    /// ```
    /// use server_inputs::core::maven::MavenArtifact;
    ///
    /// let a = MavenArtifact::parse("net.sf.jopt-simple:jopt-simple:5.0.4").unwrap();
    /// assert_eq!(a.group, "net.sf.jopt-simple");
    /// ```
    pub fn parse(coord: &str) -> ResolverResult<Self> {
        let (coord_part, extension) = match coord.rsplit_once('@') {
            Some((head, ext)) if !ext.is_empty() => (head, Some(ext.to_string())),
            Some(_) => return Err(ResolverError::InvalidMavenCoordinate(coord.to_string())),
            None => (coord, None),
        };

        let parts: Vec<&str> = coord_part.split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(ResolverError::InvalidMavenCoordinate(coord.to_string()));
        }

        match parts.len() {
            3 | 4 => Ok(Self {
                group: parts[0].to_string(),
                name: parts[1].to_string(),
                version: parts[2].to_string(),
                classifier: parts.get(3).map(|c| c.to_string()),
                extension,
            }),
            _ => Err(ResolverError::InvalidMavenCoordinate(coord.to_string())),
        }
    }
}

/// `com.example.sub` is inside `com.example`; `com.examples` is not.
pub fn group_matches(candidate: &str, group: &str) -> bool {
    candidate == group
        || candidate
            .strip_prefix(group)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Renders the dependency notation accepted by build tools.
impl fmt::Display for MavenArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)?;
        if let Some(c) = &self.classifier {
            write!(f, ":{}", c)?;
        }
        if let Some(ext) = &self.extension {
            write!(f, "@{}", ext)?;
        }
        Ok(())
    }
}
