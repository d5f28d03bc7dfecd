use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ecosystem an application is built with.
///
/// Drives manifest parsing, type-specific validation and cache key
/// derivation. Every decision point matches on this enum exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationType {
    SpringBoot,
    MavenLibrary,
    Vue,
    Python,
}

impl ApplicationType {
    pub const ALL: [ApplicationType; 4] = [
        ApplicationType::SpringBoot,
        ApplicationType::MavenLibrary,
        ApplicationType::Vue,
        ApplicationType::Python,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationType::SpringBoot => "spring-boot",
            ApplicationType::MavenLibrary => "maven-library",
            ApplicationType::Vue => "vue",
            ApplicationType::Python => "python",
        }
    }

    /// Native manifest file read for metadata when the source path is a directory.
    pub fn manifest_file(self) -> &'static str {
        match self {
            ApplicationType::SpringBoot | ApplicationType::MavenLibrary => "pom.xml",
            ApplicationType::Vue => "package.json",
            ApplicationType::Python => "pyproject.toml",
        }
    }

    pub fn is_maven(self) -> bool {
        matches!(
            self,
            ApplicationType::SpringBoot | ApplicationType::MavenLibrary
        )
    }

    /// Record key holding the runtime version this type requires, if any.
    pub fn required_version_key(self) -> Option<&'static str> {
        match self {
            ApplicationType::SpringBoot | ApplicationType::MavenLibrary => {
                Some(crate::keys::JAVA_VERSION)
            }
            ApplicationType::Vue => Some(crate::keys::NODEJS_VERSION),
            ApplicationType::Python => None,
        }
    }

    /// Dependency cache flavour, `None` when caching is not supported.
    pub fn cache_type(self) -> Option<CacheType> {
        match self {
            ApplicationType::SpringBoot | ApplicationType::MavenLibrary => Some(CacheType::Maven),
            ApplicationType::Vue => Some(CacheType::Npm),
            ApplicationType::Python => None,
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| crate::Error::UnknownApplicationType(s.to_owned()))
    }
}

/// Dependency cache flavour used by the cache key deriver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheType {
    Maven,
    Npm,
}

impl CacheType {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheType::Maven => "maven",
            CacheType::Npm => "npm",
        }
    }

    /// File whose content hash goes into the cache key.
    pub fn lockfile(self) -> &'static str {
        match self {
            CacheType::Maven => "pom.xml",
            CacheType::Npm => "package-lock.json",
        }
    }
}

impl fmt::Display for CacheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
