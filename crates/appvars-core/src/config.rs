use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app_type::CacheType;

/// Name of the optional configuration file in the workspace root.
pub const CONFIG_FILE: &str = "appvars.toml";

/// appvars.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub prune: PruneConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Docker image retention defaults, applied only when the record has none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PruneConfig {
    #[serde(default)]
    pub pull_request: PrunePolicy,
    #[serde(default = "default_branch_policy")]
    pub branch: PrunePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrunePolicy {
    pub keep_min_images: String,
    pub keep_num_days: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Workspace subdirectory the secret-free snapshot is written to
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache path for maven, relative to `$HOME`
    #[serde(default = "default_maven_path")]
    pub maven_path: String,
    /// Cache path for npm, relative to `$HOME`
    #[serde(default = "default_npm_path")]
    pub npm_path: String,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            pull_request: PrunePolicy::default(),
            branch: default_branch_policy(),
        }
    }
}

impl Default for PrunePolicy {
    fn default() -> Self {
        Self {
            keep_min_images: "5".to_owned(),
            keep_num_days: "0".to_owned(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            maven_path: default_maven_path(),
            npm_path: default_npm_path(),
        }
    }
}

impl PruneConfig {
    pub fn policy(&self, pull_request: bool) -> &PrunePolicy {
        if pull_request {
            &self.pull_request
        } else {
            &self.branch
        }
    }
}

impl CacheConfig {
    /// Default cache path for `cache_type`, expanded against `home`.
    pub fn default_path(&self, cache_type: CacheType, home: &str) -> String {
        let relative = match cache_type {
            CacheType::Maven => &self.maven_path,
            CacheType::Npm => &self.npm_path,
        };
        format!("{}/{}", home.trim_end_matches('/'), relative)
    }
}

impl PipelineConfig {
    /// Load from appvars.toml in the given directory, or return defaults if not found.
    pub fn load(dir: &Path) -> crate::Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

fn default_branch_policy() -> PrunePolicy {
    PrunePolicy {
        keep_min_images: "10".to_owned(),
        keep_num_days: "180".to_owned(),
    }
}

fn default_output_dir() -> String {
    "_create-build-envs".to_owned()
}

fn default_maven_path() -> String {
    ".m2/repository".to_owned()
}

fn default_npm_path() -> String {
    ".npm".to_owned()
}
