use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Parsing ──
    #[error("failed to parse {what} as JSON")]
    JsonParse {
        what: String,
        source: serde_json::Error,
    },

    #[error("failed to parse {what} as YAML")]
    YamlParse {
        what: String,
        source: serde_yaml::Error,
    },

    #[error("{what} must be a JSON {expected}")]
    UnexpectedShape { what: String, expected: &'static str },

    // ── Validation ──
    #[error("{what} must not be an empty array")]
    EmptySpecification { what: String },

    #[error(
        "application specification for app '{app}' is invalid: {}",
        problems.join("; ")
    )]
    InvalidApplication { app: String, problems: Vec<String> },

    #[error("unknown application-type '{0}'")]
    UnknownApplicationType(String),

    #[error("'application-type' is not defined for app '{app}'")]
    MissingApplicationType { app: String },

    #[error("no known application type found in {}", dir.display())]
    UnresolvableType { dir: PathBuf },

    #[error("'application-source-path' {} does not exist", path.display())]
    SourcePathMissing { path: PathBuf },

    // ── Ecosystem manifests ──
    #[error("unable to use 'application-source-path' {}: no {manifest} found", path.display())]
    ManifestNotFound {
        path: PathBuf,
        manifest: &'static str,
    },

    #[error("failed to read manifest {}", path.display())]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("manifest {} is empty", path.display())]
    ManifestEmpty { path: PathBuf },

    #[error("failed to parse manifest {}: {detail}", path.display())]
    ManifestParse { path: PathBuf, detail: String },

    #[error(
        "could not detect 'java-version' from file '{}', '<java.version>' field is missing",
        path.display()
    )]
    MissingJavaVersion { path: PathBuf },

    // ── Configuration ──
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Output ──
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
