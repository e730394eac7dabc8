use std::path::PathBuf;

/// Failures while loading a command schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("cannot read schema '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML schema: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither `.toml` nor `.json`.
    #[error("unsupported schema format '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),
}
