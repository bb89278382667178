use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to create result directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize JSON result: {source}")]
    SerializeJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize TOML result: {source}")]
    SerializeToml {
        #[source]
        source: toml::ser::Error,
    },
    #[error("Serialized result was not valid UTF-8: {source}")]
    Utf8 {
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("Failed to write result '{path}': {source}")]
    WriteResult {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
