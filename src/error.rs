use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read source document {path}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list output directory {path}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to write snippet file {path}")]
    WriteSnippet {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config file {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
