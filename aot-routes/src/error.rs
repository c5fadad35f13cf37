use config::ConfigError;
use std::io::Error as IoError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors which abort a generation pass. Nothing is emitted when any of them occurs.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Cannot find a program entry point to anchor generated sources.")]
    MissingEntryPoint,
    #[error("Generation has been cancelled.")]
    Cancelled,
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    #[error("Cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Missing environment variable: {0}")]
    MissingEnvironment(&'static str),
}
