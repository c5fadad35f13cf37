//! Destinations for generated sources. A sink receives all artifacts of a generation pass at once,
//! so a pass either emits everything or nothing.

use crate::error::GeneratorError;
use derive_more::Constructor;
#[cfg(test)]
use mockall::automock;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// A named generated source file.
#[derive(Clone, Eq, PartialEq, Debug, Constructor)]
pub struct GeneratedSource {
    /// Artifact file name, e.g. `attributes.rs`.
    pub name: String,
    pub text: String,
}

/// Accepts generated sources and merges them into a build.
#[cfg_attr(test, automock)]
pub trait OutputSink {
    fn add_sources(&mut self, sources: Vec<GeneratedSource>) -> Result<(), GeneratorError>;
}

impl OutputSink for Vec<GeneratedSource> {
    fn add_sources(&mut self, sources: Vec<GeneratedSource>) -> Result<(), GeneratorError> {
        self.extend(sources);
        Ok(())
    }
}

/// Writes sources as files into a directory, usually `OUT_DIR`. Files with unchanged content are
/// not touched, so their modification time stays stable.
#[derive(Clone, Debug, Constructor)]
pub struct OutDirSink {
    directory: PathBuf,
}

impl OutputSink for OutDirSink {
    fn add_sources(&mut self, sources: Vec<GeneratedSource>) -> Result<(), GeneratorError> {
        fs::create_dir_all(&self.directory).map_err(|source| GeneratorError::Io {
            path: self.directory.clone(),
            source,
        })?;

        for source in sources {
            let path = self.directory.join(&source.name);
            if fs::read_to_string(&path).is_ok_and(|current| current == source.text) {
                debug!(path = %path.display(), "Generated source is up to date.");
                continue;
            }

            fs::write(&path, source.text).map_err(|error| GeneratorError::Io {
                path: path.clone(),
                source: error,
            })?;
            debug!(path = %path.display(), "Written generated source.");
        }

        Ok(())
    }
}
