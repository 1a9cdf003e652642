use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::SourceError;
use crate::sink::confined_join;

/// Supplies raw page text by path relative to the documentation root.
pub trait DocumentSource: Sync {
    fn read(&self, relative: &str) -> Result<String, SourceError>;
}

#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    root: PathBuf,
}

impl FsDocumentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, relative: &str) -> PathBuf {
        confined_join(&self.root, relative)
    }
}

impl DocumentSource for FsDocumentSource {
    fn read(&self, relative: &str) -> Result<String, SourceError> {
        let path = self.resolve(relative);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(SourceError::NotFound(relative.to_string()))
            }
            Err(source) => Err(SourceError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}
