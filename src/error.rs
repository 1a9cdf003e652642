use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no class signature found in class header")]
    MissingClassSignature,

    #[error("invalid selector `{0}`")]
    InvalidSelector(String),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("failed to read document {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
