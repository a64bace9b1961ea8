use thiserror::Error;

/// Failure to turn a request document into a `Request`.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("front matter not found")]
    NoFrontMatter,
    #[error("invalid front matter: {source}")]
    InvalidMetadata {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read request document: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum AssertionError {
    #[error("assertion regexp '{pattern}' cannot be compiled: {source}")]
    Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
