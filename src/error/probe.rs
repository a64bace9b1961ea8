use std::fmt;

use thiserror::Error;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Terminal failure of a single probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{source}")]
    Transport {
        #[source]
        source: BoxedError,
    },
    #[error("timeout after {timeout_ms} ms")]
    Timeout { timeout_ms: i64 },
    #[error("failed to read response body: {source}")]
    ReadBody {
        #[source]
        source: BoxedError,
    },
    #[error("assertion failed: '{pattern}'")]
    AssertionFailed { pattern: String },
    #[error("assertion regexp '{pattern}' cannot be compiled: {source}")]
    AssertionCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Discriminant of [`ProbeError`] for callers that branch on the failure
/// class rather than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
    Transport,
    Timeout,
    ReadBody,
    AssertionFailed,
    AssertionCompile,
}

impl ProbeError {
    pub fn transport<E>(error: E) -> Self
    where
        E: Into<BoxedError>,
    {
        ProbeError::Transport {
            source: error.into(),
        }
    }

    pub fn read_body<E>(error: E) -> Self
    where
        E: Into<BoxedError>,
    {
        ProbeError::ReadBody {
            source: error.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::Transport { .. } => ProbeErrorKind::Transport,
            ProbeError::Timeout { .. } => ProbeErrorKind::Timeout,
            ProbeError::ReadBody { .. } => ProbeErrorKind::ReadBody,
            ProbeError::AssertionFailed { .. } => ProbeErrorKind::AssertionFailed,
            ProbeError::AssertionCompile { .. } => ProbeErrorKind::AssertionCompile,
        }
    }
}

impl ProbeErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ProbeErrorKind::Transport => "transport",
            ProbeErrorKind::Timeout => "timeout",
            ProbeErrorKind::ReadBody => "read-body",
            ProbeErrorKind::AssertionFailed => "assertion-failed",
            ProbeErrorKind::AssertionCompile => "assertion-compile",
        }
    }
}

impl fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
