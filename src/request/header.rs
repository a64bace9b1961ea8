use std::fmt;

use serde::Deserialize;

/// A raw `Name: Value` header line. Nothing is validated here; the HTTP
/// client decides at call time whether the name and value are acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Header {
    line: String,
    colon: Option<usize>,
}

impl Header {
    #[must_use]
    pub fn new(line: impl Into<String>) -> Self {
        let line = line.into();
        let colon = line.find(':').filter(|idx| *idx > 0);
        Self { line, colon }
    }

    /// Text before the first colon, or empty when there is no colon or the
    /// line starts with one.
    #[must_use]
    pub fn name(&self) -> &str {
        self.colon
            .and_then(|idx| self.line.get(..idx))
            .unwrap_or_default()
    }

    /// Text after the first colon with surrounding spaces removed.
    #[must_use]
    pub fn value(&self) -> &str {
        self.colon
            .and_then(|idx| self.line.get(idx.saturating_add(1)..))
            .map_or("", |value| value.trim_matches(' '))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.line
    }
}

impl From<String> for Header {
    fn from(line: String) -> Self {
        Self::new(line)
    }
}

impl From<&str> for Header {
    fn from(line: &str) -> Self {
        Self::new(line)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}
