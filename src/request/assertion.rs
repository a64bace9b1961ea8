use std::fmt;

use regex::bytes::Regex;
use serde::Deserialize;

use crate::error::AssertionError;

/// A regular expression the response body must contain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Assertion {
    pattern: String,
}

/// An assertion whose pattern has been compiled.
#[derive(Debug, Clone)]
pub struct CompiledAssertion {
    regex: Regex,
}

impl Assertion {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// # Errors
    ///
    /// Returns an error when the pattern is not a valid regular expression.
    pub fn compile(&self) -> Result<CompiledAssertion, AssertionError> {
        CompiledAssertion::compile(&self.pattern)
    }
}

impl CompiledAssertion {
    /// # Errors
    ///
    /// Returns an error when the pattern is not a valid regular expression.
    pub fn compile(pattern: &str) -> Result<Self, AssertionError> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|err| AssertionError::Compile {
                pattern: pattern.to_owned(),
                source: err,
            })
    }

    /// True when the pattern occurs anywhere in `content`.
    #[must_use]
    pub fn matches(&self, content: &[u8]) -> bool {
        self.regex.is_match(content)
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl From<&str> for Assertion {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
