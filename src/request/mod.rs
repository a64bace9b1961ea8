//! Request documents: JSON front matter, a `---` divider line, then the
//! literal request body.
mod assertion;
mod header;
mod parser;


use serde::Deserialize;

use crate::error::AssertionError;

pub use assertion::{Assertion, CompiledAssertion};
pub use header::Header;
pub use parser::{parse_bytes, parse_document};

/// One probe definition, immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub name: String,
    pub url: String,
    pub method: String,
    /// Milliseconds; zero or negative expires immediately.
    pub timeout_ms: i64,
    pub headers: Vec<Header>,
    pub assertions: Vec<Assertion>,
    pub body: Vec<u8>,
}

/// Front matter fields. Field names are matched case-insensitively for the
/// spellings request files use in practice; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Metadata {
    #[serde(alias = "Name")]
    name: String,
    #[serde(alias = "URL", alias = "Url")]
    url: String,
    #[serde(alias = "Method")]
    method: String,
    #[serde(alias = "Timeout")]
    timeout: i64,
    #[serde(alias = "Headers")]
    headers: Vec<Header>,
    #[serde(alias = "Assertions")]
    assertions: Vec<Assertion>,
}

impl Metadata {
    pub(crate) fn into_request(self, body: Vec<u8>) -> Request {
        Request {
            name: self.name,
            url: self.url,
            method: self.method,
            timeout_ms: self.timeout,
            headers: self.headers,
            assertions: self.assertions,
            body,
        }
    }
}

impl Request {
    /// Compiles every assertion once so that malformed patterns are caught
    /// before any call is made.
    ///
    /// # Errors
    ///
    /// Returns the first assertion that does not compile.
    pub fn validate_assertions(&self) -> Result<(), AssertionError> {
        for assertion in &self.assertions {
            assertion.compile()?;
        }
        Ok(())
    }

    /// HTTP method to send; an empty method means GET.
    #[must_use]
    pub fn method_or_default(&self) -> &str {
        if self.method.is_empty() {
            "GET"
        } else {
            &self.method
        }
    }

    #[must_use]
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
