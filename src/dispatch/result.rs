use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ProbeError, ProbeErrorKind};
use crate::request::Request;

/// Terminal outcome of one probe. Created once, never mutated.
#[derive(Debug)]
pub struct ProbeResult {
    pub request: Arc<Request>,
    /// Response body; empty unless the probe succeeded.
    pub response_body: String,
    /// `None` when no response was obtained (timeout, transport failure).
    pub response_time: Option<Duration>,
    pub error: Option<ProbeError>,
}

impl ProbeResult {
    pub(crate) const fn success(
        request: Arc<Request>,
        response_body: String,
        response_time: Duration,
    ) -> Self {
        Self {
            request,
            response_body,
            response_time: Some(response_time),
            error: None,
        }
    }

    pub(crate) const fn failure(
        request: Arc<Request>,
        error: ProbeError,
        response_time: Option<Duration>,
    ) -> Self {
        Self {
            request,
            response_body: String::new(),
            response_time,
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    #[must_use]
    pub fn error_kind(&self) -> Option<ProbeErrorKind> {
        self.error.as_ref().map(ProbeError::kind)
    }

    /// Whole milliseconds elapsed, 0 when no time was measured.
    #[must_use]
    pub fn elapsed_ms(&self) -> u128 {
        self.response_time.map_or(0, |elapsed| elapsed.as_millis())
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_success() { "OK" } else { "FAIL" };
        write!(
            f,
            "{:<6}{} ({} ms)",
            status,
            self.request.name,
            self.elapsed_ms()
        )?;
        if let Some(error) = self.error.as_ref() {
            write!(f, "; error: {}", error)?;
        }
        Ok(())
    }
}
