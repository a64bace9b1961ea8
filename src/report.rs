//! Human-readable result lines.
use std::io::Write;

use tracing::debug;

use crate::dispatch::{ProbeResult, ResultStream};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed.saturating_add(self.failed)
    }

    fn record(&mut self, result: &ProbeResult) {
        if result.is_success() {
            self.passed = self.passed.saturating_add(1);
        } else {
            self.failed = self.failed.saturating_add(1);
        }
    }
}

/// Writes `OK    name (N ms)` or `FAIL  name (N ms); error: ...`.
///
/// # Errors
///
/// Returns an error when the writer fails.
pub fn write_result<W: Write>(out: &mut W, result: &ProbeResult) -> std::io::Result<()> {
    writeln!(out, "{}", result)?;
    out.flush()
}

/// Writes one line per result as each probe finishes.
///
/// # Errors
///
/// Returns an error when the writer fails; results still pending are
/// abandoned.
pub async fn render_results<W: Write>(
    stream: &mut ResultStream,
    out: &mut W,
) -> std::io::Result<RunSummary> {
    let mut summary = RunSummary::default();
    while let Some(result) = stream.next().await {
        write_result(out, &result)?;
        summary.record(&result);
    }
    debug!(
        "Finished {} probes: {} ok, {} failed",
        summary.total(),
        summary.passed,
        summary.failed
    );
    Ok(summary)
}
