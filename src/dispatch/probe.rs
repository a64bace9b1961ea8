use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::error::{AssertionError, ProbeError, ProbeErrorKind};
use crate::request::{Assertion, Request};

use super::result::ProbeResult;
use super::transport::{HttpReply, Transport};

/// Runs one request to completion: call raced against its timeout, then
/// body decoding and assertions.
pub(super) async fn execute<T>(transport: &T, request: Arc<Request>) -> ProbeResult
where
    T: Transport + ?Sized,
{
    let timeout = timeout_duration(request.timeout_ms);
    if timeout.is_zero() {
        return timed_out(request);
    }
    let started = Instant::now();

    // Losing the race drops the call future, which cancels it.
    let outcome = tokio::select! {
        biased;
        () = sleep(timeout) => None,
        reply = transport.execute(&request) => Some(reply),
    };

    let reply = match outcome {
        None => return timed_out(request),
        Some(Err(error)) => {
            debug!("[{}]: HTTP request failed: {}", request.name, error);
            let response_time = match error.kind() {
                ProbeErrorKind::Transport => None,
                ProbeErrorKind::Timeout
                | ProbeErrorKind::ReadBody
                | ProbeErrorKind::AssertionFailed
                | ProbeErrorKind::AssertionCompile => Some(started.elapsed()),
            };
            return ProbeResult::failure(request, error, response_time);
        }
        Some(Ok(reply)) => reply,
    };

    log_exchange(&request, &reply);

    if let Err(error) = check_assertions(&request.assertions, &reply.body) {
        return ProbeResult::failure(request, error, Some(started.elapsed()));
    }

    match String::from_utf8(reply.body) {
        Ok(body) => ProbeResult::success(request, body, started.elapsed()),
        Err(err) => {
            let elapsed = started.elapsed();
            ProbeResult::failure(request, ProbeError::read_body(err), Some(elapsed))
        }
    }
}

fn timed_out(request: Arc<Request>) -> ProbeResult {
    debug!("[{}]: timed out after {} ms", request.name, request.timeout_ms);
    let error = ProbeError::Timeout {
        timeout_ms: request.timeout_ms,
    };
    ProbeResult::failure(request, error, None)
}

/// Non-positive timeouts expire immediately.
pub(super) fn timeout_duration(timeout_ms: i64) -> Duration {
    u64::try_from(timeout_ms).map_or(Duration::ZERO, Duration::from_millis)
}

/// Evaluates assertions in order and stops at the first one that does not
/// hold. Patterns are compiled as they are reached, so nothing after the
/// first failure is compiled or matched.
pub(super) fn check_assertions(assertions: &[Assertion], body: &[u8]) -> Result<(), ProbeError> {
    for assertion in assertions {
        let compiled = assertion.compile().map_err(|err| match err {
            AssertionError::Compile { pattern, source } => {
                ProbeError::AssertionCompile { pattern, source }
            }
        })?;
        if !compiled.matches(body) {
            return Err(ProbeError::AssertionFailed {
                pattern: assertion.pattern().to_owned(),
            });
        }
    }
    Ok(())
}

fn log_exchange(request: &Request, reply: &HttpReply) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    debug!("[{}]: HTTP request:\n{}", request.name, request.body_text());
    for header in &request.headers {
        debug!("[{}]: HTTP request header: {}", request.name, header);
    }
    debug!("[{}]: HTTP response status: {}", request.name, reply.status);
    for (name, value) in &reply.headers {
        debug!("[{}]: HTTP response header: {}={}", request.name, name, value);
    }
    debug!(
        "[{}]: HTTP response:\n{}",
        request.name,
        String::from_utf8_lossy(&reply.body)
    );
}
