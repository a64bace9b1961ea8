//! Concurrent probe dispatch: one task per request, each racing its HTTP
//! call against the request timeout and reporting exactly one result.
mod probe;
mod result;
mod transport;


use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, warn};

use crate::request::Request;

pub use result::ProbeResult;
pub use transport::{HttpReply, ReqwestTransport, Transport, TransportConfig};

#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    /// Upper bound on simultaneous calls. `None` starts every request at
    /// once.
    pub max_in_flight: Option<NonZeroUsize>,
}

pub struct Engine<T> {
    config: EngineConfig,
    transport: Arc<T>,
}

/// Results of one dispatch, in completion order.
pub struct ResultStream {
    rx: mpsc::Receiver<ProbeResult>,
    expected: usize,
    received: usize,
}

impl<T> Engine<T>
where
    T: Transport + 'static,
{
    pub fn new(config: EngineConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Spawns one probe task per request and returns immediately. Must be
    /// called from within a Tokio runtime.
    pub fn dispatch<I>(&self, requests: I) -> ResultStream
    where
        I: IntoIterator<Item = Request>,
    {
        let requests: Vec<Arc<Request>> = requests.into_iter().map(Arc::new).collect();
        let expected = requests.len();
        let (tx, rx) = mpsc::channel(expected.max(1));
        let limiter = self
            .config
            .max_in_flight
            .map(|limit| Arc::new(Semaphore::new(limit.get())));

        debug!(
            "Dispatching {} requests (max in flight: {})",
            expected,
            self.config
                .max_in_flight
                .map_or_else(|| "unbounded".to_owned(), |limit| limit.to_string())
        );

        for request in requests {
            let tx = tx.clone();
            let transport = Arc::clone(&self.transport);
            let limiter = limiter.clone();
            tokio::spawn(async move {
                let _permit = match limiter {
                    Some(limiter) => match limiter.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(err) => {
                            warn!("Probe limiter closed: {}", err);
                            None
                        }
                    },
                    None => None,
                };
                let result = probe::execute(transport.as_ref(), request).await;
                if tx.send(result).await.is_err() {
                    debug!("Result receiver dropped before probe finished");
                }
            });
        }

        ResultStream {
            rx,
            expected,
            received: 0,
        }
    }

    /// Dispatches every request and waits for all of their results.
    pub async fn run<I>(&self, requests: I) -> Vec<ProbeResult>
    where
        I: IntoIterator<Item = Request>,
    {
        let mut stream = self.dispatch(requests);
        let mut results = Vec::with_capacity(stream.expected());
        while let Some(result) = stream.next().await {
            results.push(result);
        }
        results
    }
}

impl ResultStream {
    /// Next finished probe, or `None` once every dispatched request has
    /// reported.
    pub async fn next(&mut self) -> Option<ProbeResult> {
        if self.received >= self.expected {
            return None;
        }
        let result = self.rx.recv().await?;
        self.received = self.received.saturating_add(1);
        Some(result)
    }

    #[must_use]
    pub const fn expected(&self) -> usize {
        self.expected
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.expected.saturating_sub(self.received)
    }
}
