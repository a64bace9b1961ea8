use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Method};

use crate::error::ProbeError;
use crate::request::Request;

/// Fully received HTTP response.
#[derive(Debug, Clone, Default)]
pub struct HttpReply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Performs the HTTP exchange for one request.
///
/// The engine drops the returned future when the probe times out, so an
/// implementation must release its connection on drop rather than finish
/// the call in the background.
#[async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ProbeError::Transport`] when the call cannot be built or
    /// sent and [`ProbeError::ReadBody`] when the response body cannot be
    /// read to the end.
    async fn execute(&self, request: &Request) -> Result<HttpReply, ProbeError>;
}

#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    pub connect_timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: &TransportConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(user_agent) = config.user_agent.as_deref() {
            builder = builder.user_agent(user_agent);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &Request) -> Result<HttpReply, ProbeError> {
        let method = Method::from_bytes(request.method_or_default().as_bytes())
            .map_err(ProbeError::transport)?;
        let mut builder = self.client.request(method, &request.url);
        for header in &request.headers {
            builder = builder.header(header.name(), header.value());
        }
        let outbound = builder
            .body(request.body.clone())
            .build()
            .map_err(ProbeError::transport)?;

        let response = self
            .client
            .execute(outbound)
            .await
            .map_err(ProbeError::transport)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk.map_err(ProbeError::read_body)?);
        }

        Ok(HttpReply {
            status,
            headers,
            body,
        })
    }
}
