//! Minimal HTTP GET transport.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Tests substitute in-memory transports that count calls.

#![allow(clippy::unused_async)]

use async_trait::async_trait;

use crate::error::QueryError;

/// Status and body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests.
#[async_trait(?Send)]
pub trait Transport {
    /// GET `url` with `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Network`] when no response was received.
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, QueryError>;
}

/// `fetch`-backed transport.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, QueryError> {
        let mut request = gloo_net::http::Request::get(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;
        let head = HttpResponse { status: resp.status(), body: String::new() };
        if !head.is_success() {
            return Ok(head);
        }
        let body = resp
            .text()
            .await
            .map_err(|e| QueryError::Malformed(e.to_string()))?;
        Ok(HttpResponse { body, ..head })
    }
}
