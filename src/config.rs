//! Backend configuration injected into the badge widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host page publishes a config object with a base URL and either a
//! header-builder function or one of several API-key fields. The startup
//! glue converts it into a [`BackendConfig`]; widgets only ever see the
//! typed value.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

use crate::util::scalar::Scalar;

/// Header list as `(name, value)` pairs.
pub type Headers = Vec<(String, String)>;

/// Produces request headers. Returns `None` when the builder failed, in
/// which case key-based headers are used instead.
pub type HeaderBuilder = Rc<dyn Fn() -> Option<Headers>>;

/// Base URL plus the credentials needed to query it.
#[derive(Clone, Default)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub header_builder: Option<HeaderBuilder>,
}

/// JSON shape of the page config object. Key field names vary across
/// deployments; the first non-empty spelling wins, in declaration order.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBackendConfig {
    url: Option<String>,
    #[serde(rename = "anonKey")]
    anon_key_camel: Option<String>,
    anon_key: Option<String>,
    apikey: Option<String>,
    #[serde(rename = "apiKey")]
    api_key_camel: Option<String>,
}

impl RawBackendConfig {
    fn key(self) -> Option<String> {
        [self.anon_key_camel, self.anon_key, self.apikey, self.api_key_camel]
            .into_iter()
            .flatten()
            .find(|k| !k.is_empty())
    }
}

impl BackendConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_header_builder(mut self, builder: HeaderBuilder) -> Self {
        self.header_builder = Some(builder);
        self
    }

    /// Parse the JSON form of the page config object.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when `raw` is not a JSON object.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut parsed: RawBackendConfig = serde_json::from_str(raw)?;
        let base_url = parsed.url.take().unwrap_or_default();
        Ok(Self { base_url, api_key: parsed.key(), header_builder: None })
    }

    /// Whether a query can be attempted at all.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.base_url.is_empty()
    }

    /// Headers for a backend request: the builder's output when it succeeds,
    /// otherwise JSON accept/content-type plus key auth when a key is known.
    #[must_use]
    pub fn request_headers(&self) -> Headers {
        if let Some(headers) = self.header_builder.as_ref().and_then(|build| build()) {
            return headers;
        }
        let mut headers = vec![
            ("Accept".to_owned(), "application/json".to_owned()),
            ("Content-Type".to_owned(), "application/json".to_owned()),
        ];
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            headers.push(("apikey".to_owned(), key.to_owned()));
            headers.push(("Authorization".to_owned(), format!("Bearer {key}")));
        }
        headers
    }
}

/// Headers from `(name, value)` pairs a page builder returned. Values are
/// stringified the way `fetch` would; pairs with a nullish name or value
/// are dropped.
#[must_use]
pub fn header_pairs(entries: impl IntoIterator<Item = (Scalar, Scalar)>) -> Headers {
    entries
        .into_iter()
        .filter_map(|(name, value)| Some((name.to_text()?, value.to_text()?)))
        .collect()
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("header_builder", &self.header_builder.is_some())
            .finish()
    }
}
