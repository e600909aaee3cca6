//! Unread-message existence query.
//!
//! ERROR HANDLING
//! ==============
//! Every failure comes back as a [`QueryError`]; the badge maps all of them
//! to "no unread". A missing or URL-less config fails before any request is
//! built, so nothing goes over the wire.

#[cfg(test)]
#[path = "unread_test.rs"]
mod unread_test;

use async_trait::async_trait;

use super::transport::{HttpResponse, Transport};
use crate::config::BackendConfig;
use crate::consts::USER_MESSAGES_PATH;
use crate::error::QueryError;

/// Answers "does this user have at least one unread message?".
#[async_trait(?Send)]
pub trait UnreadSource {
    /// # Errors
    ///
    /// Returns [`QueryError`] when the answer could not be determined.
    async fn has_unread(&self, user_id: &str) -> Result<bool, QueryError>;
}

/// Query URL: first unread row id for `user_id`, at most one result.
#[must_use]
pub fn unread_query_url(base_url: &str, user_id: &str) -> String {
    format!(
        "{base_url}{USER_MESSAGES_PATH}?select=id&user_id=eq.{}&is_read=eq.false&limit=1",
        urlencoding::encode(user_id)
    )
}

/// Interpret a response: success status with a non-empty JSON array means unread.
///
/// # Errors
///
/// Returns [`QueryError::Status`] for non-2xx and [`QueryError::Malformed`]
/// when the body is not a JSON array.
pub fn interpret_response(response: &HttpResponse) -> Result<bool, QueryError> {
    if !response.is_success() {
        return Err(QueryError::Status(response.status));
    }
    let value: serde_json::Value =
        serde_json::from_str(&response.body).map_err(|e| QueryError::Malformed(e.to_string()))?;
    match value {
        serde_json::Value::Array(rows) => Ok(!rows.is_empty()),
        other => Err(QueryError::Malformed(format!("expected array, got {other}"))),
    }
}

/// REST-backed source over an injected config and transport.
#[derive(Debug)]
pub struct RestUnreadSource<T> {
    config: Option<BackendConfig>,
    transport: T,
}

impl<T: Transport> RestUnreadSource<T> {
    #[must_use]
    pub fn new(config: Option<BackendConfig>, transport: T) -> Self {
        Self { config, transport }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait(?Send)]
impl<T: Transport> UnreadSource for RestUnreadSource<T> {
    async fn has_unread(&self, user_id: &str) -> Result<bool, QueryError> {
        let config = self
            .config
            .as_ref()
            .filter(|c| c.is_usable())
            .ok_or(QueryError::MissingConfig)?;
        let url = unread_query_url(&config.base_url, user_id);
        let response = self.transport.get(&url, &config.request_headers()).await?;
        interpret_response(&response)
    }
}
