//! Failure causes at each widget boundary.
//!
//! ERROR HANDLING
//! ==============
//! None of these ever reach the page. Widgets collapse them into a safe
//! default (hidden badge, night theme, no-op render) at their public entry
//! points; the variants exist so tests and debug logs can see why.

/// Persisted key-value storage failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage is available in this context (SSR, privacy mode, sandboxed frame).
    #[error("storage unavailable")]
    Unavailable,
    /// The store exists but rejected the read or write.
    #[error("storage access failed: {0}")]
    Access(String),
}

/// The unread-message query failed before producing an answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// No backend config, or it has no base URL.
    #[error("backend config missing")]
    MissingConfig,
    #[error("request failed: {0}")]
    Network(String),
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A DOM target was missing or could not be mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("no document")]
    NoDocument,
    #[error("target element not found")]
    TargetNotFound,
    #[error("dom mutation failed: {0}")]
    Mutation(String),
}

/// Why a badge refresh ended in the degraded (hidden) state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BadgeError {
    /// Neither storage nor the auth helper produced an identity.
    #[error("no user identity")]
    Anonymous,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Dom(#[from] DomError),
}
