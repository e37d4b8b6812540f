//! The backend configuration client seam.
//!
//! The pipeline never talks HTTP itself; it is handed a [`ConfigClient`]
//! implementation. Calls are single-outcome asynchronous operations: they
//! resolve to an id on success or a [`BackendError`] carrying an opaque
//! message body on failure. Nothing more is assumed about the wire format.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use notify_model::{ConfigItem, ConfigPayload};

/// Opaque failure reported by the notifications backend.
///
/// The message body is surfaced verbatim to the user (for example the
/// backend's host-deny-list rejection "Host of url is denied"); the
/// pipeline never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    /// The backend's error body.
    pub message: String,
}

impl BackendError {
    /// Creates a new backend error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Query parameters for listing persisted configurations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Free-text search over configuration names.
    pub search: Option<String>,
    /// Exact-match filters (e.g. by kind or enabled state).
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Creates an empty query matching everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Adds an exact-match filter.
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// Asynchronous client for the configuration backend.
///
/// Implementations persist and retrieve [`ConfigPayload`]s; the backend is
/// the sole arbiter of conflicting concurrent edits (last write wins at this
/// boundary).
#[allow(async_fn_in_trait)]
pub trait ConfigClient: Send + Sync {
    /// Persists a new configuration and returns its assigned id.
    async fn create(&self, payload: &ConfigPayload) -> std::result::Result<String, BackendError>;

    /// Replaces an existing configuration and returns its id.
    async fn update(
        &self,
        id: &str,
        payload: &ConfigPayload,
    ) -> std::result::Result<String, BackendError>;

    /// Deletes the configurations with the given ids.
    async fn delete(&self, ids: &[String]) -> std::result::Result<(), BackendError>;

    /// Lists persisted configurations matching the query.
    async fn list(&self, query: &ListQuery) -> std::result::Result<Vec<ConfigItem>, BackendError>;
}

impl<T: ConfigClient> ConfigClient for Arc<T> {
    async fn create(&self, payload: &ConfigPayload) -> std::result::Result<String, BackendError> {
        (**self).create(payload).await
    }

    async fn update(
        &self,
        id: &str,
        payload: &ConfigPayload,
    ) -> std::result::Result<String, BackendError> {
        (**self).update(id, payload).await
    }

    async fn delete(&self, ids: &[String]) -> std::result::Result<(), BackendError> {
        (**self).delete(ids).await
    }

    async fn list(&self, query: &ListQuery) -> std::result::Result<Vec<ConfigItem>, BackendError> {
        (**self).list(query).await
    }
}
