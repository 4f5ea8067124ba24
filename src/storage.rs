// ABOUTME: Read contract against persistent storage for credentials and connections
// ABOUTME: Defines the records and trait the request envelope resolves per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Storage Contract
//!
//! The read surface the core needs from persistent storage. Concrete
//! backends (SQL, in-memory for tests) implement [`CredentialStore`]; the
//! core never writes except for the best-effort last-used touch.

use crate::filters::FilterConfig;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// A stored bearer credential, looked up by token hash
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Credential id
    pub id: Uuid,
    /// Mailbox connection this credential grants access to
    pub connection_id: Uuid,
    /// Whether the credential has been revoked
    pub revoked: bool,
    /// When the credential last authenticated a request
    pub last_used_at: Option<DateTime<Utc>>,
}

/// A mailbox connection with its provider credentials
#[derive(Debug, Clone)]
pub struct Connection {
    /// Connection id
    pub id: Uuid,
    /// Backend type, e.g. "gmail"
    pub provider_type: String,
    /// Opaque provider credentials, interpreted by the provider factory
    pub credentials: Value,
}

/// Read surface the request envelope resolves per request
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a credential by its token hash.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure; an unknown hash is `Ok(None)`.
    async fn resolve_credential(&self, token_hash: &str) -> Result<Option<CredentialRecord>>;

    /// Fetch a connection record by id.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure; a missing row is `Ok(None)`.
    async fn get_connection(&self, id: Uuid) -> Result<Option<Connection>>;

    /// Fetch the filter configuration for a connection. `Ok(None)` means
    /// the connection has no stored row and the defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    async fn get_filter_config(&self, connection_id: Uuid) -> Result<Option<FilterConfig>>;

    /// Record that a credential just authenticated a request. Failures are
    /// logged by the caller and never abort the request.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    async fn touch_credential_last_used(&self, id: Uuid) -> Result<()>;
}
