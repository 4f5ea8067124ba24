// ABOUTME: Abstract email provider contract the filter pipeline is layered over
// ABOUTME: Defines the backend trait, request/response types, and the call timeout wrapper
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Email Provider Contract
//!
//! One implementation of [`EmailProvider`] exists per backend (Gmail,
//! IMAP, Apps Script, ...); transport lives outside this crate. The core
//! consumes only this trait: a provider instance is built per request from
//! the credential's connection record and dropped when the request ends.
//!
//! Provider I/O is the only suspension point the core is aware of. Every
//! call is expected to run under [`with_timeout`] so cancellation
//! propagates into an in-flight batch.

/// Provider error types
pub mod errors;

use crate::errors::AppResult;
use crate::models::{DraftInfo, EmailMessage, EmailThread, LabelInfo, ProviderInfo};
use async_trait::async_trait;
use errors::ProviderError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Parameters for a message search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Backend-specific query string
    pub query: String,
    /// Maximum number of messages to return
    pub max_results: usize,
    /// Opaque continuation token from a previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// One page of search results
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    /// Matching messages
    pub messages: Vec<EmailMessage>,
    /// Token for the next page, if any
    pub next_page_token: Option<String>,
    /// Backend's estimate of the total match count
    pub result_size_estimate: usize,
}

/// Parameters for listing threads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadListParams {
    /// Optional backend-specific query string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Maximum number of threads to return
    pub max_results: usize,
    /// Opaque continuation token from a previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// One page of thread summaries
#[derive(Debug, Clone, Default)]
pub struct ThreadList {
    /// Matching threads
    pub threads: Vec<EmailThread>,
    /// Token for the next page, if any
    pub next_page_token: Option<String>,
    /// Backend's estimate of the total match count
    pub result_size_estimate: usize,
}

/// A thread together with its messages
#[derive(Debug, Clone)]
pub struct ThreadContent {
    /// The thread summary
    pub thread: EmailThread,
    /// All messages in the thread
    pub messages: Vec<EmailMessage>,
}

/// A draft creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRequest {
    /// Recipient addresses
    pub to: Vec<String>,
    /// Draft subject
    pub subject: String,
    /// Draft body
    pub body: String,
    /// Thread the draft replies to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to_thread_id: Option<String>,
}

/// Identifiers of a created draft
#[derive(Debug, Clone)]
pub struct DraftCreated {
    /// Provider-assigned draft id
    pub draft_id: String,
    /// Provider-assigned message id of the draft
    pub message_id: String,
}

/// Abstract email backend
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Backend type name, e.g. "gmail"
    fn name(&self) -> &'static str;

    /// Search messages matching a query
    async fn search(&self, params: SearchParams) -> Result<SearchResults, ProviderError>;

    /// Fetch a single message by id
    async fn get_message(&self, id: &str) -> Result<EmailMessage, ProviderError>;

    /// List conversation threads
    async fn list_threads(&self, params: ThreadListParams) -> Result<ThreadList, ProviderError>;

    /// Fetch a thread and its messages
    async fn get_thread(&self, id: &str) -> Result<ThreadContent, ProviderError>;

    /// Create a draft message
    async fn create_draft(&self, draft: DraftRequest) -> Result<DraftCreated, ProviderError>;

    /// List existing drafts
    async fn list_drafts(&self, max_results: Option<usize>) -> Result<Vec<DraftInfo>, ProviderError>;

    /// List mailbox labels
    async fn list_labels(&self) -> Result<Vec<LabelInfo>, ProviderError>;

    /// Describe this backend's capabilities and limitations
    fn provider_info(&self) -> ProviderInfo;
}

/// Factory building a provider instance for one request from the
/// connection's stored credentials
pub trait ProviderFactory: Send + Sync {
    /// Create a provider for `provider_type` with opaque `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown provider types or unusable credentials.
    fn create(
        &self,
        provider_type: &str,
        credentials: &serde_json::Value,
    ) -> AppResult<Box<dyn EmailProvider>>;
}

/// Run a provider call under a timeout.
///
/// # Errors
///
/// Returns `ProviderError::Timeout` when the call does not complete in
/// time, otherwise the call's own error.
pub async fn with_timeout<T, F>(timeout: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>> + Send,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout {
            seconds: timeout.as_secs(),
        }),
    }
}
