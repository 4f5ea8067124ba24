// ABOUTME: Shared test utilities: message builders, mock provider, in-memory store
// ABOUTME: Provides common fixtures to reduce duplication across integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `agentcloak` integration tests.

use agentcloak::filters::FilterConfig;
use agentcloak::models::{
    Attachment, DraftInfo, EmailAddress, EmailMessage, EmailThread, LabelInfo, ProviderInfo,
};
use agentcloak::providers::errors::ProviderError;
use agentcloak::providers::{
    DraftCreated, DraftRequest, EmailProvider, ProviderFactory, SearchParams, SearchResults,
    ThreadContent, ThreadList, ThreadListParams,
};
use agentcloak::storage::{Connection, CredentialRecord, CredentialStore};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Build a message with sensible defaults for filter tests
pub fn message(id: &str, from_email: &str, subject: &str, body: &str) -> EmailMessage {
    EmailMessage {
        id: id.to_owned(),
        thread_id: format!("thread-{id}"),
        subject: subject.to_owned(),
        from: EmailAddress::new("Sender", from_email),
        to: vec![EmailAddress::new("Recipient", "recipient@example.com")],
        cc: vec![],
        date: "2025-06-01T12:00:00Z".to_owned(),
        snippet: body.chars().take(80).collect(),
        body: body.to_owned(),
        html_body: None,
        labels: vec!["INBOX".to_owned()],
        attachments: vec![],
        is_unread: false,
    }
}

/// A clean message that no default filter should touch
pub fn clean_message(id: &str) -> EmailMessage {
    message(id, "friend@example.com", "Lunch plans", "See you at noon.")
}

/// An attachment fixture
pub fn attachment(filename: &str) -> Attachment {
    Attachment {
        filename: filename.to_owned(),
        mime_type: "application/pdf".to_owned(),
        size: 1024,
    }
}

/// A thread fixture with the given participants
pub fn thread(id: &str, participants: &[(&str, &str)]) -> EmailThread {
    EmailThread {
        id: id.to_owned(),
        subject: format!("Thread {id}"),
        participants: participants
            .iter()
            .map(|(name, email)| EmailAddress::new(*name, *email))
            .collect(),
        message_count: 2,
        snippet: "latest message".to_owned(),
        last_message_date: "2025-06-01T12:00:00Z".to_owned(),
        labels: vec!["INBOX".to_owned()],
        is_unread: false,
    }
}

/// Canned email backend for presenter and envelope tests
#[derive(Clone, Default)]
pub struct MockProvider {
    pub messages: Vec<EmailMessage>,
    pub threads: Vec<ThreadContent>,
    pub drafts: Vec<DraftInfo>,
    pub labels: Vec<LabelInfo>,
    pub created_drafts: Arc<Mutex<Vec<DraftRequest>>>,
}

impl MockProvider {
    pub fn with_messages(messages: Vec<EmailMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }
}

#[async_trait]
impl EmailProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search(&self, params: SearchParams) -> Result<SearchResults, ProviderError> {
        let messages: Vec<EmailMessage> = self
            .messages
            .iter()
            .take(params.max_results)
            .cloned()
            .collect();
        let estimate = self.messages.len();
        Ok(SearchResults {
            messages,
            next_page_token: None,
            result_size_estimate: estimate,
        })
    }

    async fn get_message(&self, id: &str) -> Result<EmailMessage, ProviderError> {
        self.messages
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("message {id}")))
    }

    async fn list_threads(&self, params: ThreadListParams) -> Result<ThreadList, ProviderError> {
        let threads: Vec<EmailThread> = self
            .threads
            .iter()
            .take(params.max_results)
            .map(|c| c.thread.clone())
            .collect();
        let estimate = self.threads.len();
        Ok(ThreadList {
            threads,
            next_page_token: None,
            result_size_estimate: estimate,
        })
    }

    async fn get_thread(&self, id: &str) -> Result<ThreadContent, ProviderError> {
        self.threads
            .iter()
            .find(|c| c.thread.id == id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("thread {id}")))
    }

    async fn create_draft(&self, draft: DraftRequest) -> Result<DraftCreated, ProviderError> {
        self.created_drafts.lock().unwrap().push(draft);
        Ok(DraftCreated {
            draft_id: "draft-1".to_owned(),
            message_id: "msg-draft-1".to_owned(),
        })
    }

    async fn list_drafts(
        &self,
        max_results: Option<usize>,
    ) -> Result<Vec<DraftInfo>, ProviderError> {
        let limit = max_results.unwrap_or(self.drafts.len());
        Ok(self.drafts.iter().take(limit).cloned().collect())
    }

    async fn list_labels(&self) -> Result<Vec<LabelInfo>, ProviderError> {
        Ok(self.labels.clone())
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo {
            provider_type: "mock".to_owned(),
            search_capabilities: vec!["from:".to_owned(), "subject:".to_owned()],
            supports_threading: true,
            supported_folders: vec!["INBOX".to_owned(), "SENT".to_owned()],
            limitations: vec![],
        }
    }
}

/// Factory handing out clones of a prototype provider
pub struct MockProviderFactory {
    pub prototype: MockProvider,
}

impl ProviderFactory for MockProviderFactory {
    fn create(
        &self,
        provider_type: &str,
        _credentials: &serde_json::Value,
    ) -> agentcloak::errors::AppResult<Box<dyn EmailProvider>> {
        if provider_type == "mock" {
            Ok(Box::new(self.prototype.clone()))
        } else {
            Err(agentcloak::errors::AppError::invalid_input(format!(
                "Unknown provider type: {provider_type}"
            )))
        }
    }
}

/// In-memory storage backend for auth and envelope tests
#[derive(Default)]
pub struct MemoryStore {
    pub credentials: HashMap<String, CredentialRecord>,
    pub connections: HashMap<Uuid, Connection>,
    pub filter_configs: HashMap<Uuid, FilterConfig>,
    pub touched: Mutex<Vec<Uuid>>,
    pub fail_touch: bool,
}

impl MemoryStore {
    /// Register a credential for `token_hash` pointing at a mock connection.
    /// Returns the store with the credential and connection ids.
    pub fn with_credential(token_hash: &str, revoked: bool) -> (Self, Uuid, Uuid) {
        let mut store = Self::default();
        let credential_id = Uuid::new_v4();
        let connection_id = Uuid::new_v4();
        store.credentials.insert(
            token_hash.to_owned(),
            CredentialRecord {
                id: credential_id,
                connection_id,
                revoked,
                last_used_at: None,
            },
        );
        store.connections.insert(
            connection_id,
            Connection {
                id: connection_id,
                provider_type: "mock".to_owned(),
                credentials: json!({"token": "opaque"}),
            },
        );
        (store, credential_id, connection_id)
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn resolve_credential(&self, token_hash: &str) -> Result<Option<CredentialRecord>> {
        Ok(self.credentials.get(token_hash).cloned())
    }

    async fn get_connection(&self, id: Uuid) -> Result<Option<Connection>> {
        Ok(self.connections.get(&id).cloned())
    }

    async fn get_filter_config(&self, connection_id: Uuid) -> Result<Option<FilterConfig>> {
        Ok(self.filter_configs.get(&connection_id).cloned())
    }

    async fn touch_credential_last_used(&self, id: Uuid) -> Result<()> {
        if self.fail_touch {
            return Err(anyhow!("storage unavailable"));
        }
        self.touched.lock().unwrap().push(id);
        Ok(())
    }
}
