// ABOUTME: Normalized email data model shared by providers, filters, and tools
// ABOUTME: Defines messages, threads, addresses, drafts, labels, and provider metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Email Data Model
//!
//! A single normalized record shape for everything downstream of a provider.
//! Messages are request-scoped values: providers produce them, the filter
//! pipeline transforms them, presenters render them, and nothing persists
//! them. Wire field names are camelCase to match the agent-visible JSON.

use crate::constants::limits::SNIPPET_MAX_CHARS;
use serde::{Deserialize, Serialize};

/// A mailbox participant: display name plus address, either may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Display name as supplied by the provider
    #[serde(default)]
    pub name: String,
    /// Address; case preserved for display, lowercased for domain checks
    #[serde(default)]
    pub email: String,
}

impl EmailAddress {
    /// Create an address from name and email parts
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Lowercased portion of the address after the last `@`, if any
    #[must_use]
    pub fn domain(&self) -> Option<String> {
        let at = self.email.rfind('@')?;
        let host = &self.email[at + 1..];
        if host.is_empty() {
            None
        } else {
            Some(host.to_lowercase())
        }
    }
}

/// Attachment metadata; content is never fetched through the proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Original filename
    pub filename: String,
    /// Declared MIME type
    pub mime_type: String,
    /// Size in bytes
    pub size: u64,
}

/// A single normalized email message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    /// Provider-assigned message id
    pub id: String,
    /// Provider-assigned thread id
    pub thread_id: String,
    /// Message subject
    #[serde(default)]
    pub subject: String,
    /// Sender
    pub from: EmailAddress,
    /// Primary recipients
    #[serde(default)]
    pub to: Vec<EmailAddress>,
    /// Carbon-copy recipients
    #[serde(default)]
    pub cc: Vec<EmailAddress>,
    /// ISO-8601 date string as reported by the provider
    #[serde(default)]
    pub date: String,
    /// Short whitespace-collapsed preview, at most 200 characters
    #[serde(default)]
    pub snippet: String,
    /// Plaintext body
    #[serde(default)]
    pub body: String,
    /// Raw HTML body when the provider returned one; dropped by the sanitizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    /// Labels/folders this message carries
    #[serde(default)]
    pub labels: Vec<String>,
    /// Attachment metadata
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Whether the provider reports the message as unread
    #[serde(default)]
    pub is_unread: bool,
}

impl EmailMessage {
    /// Whether any attachment metadata is present
    #[must_use]
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// A conversation thread summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailThread {
    /// Provider-assigned thread id
    pub id: String,
    /// Subject of the thread
    #[serde(default)]
    pub subject: String,
    /// Participants, deduplicated by email address
    #[serde(default)]
    pub participants: Vec<EmailAddress>,
    /// Number of messages in the thread
    #[serde(default)]
    pub message_count: usize,
    /// Preview of the most recent message
    #[serde(default)]
    pub snippet: String,
    /// ISO-8601 date of the most recent message
    #[serde(default)]
    pub last_message_date: String,
    /// Labels carried by the thread
    #[serde(default)]
    pub labels: Vec<String>,
    /// Whether any message in the thread is unread
    #[serde(default)]
    pub is_unread: bool,
}

/// Summary of an existing draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftInfo {
    /// Provider-assigned draft id
    pub id: String,
    /// Recipients the draft is addressed to
    #[serde(default)]
    pub to: Vec<EmailAddress>,
    /// Draft subject
    #[serde(default)]
    pub subject: String,
    /// Preview of the draft body
    #[serde(default)]
    pub snippet: String,
}

/// A mailbox label or folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelInfo {
    /// Provider-assigned label id
    pub id: String,
    /// Display name, e.g. `INBOX`
    pub name: String,
    /// Number of messages under the label, when the provider reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
}

/// Capabilities and limitations of a connected provider backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    /// Backend type, e.g. `gmail`, `imap`
    #[serde(rename = "type")]
    pub provider_type: String,
    /// Query operators the backend search supports
    #[serde(default)]
    pub search_capabilities: Vec<String>,
    /// Whether the backend can group messages into threads
    pub supports_threading: bool,
    /// Folder/label names the backend exposes
    #[serde(default)]
    pub supported_folders: Vec<String>,
    /// Known behavioral limitations worth surfacing to agents
    #[serde(default)]
    pub limitations: Vec<String>,
}

/// Collapse whitespace runs to single spaces and truncate to the snippet cap.
///
/// Providers use this to derive `snippet` from a body; the cap counts
/// characters, not bytes, so multi-byte text truncates cleanly.
#[must_use]
pub fn make_snippet(text: &str) -> String {
    let collapsed: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= SNIPPET_MAX_CHARS {
        collapsed
    } else {
        collapsed.chars().take(SNIPPET_MAX_CHARS).collect()
    }
}
