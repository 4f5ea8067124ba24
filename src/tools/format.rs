// ABOUTME: Shared presentation helpers: address formatting and message JSON shapes
// ABOUTME: Enforces the anti-leak rule for display names when redaction is on
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presentation helpers shared by the tool presenters.
//!
//! The address rule: with email redaction on, an address renders as its
//! trimmed display name, unless that name is empty or itself looks like an
//! email address, in which case it renders as `[Name Unavailable]`. With
//! redaction off, the full `name <email>` form is shown.

use crate::models::{EmailAddress, EmailMessage, EmailThread};
use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;

/// Placeholder shown when a display name cannot be revealed
pub const NAME_UNAVAILABLE: &str = "[Name Unavailable]";

fn email_shape_regex() -> Option<&'static Regex> {
    static EMAIL_SHAPE: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL_SHAPE
        .get_or_init(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").ok())
        .as_ref()
}

fn looks_like_email(text: &str) -> bool {
    email_shape_regex().is_some_and(|regex| regex.is_match(text))
}

/// Render one address for agent-visible output
#[must_use]
pub fn format_address(addr: &EmailAddress, email_redaction: bool) -> String {
    if email_redaction {
        let name = addr.name.trim();
        if name.is_empty() || looks_like_email(name) {
            NAME_UNAVAILABLE.to_owned()
        } else {
            name.to_owned()
        }
    } else if addr.name.trim().is_empty() {
        format!("<{}>", addr.email)
    } else {
        format!("{} <{}>", addr.name.trim(), addr.email)
    }
}

/// Render a list of addresses
#[must_use]
pub fn format_addresses(addrs: &[EmailAddress], email_redaction: bool) -> Vec<String> {
    addrs
        .iter()
        .map(|addr| format_address(addr, email_redaction))
        .collect()
}

/// Summary shape used by `search_emails` results
#[must_use]
pub fn message_summary(msg: &EmailMessage, email_redaction: bool) -> Value {
    json!({
        "id": msg.id,
        "threadId": msg.thread_id,
        "subject": msg.subject,
        "from": format_address(&msg.from, email_redaction),
        "date": msg.date,
        "snippet": msg.snippet,
        "isUnread": msg.is_unread,
        "labels": msg.labels,
        "hasAttachments": msg.has_attachments(),
    })
}

/// Full message shape used by `read_email` and `get_thread`
#[must_use]
pub fn message_full(msg: &EmailMessage, email_redaction: bool) -> Value {
    json!({
        "id": msg.id,
        "threadId": msg.thread_id,
        "subject": msg.subject,
        "from": format_address(&msg.from, email_redaction),
        "to": format_addresses(&msg.to, email_redaction),
        "cc": format_addresses(&msg.cc, email_redaction),
        "date": msg.date,
        "snippet": msg.snippet,
        "body": msg.body,
        "labels": msg.labels,
        "attachments": msg.attachments,
        "isUnread": msg.is_unread,
    })
}

/// Summary shape used by `list_threads`
#[must_use]
pub fn thread_summary(thread: &EmailThread, email_redaction: bool) -> Value {
    json!({
        "id": thread.id,
        "subject": thread.subject,
        "participants": format_addresses(&thread.participants, email_redaction),
        "messageCount": thread.message_count,
        "snippet": thread.snippet,
        "lastMessageDate": thread.last_message_date,
        "labels": thread.labels,
        "isUnread": thread.is_unread,
    })
}
