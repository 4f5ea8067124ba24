// ABOUTME: Presenters for thread-level tools: list_threads and get_thread
// ABOUTME: Applies participant-domain blocking to whole threads and batch-filters messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thread tools.
//!
//! Thread-level blocking consults the pipeline's effective blocked-domain
//! list directly rather than re-entering the blocklist stage: only
//! participant domains matter here, and a mixed thread with at least one
//! non-blocked participant stays visible.

use super::format::{format_addresses, message_full, thread_summary};
use super::result::ToolResponse;
use super::{max_results_arg, optional_string_arg, provider_timeout, required_string_arg};
use crate::errors::AppResult;
use crate::filters::blocklist::domain_is_blocked;
use crate::filters::FilterPipeline;
use crate::models::EmailThread;
use crate::providers::{with_timeout, EmailProvider, ThreadListParams};
use serde_json::{json, Value};
use tracing::debug;

/// Whether every participant of a thread belongs to a blocked domain.
/// Threads without participants are never blocked at this level.
fn is_thread_blocked(thread: &EmailThread, blocked_domains: &[String]) -> bool {
    if thread.participants.is_empty() {
        return false;
    }
    thread.participants.iter().all(|participant| {
        participant
            .domain()
            .is_some_and(|domain| domain_is_blocked(&domain, blocked_domains))
    })
}

/// `list_threads`: provider thread listing with thread-level blocking
///
/// # Errors
///
/// Returns an error for invalid arguments or provider failures.
pub async fn list_threads(
    provider: &dyn EmailProvider,
    pipeline: &FilterPipeline,
    args: &Value,
) -> AppResult<ToolResponse> {
    let query = optional_string_arg(args, "query");
    let max_results = max_results_arg(args)?;
    let page_token = optional_string_arg(args, "page_token");

    let listing = with_timeout(
        provider_timeout(),
        provider.list_threads(ThreadListParams {
            query,
            max_results,
            page_token,
        }),
    )
    .await?;

    let mut filtered_count = 0usize;
    let mut summaries: Vec<Value> = Vec::with_capacity(listing.threads.len());
    for thread in &listing.threads {
        if is_thread_blocked(thread, pipeline.blocked_domains()) {
            filtered_count += 1;
        } else {
            summaries.push(thread_summary(thread, pipeline.email_redaction_enabled()));
        }
    }
    debug!(
        "list_threads: {} visible, {} blocked",
        summaries.len(),
        filtered_count
    );

    let mut payload = json!({
        "threads": summaries,
        "totalResults": listing.result_size_estimate,
    });
    if let (Some(obj), Some(token)) = (payload.as_object_mut(), listing.next_page_token) {
        obj.insert("nextPageToken".to_owned(), json!(token));
    }
    if pipeline.show_filtered_count() && filtered_count > 0 {
        if let Some(obj) = payload.as_object_mut() {
            obj.insert("filteredCount".to_owned(), json!(filtered_count));
        }
    }

    Ok(ToolResponse::success(&payload))
}

/// `get_thread`: fetch a thread, batch-filter its messages, elide blocked ones
///
/// # Errors
///
/// Returns an error for invalid arguments or provider failures.
pub async fn get_thread(
    provider: &dyn EmailProvider,
    pipeline: &FilterPipeline,
    args: &Value,
) -> AppResult<ToolResponse> {
    let thread_id = required_string_arg(args, "thread_id")?;

    let content = with_timeout(provider_timeout(), provider.get_thread(thread_id)).await?;
    let outcome = pipeline.process_batch(content.messages);

    let messages: Vec<Value> = outcome
        .passed
        .iter()
        .map(|msg| message_full(msg, pipeline.email_redaction_enabled()))
        .collect();

    let mut payload = json!({
        "id": content.thread.id,
        "subject": content.thread.subject,
        "participants": format_addresses(
            &content.thread.participants,
            pipeline.email_redaction_enabled(),
        ),
        "messageCount": messages.len(),
        "messages": messages,
        "lastMessageDate": content.thread.last_message_date,
    });
    if pipeline.show_filtered_count() && !outcome.blocked.is_empty() {
        if let Some(obj) = payload.as_object_mut() {
            obj.insert("filteredCount".to_owned(), json!(outcome.blocked.len()));
        }
    }

    Ok(ToolResponse::success(&payload))
}
