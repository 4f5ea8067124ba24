// ABOUTME: Presenters for draft tools: create_draft and list_drafts
// ABOUTME: Drafts are user-authored content and bypass the filter pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draft tools.
//!
//! No pipeline is applied to drafts. The only policy here is recipient
//! resolution: a reply draft with no explicit recipients inherits the
//! thread's participants, and a draft that still has no recipients is an
//! input error.

use super::format::format_addresses;
use super::result::ToolResponse;
use super::{max_results_arg, optional_string_arg, provider_timeout, required_string_arg};
use crate::errors::{AppError, AppResult};
use crate::filters::FilterPipeline;
use crate::providers::{with_timeout, DraftRequest, EmailProvider};
use serde_json::{json, Value};

fn string_array_arg(args: &Value, name: &str) -> Vec<String> {
    args.get(name)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// `create_draft`: create a draft, resolving reply recipients if needed
///
/// # Errors
///
/// Returns an error when no recipients can be resolved, for invalid
/// arguments, or for provider failures.
pub async fn create_draft(
    provider: &dyn EmailProvider,
    args: &Value,
) -> AppResult<ToolResponse> {
    let subject = required_string_arg(args, "subject")?;
    let body = required_string_arg(args, "body")?;
    let thread_id = optional_string_arg(args, "in_reply_to_thread_id");
    let mut to = string_array_arg(args, "to");

    if to.is_empty() {
        if let Some(ref tid) = thread_id {
            let content = with_timeout(provider_timeout(), provider.get_thread(tid)).await?;
            to = content
                .thread
                .participants
                .iter()
                .filter(|p| !p.email.is_empty())
                .map(|p| p.email.clone())
                .collect();
        }
    }
    if to.is_empty() {
        return Err(AppError::invalid_input(
            "create_draft requires recipients or a thread to reply to",
        ));
    }

    let created = with_timeout(
        provider_timeout(),
        provider.create_draft(DraftRequest {
            to,
            subject: subject.to_owned(),
            body: body.to_owned(),
            in_reply_to_thread_id: thread_id,
        }),
    )
    .await?;

    Ok(ToolResponse::success(&json!({
        "draftId": created.draft_id,
        "messageId": created.message_id,
        "status": "created",
    })))
}

/// `list_drafts`: list drafts with recipients under the address rule
///
/// # Errors
///
/// Returns an error for invalid arguments or provider failures.
pub async fn list_drafts(
    provider: &dyn EmailProvider,
    pipeline: &FilterPipeline,
    args: &Value,
) -> AppResult<ToolResponse> {
    let max_results = max_results_arg(args)?;

    let drafts = with_timeout(provider_timeout(), provider.list_drafts(Some(max_results))).await?;

    let rendered: Vec<Value> = drafts
        .iter()
        .map(|draft| {
            json!({
                "id": draft.id,
                "to": format_addresses(&draft.to, pipeline.email_redaction_enabled()),
                "subject": draft.subject,
                "snippet": draft.snippet,
            })
        })
        .collect();

    Ok(ToolResponse::success(&json!({ "drafts": rendered })))
}
