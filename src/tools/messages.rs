// ABOUTME: Presenters for message-level tools: search_emails and read_email
// ABOUTME: Composes provider calls with the filter pipeline and renders JSON results
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message tools.

use super::format::{message_full, message_summary};
use super::result::ToolResponse;
use super::{max_results_arg, optional_string_arg, provider_timeout, required_string_arg};
use crate::errors::AppResult;
use crate::filters::{FilterAction, FilterPipeline};
use crate::providers::{with_timeout, EmailProvider, SearchParams};
use serde_json::{json, Value};
use tracing::debug;

/// `search_emails`: provider search filtered through the pipeline
///
/// # Errors
///
/// Returns an error for invalid arguments or provider failures.
pub async fn search_emails(
    provider: &dyn EmailProvider,
    pipeline: &FilterPipeline,
    args: &Value,
) -> AppResult<ToolResponse> {
    let query = required_string_arg(args, "query")?;
    let max_results = max_results_arg(args)?;
    let page_token = optional_string_arg(args, "page_token");

    let results = with_timeout(
        provider_timeout(),
        provider.search(SearchParams {
            query: query.to_owned(),
            max_results,
            page_token,
        }),
    )
    .await?;

    let estimate = results.result_size_estimate;
    let next_page_token = results.next_page_token.clone();
    let outcome = pipeline.process_batch(results.messages);
    debug!(
        "search_emails: {} passed, {} blocked",
        outcome.passed.len(),
        outcome.blocked.len()
    );

    let summaries: Vec<Value> = outcome
        .passed
        .iter()
        .map(|msg| message_summary(msg, pipeline.email_redaction_enabled()))
        .collect();

    let mut payload = json!({
        "results": summaries,
        "totalResults": estimate,
    });
    if let (Some(obj), Some(token)) = (payload.as_object_mut(), next_page_token) {
        obj.insert("nextPageToken".to_owned(), json!(token));
    }
    if pipeline.show_filtered_count() && !outcome.blocked.is_empty() {
        if let Some(obj) = payload.as_object_mut() {
            obj.insert("filteredCount".to_owned(), json!(outcome.blocked.len()));
        }
    }

    Ok(ToolResponse::success(&payload))
}

/// `read_email`: fetch one message; a block verdict becomes an error result
///
/// # Errors
///
/// Returns an error for invalid arguments or provider failures.
pub async fn read_email(
    provider: &dyn EmailProvider,
    pipeline: &FilterPipeline,
    args: &Value,
) -> AppResult<ToolResponse> {
    let message_id = required_string_arg(args, "message_id")?;

    let message = with_timeout(provider_timeout(), provider.get_message(message_id)).await?;
    let verdict = pipeline.process(message);

    if verdict.action == FilterAction::Block {
        let payload = json!({
            "error": "blocked",
            "reason": verdict.reason,
            "message_id": message_id,
        });
        return Ok(ToolResponse::error(&payload));
    }

    Ok(ToolResponse::success(&message_full(
        &verdict.message,
        pipeline.email_redaction_enabled(),
    )))
}
