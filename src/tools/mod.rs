// ABOUTME: Tool layer: per-operation presenters over the provider and pipeline
// ABOUTME: Dispatches tool calls by name and owns shared argument parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Tool Layer
//!
//! Per-tool presenters consume the provider and the request's filter
//! pipeline together and produce the agent-visible JSON envelope. The
//! envelope dispatches into [`dispatch`] by tool name; unknown names and
//! argument errors come back as stable JSON error responses rather than
//! transport failures.

/// Draft creation and listing
pub mod drafts;
/// Address and message JSON shapes
pub mod format;
/// Label listing and provider metadata
pub mod labels;
/// Message search and read
pub mod messages;
/// Tool response wire types
pub mod result;
/// Thread listing and retrieval
pub mod threads;

pub use result::{ContentBlock, ToolResponse};

use crate::constants::{limits, tools};
use crate::errors::{AppError, AppResult};
use crate::filters::FilterPipeline;
use crate::providers::EmailProvider;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Timeout applied to each provider call made by a presenter
pub(crate) fn provider_timeout() -> Duration {
    Duration::from_secs(limits::PROVIDER_TIMEOUT_SECS)
}

/// Extract a required string argument
pub(crate) fn required_string_arg<'a>(args: &'a Value, name: &str) -> AppResult<&'a str> {
    args.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::missing_field(name))
}

/// Extract an optional string argument
pub(crate) fn optional_string_arg(args: &Value, name: &str) -> Option<String> {
    args.get(name).and_then(Value::as_str).map(str::to_owned)
}

/// Extract and bounds-check `max_results`
pub(crate) fn max_results_arg(args: &Value) -> AppResult<usize> {
    let Some(value) = args.get("max_results") else {
        return Ok(limits::DEFAULT_MAX_RESULTS);
    };
    let requested = value
        .as_u64()
        .ok_or_else(|| AppError::invalid_input("max_results must be an integer"))?;
    let requested = usize::try_from(requested)
        .map_err(|_| AppError::out_of_range("max_results is too large"))?;
    if !(limits::MIN_MAX_RESULTS..=limits::MAX_MAX_RESULTS).contains(&requested) {
        return Err(AppError::out_of_range(format!(
            "max_results must be between {} and {}",
            limits::MIN_MAX_RESULTS,
            limits::MAX_MAX_RESULTS
        )));
    }
    Ok(requested)
}

/// Route a tool call to its presenter. Argument and provider errors are
/// encoded as error responses; this function never fails outward.
pub async fn dispatch(
    name: &str,
    args: &Value,
    provider: &dyn EmailProvider,
    pipeline: &FilterPipeline,
) -> ToolResponse {
    let result = match name {
        tools::SEARCH_EMAILS => messages::search_emails(provider, pipeline, args).await,
        tools::READ_EMAIL => messages::read_email(provider, pipeline, args).await,
        tools::LIST_THREADS => threads::list_threads(provider, pipeline, args).await,
        tools::GET_THREAD => threads::get_thread(provider, pipeline, args).await,
        tools::CREATE_DRAFT => drafts::create_draft(provider, args).await,
        tools::LIST_DRAFTS => drafts::list_drafts(provider, pipeline, args).await,
        tools::LIST_LABELS => labels::list_labels(provider, pipeline).await,
        tools::GET_PROVIDER_INFO => labels::get_provider_info(provider),
        unknown => {
            debug!("Unknown tool requested: {unknown} (known: {:?})", tools::ALL);
            Err(AppError::invalid_input(format!("Unknown tool: {unknown}")))
        }
    };

    match result {
        Ok(response) => response,
        Err(err) => ToolResponse::from_error(&err),
    }
}
