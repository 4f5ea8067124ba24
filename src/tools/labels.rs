// ABOUTME: Presenters for list_labels and get_provider_info
// ABOUTME: Applies the folder allowlist to label listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Label and provider-metadata tools.

use super::provider_timeout;
use super::result::ToolResponse;
use crate::errors::AppResult;
use crate::filters::FilterPipeline;
use crate::providers::{with_timeout, EmailProvider};
use serde_json::json;

/// `list_labels`: list mailbox labels, restricted to the folder allowlist
/// when one is configured
///
/// # Errors
///
/// Returns an error on provider failure.
pub async fn list_labels(
    provider: &dyn EmailProvider,
    pipeline: &FilterPipeline,
) -> AppResult<ToolResponse> {
    let mut labels = with_timeout(provider_timeout(), provider.list_labels()).await?;

    let allowed = pipeline.allowed_folders();
    if !allowed.is_empty() {
        labels.retain(|label| {
            allowed
                .iter()
                .any(|folder| folder.eq_ignore_ascii_case(&label.name))
        });
    }

    Ok(ToolResponse::success(&json!({ "labels": labels })))
}

/// `get_provider_info`: pass-through of provider metadata
///
/// # Errors
///
/// Returns an error if the metadata fails to serialize.
pub fn get_provider_info(provider: &dyn EmailProvider) -> AppResult<ToolResponse> {
    let info = serde_json::to_value(provider.provider_info())?;
    Ok(ToolResponse::success(&info))
}
