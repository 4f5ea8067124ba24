// ABOUTME: Request envelope: bearer resolution, per-request context construction, dispatch
// ABOUTME: Builds a fresh provider and pipeline for every call; no state crosses requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Request Envelope
//!
//! On each inbound agent call: verify the bearer credential, resolve the
//! connection and filter config from storage, construct a provider and a
//! pipeline scoped to this request only, and dispatch the named tool.
//! There is no per-session affinity; the process serves many requests in
//! parallel, each with its own context.

use crate::auth::CredentialAuthenticator;
use crate::errors::AppError;
use crate::filters::FilterPipeline;
use crate::providers::ProviderFactory;
use crate::storage::CredentialStore;
use crate::tools::{self, ToolResponse};
use serde_json::Value;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// One inbound tool call from an agent
#[derive(Debug, Clone)]
pub struct ToolRequest {
    /// Name of the tool to invoke
    pub tool: String,
    /// Tool arguments as a JSON object
    pub arguments: Value,
    /// Raw `Authorization` header value, if present
    pub auth_header: Option<String>,
    /// Source address, used for verification rate limiting
    pub source: IpAddr,
}

/// Serves tool calls by constructing a per-request provider and pipeline
pub struct RequestEnvelope {
    store: Arc<dyn CredentialStore>,
    providers: Arc<dyn ProviderFactory>,
    authenticator: CredentialAuthenticator,
}

impl RequestEnvelope {
    /// Create an envelope over storage and a provider factory
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, providers: Arc<dyn ProviderFactory>) -> Self {
        let authenticator = CredentialAuthenticator::new(Arc::clone(&store));
        Self {
            store,
            providers,
            authenticator,
        }
    }

    /// Handle one tool call end to end. Every failure mode is encoded as a
    /// tool error response with the stable JSON error form.
    pub async fn handle(&self, request: &ToolRequest) -> ToolResponse {
        let auth = match self
            .authenticator
            .authenticate(request.auth_header.as_deref(), request.source)
            .await
        {
            Ok(auth) => auth,
            Err(err) => return ToolResponse::from_error(&err),
        };

        let connection = match self.store.get_connection(auth.connection_id).await {
            Ok(Some(connection)) => connection,
            Ok(None) => {
                warn!("Credential {} references missing connection", auth.credential_id);
                return ToolResponse::from_error(&AppError::not_found("Connection"));
            }
            Err(err) => {
                warn!("Connection lookup failed: {err}");
                return ToolResponse::from_error(&AppError::internal("connection lookup failed"));
            }
        };

        let filter_config = match self.store.get_filter_config(connection.id).await {
            Ok(config) => config,
            Err(err) => {
                warn!("Filter config lookup failed: {err}");
                return ToolResponse::from_error(&AppError::internal(
                    "filter configuration unavailable",
                ));
            }
        };

        let pipeline = FilterPipeline::new(filter_config);
        let provider = match self
            .providers
            .create(&connection.provider_type, &connection.credentials)
        {
            Ok(provider) => provider,
            Err(err) => return ToolResponse::from_error(&err),
        };

        let start = Instant::now();
        let response =
            tools::dispatch(&request.tool, &request.arguments, provider.as_ref(), &pipeline).await;

        // Best-effort: a failed touch never aborts the request
        if let Err(err) = self
            .store
            .touch_credential_last_used(auth.credential_id)
            .await
        {
            warn!("Failed to update credential last-used timestamp: {err}");
        }

        info!(
            tool = %request.tool,
            credential_id = %auth.credential_id,
            duration_ms = start.elapsed().as_millis() as u64,
            is_error = response.is_error,
            "Tool call completed"
        );
        response
    }

    /// Periodic cleanup of the rate limiter's per-IP state
    pub fn garbage_collect(&self) {
        self.authenticator.garbage_collect();
    }
}
