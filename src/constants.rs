// ABOUTME: Centralized constants for credential formats, limits, and tool names
// ABOUTME: Single source of truth for values shared across auth, tools, and envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Application Constants
//!
//! Shared constants used across the crate. Values that govern the wire
//! contract (tool names, the bearer prefix) live here so the envelope,
//! the tool layer, and tests all agree on them.

/// Bearer credential format constants
pub mod key_prefixes {
    /// Fixed prefix every AgentCloak bearer credential starts with.
    /// Tokens with any other prefix are rejected before lookup.
    pub const BEARER: &str = "ac_";

    /// Number of random alphanumeric characters following the prefix
    pub const BEARER_RANDOM_LEN: usize = 32;

    /// Total length of a well-formed bearer token
    pub const BEARER_TOKEN_LEN: usize = 35; // "ac_" + 32 chars
}

/// Request and list size limits
pub mod limits {
    /// Default number of results for search and list operations
    pub const DEFAULT_MAX_RESULTS: usize = 20;

    /// Smallest accepted `max_results` value
    pub const MIN_MAX_RESULTS: usize = 1;

    /// Largest accepted `max_results` value
    pub const MAX_MAX_RESULTS: usize = 200;

    /// Maximum snippet length in characters
    pub const SNIPPET_MAX_CHARS: usize = 200;

    /// Default timeout applied to every provider call
    pub const PROVIDER_TIMEOUT_SECS: u64 = 30;

    /// Credential-verification attempts allowed per source IP per window
    pub const AUTH_RATE_LIMIT_ATTEMPTS: usize = 10;

    /// Sliding-window length for the auth rate limiter
    pub const AUTH_RATE_LIMIT_WINDOW_SECS: u64 = 60;
}

/// HTTP status codes used by `ErrorCode::http_status`
pub mod http_status {
    /// 400 Bad Request
    pub const BAD_REQUEST: u16 = 400;
    /// 401 Unauthorized
    pub const UNAUTHORIZED: u16 = 401;
    /// 404 Not Found
    pub const NOT_FOUND: u16 = 404;
    /// 429 Too Many Requests
    pub const TOO_MANY_REQUESTS: u16 = 429;
    /// 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
    /// 502 Bad Gateway
    pub const BAD_GATEWAY: u16 = 502;
    /// 504 Gateway Timeout
    pub const GATEWAY_TIMEOUT: u16 = 504;
}

/// Names of the tools exposed to agents
pub mod tools {
    /// Search messages matching a provider query
    pub const SEARCH_EMAILS: &str = "search_emails";
    /// Read a single message by id
    pub const READ_EMAIL: &str = "read_email";
    /// List conversation threads
    pub const LIST_THREADS: &str = "list_threads";
    /// Fetch a thread with its messages
    pub const GET_THREAD: &str = "get_thread";
    /// Create a draft message
    pub const CREATE_DRAFT: &str = "create_draft";
    /// List existing drafts
    pub const LIST_DRAFTS: &str = "list_drafts";
    /// List mailbox labels/folders
    pub const LIST_LABELS: &str = "list_labels";
    /// Describe the connected provider's capabilities
    pub const GET_PROVIDER_INFO: &str = "get_provider_info";

    /// Every tool name the envelope will dispatch
    pub const ALL: &[&str] = &[
        SEARCH_EMAILS,
        READ_EMAIL,
        LIST_THREADS,
        GET_THREAD,
        CREATE_DRAFT,
        LIST_DRAFTS,
        LIST_LABELS,
        GET_PROVIDER_INFO,
    ];
}

/// Stable machine-readable error kinds used in tool error payloads
pub mod error_kinds {
    /// Missing, malformed, unknown, or revoked bearer credential
    pub const UNAUTHENTICATED: &str = "unauthenticated";
    /// Message withheld by the filter pipeline
    pub const BLOCKED: &str = "blocked";
    /// Malformed or otherwise unprocessable request
    pub const INVALID_REQUEST: &str = "invalid_request";
    /// Too many credential-verification attempts
    pub const RATE_LIMITED: &str = "rate_limited";
    /// Upstream provider failure
    pub const PROVIDER_ERROR: &str = "provider_error";
    /// Referenced resource does not exist
    pub const NOT_FOUND: &str = "not_found";
}
