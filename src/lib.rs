// ABOUTME: Main library entry point for the AgentCloak email access proxy
// ABOUTME: Exposes the filter pipeline, tool layer, and request envelope modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # AgentCloak
//!
//! A read-mostly email access proxy that stands between an untrusted
//! automated agent and a user's mailbox. Agents authenticate with an
//! opaque bearer credential and invoke a small set of message-retrieval
//! and draft-creation tools; every message returned to them first passes
//! through a content-filter pipeline that may block, redact, or pass it.
//!
//! ## Architecture
//!
//! - **Models**: a single normalized email record used everywhere downstream
//! - **Filters**: the staged pipeline (blocklist, sanitizer, PII redaction,
//!   injection detection) with per-credential configuration
//! - **Providers**: the abstract backend contract the pipeline is layered over
//! - **Tools**: per-operation presenters rendering agent-visible JSON
//! - **Envelope**: bearer resolution and per-request context construction
//!
//! Messages are request-scoped and never persisted. A pipeline and a
//! provider are built fresh for every request; nothing carries across
//! requests except the process-local rate limiter.
//!
//! ## Example
//!
//! ```rust
//! use agentcloak::filters::{FilterConfig, FilterPipeline};
//!
//! let pipeline = FilterPipeline::new(Some(FilterConfig::default()));
//! assert!(pipeline.show_filtered_count());
//! ```

/// Bearer credential generation, validation, and verification
pub mod auth;

/// Shared constants: prefixes, limits, tool names
pub mod constants;

/// Request envelope: per-request construction and dispatch
pub mod envelope;

/// Unified error types and the stable JSON error form
pub mod errors;

/// Content-filter pipeline and its stages
pub mod filters;

/// Structured logging configuration
pub mod logging;

/// Normalized email data model
pub mod models;

/// Abstract email provider contract
pub mod providers;

/// Sliding-window rate limiting for credential verification
pub mod rate_limiting;

/// Storage read contract for credentials and connections
pub mod storage;

/// Tool presenters and dispatch
pub mod tools;
