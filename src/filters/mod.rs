// ABOUTME: Content-filter pipeline module: staged message transformation and verdicts
// ABOUTME: Re-exports the pipeline, its config, and the individual filter stages
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Content-Filter Pipeline
//!
//! Every message returned to an agent first passes through this pipeline,
//! which maps an inbound message to a verdict (pass, redact, block) with a
//! possibly-mutated output message. Stages run in a fixed order with
//! short-circuit on block; batches compose per-message verdicts while
//! preserving input order.

/// Blocklist stage and default blocklist constants
pub mod blocklist;
/// Per-credential configuration record
pub mod config;
/// Prompt-injection detection stage
pub mod injection;
/// PII redaction stage
pub mod pii;
/// Stage composition, verdicts, and batch semantics
pub mod pipeline;
/// HTML and Unicode normalization stage
pub mod sanitizer;

pub use config::FilterConfig;
pub use pipeline::{BatchOutcome, BlockedMessage, FilterAction, FilterPipeline, FilterVerdict};
