// ABOUTME: Per-credential filter configuration record with serde defaults
// ABOUTME: Drives stage enablement, blocklist merging, and presenter behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-credential filter configuration.
//!
//! The configuration row is resolved once per request from storage and is
//! never mutated by the pipeline. An absent row means every boolean is on
//! and every list is empty, so `FilterConfig::default()` and a missing
//! field in a partial JSON row both land on the permissive-filtering
//! defaults.

use serde::{Deserialize, Serialize};

const fn enabled() -> bool {
    true
}

/// Enablement flags and user-supplied blocklists for one credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    /// Run the PII redaction stage
    pub pii_redaction_enabled: bool,
    /// Redact raw email addresses in text and hide them in presenters
    pub email_redaction_enabled: bool,
    /// Redact formatted dollar amounts
    pub dollar_amount_redaction_enabled: bool,
    /// Run the prompt-injection detection stage
    pub injection_detection_enabled: bool,
    /// Presenters include `filteredCount` when messages were elided
    pub show_filtered_count: bool,
    /// Apply the default security subject patterns
    pub security_blocking_enabled: bool,
    /// Apply the default financial domains and subject patterns
    pub financial_blocking_enabled: bool,
    /// Apply the default sensitive-sender patterns
    pub sensitive_sender_blocking_enabled: bool,
    /// Strip attachment metadata from passing messages
    pub attachment_filtering_enabled: bool,
    /// When non-empty, block any message whose labels miss every entry
    pub allowed_folders: Vec<String>,
    /// User-added blocked domains, always applied
    pub blocked_domains: Vec<String>,
    /// User-added sender regex patterns, always applied
    pub blocked_sender_patterns: Vec<String>,
    /// User-added subject regex patterns, always applied
    pub blocked_subject_patterns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            pii_redaction_enabled: enabled(),
            email_redaction_enabled: enabled(),
            dollar_amount_redaction_enabled: enabled(),
            injection_detection_enabled: enabled(),
            show_filtered_count: enabled(),
            security_blocking_enabled: enabled(),
            financial_blocking_enabled: enabled(),
            sensitive_sender_blocking_enabled: enabled(),
            attachment_filtering_enabled: enabled(),
            allowed_folders: Vec::new(),
            blocked_domains: Vec::new(),
            blocked_sender_patterns: Vec::new(),
            blocked_subject_patterns: Vec::new(),
        }
    }
}
