// ABOUTME: Filter pipeline composing stages in fixed order with short-circuit on block
// ABOUTME: Handles folder restriction, attachment stripping, and batch semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter pipeline.
//!
//! Deterministic composition of the four stages in fixed order:
//! Blocklist, Sanitizer, PII, Injection. Folder restriction runs before
//! the stages; attachment stripping runs after them and only on non-block
//! outcomes. A block short-circuits: later stages are never consulted.
//!
//! The pipeline is request-scoped and pure with respect to its inputs and
//! the config: no I/O, no shared mutable state, safe to reuse across every
//! message of a request.

use super::blocklist::BlocklistStage;
use super::config::FilterConfig;
use super::injection::InjectionStage;
use super::pii::PiiStage;
use super::sanitizer::SanitizerStage;
use crate::models::EmailMessage;
use tracing::debug;

/// Tri-valued outcome of processing a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    /// No semantic change was made
    Pass,
    /// The message passes downstream with altered text
    Redact,
    /// The message is withheld and reported as filtered
    Block,
}

/// Outcome of one stage or of the whole pipeline for one message
#[derive(Debug, Clone)]
pub struct FilterVerdict {
    /// What happened to the message
    pub action: FilterAction,
    /// Explanation for blocks and redactions
    pub reason: Option<String>,
    /// The (possibly mutated) output message
    pub message: EmailMessage,
}

/// A message withheld by the pipeline, with the original input preserved
#[derive(Debug, Clone)]
pub struct BlockedMessage {
    /// The message as it entered the pipeline
    pub message: EmailMessage,
    /// Why it was withheld
    pub reason: String,
}

/// Partitioned outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Messages that passed, possibly redacted, in input order
    pub passed: Vec<EmailMessage>,
    /// Withheld messages in input order
    pub blocked: Vec<BlockedMessage>,
}

/// One step of the filter pipeline
#[derive(Debug)]
enum FilterStage {
    Blocklist(BlocklistStage),
    Sanitizer(SanitizerStage),
    Pii(PiiStage),
    Injection(InjectionStage),
}

impl FilterStage {
    fn filter(&self, msg: EmailMessage) -> FilterVerdict {
        match self {
            Self::Blocklist(stage) => stage.filter(msg),
            Self::Sanitizer(stage) => stage.filter(msg),
            Self::Pii(stage) => stage.filter(msg),
            Self::Injection(stage) => stage.filter(msg),
        }
    }
}

/// Request-scoped filter pipeline
#[derive(Debug)]
pub struct FilterPipeline {
    config: FilterConfig,
    stages: Vec<FilterStage>,
    blocked_domains: Vec<String>,
}

impl FilterPipeline {
    /// Build a pipeline for one request. An absent config means every
    /// boolean defaults on and every list is empty.
    #[must_use]
    pub fn new(config: Option<FilterConfig>) -> Self {
        let config = config.unwrap_or_default();
        let blocklist = BlocklistStage::from_config(&config);
        let blocked_domains = blocklist.blocked_domains().to_vec();
        let stages = vec![
            FilterStage::Blocklist(blocklist),
            FilterStage::Sanitizer(SanitizerStage),
            FilterStage::Pii(PiiStage::from_config(&config)),
            FilterStage::Injection(InjectionStage::from_config(&config)),
        ];
        Self {
            config,
            stages,
            blocked_domains,
        }
    }

    /// Process one message through folder restriction, the stage sequence,
    /// and attachment stripping.
    #[must_use]
    pub fn process(&self, msg: EmailMessage) -> FilterVerdict {
        if !self.config.allowed_folders.is_empty() {
            let in_allowed = msg.labels.iter().any(|label| {
                self.config
                    .allowed_folders
                    .iter()
                    .any(|folder| folder.eq_ignore_ascii_case(label))
            });
            if !in_allowed {
                return FilterVerdict {
                    action: FilterAction::Block,
                    reason: Some("folder not in allowed list".to_owned()),
                    message: msg,
                };
            }
        }

        let mut current = msg;
        let mut redaction_reason: Option<String> = None;
        for stage in &self.stages {
            let verdict = stage.filter(current);
            match verdict.action {
                FilterAction::Block => {
                    debug!("Message {} blocked: {:?}", verdict.message.id, verdict.reason);
                    return verdict;
                }
                FilterAction::Redact => {
                    redaction_reason = verdict.reason;
                    current = verdict.message;
                }
                FilterAction::Pass => {
                    current = verdict.message;
                }
            }
        }

        if self.config.attachment_filtering_enabled {
            current.attachments.clear();
        }

        if redaction_reason.is_some() {
            FilterVerdict {
                action: FilterAction::Redact,
                reason: redaction_reason,
                message: current,
            }
        } else {
            FilterVerdict {
                action: FilterAction::Pass,
                reason: None,
                message: current,
            }
        }
    }

    /// Process a batch, partitioning by verdict. Redacted messages count as
    /// passed; blocked entries keep the original input message. Both
    /// partitions preserve input order.
    #[must_use]
    pub fn process_batch(&self, msgs: Vec<EmailMessage>) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for msg in msgs {
            let original = msg.clone();
            let verdict = self.process(msg);
            match verdict.action {
                FilterAction::Block => outcome.blocked.push(BlockedMessage {
                    message: original,
                    reason: verdict
                        .reason
                        .unwrap_or_else(|| "blocked by policy".to_owned()),
                }),
                FilterAction::Pass | FilterAction::Redact => {
                    outcome.passed.push(verdict.message);
                }
            }
        }
        outcome
    }

    /// Whether presenters should report elided-message counts
    #[must_use]
    pub const fn show_filtered_count(&self) -> bool {
        self.config.show_filtered_count
    }

    /// Whether raw addresses are hidden from presenters
    #[must_use]
    pub const fn email_redaction_enabled(&self) -> bool {
        self.config.email_redaction_enabled
    }

    /// Whether attachment metadata is stripped from passing messages
    #[must_use]
    pub const fn attachment_filtering_enabled(&self) -> bool {
        self.config.attachment_filtering_enabled
    }

    /// Folder allowlist; empty means unrestricted
    #[must_use]
    pub fn allowed_folders(&self) -> &[String] {
        &self.config.allowed_folders
    }

    /// Effective blocked-domain list after defaults+user merge, used for
    /// thread-level participant checks
    #[must_use]
    pub fn blocked_domains(&self) -> &[String] {
        &self.blocked_domains
    }
}
