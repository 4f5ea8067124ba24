// ABOUTME: Blocklist stage withholding messages by sender domain, sender, or subject
// ABOUTME: Merges built-in financial/security defaults with user-supplied entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blocklist stage.
//!
//! Builds its effective lists once per pipeline: default entries gated by
//! the config toggles, unioned with user-supplied entries which are always
//! applied. User patterns that fail to compile are dropped with a warning,
//! never a failure.

use super::config::FilterConfig;
use super::pipeline::{FilterAction, FilterVerdict};
use crate::models::EmailMessage;
use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Financial institutions, payment processors, brokerages, credit bureaus,
/// and government financial hosts blocked while financial blocking is on.
pub const DEFAULT_FINANCIAL_DOMAINS: &[&str] = &[
    "chase.com",
    "bankofamerica.com",
    "wellsfargo.com",
    "citi.com",
    "citibank.com",
    "usbank.com",
    "capitalone.com",
    "pnc.com",
    "truist.com",
    "tdbank.com",
    "ally.com",
    "discover.com",
    "americanexpress.com",
    "amex.com",
    "barclays.com",
    "hsbc.com",
    "goldmansachs.com",
    "marcus.com",
    "schwab.com",
    "fidelity.com",
    "vanguard.com",
    "etrade.com",
    "morganstanley.com",
    "merrilledge.com",
    "robinhood.com",
    "coinbase.com",
    "kraken.com",
    "binance.com",
    "gemini.com",
    "paypal.com",
    "venmo.com",
    "cash.app",
    "squareup.com",
    "stripe.com",
    "wise.com",
    "westernunion.com",
    "moneygram.com",
    "zellepay.com",
    "experian.com",
    "equifax.com",
    "transunion.com",
    "irs.gov",
    "ssa.gov",
    "treasury.gov",
];

/// Sender-address patterns blocked while sensitive-sender blocking is on.
/// Tested against the lowercased full `from` address.
pub const DEFAULT_SENSITIVE_SENDER_PATTERNS: &[&str] = &[
    r"^security@",
    r"^fraud@",
    r"^alerts?@",
    r"^no-?reply@.*\b(bank|card|pay)",
    r"^billing@",
    r"^payroll@",
    r"^benefits@",
    r"^hr@",
    r"^compliance@",
    r"^admin(istrator)?@",
    r"^account-?security@",
    r"^verification@",
];

/// Subject patterns blocked while security blocking is on
pub const DEFAULT_SECURITY_SUBJECT_PATTERNS: &[&str] = &[
    r"password\s+reset",
    r"reset\s+your\s+password",
    r"verification\s+code",
    r"one[- ]time\s+(code|password|passcode)",
    r"\botp\b",
    r"\b2fa\b",
    r"two[- ]factor",
    r"security\s+(alert|code|notification)",
    r"account\s+(locked|suspended|compromised)",
    r"(sign[- ]?in|login)\s+attempt",
    r"\bmfa\b",
    r"authentication\s+code",
    r"verify\s+your\s+(account|email|identity)",
    r"confirm\s+your\s+identity",
];

/// Subject patterns blocked while financial blocking is on
pub const DEFAULT_FINANCIAL_SUBJECT_PATTERNS: &[&str] = &[
    r"wire\s+transfer",
    r"payment\s+(due|overdue|failed|received|confirmation)",
    r"\binvoice\b",
    r"account\s+statement",
    r"available\s+balance",
    r"direct\s+deposit",
    r"tax\s+(return|refund|document)",
    r"\bw-2\b",
    r"\b1099\b",
    r"credit\s+(score|report|limit)",
    r"loan\s+(application|approval|payment)",
    r"\bmortgage\b",
    r"\boverdraft\b",
    r"transaction\s+alert",
];

fn compile_patterns(sources: impl IntoIterator<Item = String>) -> Vec<Regex> {
    sources
        .into_iter()
        .filter_map(|src| {
            RegexBuilder::new(&src)
                .case_insensitive(true)
                .build()
                .map_err(|err| {
                    warn!("Dropping blocklist pattern that failed to compile: {src:?}: {err}");
                })
                .ok()
        })
        .collect()
}

/// Whether `domain` matches a blocked entry exactly or as a subdomain.
///
/// Both sides are expected lowercased; entries match `domain == entry` or
/// `domain` ending in `.entry`.
#[must_use]
pub fn domain_is_blocked(domain: &str, blocked: &[String]) -> bool {
    blocked.iter().any(|entry| {
        domain == entry || (domain.len() > entry.len() && domain.ends_with(&format!(".{entry}")))
    })
}

/// Compute the effective blocked-domain list for a config:
/// defaults (when financial blocking is on) unioned with user entries.
#[must_use]
pub fn effective_blocked_domains(config: &FilterConfig) -> Vec<String> {
    let mut domains: Vec<String> = if config.financial_blocking_enabled {
        DEFAULT_FINANCIAL_DOMAINS
            .iter()
            .map(|d| (*d).to_owned())
            .collect()
    } else {
        Vec::new()
    };
    for user in &config.blocked_domains {
        let lowered = user.to_lowercase();
        if !domains.contains(&lowered) {
            domains.push(lowered);
        }
    }
    domains
}

/// Blocklist stage with precompiled effective lists
#[derive(Debug)]
pub struct BlocklistStage {
    domains: Vec<String>,
    sender_patterns: Vec<Regex>,
    subject_patterns: Vec<Regex>,
}

impl BlocklistStage {
    /// Build the stage from a resolved config, merging defaults per the
    /// enablement toggles with user entries.
    #[must_use]
    pub fn from_config(config: &FilterConfig) -> Self {
        let mut sender_sources: Vec<String> = Vec::new();
        if config.sensitive_sender_blocking_enabled {
            sender_sources.extend(
                DEFAULT_SENSITIVE_SENDER_PATTERNS
                    .iter()
                    .map(|p| (*p).to_owned()),
            );
        }
        sender_sources.extend(config.blocked_sender_patterns.iter().cloned());

        let mut subject_sources: Vec<String> = Vec::new();
        if config.security_blocking_enabled {
            subject_sources.extend(
                DEFAULT_SECURITY_SUBJECT_PATTERNS
                    .iter()
                    .map(|p| (*p).to_owned()),
            );
        }
        if config.financial_blocking_enabled {
            subject_sources.extend(
                DEFAULT_FINANCIAL_SUBJECT_PATTERNS
                    .iter()
                    .map(|p| (*p).to_owned()),
            );
        }
        subject_sources.extend(config.blocked_subject_patterns.iter().cloned());

        Self {
            domains: effective_blocked_domains(config),
            sender_patterns: compile_patterns(sender_sources),
            subject_patterns: compile_patterns(subject_sources),
        }
    }

    /// The effective blocked-domain list after defaults+user merge
    #[must_use]
    pub fn blocked_domains(&self) -> &[String] {
        &self.domains
    }

    /// Evaluate the blocklist against one message.
    ///
    /// Decision order: sender domain, then sender patterns, then subject
    /// patterns. First match blocks; otherwise the message passes unchanged.
    #[must_use]
    pub fn filter(&self, msg: EmailMessage) -> FilterVerdict {
        if let Some(domain) = msg.from.domain() {
            if domain_is_blocked(&domain, &self.domains) {
                return FilterVerdict {
                    action: FilterAction::Block,
                    reason: Some(format!("Blocked sender domain: {domain}")),
                    message: msg,
                };
            }
        }

        let sender = msg.from.email.to_lowercase();
        for pattern in &self.sender_patterns {
            if pattern.is_match(&sender) {
                return FilterVerdict {
                    action: FilterAction::Block,
                    reason: Some(format!("Blocked sender pattern: {}", pattern.as_str())),
                    message: msg,
                };
            }
        }

        let subject = msg.subject.to_lowercase();
        for pattern in &self.subject_patterns {
            if pattern.is_match(&subject) {
                return FilterVerdict {
                    action: FilterAction::Block,
                    reason: Some(format!("Blocked subject pattern: {}", pattern.as_str())),
                    message: msg,
                };
            }
        }

        FilterVerdict {
            action: FilterAction::Pass,
            reason: None,
            message: msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdomains_match_blocked_domains() {
        let blocked = vec!["chase.com".to_owned()];
        assert!(domain_is_blocked("chase.com", &blocked));
        assert!(domain_is_blocked("alerts.chase.com", &blocked));
        assert!(!domain_is_blocked("notchase.com", &blocked));
        assert!(!domain_is_blocked("chase.com.evil.example", &blocked));
    }

    #[test]
    fn invalid_user_patterns_are_dropped() {
        let compiled = compile_patterns(vec!["[unclosed".to_owned(), "ok.*".to_owned()]);
        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled[0].as_str(), "ok.*");
    }

    #[test]
    fn user_domains_apply_without_financial_defaults() {
        let config = FilterConfig {
            financial_blocking_enabled: false,
            blocked_domains: vec!["Evil.Example".to_owned()],
            ..FilterConfig::default()
        };
        let domains = effective_blocked_domains(&config);
        assert_eq!(domains, vec!["evil.example"]);
    }
}
