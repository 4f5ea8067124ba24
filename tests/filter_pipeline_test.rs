// ABOUTME: Integration tests for filter pipeline composition and batch semantics
// ABOUTME: Covers short-circuit, folder restriction, attachment stripping, and purity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use agentcloak::filters::{FilterAction, FilterConfig, FilterPipeline};
use common::{attachment, clean_message, init_test_logging, message};

#[test]
fn clean_message_passes_with_defaults() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    let verdict = pipeline.process(clean_message("m1"));
    assert_eq!(verdict.action, FilterAction::Pass);
    assert!(verdict.reason.is_none());
}

#[test]
fn block_short_circuits_before_redaction() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    // Blocked sender carrying text PII would otherwise redact
    let msg = message(
        "m1",
        "alerts@chase.com",
        "Hello",
        "My SSN is 123-45-6789",
    );
    let verdict = pipeline.process(msg);
    assert_eq!(verdict.action, FilterAction::Block);
    assert!(verdict
        .reason
        .as_deref()
        .unwrap()
        .starts_with("Blocked sender domain:"));
    // The stage never ran: the SSN is still present on the returned message
    assert!(verdict.message.body.contains("123-45-6789"));
}

#[test]
fn redacting_stage_yields_redact_verdict() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    let verdict = pipeline.process(message(
        "m1",
        "friend@example.com",
        "Hello",
        "My SSN is 123-45-6789",
    ));
    assert_eq!(verdict.action, FilterAction::Redact);
    assert!(verdict.message.body.contains("[SSN_REDACTED]"));
    assert!(!verdict.message.body.contains("123-45-6789"));
}

#[test]
fn folder_restriction_blocks_regardless_of_content() {
    init_test_logging();
    let config = FilterConfig {
        allowed_folders: vec!["INBOX".to_owned()],
        ..FilterConfig::default()
    };
    let pipeline = FilterPipeline::new(Some(config));

    let mut archived = clean_message("m1");
    archived.labels = vec!["ARCHIVE".to_owned()];
    let verdict = pipeline.process(archived);
    assert_eq!(verdict.action, FilterAction::Block);
    assert_eq!(verdict.reason.as_deref(), Some("folder not in allowed list"));

    // Case-insensitive exact match keeps inbox mail visible
    let mut inbox = clean_message("m2");
    inbox.labels = vec!["inbox".to_owned()];
    assert_eq!(pipeline.process(inbox).action, FilterAction::Pass);
}

#[test]
fn attachments_are_stripped_on_pass() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    let mut msg = clean_message("m1");
    msg.attachments = vec![attachment("report.pdf")];
    let verdict = pipeline.process(msg);
    assert_eq!(verdict.action, FilterAction::Pass);
    assert!(verdict.message.attachments.is_empty());
}

#[test]
fn attachments_survive_when_stripping_disabled() {
    init_test_logging();
    let config = FilterConfig {
        attachment_filtering_enabled: false,
        ..FilterConfig::default()
    };
    let pipeline = FilterPipeline::new(Some(config));
    let mut msg = clean_message("m1");
    msg.attachments = vec![attachment("report.pdf")];
    let verdict = pipeline.process(msg);
    assert_eq!(verdict.message.attachments.len(), 1);
}

#[test]
fn batch_partitions_preserve_input_order() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    let batch = vec![
        clean_message("clean1"),
        message("blocked", "alerts@chase.com", "Hello", "hi"),
        clean_message("clean2"),
    ];
    let outcome = pipeline.process_batch(batch);

    assert_eq!(outcome.passed.len() + outcome.blocked.len(), 3);
    let passed_ids: Vec<&str> = outcome.passed.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(passed_ids, vec!["clean1", "clean2"]);
    assert_eq!(outcome.blocked.len(), 1);
    assert_eq!(outcome.blocked[0].message.id, "blocked");
    assert!(outcome.blocked[0]
        .reason
        .starts_with("Blocked sender domain:"));
}

#[test]
fn blocked_batch_entries_keep_the_original_message() {
    init_test_logging();
    let config = FilterConfig {
        allowed_folders: vec!["INBOX".to_owned()],
        ..FilterConfig::default()
    };
    let pipeline = FilterPipeline::new(Some(config));

    let mut msg = message("m1", "friend@example.com", "Hello", "body");
    msg.labels = vec!["SPAM".to_owned()];
    msg.attachments = vec![attachment("kept.pdf")];
    let outcome = pipeline.process_batch(vec![msg]);

    // The blocked record is the input as it arrived, attachments intact
    assert_eq!(outcome.blocked[0].message.attachments.len(), 1);
}

#[test]
fn redacted_messages_count_as_passed_in_batches() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    let outcome = pipeline.process_batch(vec![message(
        "m1",
        "friend@example.com",
        "Hello",
        "My SSN is 123-45-6789",
    )]);
    assert_eq!(outcome.passed.len(), 1);
    assert!(outcome.passed[0].body.contains("[SSN_REDACTED]"));
}

#[test]
fn processing_is_pure_across_fresh_pipelines() {
    init_test_logging();
    let msg = message(
        "m1",
        "friend@example.com",
        "Quarterly numbers",
        "Total came to $1,234.56 for account number 12345678",
    );
    let first = FilterPipeline::new(None).process(msg.clone());
    let second = FilterPipeline::new(None).process(msg);
    assert_eq!(first.action, second.action);
    assert_eq!(first.message, second.message);
}

#[test]
fn one_pipeline_is_reusable_across_messages() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    let msg = message(
        "m1",
        "friend@example.com",
        "Hello",
        "card ending in 4242 and again card ending in 9999",
    );
    let first = pipeline.process(msg.clone());
    let second = pipeline.process(msg);
    assert_eq!(first.message.body, second.message.body);
}
