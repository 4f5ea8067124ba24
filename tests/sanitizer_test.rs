// ABOUTME: Integration tests for the sanitizer stage through the pipeline
// ABOUTME: Covers HTML conversion, invisible-codepoint stripping, and idempotence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use agentcloak::filters::{FilterAction, FilterPipeline};
use common::{init_test_logging, message};

#[test]
fn zero_width_space_is_stripped_and_still_passes() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    let verdict = pipeline.process(message("m1", "friend@example.com", "Lunch plans", "Hel\u{200B}lo"));
    assert_eq!(verdict.action, FilterAction::Pass);
    assert_eq!(verdict.message.body, "Hello");
}

#[test]
fn bidi_controls_are_stripped_from_all_text_fields() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    let mut msg = message("m1", "friend@example.com", "re\u{202E}port", "body\u{2066}text");
    msg.snippet = "snip\u{00AD}pet".to_owned();
    let verdict = pipeline.process(msg);
    assert_eq!(verdict.message.subject, "report");
    assert_eq!(verdict.message.body, "bodytext");
    assert_eq!(verdict.message.snippet, "snippet");
}

#[test]
fn html_body_becomes_plaintext_when_body_is_empty() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    let mut msg = message("m1", "friend@example.com", "Lunch plans", "");
    msg.html_body = Some("<p>Hello <b>there</b></p><script>alert(1)</script>".to_owned());
    let verdict = pipeline.process(msg);
    assert!(verdict.message.html_body.is_none());
    assert!(verdict.message.body.contains("Hello there"));
    assert!(!verdict.message.body.contains("alert(1)"));
    assert!(!verdict.message.body.contains('<'));
}

#[test]
fn html_body_is_dropped_when_plaintext_exists() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    let mut msg = message("m1", "friend@example.com", "Lunch plans", "plain wins");
    msg.html_body = Some("<p>html loses</p>".to_owned());
    let verdict = pipeline.process(msg);
    assert!(verdict.message.html_body.is_none());
    assert_eq!(verdict.message.body, "plain wins");
}

#[test]
fn sanitization_is_idempotent() {
    init_test_logging();
    let pipeline = FilterPipeline::new(None);
    let mut msg = message("m1", "friend@example.com", "sub\u{200C}ject", "bo\u{FEFF}dy");
    msg.html_body = Some("<p>ignored</p>".to_owned());
    let once = pipeline.process(msg);
    let twice = pipeline.process(once.message.clone());
    assert_eq!(once.message, twice.message);
}
