// ABOUTME: Sanitizer stage producing plaintext-only, control-character-free messages
// ABOUTME: Converts HTML bodies to text and strips invisible/bidi Unicode codepoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sanitizer stage.
//!
//! Normalization, not policy: the stage always reports `Pass` even when it
//! changed text. After it runs, `html_body` is gone and `body`, `subject`,
//! and `snippet` contain no codepoint from the strip set below.

use super::pipeline::{FilterAction, FilterVerdict};
use crate::models::EmailMessage;

/// Wrap width for HTML-to-text conversion
const TEXT_WRAP_COLUMNS: usize = 120;

/// Invisible and direction-control codepoints removed from message text.
///
/// Zero-width characters, bidi embedding/isolate controls, variation
/// selectors, tag characters, soft hyphen, line/paragraph separators, and
/// the Arabic letter mark and Mongolian vowel separator. All of these have
/// been used to smuggle instructions past human review.
const fn in_strip_set(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200D}'   // zero-width space/non-joiner/joiner
            | '\u{2060}'          // word joiner
            | '\u{FEFF}'          // zero-width no-break space / BOM
            | '\u{2066}'..='\u{2069}' // bidi isolates
            | '\u{202A}'..='\u{202E}' // bidi embedding/override
            | '\u{E0001}'..='\u{E007F}' // tag characters
            | '\u{FE00}'..='\u{FE0F}' // variation selectors
            | '\u{00AD}'          // soft hyphen
            | '\u{2028}'..='\u{2029}' // line/paragraph separator
            | '\u{061C}'          // arabic letter mark
            | '\u{180E}' // mongolian vowel separator
    )
}

fn strip_invisible(text: &str) -> String {
    if text.chars().any(in_strip_set) {
        text.chars().filter(|c| !in_strip_set(*c)).collect()
    } else {
        text.to_owned()
    }
}

/// Convert an HTML body to wrapped plaintext.
///
/// The trivial decorator renders link text without hrefs and emits no
/// formatting markers; `style` and `script` content never reaches the
/// renderer.
fn html_to_text(html: &str) -> String {
    html2text::config::with_decorator(html2text::render::TrivialDecorator::new())
        .string_from_read(html.as_bytes(), TEXT_WRAP_COLUMNS)
        .unwrap_or_default()
}

/// Sanitizer stage: HTML conversion plus invisible-codepoint stripping
#[derive(Debug, Clone, Copy, Default)]
pub struct SanitizerStage;

impl SanitizerStage {
    /// Normalize a message. Always returns `Pass` with the modified message.
    #[must_use]
    pub fn filter(&self, mut msg: EmailMessage) -> FilterVerdict {
        if let Some(html) = msg.html_body.take() {
            if msg.body.is_empty() {
                msg.body = html_to_text(&html);
            }
        }

        msg.body = strip_invisible(&msg.body);
        msg.subject = strip_invisible(&msg.subject);
        msg.snippet = strip_invisible(&msg.snippet);

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
    fn strips_zero_width_space() {
        assert_eq!(strip_invisible("Hel\u{200B}lo"), "Hello");
    }

    #[test]
    fn strips_supplementary_plane_tags() {
        assert_eq!(strip_invisible("a\u{E0041}\u{E0042}b"), "ab");
    }

    #[test]
    fn leaves_clean_text_alone() {
        assert_eq!(strip_invisible("ordinary text"), "ordinary text");
    }
}
