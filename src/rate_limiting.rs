// ABOUTME: Process-local sliding-window rate limiter for credential verification
// ABOUTME: Tracks recent attempts per source IP and emits retry-after hints
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Credential-Verification Rate Limiting
//!
//! A sliding-window counter over the last N attempts per source IP. The
//! counter is process-local; entries are garbage-collected periodically so
//! the map does not grow with the set of IPs ever seen.

use crate::constants::limits::{AUTH_RATE_LIMIT_ATTEMPTS, AUTH_RATE_LIMIT_WINDOW_SECS};
use dashmap::DashMap;
use serde::Serialize;
use std::net::IpAddr;
use std::time::{Duration, Instant};
use tracing::debug;

/// Rate limit information for one verification attempt
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitInfo {
    /// Whether the attempt was rejected
    pub limited: bool,
    /// Maximum attempts allowed in the window
    pub limit: usize,
    /// Attempts left in the current window
    pub remaining: usize,
    /// Seconds until the oldest attempt ages out, when limited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

/// Sliding-window limiter keyed by source IP
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_attempts: usize,
    window: Duration,
    attempts: DashMap<IpAddr, Vec<Instant>>,
}

impl Default for SlidingWindowLimiter {
    fn default() -> Self {
        Self::new(
            AUTH_RATE_LIMIT_ATTEMPTS,
            Duration::from_secs(AUTH_RATE_LIMIT_WINDOW_SECS),
        )
    }
}

impl SlidingWindowLimiter {
    /// Create a limiter allowing `max_attempts` per `window`
    #[must_use]
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            attempts: DashMap::new(),
        }
    }

    /// Check whether `source` may attempt verification now, recording the
    /// attempt when allowed. Rejected attempts are not recorded, so a
    /// limited source regains capacity as old attempts age out.
    #[must_use]
    pub fn check_and_record(&self, source: IpAddr) -> RateLimitInfo {
        let now = Instant::now();
        let mut entry = self.attempts.entry(source).or_default();
        entry.retain(|t| now.duration_since(*t) < self.window);

        if entry.len() >= self.max_attempts {
            let oldest = entry.iter().min().copied();
            let retry_after = oldest
                .map(|t| self.window.saturating_sub(now.duration_since(t)))
                .unwrap_or(self.window);
            debug!("Rate limiting {source}: {} recent attempts", entry.len());
            return RateLimitInfo {
                limited: true,
                limit: self.max_attempts,
                remaining: 0,
                retry_after_secs: Some(retry_after.as_secs().max(1)),
            };
        }

        entry.push(now);
        RateLimitInfo {
            limited: false,
            limit: self.max_attempts,
            remaining: self.max_attempts - entry.len(),
            retry_after_secs: None,
        }
    }

    /// Drop sources whose recorded attempts have all aged out
    pub fn garbage_collect(&self) {
        let now = Instant::now();
        self.attempts
            .retain(|_, times| times.iter().any(|t| now.duration_since(*t) < self.window));
    }

    /// Number of sources currently tracked
    #[must_use]
    pub fn tracked_sources(&self) -> usize {
        self.attempts.len()
    }
}
