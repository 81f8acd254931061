//! In-memory rate limiting for AI recommendation requests.
//!
//! DESIGN
//! ======
//! Sliding-window counters keyed by client (signed-in user id, or
//! `Uuid::nil()` for the shared anonymous bucket):
//! - Per-client: 10 requests/min
//! - Global: 20 LLM calls/min
//! - Token budget: 50k tokens/client/hour
//!
//! All limits are overridable with `RATE_LIMIT_*` env vars.
//!
//! TRADE-OFFS
//! ==========
//! Token budgeting reserves `max_tokens` before each call so concurrent
//! requests see each other's in-flight usage. Reservations are settled with
//! actual usage (or released on failure) as soon as the call returns.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::config::env_parse;
use crate::frame::ErrorCode;

const DEFAULT_PER_CLIENT_LIMIT: usize = 10;
const DEFAULT_PER_CLIENT_WINDOW_SECS: u64 = 60;
const DEFAULT_GLOBAL_LIMIT: usize = 20;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;
const DEFAULT_TOKEN_BUDGET: u64 = 50_000;
const DEFAULT_TOKEN_WINDOW_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_client_limit: usize,
    pub per_client_window: Duration,
    pub global_limit: usize,
    pub global_window: Duration,
    pub token_budget: u64,
    pub token_window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_client_limit: DEFAULT_PER_CLIENT_LIMIT,
            per_client_window: Duration::from_secs(DEFAULT_PER_CLIENT_WINDOW_SECS),
            global_limit: DEFAULT_GLOBAL_LIMIT,
            global_window: Duration::from_secs(DEFAULT_GLOBAL_WINDOW_SECS),
            token_budget: DEFAULT_TOKEN_BUDGET,
            token_window: Duration::from_secs(DEFAULT_TOKEN_WINDOW_SECS),
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            per_client_limit: env_parse("RATE_LIMIT_PER_CLIENT", DEFAULT_PER_CLIENT_LIMIT),
            per_client_window: Duration::from_secs(env_parse(
                "RATE_LIMIT_PER_CLIENT_WINDOW_SECS",
                DEFAULT_PER_CLIENT_WINDOW_SECS,
            )),
            global_limit: env_parse("RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            global_window: Duration::from_secs(env_parse("RATE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS)),
            token_budget: env_parse("RATE_LIMIT_TOKEN_BUDGET", DEFAULT_TOKEN_BUDGET),
            token_window: Duration::from_secs(env_parse("RATE_LIMIT_TOKEN_WINDOW_SECS", DEFAULT_TOKEN_WINDOW_SECS)),
        }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum RateLimitError {
    #[error("too many recommendation requests (max {limit} per {window_secs}s)")]
    PerClientExceeded { limit: usize, window_secs: u64 },
    #[error("the AI herbalist is busy (max {limit} requests per {window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
    #[error("token budget exceeded (max {budget} tokens per {window_secs}s)")]
    TokenBudgetExceeded { budget: u64, window_secs: u64 },
}

impl ErrorCode for RateLimitError {
    fn error_code(&self) -> &'static str {
        "E_RATE_LIMITED"
    }

    fn retryable(&self) -> bool {
        true
    }
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<Windows>>,
    config: RateLimitConfig,
}

#[derive(Default)]
struct Windows {
    client_requests: HashMap<Uuid, VecDeque<Instant>>,
    global_requests: VecDeque<Instant>,
    /// Settled token usage: (timestamp, tokens).
    client_tokens: HashMap<Uuid, VecDeque<(Instant, u64)>>,
    /// In-flight reservations: (timestamp, tokens).
    client_reservations: HashMap<Uuid, VecDeque<(Instant, u64)>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RateLimitConfig::from_env())
    }

    #[must_use]
    pub fn with_config(config: RateLimitConfig) -> Self {
        Self { inner: Arc::new(Mutex::new(Windows::default())), config }
    }

    /// Check per-client and global request limits, then record the request.
    ///
    /// # Errors
    ///
    /// Returns the first limit that would be exceeded; nothing is recorded.
    pub fn check_and_record(&self, client: Uuid) -> Result<(), RateLimitError> {
        self.check_and_record_at(client, Instant::now())
    }

    fn check_and_record_at(&self, client: Uuid, now: Instant) -> Result<(), RateLimitError> {
        let mut w = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let cfg = self.config;

        prune(&mut w.global_requests, now, cfg.global_window, |t| *t);
        if w.global_requests.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        let client_deque = w.client_requests.entry(client).or_default();
        prune(client_deque, now, cfg.per_client_window, |t| *t);
        if client_deque.len() >= cfg.per_client_limit {
            return Err(RateLimitError::PerClientExceeded {
                limit: cfg.per_client_limit,
                window_secs: cfg.per_client_window.as_secs(),
            });
        }

        client_deque.push_back(now);
        w.global_requests.push_back(now);
        Ok(())
    }

    /// Reserve `tokens` of the client's budget before an LLM call.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::TokenBudgetExceeded`] if settled usage plus
    /// outstanding reservations plus `tokens` would exceed the budget.
    pub fn reserve_tokens(&self, client: Uuid, tokens: u64) -> Result<(), RateLimitError> {
        self.reserve_tokens_at(client, tokens, Instant::now())
    }

    fn reserve_tokens_at(&self, client: Uuid, tokens: u64, now: Instant) -> Result<(), RateLimitError> {
        let mut w = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let cfg = self.config;
        let exceeded =
            || RateLimitError::TokenBudgetExceeded { budget: cfg.token_budget, window_secs: cfg.token_window.as_secs() };

        let used = windowed_sum(w.client_tokens.entry(client).or_default(), now, cfg.token_window);
        let reserved = windowed_sum(w.client_reservations.entry(client).or_default(), now, cfg.token_window);
        let projected = used
            .checked_add(reserved)
            .and_then(|n| n.checked_add(tokens))
            .ok_or_else(exceeded)?;

        // A zero-token check fails once the budget is fully spent.
        let over = if tokens == 0 { projected >= cfg.token_budget } else { projected > cfg.token_budget };
        if over {
            return Err(exceeded());
        }
        if tokens > 0 {
            w.client_reservations
                .entry(client)
                .or_default()
                .push_back((now, tokens));
        }
        Ok(())
    }

    /// Settle a reservation with the actual token usage of a completed call.
    pub fn record_tokens(&self, client: Uuid, used: u64, reserved: u64) {
        self.record_tokens_at(client, used, reserved, Instant::now());
    }

    fn record_tokens_at(&self, client: Uuid, used: u64, reserved: u64, now: Instant) {
        let mut w = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let window = self.config.token_window;
        let reservations = w.client_reservations.entry(client).or_default();
        prune(reservations, now, window, |(t, _)| *t);
        consume(reservations, reserved);
        let usage = w.client_tokens.entry(client).or_default();
        prune(usage, now, window, |(t, _)| *t);
        usage.push_back((now, used));
    }

    /// Release a reservation for a call that failed before reporting usage.
    pub fn release_tokens(&self, client: Uuid, reserved: u64) {
        let mut w = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let window = self.config.token_window;
        let reservations = w.client_reservations.entry(client).or_default();
        prune(reservations, Instant::now(), window, |(t, _)| *t);
        consume(reservations, reserved);
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune<T>(deque: &mut VecDeque<T>, now: Instant, window: Duration, stamp: impl Fn(&T) -> Instant) {
    while let Some(front) = deque.front() {
        if now.duration_since(stamp(front)) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

fn windowed_sum(deque: &mut VecDeque<(Instant, u64)>, now: Instant, window: Duration) -> u64 {
    prune(deque, now, window, |(t, _)| *t);
    deque.iter().map(|(_, n)| n).sum()
}

fn consume(deque: &mut VecDeque<(Instant, u64)>, mut amount: u64) {
    while amount > 0 {
        let Some((_, front)) = deque.front_mut() else {
            break;
        };
        if *front <= amount {
            amount -= *front;
            deque.pop_front();
        } else {
            *front -= amount;
            break;
        }
    }
}

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
