//! Fixed-window rate limiting simulation.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::config::RateLimitConfig;

/// Outcome of recording one event against a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Event counted; `remaining` events left before the window blocks.
    Allowed { count: u32, remaining: u32 },
    /// Window is blocked; the event was rejected and nothing changed.
    Blocked { retry_after_secs: u32 },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }
}

/// Read-only view of a window, suitable for the status endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RateWindowSnapshot {
    pub count: u32,
    pub blocked: bool,
    pub seconds_remaining: u32,
}

/// A single client's event window.
///
/// Counts discrete events and flips to a blocked state when `max_requests`
/// is reached. The countdown is driven externally: one [`RateWindow::tick`]
/// per elapsed second. Invariant: `blocked` holds exactly while
/// `seconds_remaining > 0`, and `count` resets to zero on the
/// blocked → unblocked transition, never earlier.
#[derive(Debug, Clone)]
pub struct RateWindow {
    max_requests: u32,
    reset_window_secs: u32,
    count: u32,
    blocked: bool,
    seconds_remaining: u32,
}

impl RateWindow {
    pub fn new(max_requests: u32, reset_window_secs: u32) -> Self {
        Self {
            max_requests,
            reset_window_secs,
            count: 0,
            blocked: false,
            seconds_remaining: 0,
        }
    }

    /// Record one event. Rejected events leave the window untouched.
    pub fn record_event(&mut self) -> Decision {
        if self.blocked {
            return Decision::Blocked {
                retry_after_secs: self.seconds_remaining,
            };
        }

        self.count += 1;
        if self.count >= self.max_requests {
            self.blocked = true;
            self.seconds_remaining = self.reset_window_secs;
        }

        Decision::Allowed {
            count: self.count,
            remaining: self.max_requests.saturating_sub(self.count),
        }
    }

    /// Consume one second of the countdown. No-op while unblocked.
    pub fn tick(&mut self) {
        if !self.blocked {
            return;
        }
        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 {
            self.blocked = false;
            self.count = 0;
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn snapshot(&self) -> RateWindowSnapshot {
        RateWindowSnapshot {
            count: self.count,
            blocked: self.blocked,
            seconds_remaining: self.seconds_remaining,
        }
    }
}

/// Per-client window registry.
///
/// Windows are keyed by client identity (peer IP). State lives only in
/// memory and is rebuilt fresh on process start.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, RateWindow>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Record one event for `key`, creating its window on first sight.
    pub fn record_event(&self, key: &str) -> Decision {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        let window = windows
            .entry(key.to_string())
            .or_insert_with(|| self.fresh_window());
        window.record_event()
    }

    /// Snapshot `key`'s window without mutating it. Unknown clients see a
    /// fresh, empty window.
    pub fn snapshot(&self, key: &str) -> RateWindowSnapshot {
        let windows = self.windows.lock().expect("rate limiter mutex poisoned");
        windows
            .get(key)
            .map(RateWindow::snapshot)
            .unwrap_or_else(|| self.fresh_window().snapshot())
    }

    /// Deliver one second to every window and drop the ones that are back
    /// to their initial state, so the registry does not grow unbounded.
    pub fn tick_all(&self) {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        for window in windows.values_mut() {
            window.tick();
        }
        windows.retain(|_, w| w.is_blocked() || w.count() > 0);
    }

    fn fresh_window(&self) -> RateWindow {
        RateWindow::new(self.config.max_requests, self.config.reset_window_secs)
    }
}
