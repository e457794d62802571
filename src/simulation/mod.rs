//! Simulated security mechanisms.
//!
//! # Data Flow
//! ```text
//! UI action:
//!     submit   → rate_window.rs (count events, block at threshold)
//!     analyze  → patterns.rs + sanitizer.rs (match, replace, escape)
//!     token    → csrf.rs (issue / single-use validate)
//!
//! Every response:
//!     → headers.rs (security header catalogue)
//! ```
//!
//! # Design Decisions
//! - Every mechanism is a small state machine over explicit state
//! - No clocks inside the core: the countdown consumes external `tick`s
//! - All operations are total; "blocked" and "threat found" are
//!   domain outcomes, not errors

pub mod csrf;
pub mod headers;
pub mod patterns;
pub mod rate_window;
pub mod sanitizer;

pub use csrf::{CsrfOutcome, CsrfVault};
pub use rate_window::{Decision, RateLimiter, RateWindow, RateWindowSnapshot};
pub use sanitizer::{SanitizationResult, Sanitizer};
