//! Web-Security Mechanism Simulator
//!
//! An educational service that simulates four common web-security
//! mechanisms over a small JSON API: rate limiting, CSRF token validation,
//! input sanitization, and security response headers. The protections are
//! illustrative: all state is in-memory, per-client, and rebuilt fresh on
//! process start.
//!
//! # Architecture Overview
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 SIMULATOR                     │
//!                    │                                               │
//!   Client Request   │  ┌────────┐     ┌────────────────────────┐   │
//!   ─────────────────┼─▶│  http  │────▶│       simulation        │   │
//!                    │  │ server │     │ rate_window │ sanitizer │   │
//!                    │  └────────┘     │ csrf        │ headers   │   │
//!                    │       │         └────────────────────────┘   │
//!                    │       │  1s ticks          ▲                 │
//!                    │       └────────────────────┘                 │
//!                    │                                               │
//!                    │  ┌────────────────────────────────────────┐  │
//!                    │  │          Cross-Cutting Concerns         │  │
//!                    │  │  config │ observability │ lifecycle     │  │
//!                    │  └────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod simulation;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::SimulatorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
