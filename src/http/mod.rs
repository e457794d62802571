//! HTTP surface of the simulator.
//!
//! # Responsibilities
//! - Axum router, handlers, and middleware
//! - Per-client keying (peer IP) for window and CSRF state
//! - The one-second ticker that drives rate-window countdowns

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
