//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Initialize subsystems → Bind listener
//!
//! Shutdown:
//!     Ctrl+C or trigger() → broadcast → server drains, ticker stops
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
