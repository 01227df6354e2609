//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!
//! Consumers:
//!     → stderr, filtered by RUST_LOG / --log-level
//! ```
//!
//! # Design Decisions
//! - Structured fields (tx_hash, nonce, fees) instead of formatted strings
//! - Private keys are never recorded

pub mod logging;
