//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! chains file (JSON or TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ChainsConfig (validated, immutable)
//!     → ChainDescriptor handed to the transfer orchestrator
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - Missing required fields fail at parse time; token addresses are parsed eagerly
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ChainDescriptor, ChainsConfig};
pub use validation::ValidationError;
