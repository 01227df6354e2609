//! ERC20 token sender library.

pub mod blockchain;
pub mod cli;
pub mod config;
pub mod observability;
pub mod transfer;

pub use config::schema::{ChainDescriptor, ChainsConfig};
pub use transfer::{Sender, TransferRequest};
