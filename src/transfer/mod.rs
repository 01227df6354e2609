//! Token transfer subsystem.
//!
//! # Data Flow
//! ```text
//! TransferRequest (validated prompts)
//!     → sender.rs get_token_balance (decimals + balanceOf)
//!     → request.rs resolve "send all" / insufficiency warning
//!     → sender.rs send (unit conversion, fees, sign, submit)
//!     → sender.rs wait_tx (confirmation poller)
//! ```

pub mod request;
pub mod sender;

pub use request::{Amount, AmountError, SendAmount, TransferAmount, TransferRequest};
pub use sender::{Sender, SenderSettings};
