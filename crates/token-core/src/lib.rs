// token-core/src/lib.rs

//! Foundational types for the deflationary token system
//!
//! This crate provides the value types shared by every other crate
//! (`Address`, `Amount`, block/time aliases) and the `Ledger`, the
//! exclusive owner of balances, allowances and the total-supply counter.

pub mod ledger;
pub mod types;

pub use ledger::{Account, Ledger};
pub use types::{Address, Amount, BlockNumber, Timestamp};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in ledger and type operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Zero address is not a valid party")]
    ZeroAddress,

    #[error("Self-transfer is not allowed")]
    SelfTransfer,

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    #[error("Insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance { required: Amount, available: Amount },

    #[error("Supply underflow: burning {amount} exceeds total supply {supply}")]
    SupplyUnderflow { amount: Amount, supply: Amount },

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Invalid address encoding: {0}")]
    InvalidAddress(String),
}
