// market/src/lib.rs

//! Market access for the token engine
//!
//! This crate wraps the AMM the token trades against. The engine only
//! ever sees the [`MarketAdapter`] trait: a fallible swap service whose
//! failures must never corrupt caller state. The constant-product
//! [`AmmPool`] backs the real adapter; [`FixedRateAdapter`] provides a
//! deterministic stand-in for tests and simulation.

pub mod adapter;
pub mod amm;

pub use adapter::{FixedRateAdapter, MarketAdapter, PoolAdapter};
pub use amm::{AmmPool, SwapQuote, TradingPair};

use token_core::Amount;

/// Result type for market operations
pub type MarketResult<T> = Result<T, MarketError>;

/// Errors that can occur when calling out to the AMM
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    #[error("Cannot swap a zero amount")]
    ZeroAmount,

    #[error("No liquidity in pool")]
    NoLiquidity,

    #[error("Slippage exceeded: minimum out {min_out}, quoted {quoted}")]
    SlippageExceeded { min_out: Amount, quoted: Amount },

    #[error("Token not in pair")]
    TokenNotInPair,

    #[error("Swap call reverted: {0}")]
    CallReverted(String),

    #[error("Out of gas: limit {limit}, required {required}")]
    OutOfGas { limit: u64, required: u64 },
}
