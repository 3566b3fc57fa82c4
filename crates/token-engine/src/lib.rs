// token-engine/src/lib.rs

//! Deflationary token engine
//!
//! The per-transfer economic state machine: every transfer is classified
//! (buy / sell / wallet / excluded), taxed, and — on qualifying sells —
//! may trigger an auto-sell of reserved tokens for native currency and,
//! once enough native currency has accumulated, a buyback-and-burn.
//! Taxes are removed permanently once cumulative burns cross a fixed
//! fraction of the issued supply.
//!
//! Swap failures are swallowed: a flaky or illiquid market must never
//! brick ordinary transfers.

pub mod buyback;
pub mod config;
pub mod engine;
pub mod events;
pub mod guards;
pub mod latch;
pub mod stats;
pub mod tax;

pub use buyback::{BuybackCycle, BuybackState, CycleLog};
pub use config::{BuybackMode, EngineConfig, ReserveFunding};
pub use engine::{RecoveryInstruction, TokenEngine, Wallets};
pub use events::{EventLog, TokenEvent};
pub use guards::AccessLists;
pub use latch::{PairLatch, TaxLatch, TradingLatch};
pub use stats::{AntiBotStatus, BasicStats, BurnProgress, TaxRateView, TradingStatus};
pub use tax::{TaxRates, TaxShares, TaxSplit, TransferKind};

use market::MarketError;
use token_core::{Address, Amount, BlockNumber, CoreError};

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced to callers of the token engine.
///
/// Every policy rejection is a distinct variant so front-ends can react
/// appropriately (e.g. distinguish "blacklisted" from "trading not
/// enabled"). Market failures appear here only on the owner-driven
/// manual cycle; during transfers they are swallowed and logged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Caller is not the owner")]
    NotOwner,

    #[error("Trading is not enabled")]
    TradingDisabled,

    #[error("Trading is already enabled")]
    TradingAlreadyEnabled,

    #[error("Primary pair is already set")]
    PairAlreadySet,

    #[error("Primary pair is not set")]
    PairNotSet,

    #[error("Address is blacklisted: {0}")]
    Blacklisted(Address),

    #[error("Anti-bot window: contract {address} blocked at block {block}")]
    AntiBotWindow { address: Address, block: BlockNumber },

    #[error("Transfer exceeds max-tx cap: amount {amount}, cap {cap}")]
    MaxTxExceeded { amount: Amount, cap: Amount },

    #[error("Amount must be positive")]
    ZeroAmount,

    #[error("Insufficient buyback reserve: requested {requested}, available {available}")]
    InsufficientReserve { requested: Amount, available: Amount },

    #[error("Operation requires {expected:?} buyback mode")]
    WrongBuybackMode { expected: BuybackMode },

    #[error("No open buyback cycle")]
    NoOpenCycle,

    #[error("No native currency accumulated")]
    NothingAccumulated,

    #[error("Cannot recover the token itself")]
    CannotRecoverSelf,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Reserve sell swap failed: {0}")]
    SellSwapFailed(MarketError),

    #[error("Buyback swap failed: {0}")]
    BuybackSwapFailed(MarketError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
