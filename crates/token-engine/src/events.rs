// token-engine/src/events.rs

//! Emitted events: the engine's wire format for off-chain observers.
//!
//! The log is append-only; indexers consume it in order. Payload shapes
//! are part of the stable interface and serialize via serde.

use crate::tax::TransferKind;
use serde::{Deserialize, Serialize};
use token_core::{Address, Amount, BlockNumber};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    /// Non-zero tax applied to a transfer
    TaxApplied {
        from: Address,
        to: Address,
        amount: Amount,
        tax_amount: Amount,
        kind: TransferKind,
    },
    /// Auto-sell swap failed and was swallowed
    SwapForNativeFailed { amount: Amount },
    /// Buyback swap failed; accumulator preserved for retry
    BuybackFailed { native_amount: Amount },
    /// Contract recipient blocked during the anti-bot window
    AntiBotBlocked {
        address: Address,
        block: BlockNumber,
    },
    /// Owner-driven burn adjusted the cumulative counter
    ExternalBurnUpdated {
        amount: Amount,
        total_burned: Amount,
    },
    /// Trading enabled (one-time)
    TradingEnabled { block: BlockNumber },
    /// Tax-removal latch flipped (one-time)
    TaxesRemoved {
        total_burned: Amount,
        block: BlockNumber,
    },
    /// Buyback executed and tokens burned
    BuybackExecuted {
        native_spent: Amount,
        tokens_burned: Amount,
        block: BlockNumber,
    },
}

/// Append-only event log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<TokenEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TokenEvent) {
        self.events.push(event);
    }

    pub fn all(&self) -> &[TokenEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&TokenEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Count events matching a predicate (test/observer helper)
    pub fn count_where(&self, predicate: impl Fn(&TokenEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}
