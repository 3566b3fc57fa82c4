// token-engine/src/latch.rs

//! One-way lifecycle latches.
//!
//! Each latch is an explicit two-state machine with a guarded forward
//! transition and no way back; illegal transitions are named errors.

use crate::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use token_core::{Address, BlockNumber};

/// Trading lifecycle: disabled at genesis, enabled exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradingLatch {
    Disabled,
    Enabled { launch_block: BlockNumber },
}

impl TradingLatch {
    pub fn enable(&mut self, launch_block: BlockNumber) -> EngineResult<()> {
        match self {
            TradingLatch::Disabled => {
                *self = TradingLatch::Enabled { launch_block };
                Ok(())
            }
            TradingLatch::Enabled { .. } => Err(EngineError::TradingAlreadyEnabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, TradingLatch::Enabled { .. })
    }

    pub fn launch_block(&self) -> Option<BlockNumber> {
        match self {
            TradingLatch::Enabled { launch_block } => Some(*launch_block),
            TradingLatch::Disabled => None,
        }
    }
}

/// Primary AMM pair: unset at genesis, set exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairLatch {
    Unset,
    Set(Address),
}

impl PairLatch {
    pub fn set(&mut self, pair: Address) -> EngineResult<()> {
        match self {
            PairLatch::Unset => {
                *self = PairLatch::Set(pair);
                Ok(())
            }
            PairLatch::Set(_) => Err(EngineError::PairAlreadySet),
        }
    }

    pub fn get(&self) -> Option<Address> {
        match self {
            PairLatch::Set(pair) => Some(*pair),
            PairLatch::Unset => None,
        }
    }

    pub fn is(&self, address: &Address) -> bool {
        matches!(self, PairLatch::Set(pair) if pair == address)
    }
}

/// Tax lifecycle: taxed at genesis, permanently tax-free once the burn
/// threshold is crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxLatch {
    Taxed,
    TaxFree,
}

impl TaxLatch {
    /// Flip to the terminal state. Idempotence is the caller's concern;
    /// the latch itself only ever moves forward.
    pub fn remove_taxes(&mut self) {
        *self = TaxLatch::TaxFree;
    }

    pub fn is_tax_free(&self) -> bool {
        matches!(self, TaxLatch::TaxFree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trading_latch_is_one_way() {
        let mut latch = TradingLatch::Disabled;
        assert!(!latch.is_enabled());
        assert_eq!(latch.launch_block(), None);

        latch.enable(42).unwrap();
        assert!(latch.is_enabled());
        assert_eq!(latch.launch_block(), Some(42));

        assert_eq!(latch.enable(43), Err(EngineError::TradingAlreadyEnabled));
        assert_eq!(latch.launch_block(), Some(42));
    }

    #[test]
    fn test_pair_latch_set_once() {
        let pair = Address::new([7; 20]);
        let mut latch = PairLatch::Unset;

        latch.set(pair).unwrap();
        assert!(latch.is(&pair));
        assert_eq!(
            latch.set(Address::new([8; 20])),
            Err(EngineError::PairAlreadySet)
        );
        assert_eq!(latch.get(), Some(pair));
    }

    #[test]
    fn test_tax_latch_terminal() {
        let mut latch = TaxLatch::Taxed;
        assert!(!latch.is_tax_free());

        latch.remove_taxes();
        assert!(latch.is_tax_free());

        // No transition back exists; flipping again is a no-op
        latch.remove_taxes();
        assert!(latch.is_tax_free());
    }
}
