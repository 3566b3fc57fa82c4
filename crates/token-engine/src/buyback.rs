// token-engine/src/buyback.rs

//! Auto-sell and buyback bookkeeping.
//!
//! [`BuybackState`] owns the reserve counter, the native accumulator
//! and the swap-window lock. Mutations happen only through its methods
//! so the reserve/accumulator invariants stay auditable: the reserve
//! never exceeds its cap or the contract balance, and the accumulator
//! resets to exactly zero on a successful buyback.

use crate::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use token_core::{Amount, BlockNumber};

/// One sell/buyback round, 1-indexed in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuybackCycle {
    pub index: u64,
    pub tokens_sold: Amount,
    pub native_received: Amount,
    pub tokens_bought: Amount,
    pub tokens_burned: Amount,
    pub block: BlockNumber,
    pub completed: bool,
}

/// Append-only cycle history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleLog {
    cycles: Vec<BuybackCycle>,
}

impl CycleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a cycle after a successful reserve sell; returns its index.
    pub fn open(
        &mut self,
        tokens_sold: Amount,
        native_received: Amount,
        block: BlockNumber,
    ) -> u64 {
        let index = self.cycles.len() as u64 + 1;
        self.cycles.push(BuybackCycle {
            index,
            tokens_sold,
            native_received,
            tokens_bought: Amount::zero(),
            tokens_burned: Amount::zero(),
            block,
            completed: false,
        });
        index
    }

    /// Complete the most recent open cycle.
    pub fn complete(
        &mut self,
        tokens_bought: Amount,
        tokens_burned: Amount,
        block: BlockNumber,
    ) -> EngineResult<u64> {
        let cycle = self
            .cycles
            .iter_mut()
            .rev()
            .find(|c| !c.completed)
            .ok_or(EngineError::NoOpenCycle)?;
        cycle.tokens_bought = tokens_bought;
        cycle.tokens_burned = tokens_burned;
        cycle.block = block;
        cycle.completed = true;
        Ok(cycle.index)
    }

    pub fn has_open_cycle(&self) -> bool {
        self.cycles.iter().any(|c| !c.completed)
    }

    /// Cycle by 1-based index
    pub fn get(&self, index: u64) -> Option<&BuybackCycle> {
        if index == 0 {
            return None;
        }
        self.cycles.get(index as usize - 1)
    }

    pub fn all(&self) -> &[BuybackCycle] {
        &self.cycles
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Reserve, accumulator and swap-window state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuybackState {
    /// Tokens remaining to fuel auto-sells, capped at the configured
    /// reserve and bounded by the contract's token balance
    reserve_remaining: Amount,
    /// Native currency held pending buyback
    accumulated_native: Amount,
    /// Swap-window lock: re-entrant transfers skip the triggers while held
    pub(crate) swap_in_progress: bool,
    /// Block of the last successful buyback
    last_buyback_block: Option<BlockNumber>,
    /// Cycle history
    pub cycles: CycleLog,
}

impl BuybackState {
    pub fn new() -> Self {
        Self {
            reserve_remaining: Amount::zero(),
            accumulated_native: Amount::zero(),
            swap_in_progress: false,
            last_buyback_block: None,
            cycles: CycleLog::new(),
        }
    }

    pub fn reserve_remaining(&self) -> &Amount {
        &self.reserve_remaining
    }

    pub fn accumulated_native(&self) -> &Amount {
        &self.accumulated_native
    }

    pub fn last_buyback_block(&self) -> Option<BlockNumber> {
        self.last_buyback_block
    }

    /// Clamp an auto-sell attempt to what is actually reserved and held:
    /// `min(attempt, reserve, contract_balance)`.
    pub fn clamp_sell(&self, attempt: &Amount, contract_balance: &Amount) -> Amount {
        attempt
            .min(&self.reserve_remaining)
            .min(contract_balance.clone())
    }

    /// Re-fund the reserve: clamps to `min(contract_balance, cap)`.
    pub fn sync_reserve(&mut self, contract_balance: &Amount, cap: &Amount) -> Amount {
        self.reserve_remaining = contract_balance.min(cap);
        self.reserve_remaining.clone()
    }

    /// Book a successful reserve sell: reserve down, accumulator up.
    /// Callers only invoke this with `sold <= reserve_remaining`.
    pub fn record_sell(&mut self, sold: &Amount, native_received: &Amount) -> EngineResult<()> {
        self.reserve_remaining = self
            .reserve_remaining
            .checked_sub(sold)
            .ok_or_else(|| EngineError::InsufficientReserve {
                requested: sold.clone(),
                available: self.reserve_remaining.clone(),
            })?;
        self.accumulated_native = self
            .accumulated_native
            .checked_add(native_received)
            .ok_or_else(|| EngineError::InvalidConfig("Accumulator overflow".into()))?;
        Ok(())
    }

    /// Whether the accumulator has crossed the buyback threshold.
    pub fn threshold_met(&self, threshold: &Amount) -> bool {
        !self.accumulated_native.is_zero() && self.accumulated_native >= *threshold
    }

    /// Book a successful buyback: accumulator resets to exactly zero.
    pub fn record_buyback(&mut self, block: BlockNumber) -> Amount {
        let spent = std::mem::replace(&mut self.accumulated_native, Amount::zero());
        self.last_buyback_block = Some(block);
        spent
    }
}

impl Default for BuybackState {
    fn default() -> Self {
        Self::new()
    }
}
