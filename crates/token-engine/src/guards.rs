// token-engine/src/guards.rs

//! Per-transfer eligibility guards.
//!
//! Evaluated before any state is touched: trading latch (owner bypass),
//! blacklist, anti-bot contract window, max-tx cap (fee-exclusion
//! bypass). A rejection aborts the transfer with a named error; the
//! engine records the anti-bot audit event before surfacing it.

use crate::{latch::TradingLatch, EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use token_core::{Address, Amount, BlockNumber};

/// Address sets governing transfer policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessLists {
    blacklist: HashSet<Address>,
    /// Anti-bot bypass
    whitelist: HashSet<Address>,
    fee_excluded: HashSet<Address>,
    /// Recognized DEX pairs beyond the primary one
    secondary_pairs: HashSet<Address>,
}

impl AccessLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_blacklisted(&mut self, address: Address, blacklisted: bool) {
        if blacklisted {
            self.blacklist.insert(address);
        } else {
            self.blacklist.remove(&address);
        }
    }

    pub fn is_blacklisted(&self, address: &Address) -> bool {
        self.blacklist.contains(address)
    }

    pub fn add_to_whitelist(&mut self, address: Address) {
        self.whitelist.insert(address);
    }

    pub fn remove_from_whitelist(&mut self, address: &Address) {
        self.whitelist.remove(address);
    }

    pub fn is_whitelisted(&self, address: &Address) -> bool {
        self.whitelist.contains(address)
    }

    pub fn set_fee_excluded(&mut self, address: Address, excluded: bool) {
        if excluded {
            self.fee_excluded.insert(address);
        } else {
            self.fee_excluded.remove(&address);
        }
    }

    pub fn is_fee_excluded(&self, address: &Address) -> bool {
        self.fee_excluded.contains(address)
    }

    pub fn add_secondary_pair(&mut self, address: Address) {
        self.secondary_pairs.insert(address);
    }

    pub fn is_secondary_pair(&self, address: &Address) -> bool {
        self.secondary_pairs.contains(address)
    }
}

/// Everything the guard evaluation needs from the engine.
pub(crate) struct GuardContext<'a> {
    pub trading: &'a TradingLatch,
    pub owner: Option<Address>,
    pub lists: &'a AccessLists,
    pub anti_bot_window_blocks: u64,
    pub max_tx_cap: &'a Amount,
    pub block: BlockNumber,
    pub to_is_contract: bool,
}

impl GuardContext<'_> {
    /// Whether the anti-bot window is still open at `block`.
    pub fn in_anti_bot_window(&self) -> bool {
        match self.trading.launch_block() {
            Some(launch) => self.block < launch + self.anti_bot_window_blocks,
            None => false,
        }
    }

    /// Fail fast on any policy violation; no state is mutated here.
    pub fn check(&self, from: &Address, to: &Address, amount: &Amount) -> EngineResult<()> {
        let owner_party =
            self.owner.map_or(false, |owner| owner == *from || owner == *to);

        if !self.trading.is_enabled() && !owner_party {
            return Err(EngineError::TradingDisabled);
        }

        if self.lists.is_blacklisted(from) {
            return Err(EngineError::Blacklisted(*from));
        }
        if self.lists.is_blacklisted(to) {
            return Err(EngineError::Blacklisted(*to));
        }

        if self.to_is_contract && self.in_anti_bot_window() && !self.lists.is_whitelisted(to) {
            return Err(EngineError::AntiBotWindow {
                address: *to,
                block: self.block,
            });
        }

        let excluded_party =
            self.lists.is_fee_excluded(from) || self.lists.is_fee_excluded(to);
        if *amount > *self.max_tx_cap && !excluded_party {
            return Err(EngineError::MaxTxExceeded {
                amount: amount.clone(),
                cap: self.max_tx_cap.clone(),
            });
        }

        Ok(())
    }
}
