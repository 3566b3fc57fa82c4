// token-engine/src/stats.rs

//! Read-only view surface for off-chain callers and front-ends.

use crate::{config::BuybackMode, tax::TaxRates};
use serde::{Deserialize, Serialize};
use token_core::{Address, Amount, BlockNumber};

/// Headline supply and reserve figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicStats {
    pub circulating_supply: Amount,
    pub burned_tokens: Amount,
    pub buyback_reserve_remaining: Amount,
    pub accumulated_native: Amount,
}

/// Progress toward the tax-removal burn threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnProgress {
    pub current_burned: Amount,
    pub threshold: Amount,
    pub percentage: f64,
    pub threshold_reached: bool,
}

/// Current tax rates (all zeros once taxes are removed).
pub type TaxRateView = TaxRates;

/// Trading lifecycle snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingStatus {
    pub trading_enabled: bool,
    pub launch_block: Option<BlockNumber>,
    pub pair: Option<Address>,
    pub swap_enabled: bool,
    pub auto_sell_enabled: bool,
    pub taxes_removed: bool,
    pub buyback_mode: BuybackMode,
    pub owner_renounced: bool,
}

/// Anti-bot window status for a given address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntiBotStatus {
    pub window_active: bool,
    pub blocks_remaining: u64,
    pub whitelisted: bool,
}
