// token-engine/src/config.rs

use crate::{tax::TaxRates, tax::TaxSplit, EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use token_core::Amount;

/// How auto-sell and buyback are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuybackMode {
    /// Qualifying sells trigger auto-sell and buyback implicitly
    PerTransfer,
    /// Owner drives an explicit sell/buyback cycle with a cycle log
    ManualCycle,
}

/// How the buyback reserve is funded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReserveFunding {
    /// Reserve tokens are moved to the contract in the constructor
    AtConstruction,
    /// Owner transfers tokens in, then calls `sync_reserve`
    ManualSync,
}

/// Engine configuration: genesis amounts, tax schedule and trigger
/// thresholds. Validated once at construction; the tax rates and split
/// are fixed constants until the removal latch flips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Supply issued at genesis (base units)
    pub total_supply: Amount,
    /// Burn applied immediately at genesis
    pub initial_burn: Amount,
    /// Cap on tokens reserved to fuel auto-sells
    pub buyback_reserve_cap: Amount,
    /// Tax rates while taxes are active (whole percent)
    pub tax_rates: TaxRates,
    /// How collected tax splits into burn/marketing/liquidity
    pub tax_split: TaxSplit,
    /// Share of each sell routed from the reserve (basis points)
    pub auto_sell_bps: u16,
    /// Accumulated native currency that triggers a buyback
    pub native_threshold: Amount,
    /// Cumulative burn fraction of total supply that removes taxes
    /// (whole percent)
    pub burn_threshold_pct: u8,
    /// Max transfer size (basis points of total supply)
    pub max_tx_bps: u16,
    /// Blocks after launch during which contract recipients are blocked
    pub anti_bot_window_blocks: u64,
    /// Gas budget handed to the market adapter per swap
    pub swap_gas_limit: u64,
    /// Trigger policy
    pub buyback_mode: BuybackMode,
    /// Reserve funding policy
    pub reserve_funding: ReserveFunding,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            total_supply: Amount::from_tokens(30_000_000),
            initial_burn: Amount::from_tokens(8_000_000),
            buyback_reserve_cap: Amount::from_tokens(10_000_000),
            tax_rates: TaxRates {
                buy: 5,
                sell: 8,
                wallet: 2,
            },
            tax_split: TaxSplit {
                burn: 60,
                marketing: 25,
                liquidity: 15,
            },
            auto_sell_bps: 200,                                  // 2%
            native_threshold: Amount::from_u64(30_000_000_000_000_000), // 0.03 native
            burn_threshold_pct: 75,
            max_tx_bps: 100,                                     // 1%
            anti_bot_window_blocks: 3,
            swap_gas_limit: 300_000,
            buyback_mode: BuybackMode::PerTransfer,
            reserve_funding: ReserveFunding::ManualSync,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.total_supply.is_zero() {
            return Err(EngineError::InvalidConfig("Total supply must be positive".into()));
        }
        if self.initial_burn > self.total_supply {
            return Err(EngineError::InvalidConfig(
                "Initial burn exceeds total supply".into(),
            ));
        }
        self.tax_rates.validate()?;
        self.tax_split.validate()?;
        if self.auto_sell_bps > 10_000 {
            return Err(EngineError::InvalidConfig(
                "Auto-sell share exceeds 100%".into(),
            ));
        }
        if self.burn_threshold_pct > 100 {
            return Err(EngineError::InvalidConfig(
                "Burn threshold exceeds 100%".into(),
            ));
        }
        if self.max_tx_bps == 0 || self.max_tx_bps > 10_000 {
            return Err(EngineError::InvalidConfig(
                "Max-tx cap must be in (0, 10000] basis points".into(),
            ));
        }
        if self.native_threshold.is_zero() {
            return Err(EngineError::InvalidConfig(
                "Native threshold must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Max transfer size in base units
    pub fn max_tx_cap(&self) -> Amount {
        // validate() guarantees max_tx_bps > 0
        self.total_supply
            .mul_div(self.max_tx_bps as u64, 10_000)
            .unwrap_or_else(Amount::zero)
    }

    /// Cumulative burn amount at which taxes are removed
    pub fn burn_threshold(&self) -> Amount {
        self.total_supply
            .mul_div(self.burn_threshold_pct as u64, 100)
            .unwrap_or_else(Amount::zero)
    }
}
