// token-engine/src/tax.rs

//! Transfer classification and tax math.
//!
//! Classification is direction-of-trade inference against the
//! recognized pairs; tax amounts are exact integer percentages with the
//! rounding remainder folded into the burn share so the three shares
//! always sum to the collected tax.

use crate::{guards::AccessLists, latch::PairLatch, EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use token_core::{Address, Amount};

/// How a transfer is classified for tax purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferKind {
    Buy,
    Sell,
    Wallet,
    Excluded,
}

/// Tax rates in whole percent, one per classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    pub buy: u8,
    pub sell: u8,
    pub wallet: u8,
}

impl TaxRates {
    pub fn zero() -> Self {
        Self {
            buy: 0,
            sell: 0,
            wallet: 0,
        }
    }

    pub fn rate_for(&self, kind: TransferKind) -> u8 {
        match kind {
            TransferKind::Buy => self.buy,
            TransferKind::Sell => self.sell,
            TransferKind::Wallet => self.wallet,
            TransferKind::Excluded => 0,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.buy > 100 || self.sell > 100 || self.wallet > 100 {
            return Err(EngineError::InvalidConfig(
                "Tax rate exceeds 100%".into(),
            ));
        }
        Ok(())
    }
}

/// How collected tax splits between burn, marketing and liquidity
/// (whole percent, must sum to 100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSplit {
    pub burn: u8,
    pub marketing: u8,
    pub liquidity: u8,
}

impl TaxSplit {
    pub fn validate(&self) -> EngineResult<()> {
        let sum = self.burn as u16 + self.marketing as u16 + self.liquidity as u16;
        if sum != 100 {
            return Err(EngineError::InvalidConfig(format!(
                "Tax split must sum to 100, got {sum}"
            )));
        }
        Ok(())
    }
}

/// Exact share breakdown of one tax application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxShares {
    pub burn: Amount,
    pub marketing: Amount,
    pub liquidity: Amount,
}

impl TaxShares {
    pub fn total(&self) -> Amount {
        self.burn.clone() + self.marketing.clone() + self.liquidity.clone()
    }
}

/// Classify a transfer against the recognized pairs and exclusion set.
pub fn classify(
    from: &Address,
    to: &Address,
    pair: &PairLatch,
    lists: &AccessLists,
) -> TransferKind {
    if lists.is_fee_excluded(from) || lists.is_fee_excluded(to) {
        return TransferKind::Excluded;
    }

    let from_is_pair = pair.is(from) || lists.is_secondary_pair(from);
    let to_is_pair = pair.is(to) || lists.is_secondary_pair(to);

    match (from_is_pair, to_is_pair) {
        (_, true) => TransferKind::Sell,
        (true, false) => TransferKind::Buy,
        (false, false) => TransferKind::Wallet,
    }
}

/// Tax owed on `amount` at `rate` percent (rounds down; the recipient
/// gets the remainder).
pub fn compute_tax(amount: &Amount, rate: u8) -> Amount {
    amount
        .mul_div(rate as u64, 100)
        .unwrap_or_else(Amount::zero)
}

/// Split a tax amount per the configured shares. Marketing and
/// liquidity round down; the remainder goes to the burn share, so
/// `shares.total() == tax` exactly.
pub fn split_tax(tax: &Amount, split: &TaxSplit) -> TaxShares {
    let marketing = tax
        .mul_div(split.marketing as u64, 100)
        .unwrap_or_else(Amount::zero);
    let liquidity = tax
        .mul_div(split.liquidity as u64, 100)
        .unwrap_or_else(Amount::zero);
    // Never underflows: marketing + liquidity <= tax by construction
    let burn = tax.clone() - marketing.clone() - liquidity.clone();

    TaxShares {
        burn,
        marketing,
        liquidity,
    }
}
