// market/src/amm.rs

use crate::{MarketError, MarketResult};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use token_core::{Address, Amount};

/// Trading pair for the AMM
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingPair {
    /// Token A address
    pub token_a: Address,
    /// Token B address
    pub token_b: Address,
}

impl TradingPair {
    /// Create a new trading pair
    pub fn new(token_a: Address, token_b: Address) -> Self {
        Self { token_a, token_b }
    }

    /// Get canonical representation (sorted)
    pub fn canonical(&self) -> TradingPair {
        if self.token_a.as_bytes() < self.token_b.as_bytes() {
            self.clone()
        } else {
            TradingPair {
                token_a: self.token_b,
                token_b: self.token_a,
            }
        }
    }

    pub fn contains(&self, token: &Address) -> bool {
        self.token_a == *token || self.token_b == *token
    }
}

/// Swap quote information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    /// Input amount
    pub amount_in: Amount,
    /// Output amount
    pub amount_out: Amount,
    /// Fee amount (taken from input)
    pub fee_amount: Amount,
}

/// AMM liquidity pool (constant product formula: x * y = k)
///
/// All math is exact integer arithmetic on base units; the fee is
/// expressed in basis points and taken from the input side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmPool {
    /// Trading pair
    pair: TradingPair,
    /// Reserve of token A
    reserve_a: Amount,
    /// Reserve of token B
    reserve_b: Amount,
    /// Fee rate (basis points, e.g. 30 = 0.3%)
    fee_bps: u16,
}

impl AmmPool {
    /// Create new AMM pool
    pub fn new(pair: TradingPair, fee_bps: u16) -> Self {
        Self {
            pair: pair.canonical(),
            reserve_a: Amount::zero(),
            reserve_b: Amount::zero(),
            fee_bps: fee_bps.min(10_000),
        }
    }

    /// Seed or top up reserves
    pub fn add_liquidity(&mut self, amount_a: Amount, amount_b: Amount) -> MarketResult<()> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(MarketError::ZeroAmount);
        }
        self.reserve_a = self
            .reserve_a
            .checked_add(&amount_a)
            .ok_or(MarketError::CallReverted("Reserve A overflow".into()))?;
        self.reserve_b = self
            .reserve_b
            .checked_add(&amount_b)
            .ok_or(MarketError::CallReverted("Reserve B overflow".into()))?;
        Ok(())
    }

    /// Get swap quote (how much output for given input)
    ///
    /// Constant product: `dy = (y * dx_after_fee) / (x + dx_after_fee)`
    pub fn get_swap_quote(&self, token_in: &Address, amount_in: &Amount) -> MarketResult<SwapQuote> {
        if amount_in.is_zero() {
            return Err(MarketError::ZeroAmount);
        }
        if !self.pair.contains(token_in) {
            return Err(MarketError::TokenNotInPair);
        }
        if self.reserve_a.is_zero() || self.reserve_b.is_zero() {
            return Err(MarketError::NoLiquidity);
        }

        let (reserve_in, reserve_out) = if *token_in == self.pair.token_a {
            (&self.reserve_a, &self.reserve_b)
        } else {
            (&self.reserve_b, &self.reserve_a)
        };

        let bps = BigUint::from(10_000u64);
        let in_after_fee =
            amount_in.inner() * BigUint::from(10_000u64 - self.fee_bps as u64) / &bps;
        let fee_amount = Amount::new(amount_in.inner() - &in_after_fee);

        let numerator = reserve_out.inner() * &in_after_fee;
        let denominator = reserve_in.inner() + &in_after_fee;
        let amount_out = Amount::new(numerator / denominator);

        if amount_out.is_zero() {
            return Err(MarketError::NoLiquidity);
        }

        Ok(SwapQuote {
            amount_in: amount_in.clone(),
            amount_out,
            fee_amount,
        })
    }

    /// Execute swap
    pub fn swap(
        &mut self,
        token_in: &Address,
        amount_in: &Amount,
        min_amount_out: &Amount,
    ) -> MarketResult<Amount> {
        let quote = self.get_swap_quote(token_in, amount_in)?;

        if quote.amount_out < *min_amount_out {
            return Err(MarketError::SlippageExceeded {
                min_out: min_amount_out.clone(),
                quoted: quote.amount_out,
            });
        }

        if *token_in == self.pair.token_a {
            self.reserve_a = self
                .reserve_a
                .checked_add(amount_in)
                .ok_or(MarketError::CallReverted("Reserve A overflow".into()))?;
            self.reserve_b = self
                .reserve_b
                .checked_sub(&quote.amount_out)
                .ok_or(MarketError::NoLiquidity)?;
        } else {
            self.reserve_b = self
                .reserve_b
                .checked_add(amount_in)
                .ok_or(MarketError::CallReverted("Reserve B overflow".into()))?;
            self.reserve_a = self
                .reserve_a
                .checked_sub(&quote.amount_out)
                .ok_or(MarketError::NoLiquidity)?;
        }

        Ok(quote.amount_out)
    }

    /// Get current reserves
    pub fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_a.clone(), self.reserve_b.clone())
    }

    /// Get trading pair
    pub fn pair(&self) -> &TradingPair {
        &self.pair
    }
}
