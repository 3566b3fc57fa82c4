// market/src/adapter.rs

use crate::{AmmPool, MarketError, MarketResult};
use token_core::{Address, Amount};

/// Gas a router swap needs to complete; calls budgeted below this revert
/// before touching the pool.
pub const SWAP_GAS_FLOOR: u64 = 150_000;

/// Black-box swap service the token engine calls into.
///
/// Both operations may fail (no liquidity, slippage, reverted call, gas).
/// Implementations must leave their own state untouched on failure; the
/// engine relies on that to keep its reserve and accumulator accounting
/// honest when a swap is swallowed.
pub trait MarketAdapter {
    /// Swap `token_amount` of the token for native currency; returns the
    /// native amount received.
    fn sell_tokens_for_native(
        &mut self,
        token_amount: &Amount,
        gas_limit: u64,
    ) -> MarketResult<Amount>;

    /// Swap `native_amount` of native currency for tokens; returns the
    /// token amount received.
    fn buy_tokens_with_native(
        &mut self,
        native_amount: &Amount,
        gas_limit: u64,
    ) -> MarketResult<Amount>;
}

/// Adapter backed by a real constant-product pool.
#[derive(Debug, Clone)]
pub struct PoolAdapter {
    pool: AmmPool,
    token: Address,
    wrapped_native: Address,
}

impl PoolAdapter {
    pub fn new(pool: AmmPool, token: Address, wrapped_native: Address) -> MarketResult<Self> {
        if !pool.pair().contains(&token) || !pool.pair().contains(&wrapped_native) {
            return Err(MarketError::TokenNotInPair);
        }
        Ok(Self {
            pool,
            token,
            wrapped_native,
        })
    }

    pub fn pool(&self) -> &AmmPool {
        &self.pool
    }

    fn check_gas(gas_limit: u64) -> MarketResult<()> {
        if gas_limit < SWAP_GAS_FLOOR {
            return Err(MarketError::OutOfGas {
                limit: gas_limit,
                required: SWAP_GAS_FLOOR,
            });
        }
        Ok(())
    }
}

impl MarketAdapter for PoolAdapter {
    fn sell_tokens_for_native(
        &mut self,
        token_amount: &Amount,
        gas_limit: u64,
    ) -> MarketResult<Amount> {
        Self::check_gas(gas_limit)?;
        let received = self.pool.swap(&self.token, token_amount, &Amount::zero())?;
        tracing::debug!(%token_amount, %received, "pool sell executed");
        Ok(received)
    }

    fn buy_tokens_with_native(
        &mut self,
        native_amount: &Amount,
        gas_limit: u64,
    ) -> MarketResult<Amount> {
        Self::check_gas(gas_limit)?;
        let received = self
            .pool
            .swap(&self.wrapped_native, native_amount, &Amount::zero())?;
        tracing::debug!(%native_amount, %received, "pool buy executed");
        Ok(received)
    }
}

/// Deterministic adapter for tests and simulation: swaps at a fixed
/// rate, optionally scripted to revert.
#[derive(Debug, Clone, Default)]
pub struct FixedRateAdapter {
    /// Native units received per token unit sold (numerator/denominator)
    sell_rate: (u64, u64),
    /// Token units received per native unit spent (numerator/denominator)
    buy_rate: (u64, u64),
    /// When set, every call reverts without touching counters
    failing: bool,
    /// Completed sells
    pub sells: u64,
    /// Completed buys
    pub buys: u64,
}

impl FixedRateAdapter {
    pub fn new(sell_rate: (u64, u64), buy_rate: (u64, u64)) -> Self {
        Self {
            sell_rate,
            buy_rate,
            failing: false,
            sells: 0,
            buys: 0,
        }
    }

    /// 1:1 both ways
    pub fn unit() -> Self {
        Self::new((1, 1), (1, 1))
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }
}

impl MarketAdapter for FixedRateAdapter {
    fn sell_tokens_for_native(
        &mut self,
        token_amount: &Amount,
        _gas_limit: u64,
    ) -> MarketResult<Amount> {
        if self.failing {
            return Err(MarketError::CallReverted("scripted failure".into()));
        }
        if token_amount.is_zero() {
            return Err(MarketError::ZeroAmount);
        }
        let out = token_amount
            .mul_div(self.sell_rate.0, self.sell_rate.1)
            .ok_or(MarketError::CallReverted("zero rate denominator".into()))?;
        self.sells += 1;
        Ok(out)
    }

    fn buy_tokens_with_native(
        &mut self,
        native_amount: &Amount,
        _gas_limit: u64,
    ) -> MarketResult<Amount> {
        if self.failing {
            return Err(MarketError::CallReverted("scripted failure".into()));
        }
        if native_amount.is_zero() {
            return Err(MarketError::ZeroAmount);
        }
        let out = native_amount
            .mul_div(self.buy_rate.0, self.buy_rate.1)
            .ok_or(MarketError::CallReverted("zero rate denominator".into()))?;
        self.buys += 1;
        Ok(out)
    }
}
