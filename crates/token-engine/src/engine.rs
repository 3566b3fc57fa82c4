// token-engine/src/engine.rs

//! The engine aggregate: one struct owns all mutable contract state,
//! and every mutation flows through the component operations so the
//! supply/reserve/accumulator invariants stay auditable.

use crate::{
    buyback::{BuybackState, CycleLog},
    config::{BuybackMode, EngineConfig, ReserveFunding},
    events::{EventLog, TokenEvent},
    guards::{AccessLists, GuardContext},
    latch::{PairLatch, TaxLatch, TradingLatch},
    stats::{AntiBotStatus, BasicStats, BurnProgress, TaxRateView, TradingStatus},
    tax::{self, TaxRates, TransferKind},
    EngineError, EngineResult,
};
use market::MarketAdapter;
use serde::{Deserialize, Serialize};
use token_core::{Address, Amount, BlockNumber, CoreError, Ledger};

/// Destination wallets for the non-burn tax shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallets {
    pub marketing: Address,
    pub liquidity: Address,
}

/// Instruction for the host chain to move a foreign token out of the
/// contract (the engine only validates; it does not hold foreign
/// ledgers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryInstruction {
    pub token: Address,
    pub to: Address,
    pub amount: Amount,
}

/// The deflationary token engine.
///
/// Control flow per transfer: guards → classification/tax → (on sells)
/// auto-sell trigger → (at threshold) buyback trigger → ledger update →
/// events. Swap failures inside the window are swallowed and logged;
/// they never abort the enclosing transfer.
#[derive(Debug)]
pub struct TokenEngine {
    config: EngineConfig,
    ledger: Ledger,
    owner: Option<Address>,
    contract_address: Address,
    wallets: Wallets,
    trading: TradingLatch,
    pair: PairLatch,
    tax_latch: TaxLatch,
    lists: AccessLists,
    total_supply_issued: Amount,
    burned_tokens: Amount,
    buyback: BuybackState,
    swap_enabled: bool,
    auto_sell_enabled: bool,
    /// Tokens held for marketing operations (tax share accounting)
    marketing_pool: Amount,
    /// Tokens held for liquidity operations (tax share accounting)
    liquidity_pool: Amount,
    events: EventLog,
}

impl TokenEngine {
    /// Construct the token at genesis: mints the supply to the owner,
    /// applies the initial burn and (depending on the funding policy)
    /// pre-funds the buyback reserve.
    pub fn new(
        config: EngineConfig,
        owner: Address,
        contract_address: Address,
        wallets: Wallets,
    ) -> EngineResult<Self> {
        config.validate()?;
        if owner.is_zero()
            || contract_address.is_zero()
            || wallets.marketing.is_zero()
            || wallets.liquidity.is_zero()
        {
            return Err(CoreError::ZeroAddress.into());
        }

        let mut ledger = Ledger::new();
        ledger.mint(owner, &config.total_supply)?;
        ledger.mark_contract(contract_address);

        let mut burned_tokens = Amount::zero();
        if !config.initial_burn.is_zero() {
            ledger.burn(owner, &config.initial_burn)?;
            burned_tokens = config.initial_burn.clone();
        }

        let mut lists = AccessLists::new();
        lists.set_fee_excluded(owner, true);
        lists.set_fee_excluded(contract_address, true);
        lists.add_to_whitelist(contract_address);

        let mut buyback = BuybackState::new();
        if config.reserve_funding == ReserveFunding::AtConstruction {
            ledger.transfer(owner, contract_address, &config.buyback_reserve_cap)?;
            buyback.sync_reserve(
                &ledger.balance_of(&contract_address),
                &config.buyback_reserve_cap,
            );
        }

        let total_supply_issued = config.total_supply.clone();
        let mut engine = Self {
            config,
            ledger,
            owner: Some(owner),
            contract_address,
            wallets,
            trading: TradingLatch::Disabled,
            pair: PairLatch::Unset,
            tax_latch: TaxLatch::Taxed,
            lists,
            total_supply_issued,
            burned_tokens,
            buyback,
            swap_enabled: true,
            auto_sell_enabled: true,
            marketing_pool: Amount::zero(),
            liquidity_pool: Amount::zero(),
            events: EventLog::new(),
        };
        engine.maybe_remove_taxes(0);

        tracing::info!(
            supply = %engine.total_supply_issued,
            initial_burn = %engine.burned_tokens,
            "token engine constructed"
        );
        Ok(engine)
    }

    // ---- transfer pipeline ----

    /// Public transfer entry point (guard → tax → triggers pipeline).
    pub fn transfer(
        &mut self,
        market: &mut dyn MarketAdapter,
        from: Address,
        to: Address,
        amount: &Amount,
        block: BlockNumber,
    ) -> EngineResult<()> {
        // Zero-amount transfers pass through as no-ops: no tax, no event
        if amount.is_zero() {
            return Ok(());
        }
        self.execute_transfer(market, from, to, amount, block)
    }

    /// Delegated transfer: identical pipeline, allowance consumed after
    /// the transfer commits (pre-checked so the pipeline cannot leave a
    /// half-spent allowance behind).
    pub fn transfer_from(
        &mut self,
        market: &mut dyn MarketAdapter,
        spender: Address,
        from: Address,
        to: Address,
        amount: &Amount,
        block: BlockNumber,
    ) -> EngineResult<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let allowance = self.ledger.allowance(&from, &spender);
        if allowance < *amount {
            return Err(CoreError::InsufficientAllowance {
                required: amount.clone(),
                available: allowance,
            }
            .into());
        }
        self.execute_transfer(market, from, to, amount, block)?;
        self.ledger.spend_allowance(from, spender, amount)?;
        Ok(())
    }

    /// Set a spending allowance on the underlying ledger.
    pub fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> EngineResult<()> {
        self.ledger.approve(owner, spender, amount)?;
        Ok(())
    }

    fn execute_transfer(
        &mut self,
        market: &mut dyn MarketAdapter,
        from: Address,
        to: Address,
        amount: &Amount,
        block: BlockNumber,
    ) -> EngineResult<()> {
        // Ledger-level rejections, validated before any mutation so the
        // tax and net legs apply atomically or not at all
        if from.is_zero() || to.is_zero() {
            return Err(CoreError::ZeroAddress.into());
        }
        if from == to {
            return Err(CoreError::SelfTransfer.into());
        }

        let cap = self.config.max_tx_cap();
        let guard = GuardContext {
            trading: &self.trading,
            owner: self.owner,
            lists: &self.lists,
            anti_bot_window_blocks: self.config.anti_bot_window_blocks,
            max_tx_cap: &cap,
            block,
            to_is_contract: self.ledger.is_contract(&to),
        };
        if let Err(err) = guard.check(&from, &to, amount) {
            if let EngineError::AntiBotWindow { address, block } = &err {
                // Audit trail is recorded before the abort takes effect
                self.events.push(TokenEvent::AntiBotBlocked {
                    address: *address,
                    block: *block,
                });
            }
            return Err(err);
        }

        let balance = self.ledger.balance_of(&from);
        if balance < *amount {
            return Err(CoreError::InsufficientBalance {
                required: amount.clone(),
                available: balance,
            }
            .into());
        }

        let kind = tax::classify(&from, &to, &self.pair, &self.lists);
        let rate = self.tax_rates().rate_for(kind);
        let tax_amount = tax::compute_tax(amount, rate);
        let net = amount.clone() - tax_amount.clone();

        if !tax_amount.is_zero() {
            self.ledger.transfer(from, self.contract_address, &tax_amount)?;
            self.apply_tax_split(&tax_amount)?;
            self.events.push(TokenEvent::TaxApplied {
                from,
                to,
                amount: amount.clone(),
                tax_amount: tax_amount.clone(),
                kind,
            });
            tracing::debug!(%from, %to, %tax_amount, ?kind, "tax applied");
            self.maybe_remove_taxes(block);
        }

        self.ledger.transfer(from, to, &net)?;

        if kind == TransferKind::Sell
            && self.config.buyback_mode == BuybackMode::PerTransfer
            && self.trading.is_enabled()
            && self.swap_enabled
            && self.auto_sell_enabled
            && !self.buyback.swap_in_progress
        {
            // Lock held across both triggers; re-entrant transfers still
            // run guards and tax but skip the swap machinery entirely
            self.buyback.swap_in_progress = true;
            self.run_swap_window(market, amount, block);
            self.buyback.swap_in_progress = false;
        }

        Ok(())
    }

    /// Split collected tax: burn share leaves circulation immediately,
    /// the rest stays as contract-held balance earmarked per pool.
    fn apply_tax_split(&mut self, tax_amount: &Amount) -> EngineResult<()> {
        let shares = tax::split_tax(tax_amount, &self.config.tax_split);
        if !shares.burn.is_zero() {
            self.ledger.burn(self.contract_address, &shares.burn)?;
            self.burned_tokens = self
                .burned_tokens
                .checked_add(&shares.burn)
                .ok_or_else(|| EngineError::InvalidConfig("Burn counter overflow".into()))?;
        }
        self.marketing_pool = self
            .marketing_pool
            .checked_add(&shares.marketing)
            .ok_or_else(|| EngineError::InvalidConfig("Marketing pool overflow".into()))?;
        self.liquidity_pool = self
            .liquidity_pool
            .checked_add(&shares.liquidity)
            .ok_or_else(|| EngineError::InvalidConfig("Liquidity pool overflow".into()))?;
        Ok(())
    }

    /// Auto-sell then (at threshold) buyback. Failures are swallowed
    /// and logged; this function never aborts the enclosing transfer.
    fn run_swap_window(
        &mut self,
        market: &mut dyn MarketAdapter,
        sale_amount: &Amount,
        block: BlockNumber,
    ) {
        let attempt = sale_amount
            .mul_div(self.config.auto_sell_bps as u64, 10_000)
            .unwrap_or_else(Amount::zero);
        let contract_balance = self.ledger.balance_of(&self.contract_address);
        let clamped = self.buyback.clamp_sell(&attempt, &contract_balance);

        if !clamped.is_zero() {
            match market.sell_tokens_for_native(&clamped, self.config.swap_gas_limit) {
                Ok(native) => match self.settle_reserve_sell(&clamped, &native) {
                    Ok(()) => {
                        tracing::info!(sold = %clamped, received = %native, "auto-sell accumulated");
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "auto-sell settlement failed");
                        self.events
                            .push(TokenEvent::SwapForNativeFailed { amount: clamped });
                    }
                },
                Err(err) => {
                    tracing::warn!(attempted = %clamped, error = %err, "auto-sell swap failed");
                    self.events
                        .push(TokenEvent::SwapForNativeFailed { amount: clamped });
                }
            }
        }

        // Buyback retries opportunistically even after a failed sell,
        // in case a prior cycle already pushed the accumulator over
        self.try_buyback(market, block);
    }

    /// Move sold reserve tokens to the pair and book the accumulation.
    fn settle_reserve_sell(&mut self, sold: &Amount, native: &Amount) -> EngineResult<()> {
        let pair = self.pair.get().ok_or(EngineError::PairNotSet)?;
        self.ledger.transfer(self.contract_address, pair, sold)?;
        self.buyback.record_sell(sold, native)?;
        Ok(())
    }

    fn try_buyback(&mut self, market: &mut dyn MarketAdapter, block: BlockNumber) {
        if !self.buyback.threshold_met(&self.config.native_threshold) {
            return;
        }
        let native = self.buyback.accumulated_native().clone();
        match market.buy_tokens_with_native(&native, self.config.swap_gas_limit) {
            Ok(tokens) => {
                if let Err(err) = self.settle_buyback(&tokens, block) {
                    tracing::warn!(error = %err, "buyback settlement failed");
                    self.events
                        .push(TokenEvent::BuybackFailed { native_amount: native });
                }
            }
            Err(err) => {
                tracing::warn!(native = %native, error = %err, "buyback swap failed");
                self.events
                    .push(TokenEvent::BuybackFailed { native_amount: native });
            }
        }
    }

    /// Pull bought tokens from the pair, burn them, reset the
    /// accumulator and re-check the tax latch.
    fn settle_buyback(&mut self, tokens: &Amount, block: BlockNumber) -> EngineResult<()> {
        let pair = self.pair.get().ok_or(EngineError::PairNotSet)?;
        self.ledger.transfer(pair, self.contract_address, tokens)?;
        self.ledger.burn(self.contract_address, tokens)?;
        self.burned_tokens = self
            .burned_tokens
            .checked_add(tokens)
            .ok_or_else(|| EngineError::InvalidConfig("Burn counter overflow".into()))?;

        let spent = self.buyback.record_buyback(block);
        self.events.push(TokenEvent::BuybackExecuted {
            native_spent: spent.clone(),
            tokens_burned: tokens.clone(),
            block,
        });
        tracing::info!(native_spent = %spent, burned = %tokens, "buyback executed");
        self.maybe_remove_taxes(block);
        Ok(())
    }

    /// One-way latch: flips exactly once when cumulative burns cross
    /// the threshold; later burns never re-examine it.
    fn maybe_remove_taxes(&mut self, block: BlockNumber) {
        if self.tax_latch.is_tax_free() {
            return;
        }
        if self.burned_tokens >= self.config.burn_threshold() {
            self.tax_latch.remove_taxes();
            self.events.push(TokenEvent::TaxesRemoved {
                total_burned: self.burned_tokens.clone(),
                block,
            });
            tracing::info!(
                total_burned = %self.burned_tokens,
                "burn threshold reached, taxes permanently removed"
            );
        }
    }

    // ---- manual buyback cycle (ManualCycle mode) ----

    /// Phase one of the manual cycle: sell reserve tokens for native
    /// currency. Each unmet precondition is a distinct failure.
    pub fn sell_buyback_tokens(
        &mut self,
        market: &mut dyn MarketAdapter,
        caller: Address,
        amount: &Amount,
        block: BlockNumber,
    ) -> EngineResult<Amount> {
        self.ensure_owner(&caller)?;
        self.ensure_manual_mode()?;
        if amount.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        let cap = self.config.max_tx_cap();
        if *amount > cap {
            return Err(EngineError::MaxTxExceeded {
                amount: amount.clone(),
                cap,
            });
        }
        if *amount > *self.buyback.reserve_remaining() {
            return Err(EngineError::InsufficientReserve {
                requested: amount.clone(),
                available: self.buyback.reserve_remaining().clone(),
            });
        }
        let contract_balance = self.ledger.balance_of(&self.contract_address);
        if *amount > contract_balance {
            return Err(CoreError::InsufficientBalance {
                required: amount.clone(),
                available: contract_balance,
            }
            .into());
        }
        self.pair.get().ok_or(EngineError::PairNotSet)?;

        self.buyback.swap_in_progress = true;
        let result = market.sell_tokens_for_native(amount, self.config.swap_gas_limit);
        self.buyback.swap_in_progress = false;

        match result {
            Ok(native) => {
                self.settle_reserve_sell(amount, &native)?;
                let index = self.buyback.cycles.open(amount.clone(), native.clone(), block);
                tracing::info!(cycle = index, sold = %amount, received = %native, "cycle sell executed");
                Ok(native)
            }
            Err(err) => {
                self.events.push(TokenEvent::SwapForNativeFailed {
                    amount: amount.clone(),
                });
                Err(EngineError::SellSwapFailed(err))
            }
        }
    }

    /// Phase two of the manual cycle: spend the full accumulator on
    /// tokens and burn them, completing the open cycle record.
    pub fn buyback_and_burn(
        &mut self,
        market: &mut dyn MarketAdapter,
        caller: Address,
        block: BlockNumber,
    ) -> EngineResult<Amount> {
        self.ensure_owner(&caller)?;
        self.ensure_manual_mode()?;
        if !self.buyback.cycles.has_open_cycle() {
            return Err(EngineError::NoOpenCycle);
        }
        let native = self.buyback.accumulated_native().clone();
        if native.is_zero() {
            return Err(EngineError::NothingAccumulated);
        }

        self.buyback.swap_in_progress = true;
        let result = market.buy_tokens_with_native(&native, self.config.swap_gas_limit);
        self.buyback.swap_in_progress = false;

        match result {
            Ok(tokens) => {
                self.settle_buyback(&tokens, block)?;
                self.buyback
                    .cycles
                    .complete(tokens.clone(), tokens.clone(), block)?;
                Ok(tokens)
            }
            Err(err) => {
                self.events.push(TokenEvent::BuybackFailed {
                    native_amount: native,
                });
                Err(EngineError::BuybackSwapFailed(err))
            }
        }
    }

    // ---- owner-gated administration ----

    fn ensure_owner(&self, caller: &Address) -> EngineResult<()> {
        match self.owner {
            Some(owner) if owner == *caller => Ok(()),
            _ => Err(EngineError::NotOwner),
        }
    }

    fn ensure_manual_mode(&self) -> EngineResult<()> {
        if self.config.buyback_mode != BuybackMode::ManualCycle {
            return Err(EngineError::WrongBuybackMode {
                expected: BuybackMode::ManualCycle,
            });
        }
        Ok(())
    }

    /// One-time primary pair registration. The pair is a contract and
    /// is whitelisted so the anti-bot window does not block the pool.
    pub fn set_pair(&mut self, caller: Address, pair: Address) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        if pair.is_zero() {
            return Err(CoreError::ZeroAddress.into());
        }
        self.pair.set(pair)?;
        self.ledger.mark_contract(pair);
        self.lists.add_to_whitelist(pair);
        tracing::info!(%pair, "primary pair set");
        Ok(())
    }

    /// One-time trading launch; records the launch block for the
    /// anti-bot window.
    pub fn enable_trading(&mut self, caller: Address, block: BlockNumber) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        self.trading.enable(block)?;
        self.events.push(TokenEvent::TradingEnabled { block });
        tracing::info!(launch_block = block, "trading enabled");
        Ok(())
    }

    pub fn set_swap_enabled(&mut self, caller: Address, enabled: bool) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        self.swap_enabled = enabled;
        Ok(())
    }

    pub fn set_auto_sell_enabled(&mut self, caller: Address, enabled: bool) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        self.auto_sell_enabled = enabled;
        Ok(())
    }

    pub fn set_native_threshold(&mut self, caller: Address, threshold: Amount) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        if threshold.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        self.config.native_threshold = threshold;
        Ok(())
    }

    pub fn set_auto_sell_bps(&mut self, caller: Address, bps: u16) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        if bps > 10_000 {
            return Err(EngineError::InvalidConfig(
                "Auto-sell share exceeds 100%".into(),
            ));
        }
        self.config.auto_sell_bps = bps;
        Ok(())
    }

    pub fn set_blacklisted(
        &mut self,
        caller: Address,
        address: Address,
        blacklisted: bool,
    ) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        self.lists.set_blacklisted(address, blacklisted);
        Ok(())
    }

    pub fn set_blacklisted_batch(
        &mut self,
        caller: Address,
        addresses: &[Address],
        blacklisted: bool,
    ) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        for address in addresses {
            self.lists.set_blacklisted(*address, blacklisted);
        }
        Ok(())
    }

    pub fn add_to_whitelist(&mut self, caller: Address, address: Address) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        self.lists.add_to_whitelist(address);
        Ok(())
    }

    pub fn remove_from_whitelist(&mut self, caller: Address, address: Address) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        self.lists.remove_from_whitelist(&address);
        Ok(())
    }

    pub fn set_fee_excluded(
        &mut self,
        caller: Address,
        address: Address,
        excluded: bool,
    ) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        self.lists.set_fee_excluded(address, excluded);
        Ok(())
    }

    pub fn set_fee_excluded_batch(
        &mut self,
        caller: Address,
        addresses: &[Address],
        excluded: bool,
    ) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        for address in addresses {
            self.lists.set_fee_excluded(*address, excluded);
        }
        Ok(())
    }

    /// Register an additional recognized DEX pair (distinct from the
    /// one-time primary pair).
    pub fn add_secondary_pair(&mut self, caller: Address, pair: Address) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        if pair.is_zero() {
            return Err(CoreError::ZeroAddress.into());
        }
        self.lists.add_secondary_pair(pair);
        self.ledger.mark_contract(pair);
        self.lists.add_to_whitelist(pair);
        Ok(())
    }

    pub fn update_wallets(&mut self, caller: Address, wallets: Wallets) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        if wallets.marketing.is_zero() || wallets.liquidity.is_zero() {
            return Err(CoreError::ZeroAddress.into());
        }
        self.wallets = wallets;
        Ok(())
    }

    /// Re-fund the buyback reserve from the contract's token balance,
    /// clamped to the configured cap.
    pub fn sync_reserve(&mut self, caller: Address) -> EngineResult<Amount> {
        self.ensure_owner(&caller)?;
        let balance = self.ledger.balance_of(&self.contract_address);
        let synced = self
            .buyback
            .sync_reserve(&balance, &self.config.buyback_reserve_cap);
        tracing::info!(reserve = %synced, "buyback reserve synced");
        Ok(synced)
    }

    /// Owner-driven burn from the caller's own balance; feeds the
    /// tax-removal latch like any other burn.
    pub fn external_burn(
        &mut self,
        caller: Address,
        amount: &Amount,
        block: BlockNumber,
    ) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        if amount.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        self.ledger.burn(caller, amount)?;
        self.burned_tokens = self
            .burned_tokens
            .checked_add(amount)
            .ok_or_else(|| EngineError::InvalidConfig("Burn counter overflow".into()))?;
        self.events.push(TokenEvent::ExternalBurnUpdated {
            amount: amount.clone(),
            total_burned: self.burned_tokens.clone(),
        });
        self.maybe_remove_taxes(block);
        Ok(())
    }

    /// Permanently give up ownership; every owner-gated mutation
    /// becomes unreachable afterwards.
    pub fn renounce_ownership(&mut self, caller: Address) -> EngineResult<()> {
        self.ensure_owner(&caller)?;
        self.owner = None;
        tracing::info!("ownership renounced");
        Ok(())
    }

    /// Validate recovery of a foreign token mistakenly sent to the
    /// contract. Recovering the token itself is rejected; execution of
    /// the returned instruction is the host chain's concern.
    pub fn recover_foreign_token(
        &mut self,
        caller: Address,
        token: Address,
        amount: &Amount,
    ) -> EngineResult<RecoveryInstruction> {
        self.ensure_owner(&caller)?;
        if token == self.contract_address {
            return Err(EngineError::CannotRecoverSelf);
        }
        if amount.is_zero() {
            return Err(EngineError::ZeroAmount);
        }
        Ok(RecoveryInstruction {
            token,
            to: caller,
            amount: amount.clone(),
        })
    }

    /// Record that an address carries code. This mirrors the host
    /// chain's code-size check; it is a fact, not a policy, so it is
    /// not owner-gated.
    pub fn mark_contract(&mut self, address: Address) {
        self.ledger.mark_contract(address);
    }

    // ---- read-only views ----

    pub fn owner(&self) -> Option<Address> {
        self.owner
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub fn wallets(&self) -> &Wallets {
        &self.wallets
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn balance_of(&self, address: &Address) -> Amount {
        self.ledger.balance_of(address)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.ledger.allowance(owner, spender)
    }

    pub fn burned_tokens(&self) -> &Amount {
        &self.burned_tokens
    }

    pub fn circulating_supply(&self) -> Amount {
        // burned_tokens <= total_supply_issued in every reachable state
        self.total_supply_issued
            .checked_sub(&self.burned_tokens)
            .unwrap_or_else(Amount::zero)
    }

    pub fn reserve_remaining(&self) -> &Amount {
        self.buyback.reserve_remaining()
    }

    pub fn accumulated_native(&self) -> &Amount {
        self.buyback.accumulated_native()
    }

    pub fn last_buyback_block(&self) -> Option<BlockNumber> {
        self.buyback.last_buyback_block()
    }

    /// Current tax rates; all zeros once the removal latch has flipped.
    pub fn tax_rates(&self) -> TaxRateView {
        if self.tax_latch.is_tax_free() {
            TaxRates::zero()
        } else {
            self.config.tax_rates
        }
    }

    pub fn taxes_removed(&self) -> bool {
        self.tax_latch.is_tax_free()
    }

    pub fn basic_stats(&self) -> BasicStats {
        BasicStats {
            circulating_supply: self.circulating_supply(),
            burned_tokens: self.burned_tokens.clone(),
            buyback_reserve_remaining: self.buyback.reserve_remaining().clone(),
            accumulated_native: self.buyback.accumulated_native().clone(),
        }
    }

    pub fn burn_progress(&self) -> BurnProgress {
        let threshold = self.config.burn_threshold();
        let percentage = self
            .burned_tokens
            .ratio_bps(&threshold)
            .map(|bps| (bps as f64 / 100.0).min(100.0))
            .unwrap_or(0.0);
        BurnProgress {
            current_burned: self.burned_tokens.clone(),
            threshold: threshold.clone(),
            percentage,
            threshold_reached: self.burned_tokens >= threshold,
        }
    }

    pub fn trading_status(&self) -> TradingStatus {
        TradingStatus {
            trading_enabled: self.trading.is_enabled(),
            launch_block: self.trading.launch_block(),
            pair: self.pair.get(),
            swap_enabled: self.swap_enabled,
            auto_sell_enabled: self.auto_sell_enabled,
            taxes_removed: self.tax_latch.is_tax_free(),
            buyback_mode: self.config.buyback_mode,
            owner_renounced: self.owner.is_none(),
        }
    }

    pub fn anti_bot_status(&self, address: &Address, block: BlockNumber) -> AntiBotStatus {
        let (window_active, blocks_remaining) = match self.trading.launch_block() {
            Some(launch) => {
                let end = launch + self.config.anti_bot_window_blocks;
                (block < end, end.saturating_sub(block))
            }
            None => (false, 0),
        };
        AntiBotStatus {
            window_active,
            blocks_remaining,
            whitelisted: self.lists.is_whitelisted(address),
        }
    }

    pub fn access_lists(&self) -> &AccessLists {
        &self.lists
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn cycle_log(&self) -> &CycleLog {
        &self.buyback.cycles
    }

    pub fn marketing_pool(&self) -> &Amount {
        &self.marketing_pool
    }

    pub fn liquidity_pool(&self) -> &Amount {
        &self.liquidity_pool
    }

    /// Ledger total supply, for reconciliation against
    /// `circulating_supply` (they must agree in every reachable state).
    pub fn ledger_supply(&self) -> &Amount {
        self.ledger.total_supply()
    }

    #[cfg(test)]
    pub(crate) fn force_swap_lock(&mut self, held: bool) {
        self.buyback.swap_in_progress = held;
    }
}
