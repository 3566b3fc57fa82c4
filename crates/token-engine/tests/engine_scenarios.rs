// token-engine/tests/engine_scenarios.rs

//! End-to-end scenarios for the transfer pipeline: genesis accounting,
//! reserve funding, auto-sell accumulation, swallowed swap failures,
//! the tax-removal latch and the anti-bot window.

use market::{FixedRateAdapter, MarketAdapter, MarketError};
use token_core::{Address, Amount};
use token_engine::{
    BuybackMode, EngineConfig, EngineError, TokenEngine, TokenEvent, Wallets,
};

fn addr(byte: u8) -> Address {
    Address::new([byte; 20])
}

fn owner() -> Address {
    addr(1)
}

fn contract() -> Address {
    addr(2)
}

fn pair() -> Address {
    addr(3)
}

fn config() -> EngineConfig {
    EngineConfig {
        total_supply: Amount::from_u64(30_000_000),
        initial_burn: Amount::from_u64(8_000_000),
        buyback_reserve_cap: Amount::from_u64(10_000_000),
        // High threshold so accumulation is observable across sells
        native_threshold: Amount::from_u64(1_000_000),
        ..EngineConfig::default()
    }
}

fn engine_with(config: EngineConfig) -> TokenEngine {
    TokenEngine::new(
        config,
        owner(),
        contract(),
        Wallets {
            marketing: addr(4),
            liquidity: addr(5),
        },
    )
    .unwrap()
}

/// Pair set, contract funded and reserve synced, trading enabled at
/// block 10, a non-excluded holder seeded with tokens.
fn launched_engine(holder: Address) -> TokenEngine {
    let mut engine = engine_with(config());
    let mut market = FixedRateAdapter::unit();
    engine.set_pair(owner(), pair()).unwrap();
    engine
        .transfer(&mut market, owner(), pair(), &Amount::from_u64(2_000_000), 1)
        .unwrap();
    engine
        .transfer(&mut market, owner(), contract(), &Amount::from_u64(10_000_000), 1)
        .unwrap();
    engine.sync_reserve(owner()).unwrap();
    engine
        .transfer(&mut market, owner(), holder, &Amount::from_u64(1_000_000), 1)
        .unwrap();
    engine.enable_trading(owner(), 10).unwrap();
    engine
}

fn assert_supply_reconciles(engine: &TokenEngine) {
    assert_eq!(engine.circulating_supply(), *engine.ledger_supply());
    assert!(*engine.burned_tokens() <= Amount::from_u64(30_000_000));
    assert!(*engine.reserve_remaining() <= engine.config().buyback_reserve_cap);
    assert!(*engine.reserve_remaining() <= engine.balance_of(&contract()));
}

#[test]
fn genesis_applies_initial_burn() {
    let engine = engine_with(config());
    let stats = engine.basic_stats();

    assert_eq!(stats.circulating_supply, Amount::from_u64(22_000_000));
    assert_eq!(stats.burned_tokens, Amount::from_u64(8_000_000));
    assert_eq!(stats.buyback_reserve_remaining, Amount::zero());
    assert_eq!(stats.accumulated_native, Amount::zero());
    assert_supply_reconciles(&engine);
}

#[test]
fn reserve_sync_clamps_to_cap() {
    let mut engine = engine_with(config());
    let mut market = FixedRateAdapter::unit();

    engine
        .transfer(&mut market, owner(), contract(), &Amount::from_u64(10_000_000), 1)
        .unwrap();
    let synced = engine.sync_reserve(owner()).unwrap();

    assert_eq!(synced, Amount::from_u64(10_000_000));
    assert_supply_reconciles(&engine);
}

#[test]
fn sell_routes_reserve_through_auto_sell() {
    let holder = addr(9);
    let mut engine = launched_engine(holder);
    let mut market = FixedRateAdapter::unit();

    engine
        .transfer(&mut market, holder, pair(), &Amount::from_u64(100_000), 20)
        .unwrap();

    // 2% of the 100_000 sale, sold at the unit rate
    assert_eq!(*engine.reserve_remaining(), Amount::from_u64(9_998_000));
    assert_eq!(*engine.accumulated_native(), Amount::from_u64(2_000));
    assert_eq!(market.sells, 1);

    // Seller debited in full; pair credited net of the 8% sell tax
    assert_eq!(engine.balance_of(&holder), Amount::from_u64(900_000));
    assert_eq!(
        engine
            .events()
            .count_where(|e| matches!(e, TokenEvent::TaxApplied { .. })),
        1
    );
    assert_supply_reconciles(&engine);
}

#[test]
fn failed_auto_sell_never_bricks_the_transfer() {
    let holder = addr(9);
    let mut engine = launched_engine(holder);
    let mut market = FixedRateAdapter::unit();
    market.set_failing(true);

    let balance_before = engine.balance_of(&holder);
    engine
        .transfer(&mut market, holder, pair(), &Amount::from_u64(100_000), 20)
        .unwrap();

    // Reserve and accumulator untouched, failure logged
    assert_eq!(*engine.reserve_remaining(), Amount::from_u64(10_000_000));
    assert_eq!(*engine.accumulated_native(), Amount::zero());
    assert_eq!(
        engine.events().last(),
        Some(&TokenEvent::SwapForNativeFailed {
            amount: Amount::from_u64(2_000)
        })
    );

    // The sell itself committed: holder debited the full amount
    assert_eq!(
        engine.balance_of(&holder),
        balance_before.checked_sub(&Amount::from_u64(100_000)).unwrap()
    );
    assert_supply_reconciles(&engine);
}

#[test]
fn failed_swaps_are_idempotent() {
    let holder = addr(9);
    let mut engine = launched_engine(holder);
    let mut market = FixedRateAdapter::unit();
    market.set_failing(true);

    for block in [20, 21] {
        engine
            .transfer(&mut market, holder, pair(), &Amount::from_u64(50_000), block)
            .unwrap();
        assert_eq!(*engine.reserve_remaining(), Amount::from_u64(10_000_000));
        assert_eq!(*engine.accumulated_native(), Amount::zero());
    }
    assert_eq!(
        engine
            .events()
            .count_where(|e| matches!(e, TokenEvent::SwapForNativeFailed { .. })),
        2
    );
}

#[test]
fn buyback_fires_at_threshold_and_resets_accumulator() {
    let holder = addr(9);
    let mut engine = engine_with(EngineConfig {
        // Low threshold: the first accumulation crosses it
        native_threshold: Amount::from_u64(1_500),
        ..config()
    });
    let mut market = FixedRateAdapter::unit();
    engine.set_pair(owner(), pair()).unwrap();
    engine
        .transfer(&mut market, owner(), pair(), &Amount::from_u64(2_000_000), 1)
        .unwrap();
    engine
        .transfer(&mut market, owner(), contract(), &Amount::from_u64(10_000_000), 1)
        .unwrap();
    engine.sync_reserve(owner()).unwrap();
    engine
        .transfer(&mut market, owner(), holder, &Amount::from_u64(1_000_000), 1)
        .unwrap();
    engine.enable_trading(owner(), 10).unwrap();

    let burned_before = engine.burned_tokens().clone();
    engine
        .transfer(&mut market, holder, pair(), &Amount::from_u64(100_000), 20)
        .unwrap();

    // Auto-sell accumulated 2_000 >= 1_500: buyback ran, burned the
    // bought tokens and reset the accumulator to exactly zero
    assert_eq!(*engine.accumulated_native(), Amount::zero());
    assert_eq!(market.buys, 1);
    assert!(*engine.burned_tokens() > burned_before);
    assert_eq!(engine.last_buyback_block(), Some(20));
    assert_eq!(
        engine
            .events()
            .count_where(|e| matches!(e, TokenEvent::BuybackExecuted { .. })),
        1
    );
    assert_supply_reconciles(&engine);
}

#[test]
fn failed_buyback_preserves_accumulator() {
    let holder = addr(9);
    let mut engine = engine_with(EngineConfig {
        native_threshold: Amount::from_u64(1_500),
        ..config()
    });
    let mut market = FixedRateAdapter::unit();
    engine.set_pair(owner(), pair()).unwrap();
    engine
        .transfer(&mut market, owner(), pair(), &Amount::from_u64(2_000_000), 1)
        .unwrap();
    engine
        .transfer(&mut market, owner(), contract(), &Amount::from_u64(10_000_000), 1)
        .unwrap();
    engine.sync_reserve(owner()).unwrap();
    engine
        .transfer(&mut market, owner(), holder, &Amount::from_u64(1_000_000), 1)
        .unwrap();
    engine.enable_trading(owner(), 10).unwrap();

    // Adapter that sells fine but refuses to buy
    struct SellOnly(FixedRateAdapter);
    impl MarketAdapter for SellOnly {
        fn sell_tokens_for_native(
            &mut self,
            token_amount: &Amount,
            gas_limit: u64,
        ) -> Result<Amount, MarketError> {
            self.0.sell_tokens_for_native(token_amount, gas_limit)
        }
        fn buy_tokens_with_native(
            &mut self,
            _native_amount: &Amount,
            _gas_limit: u64,
        ) -> Result<Amount, MarketError> {
            Err(MarketError::CallReverted("no buys".into()))
        }
    }
    let mut market = SellOnly(FixedRateAdapter::unit());

    let burned_before = engine.burned_tokens().clone();
    engine
        .transfer(&mut market, holder, pair(), &Amount::from_u64(100_000), 20)
        .unwrap();

    // Accumulation survived the failed buyback for a later retry
    assert_eq!(*engine.accumulated_native(), Amount::from_u64(2_000));
    assert_eq!(*engine.burned_tokens(), {
        // Only the tax burn share moved the counter (60% of 8% of 100k)
        burned_before.checked_add(&Amount::from_u64(4_800)).unwrap()
    });
    assert_eq!(
        engine.events().last(),
        Some(&TokenEvent::BuybackFailed {
            native_amount: Amount::from_u64(2_000)
        })
    );

    // A later sell retries the buyback with a healthy adapter
    let mut market = FixedRateAdapter::unit();
    engine
        .transfer(&mut market, holder, pair(), &Amount::from_u64(100_000), 21)
        .unwrap();
    assert_eq!(*engine.accumulated_native(), Amount::zero());
    assert_eq!(market.buys, 1);
    assert_supply_reconciles(&engine);
}

#[test]
fn auto_sell_clamps_to_reserve_instead_of_reverting() {
    let holder = addr(9);
    let mut engine = engine_with(config());
    let mut market = FixedRateAdapter::unit();
    engine.set_pair(owner(), pair()).unwrap();
    engine
        .transfer(&mut market, owner(), pair(), &Amount::from_u64(2_000_000), 1)
        .unwrap();
    // Fund far less than 2% of the coming sale
    engine
        .transfer(&mut market, owner(), contract(), &Amount::from_u64(500), 1)
        .unwrap();
    engine.sync_reserve(owner()).unwrap();
    engine
        .transfer(&mut market, owner(), holder, &Amount::from_u64(1_000_000), 1)
        .unwrap();
    engine.enable_trading(owner(), 10).unwrap();

    engine
        .transfer(&mut market, holder, pair(), &Amount::from_u64(100_000), 20)
        .unwrap();

    // Attempt of 2_000 clamped to the 500 reserved
    assert_eq!(*engine.reserve_remaining(), Amount::zero());
    assert_eq!(*engine.accumulated_native(), Amount::from_u64(500));
    assert_supply_reconciles(&engine);
}

#[test]
fn external_burn_at_exact_threshold_removes_taxes() {
    let holder = addr(9);
    let mut engine = engine_with(config());
    let mut market = FixedRateAdapter::unit();
    engine.set_pair(owner(), pair()).unwrap();
    engine
        .transfer(&mut market, owner(), pair(), &Amount::from_u64(2_000_000), 1)
        .unwrap();
    engine
        .transfer(&mut market, owner(), holder, &Amount::from_u64(200_000), 1)
        .unwrap();
    engine.enable_trading(owner(), 10).unwrap();

    // 8M initial + 14.5M external = exactly 75% of 30M
    engine
        .external_burn(owner(), &Amount::from_u64(14_500_000), 15)
        .unwrap();

    assert!(engine.taxes_removed());
    assert_eq!(*engine.burned_tokens(), Amount::from_u64(22_500_000));
    let progress = engine.burn_progress();
    assert!(progress.threshold_reached);
    assert_eq!(progress.percentage, 100.0);
    let rates = engine.tax_rates();
    assert_eq!((rates.buy, rates.sell, rates.wallet), (0, 0, 0));
    assert_eq!(
        engine
            .events()
            .count_where(|e| matches!(e, TokenEvent::TaxesRemoved { .. })),
        1
    );

    // A subsequent sell moves the full amount with zero deduction
    engine
        .transfer(&mut market, holder, pair(), &Amount::from_u64(50_000), 20)
        .unwrap();
    assert_eq!(engine.balance_of(&holder), Amount::from_u64(150_000));
    assert_eq!(
        engine
            .events()
            .count_where(|e| matches!(e, TokenEvent::TaxApplied { .. })),
        0
    );

    // The latch never flips back
    engine
        .external_burn(owner(), &Amount::from_u64(1_000), 21)
        .unwrap();
    assert!(engine.taxes_removed());
    assert_supply_reconciles(&engine);
}

#[test]
fn anti_bot_window_blocks_contracts_then_reopens() {
    let holder = addr(9);
    let bot = addr(20);
    let mut engine = launched_engine(holder);
    let mut market = FixedRateAdapter::unit();
    engine.mark_contract(bot);

    // Launch block 10, window 3: block 12 is still inside
    let err = engine
        .transfer(&mut market, pair(), bot, &Amount::from_u64(10_000), 12)
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::AntiBotWindow {
            address: bot,
            block: 12
        }
    );
    assert_eq!(
        engine.events().last(),
        Some(&TokenEvent::AntiBotBlocked {
            address: bot,
            block: 12
        })
    );
    assert_eq!(engine.balance_of(&bot), Amount::zero());

    let status = engine.anti_bot_status(&bot, 12);
    assert!(status.window_active);
    assert_eq!(status.blocks_remaining, 1);
    assert!(!status.whitelisted);

    // The identical call after the window closes succeeds (5% buy tax)
    engine
        .transfer(&mut market, pair(), bot, &Amount::from_u64(10_000), 13)
        .unwrap();
    assert_eq!(engine.balance_of(&bot), Amount::from_u64(9_500));
    assert!(!engine.anti_bot_status(&bot, 13).window_active);
    assert_supply_reconciles(&engine);
}

#[test]
fn max_tx_cap_is_an_exact_boundary() {
    let holder = addr(9);
    let mut engine = launched_engine(holder);
    let mut market = FixedRateAdapter::unit();
    let other = addr(10);

    // Cap is 1% of 30M = 300_000
    engine
        .transfer(&mut market, holder, other, &Amount::from_u64(300_000), 20)
        .unwrap();

    let err = engine
        .transfer(&mut market, holder, other, &Amount::from_u64(300_001), 21)
        .unwrap_err();
    assert!(matches!(err, EngineError::MaxTxExceeded { .. }));
}

#[test]
fn blacklist_and_trading_guards_are_distinct_errors() {
    let holder = addr(9);
    let mut engine = engine_with(config());
    let mut market = FixedRateAdapter::unit();
    engine
        .transfer(&mut market, owner(), holder, &Amount::from_u64(10_000), 1)
        .unwrap();

    // Trading not yet enabled for non-owner parties
    assert_eq!(
        engine.transfer(&mut market, holder, addr(10), &Amount::from_u64(100), 2),
        Err(EngineError::TradingDisabled)
    );

    engine.enable_trading(owner(), 5).unwrap();
    engine.set_blacklisted(owner(), holder, true).unwrap();
    assert_eq!(
        engine.transfer(&mut market, holder, addr(10), &Amount::from_u64(100), 20),
        Err(EngineError::Blacklisted(holder))
    );

    engine.set_blacklisted(owner(), holder, false).unwrap();
    engine
        .transfer(&mut market, holder, addr(10), &Amount::from_u64(100), 20)
        .unwrap();
}

#[test]
fn wallet_transfers_take_the_wallet_rate() {
    let holder = addr(9);
    let mut engine = launched_engine(holder);
    let mut market = FixedRateAdapter::unit();
    let other = addr(10);

    engine
        .transfer(&mut market, holder, other, &Amount::from_u64(10_000), 20)
        .unwrap();

    // 2% wallet tax retained by the contract
    assert_eq!(engine.balance_of(&other), Amount::from_u64(9_800));
    assert!(matches!(
        engine.events().last(),
        Some(&TokenEvent::TaxApplied {
            ref tax_amount, ..
        }) if *tax_amount == Amount::from_u64(200)
    ));
    // Shares: 120 burn / 50 marketing / 30 liquidity
    assert_eq!(*engine.marketing_pool(), Amount::from_u64(50));
    assert_eq!(*engine.liquidity_pool(), Amount::from_u64(30));
    assert_supply_reconciles(&engine);
}

#[test]
fn transfer_from_runs_the_same_pipeline() {
    let holder = addr(9);
    let spender = addr(11);
    let mut engine = launched_engine(holder);
    let mut market = FixedRateAdapter::unit();

    engine
        .approve(holder, spender, Amount::from_u64(60_000))
        .unwrap();

    engine
        .transfer_from(&mut market, spender, holder, pair(), &Amount::from_u64(50_000), 20)
        .unwrap();
    assert_eq!(engine.allowance(&holder, &spender), Amount::from_u64(10_000));
    // Sell tax applied exactly as for a direct transfer
    assert_eq!(
        engine
            .events()
            .count_where(|e| matches!(e, TokenEvent::TaxApplied { .. })),
        1
    );

    // Shortfall is rejected before any state changes
    let err = engine
        .transfer_from(&mut market, spender, holder, pair(), &Amount::from_u64(20_000), 21)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Core(token_core::CoreError::InsufficientAllowance { .. })
    ));
    assert_eq!(engine.allowance(&holder, &spender), Amount::from_u64(10_000));
}

#[test]
fn manual_mode_disables_per_transfer_triggers() {
    let holder = addr(9);
    let mut engine = engine_with(EngineConfig {
        buyback_mode: BuybackMode::ManualCycle,
        ..config()
    });
    let mut market = FixedRateAdapter::unit();
    engine.set_pair(owner(), pair()).unwrap();
    engine
        .transfer(&mut market, owner(), contract(), &Amount::from_u64(10_000_000), 1)
        .unwrap();
    engine.sync_reserve(owner()).unwrap();
    engine
        .transfer(&mut market, owner(), holder, &Amount::from_u64(1_000_000), 1)
        .unwrap();
    engine.enable_trading(owner(), 10).unwrap();

    engine
        .transfer(&mut market, holder, pair(), &Amount::from_u64(100_000), 20)
        .unwrap();

    // Taxed as a sell, but no implicit swap happened
    assert_eq!(*engine.reserve_remaining(), Amount::from_u64(10_000_000));
    assert_eq!(market.sells, 0);
}
