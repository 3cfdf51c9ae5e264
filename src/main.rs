//! Position card simulation.
//!
//! Runs fixed position scenarios through the source → card → render path
//! and prints what the dashboard would show.

use position_metrics::*;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "position_metrics=info,metrics_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = DisplaySettings::from_env()?;
    info!(
        language = settings.language.code(),
        currency = settings.fiat_currency.code(),
        "display settings loaded"
    );
    let renderer = Renderer::new(settings);

    println!("Position Card Simulation\n");

    scenario_1_small_long(&renderer);
    scenario_2_short_with_history(&renderer);
    scenario_3_no_position(&renderer);
    scenario_4_zero_margin(&renderer);
    scenario_5_missing_market(&renderer);
    scenario_6_stale_refresh(&renderer);
    scenario_7_staking_portfolio();

    println!("\nAll simulations completed successfully.");
    Ok(())
}

fn eth() -> AssetKey {
    AssetKey::new("sETH")
}

fn eth_market() -> MarketReference {
    MarketReference::new(eth(), Price::new_unchecked(dec!(1900)))
}

fn small_long() -> PositionSnapshot {
    PositionSnapshot {
        asset: eth(),
        side: Side::Long,
        size: SignedSize::new(dec!(0.005)),
        notional_value: Quote::new(dec!(120.00)),
        initial_margin: Quote::new(dec!(100)),
        initial_leverage: Leverage::new(dec!(2)),
        leverage: Leverage::new(dec!(2.4)),
        profit_loss: Quote::new(dec!(5.00)),
        accrued_funding: Quote::new(dec!(-0.50)),
        liquidation_price: dec!(1800.00),
        entry_price: Price::new(dec!(1850.00)),
    }
}

fn print_card(card: &RenderedCard) {
    println!("  {}", card.market_label);
    println!("    Side:            {} [{}]", card.side, card.side_class);
    println!("    Size:            {}", card.size);
    println!("    Unrealized P&L:  {} [{}]", card.unrealized_pnl, card.unrealized_pnl_class);
    println!("    Leverage:        {}", card.leverage);
    println!("    Liq. Price:      {}", card.liquidation_price);
    println!("    Avg. Entry:      {}", card.entry_price);
    println!("    Net Funding:     {} [{}]", card.net_funding, card.net_funding_class);
    println!("    Margin Ratio:    {}", card.margin_ratio);
    println!("    Close enabled:   {}\n", card.can_close);
}

/// Dust-sized long: four-decimal size, funding eating into P&L.
fn scenario_1_small_long(renderer: &Renderer) {
    println!("Scenario 1: Small Long\n");

    let source = InMemorySource::new()
        .with_position(small_long())
        .with_market(eth_market());

    let card = PositionCard::load(&source, eth(), Timestamp::now());
    print_card(&renderer.render_card(&card));
}

/// Short whose entry price only exists in history.
fn scenario_2_short_with_history(renderer: &Renderer) {
    println!("Scenario 2: Short With History Entry\n");

    let btc = AssetKey::new("sBTC");
    let short = PositionSnapshot {
        asset: btc.clone(),
        side: Side::Short,
        size: SignedSize::new(dec!(-0.75)),
        notional_value: Quote::new(dec!(-22875)),
        initial_margin: Quote::new(dec!(2250)),
        initial_leverage: Leverage::new(dec!(10)),
        leverage: Leverage::new(dec!(10.17)),
        profit_loss: Quote::new(dec!(-375)),
        accrued_funding: Quote::new(dec!(12.3456)),
        liquidation_price: dec!(33150),
        entry_price: None,
    };

    let source = InMemorySource::new()
        .with_position(short)
        .with_market(MarketReference::new(btc.clone(), Price::new_unchecked(dec!(30500))))
        .with_history(PositionHistoryEntry {
            asset: btc.clone(),
            entry_price: Price::new(dec!(30000)),
        });

    let card = PositionCard::load(&source, btc, Timestamp::now());
    print_card(&renderer.render_card(&card));
}

/// Flat account: every cell shows the placeholder.
fn scenario_3_no_position(renderer: &Renderer) {
    println!("Scenario 3: No Open Position\n");

    let source = InMemorySource::new().with_market(eth_market());
    let card = PositionCard::load(&source, eth(), Timestamp::now());
    print_card(&renderer.render_card(&card));
}

/// Zero initial margin: the percent can't be computed, the rest still shows.
fn scenario_4_zero_margin(renderer: &Renderer) {
    println!("Scenario 4: Zero Initial Margin\n");

    let mut pos = small_long();
    pos.initial_margin = Quote::zero();

    let source = InMemorySource::new().with_position(pos).with_market(eth_market());
    let card = PositionCard::load(&source, eth(), Timestamp::now());
    print_card(&renderer.render_card(&card));
}

/// Markets query down: P&L is withheld, everything else renders.
fn scenario_5_missing_market(renderer: &Renderer) {
    println!("Scenario 5: Markets Query Failing\n");

    let source = InMemorySource::new()
        .with_position(small_long())
        .with_market(eth_market())
        .failing(InMemorySource::MARKETS);

    let card = PositionCard::load(&source, eth(), Timestamp::now());
    print_card(&renderer.render_card(&card));
}

/// An older refresh landing after a newer one is dropped.
fn scenario_6_stale_refresh(renderer: &Renderer) {
    println!("Scenario 6: Stale Refresh\n");

    let mut source = InMemorySource::new()
        .with_position(small_long())
        .with_market(eth_market());

    let mut state = CardState::new();
    let open_card = PositionCard::load(&source, eth(), Timestamp::from_millis(2_000));
    source.close_position(&eth());
    let late_card = PositionCard::load(&source, eth(), Timestamp::from_millis(1_000));

    state.apply(open_card);
    let accepted = state.apply(late_card);
    println!("  Late refresh accepted: {}", accepted);

    if let Some(card) = state.current() {
        print_card(&renderer.render_card(card));
    }
}

/// Staking balances into the dashboard's three card pairs.
fn scenario_7_staking_portfolio() {
    println!("Scenario 7: Staking Portfolio\n");

    let balances = StakingBalances {
        liquid: dec!(1520.4567),
        escrowed: dec!(800.999),
        staked_escrowed: dec!(300),
        staked: dec!(2500.129),
        claimable: dec!(41.005),
        total_vestable: dec!(12.3399),
    };

    let portfolio = StakingPortfolio::from_balances(&balances);
    for pair in &portfolio.cards {
        let [left, right] = pair;
        println!(
            "  {:<14} {:>10}  ({:?}) | {:<14} {:>10}  ({:?})",
            left.kind.title(),
            format_number(left.value, Precision::Standard),
            left.tab,
            right.kind.title(),
            format_number(right.value, Precision::Standard),
            right.tab,
        );
    }
}
