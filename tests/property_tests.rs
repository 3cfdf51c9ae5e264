//! Property-based tests for the metrics derivation.
//!
//! These tests verify invariants hold under random snapshots.

use position_metrics::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Strategies for generating test data
fn money_strategy() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|x| Decimal::new(x, 4)) // -$1,000 to $1,000
}

fn size_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000i64..100_000i64).prop_map(|x| Decimal::new(x, 4)) // -10 to 10
}

fn margin_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|x| Decimal::new(x, 2)) // $0 to $10,000
}

fn leverage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=50u32).prop_map(Decimal::from) // 0x to 50x
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Long), Just(Side::Short)]
}

prop_compose! {
    fn snapshot_strategy()(
        side in side_strategy(),
        size in size_strategy(),
        notional in money_strategy(),
        margin in margin_strategy(),
        initial_leverage in leverage_strategy(),
        leverage in leverage_strategy(),
        pnl in money_strategy(),
        funding in money_strategy(),
        liq in margin_strategy(),
        entry in proptest::option::of(1i64..10_000_000i64),
    ) -> PositionSnapshot {
        PositionSnapshot {
            asset: AssetKey::new("sETH"),
            side,
            size: SignedSize::new(size),
            notional_value: Quote::new(notional),
            initial_margin: Quote::new(margin),
            initial_leverage: Leverage::new(initial_leverage),
            leverage: Leverage::new(leverage),
            profit_loss: Quote::new(pnl),
            accrued_funding: Quote::new(funding),
            liquidation_price: liq,
            entry_price: entry.and_then(|e| Price::new(Decimal::new(e, 2))),
        }
    }
}

fn eth_market() -> MarketReference {
    MarketReference::new(AssetKey::new("sETH"), Price::new_unchecked(dec!(1900)))
}

proptest! {
    /// No snapshot means nothing is available, whatever the market.
    #[test]
    fn no_position_is_total(with_market in any::<bool>()) {
        let market = eth_market();
        let m = PositionMetrics::compute(None, with_market.then_some(&market));
        prop_assert_eq!(m, PositionMetrics::unavailable());
    }

    /// Size precision is Fine exactly when |size| < 0.01.
    #[test]
    fn size_precision_threshold(snap in snapshot_strategy()) {
        let m = PositionMetrics::compute(Some(&snap), None);
        let size = m.size.as_option().unwrap();

        let expected = if snap.size.abs() < dec!(0.01) { Precision::Fine } else { Precision::Standard };
        prop_assert_eq!(size.size.precision, expected);
        prop_assert_eq!(size.notional.precision, Precision::for_value(snap.notional_value.value()));
        prop_assert!(size.size.value >= Decimal::ZERO);
        prop_assert!(size.notional.value >= Decimal::ZERO);
    }

    /// Unrealized P&L exists iff a matching market is supplied.
    #[test]
    fn pnl_requires_matching_market(snap in snapshot_strategy(), which in 0u8..3) {
        let eth = eth_market();
        let btc = MarketReference::new(AssetKey::new("sBTC"), Price::new_unchecked(dec!(30000)));
        let market = match which {
            0 => None,
            1 => Some(&btc),
            _ => Some(&eth),
        };

        let m = PositionMetrics::compute(Some(&snap), market);
        prop_assert_eq!(m.unrealized_pnl.is_available(), which == 2);
    }

    /// P&L is exact: profit_loss + funding, toned by its own sign.
    #[test]
    fn pnl_sum_and_tone(snap in snapshot_strategy()) {
        let m = PositionMetrics::compute(Some(&snap), Some(&eth_market()));
        let pnl = m.unrealized_pnl.as_option().unwrap();

        let expected = snap.profit_loss.value() + snap.accrued_funding.value();
        prop_assert_eq!(pnl.value(), expected);
        prop_assert_eq!(pnl.tone, Tone::of(expected));
        prop_assert_eq!(pnl.figure.precision, Precision::for_value(expected));
        if expected.is_zero() {
            prop_assert_eq!(pnl.tone, Tone::Neutral);
        }
    }

    /// Percent is withheld whenever margin * initial leverage is zero.
    #[test]
    fn percent_unavailable_on_zero_base(snap in snapshot_strategy()) {
        let m = PositionMetrics::compute(Some(&snap), Some(&eth_market()));
        let base = snap.initial_margin.value() * snap.initial_leverage.value();

        if base.is_zero() {
            prop_assert_eq!(m.unrealized_pnl_percent, Metric::Unavailable);
        } else {
            let pct = m.unrealized_pnl_percent.as_option().unwrap();
            prop_assert_eq!(pct.value(), snap.profit_loss.value() / base * dec!(100));
        }
    }

    /// Funding tone and precision ignore the P&L entirely.
    #[test]
    fn funding_is_independent(snap in snapshot_strategy()) {
        let m = PositionMetrics::compute(Some(&snap), None);
        let funding = m.net_funding.as_option().unwrap();

        prop_assert_eq!(funding.value(), snap.accrued_funding.value());
        prop_assert_eq!(funding.tone, Tone::of(snap.accrued_funding.value()));
        prop_assert_eq!(funding.figure.precision, Precision::for_value(snap.accrued_funding.value()));
    }

    /// Same inputs, same bytes.
    #[test]
    fn compute_is_idempotent(snap in snapshot_strategy()) {
        let market = eth_market();
        let a = PositionMetrics::compute(Some(&snap), Some(&market));
        let b = PositionMetrics::compute(Some(&snap), Some(&market));
        prop_assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    /// Truncation never rounds up.
    #[test]
    fn staking_truncation_never_overstates(raw in money_strategy()) {
        let t = truncate_decimals(raw, 2);
        prop_assert!(t.abs() <= raw.abs());
        prop_assert!((raw - t).abs() < dec!(0.01));
    }
}
