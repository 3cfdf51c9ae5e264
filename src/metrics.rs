// 3.0: position card metrics. snapshot in, display-ready figures out.
// pure: no I/O, no state between calls, nothing here can fail.
// every field degrades to Unavailable on its own missing input. zero stays zero.
//
// 3.1 Metric / Precision / Figure: value wrappers with formatting hints
// 3.2 PositionMetrics::compute: the derivation itself

use crate::snapshot::{MarketReference, PositionSnapshot};
use crate::types::{Leverage, Side, Tone};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

// 3.1: a value the card can show, or the explicit "no value" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric<T> {
    Available(T),
    Unavailable,
}

impl<T> Metric<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Available(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Metric::Available(v) => Some(v),
            Metric::Unavailable => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Metric<U> {
        match self {
            Metric::Available(v) => Metric::Available(f(v)),
            Metric::Unavailable => Metric::Unavailable,
        }
    }
}

impl<T> From<Option<T>> for Metric<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Metric::Available(v),
            None => Metric::Unavailable,
        }
    }
}

// 3.1.1: dust amounts get four decimals so they don't render as 0.00
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precision {
    Standard,
    Fine,
}

impl Precision {
    // strict: exactly 0.01 is Standard
    pub fn for_value(value: Decimal) -> Self {
        if value.abs() < dec!(0.01) {
            Precision::Fine
        } else {
            Precision::Standard
        }
    }

    pub fn decimals(&self) -> u32 {
        match self {
            Precision::Standard => 2,
            Precision::Fine => 4,
        }
    }

    /// Rounds half away from zero and pads to exactly `decimals()` places.
    pub fn apply(&self, value: Decimal) -> Decimal {
        let dp = self.decimals();
        let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            rounded = rounded.abs();
        }
        rounded.rescale(dp);
        rounded
    }
}

/// Exact value plus the precision it should be shown at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    pub value: Decimal,
    pub precision: Precision,
}

impl Figure {
    pub fn new(value: Decimal) -> Self {
        Self {
            value,
            precision: Precision::for_value(value),
        }
    }

    pub fn rounded(&self) -> Decimal {
        self.precision.apply(self.value)
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded())
    }
}

/// A figure whose sign picks its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedFigure {
    pub figure: Figure,
    pub tone: Tone,
}

impl SignedFigure {
    pub fn new(value: Decimal) -> Self {
        Self {
            figure: Figure::new(value),
            tone: Tone::of(value),
        }
    }

    pub fn value(&self) -> Decimal {
        self.figure.value
    }
}

/// Size magnitude paired with notional magnitude, each with its own precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeDisplay {
    pub size: Figure,
    pub notional: Figure,
}

impl fmt::Display for SizeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.size, self.notional)
    }
}

/// Ratio expressed in percent units: 2.5 means 2.5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percent(pub Decimal);

impl Percent {
    pub fn from_ratio(ratio: Decimal) -> Option<Self> {
        ratio.checked_mul(dec!(100)).map(Percent)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", Precision::Standard.apply(self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionMetrics {
    pub side: Metric<Side>,
    pub size: Metric<SizeDisplay>,
    /// profit_loss + accrued_funding. needs a recognised market.
    pub unrealized_pnl: Metric<SignedFigure>,
    /// profit_loss / (initial_margin * initial_leverage). funding excluded.
    pub unrealized_pnl_percent: Metric<Percent>,
    pub leverage: Metric<Leverage>,
    pub liquidation_price: Metric<Decimal>,
    pub entry_price: Metric<Decimal>,
    pub net_funding: Metric<SignedFigure>,
    /// initial_margin / |notional_value|.
    pub margin_ratio: Metric<Percent>,
}

impl PositionMetrics {
    pub fn unavailable() -> Self {
        Self {
            side: Metric::Unavailable,
            size: Metric::Unavailable,
            unrealized_pnl: Metric::Unavailable,
            unrealized_pnl_percent: Metric::Unavailable,
            leverage: Metric::Unavailable,
            liquidation_price: Metric::Unavailable,
            entry_price: Metric::Unavailable,
            net_funding: Metric::Unavailable,
            margin_ratio: Metric::Unavailable,
        }
    }

    // 3.2: the derivation. a market for a different asset counts as no market.
    pub fn compute(
        snapshot: Option<&PositionSnapshot>,
        market: Option<&MarketReference>,
    ) -> Self {
        let Some(pos) = snapshot else {
            return Self::unavailable();
        };

        let has_market = market.is_some_and(|m| m.asset == pos.asset);

        let unrealized_pnl = if has_market {
            pos.profit_loss
                .value()
                .checked_add(pos.accrued_funding.value())
                .map(SignedFigure::new)
                .into()
        } else {
            Metric::Unavailable
        };

        Self {
            side: Metric::Available(pos.side),
            size: Metric::Available(SizeDisplay {
                size: Figure::new(pos.size.abs()),
                notional: Figure::new(pos.notional_value.value().abs()),
            }),
            unrealized_pnl,
            unrealized_pnl_percent: pnl_percent(pos).into(),
            leverage: Metric::Available(pos.leverage),
            liquidation_price: Metric::Available(pos.liquidation_price),
            entry_price: pos.entry_price.map(|p| p.value()).into(),
            net_funding: Metric::Available(SignedFigure::new(pos.accrued_funding.value())),
            margin_ratio: margin_ratio(pos).into(),
        }
    }
}

// percent return on the margin*leverage base. zero base → None.
fn pnl_percent(pos: &PositionSnapshot) -> Option<Percent> {
    let base = pos
        .initial_margin
        .value()
        .checked_mul(pos.initial_leverage.value())?;
    if base.is_zero() {
        return None;
    }
    let ratio = pos.profit_loss.value().checked_div(base)?;
    Percent::from_ratio(ratio)
}

fn margin_ratio(pos: &PositionSnapshot) -> Option<Percent> {
    let notional = pos.notional_value.value().abs();
    if notional.is_zero() {
        return None;
    }
    let ratio = pos.initial_margin.value().checked_div(notional)?;
    Percent::from_ratio(ratio)
}
