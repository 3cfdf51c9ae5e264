//! Reference text rendering for a position card.
//!
//! Metrics decide precision, tone and availability; this module only turns
//! them into strings: currency symbol, thousands separators, placeholder.

use crate::card::PositionCard;
use crate::metrics::{Figure, Metric, Percent, PositionMetrics, Precision, SignedFigure};
use crate::settings::DisplaySettings;
use crate::types::{Leverage, Tone};
use rust_decimal::Decimal;
use serde::Serialize;

/// Text for one card, plus the class each coloured cell should carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCard {
    pub market_label: String,
    pub side: String,
    pub side_class: &'static str,
    pub size: String,
    pub unrealized_pnl: String,
    pub unrealized_pnl_class: &'static str,
    pub leverage: String,
    pub liquidation_price: String,
    pub entry_price: String,
    pub net_funding: String,
    pub net_funding_class: &'static str,
    pub margin_ratio: String,
    pub can_close: bool,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    settings: DisplaySettings,
}

impl Renderer {
    pub fn new(settings: DisplaySettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn render_card(&self, card: &PositionCard) -> RenderedCard {
        let mut rendered = self.render_metrics(&card.metrics);
        rendered.market_label = card.market_label.clone();
        rendered.can_close = card.can_close;
        rendered
    }

    pub fn render_metrics(&self, m: &PositionMetrics) -> RenderedCard {
        let placeholder = || self.settings.placeholder.clone();

        let (side, side_class) = match m.side {
            Metric::Available(side) => (side.to_string(), side.tone().css_class()),
            Metric::Unavailable => (placeholder(), Tone::Neutral.css_class()),
        };

        let size = match m.size.as_option() {
            Some(s) => format!(
                "{} ({})",
                format_number(s.size.value, s.size.precision),
                self.currency(&s.notional)
            ),
            None => placeholder(),
        };

        let (unrealized_pnl, unrealized_pnl_class) = match m.unrealized_pnl.as_option() {
            Some(pnl) => {
                let pct = m
                    .unrealized_pnl_percent
                    .as_option()
                    .map(format_percent)
                    .unwrap_or_else(placeholder);
                (
                    format!("{} ({})", self.signed_currency(pnl), pct),
                    pnl.tone.css_class(),
                )
            }
            None => (placeholder(), Tone::Neutral.css_class()),
        };

        let (net_funding, net_funding_class) = match m.net_funding.as_option() {
            Some(f) => (self.signed_currency(f), f.tone.css_class()),
            None => (placeholder(), Tone::Neutral.css_class()),
        };

        RenderedCard {
            market_label: String::new(),
            side,
            side_class,
            size,
            unrealized_pnl,
            unrealized_pnl_class,
            leverage: m.leverage.as_option().map(render_leverage).unwrap_or_else(placeholder),
            liquidation_price: m
                .liquidation_price
                .as_option()
                .map(|p| self.price(*p))
                .unwrap_or_else(placeholder),
            entry_price: m
                .entry_price
                .as_option()
                .map(|p| self.price(*p))
                .unwrap_or_else(placeholder),
            net_funding,
            net_funding_class,
            margin_ratio: m.margin_ratio.as_option().map(format_percent).unwrap_or_else(placeholder),
            can_close: m.side.is_available(),
        }
    }

    fn currency(&self, figure: &Figure) -> String {
        format_currency(self.settings.currency_symbol(), figure.value, figure.precision)
    }

    fn signed_currency(&self, figure: &SignedFigure) -> String {
        self.currency(&figure.figure)
    }

    fn price(&self, value: Decimal) -> String {
        format_currency(self.settings.currency_symbol(), value, Precision::Standard)
    }
}

fn render_leverage(leverage: &Leverage) -> String {
    format!("{}{}", format_number(leverage.value(), Precision::Standard), Leverage::UNIT)
}

/// `1234.5` at Standard → `1,234.50`.
pub fn format_number(value: Decimal, precision: Precision) -> String {
    let rounded = precision.apply(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{}", sign, group_thousands(&rounded.abs().to_string()))
}

/// Sign goes before the symbol: `-$0.50`.
pub fn format_currency(symbol: &str, value: Decimal, precision: Precision) -> String {
    let number = format_number(value, precision);
    match number.strip_prefix('-') {
        Some(rest) => format!("-{}{}", symbol, rest),
        None => format!("{}{}", symbol, number),
    }
}

pub fn format_percent(percent: &Percent) -> String {
    format!("{}%", format_number(percent.value(), Precision::Standard))
}

fn group_thousands(plain: &str) -> String {
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{FiatCurrency, Language};
    use crate::snapshot::{MarketReference, PositionSnapshot};
    use crate::types::{AssetKey, Price, Quote, Side, SignedSize};
    use rust_decimal_macros::dec;

    fn snapshot() -> PositionSnapshot {
        PositionSnapshot {
            asset: AssetKey::new("sETH"),
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

    fn market() -> MarketReference {
        MarketReference::new(AssetKey::new("sETH"), Price::new_unchecked(dec!(1900)))
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_number(dec!(1234567.891), Precision::Standard), "1,234,567.89");
        assert_eq!(format_number(dec!(999), Precision::Standard), "999.00");
        assert_eq!(format_number(dec!(-1000), Precision::Standard), "-1,000.00");
        assert_eq!(format_number(dec!(0.005), Precision::Fine), "0.0050");
    }

    #[test]
    fn currency_sign_before_symbol() {
        assert_eq!(format_currency("$", dec!(-0.5), Precision::Standard), "-$0.50");
        assert_eq!(format_currency("€", dec!(1800), Precision::Standard), "€1,800.00");
    }

    #[test]
    fn renders_full_card() {
        let metrics = PositionMetrics::compute(Some(&snapshot()), Some(&market()));
        let out = Renderer::new(DisplaySettings::default()).render_metrics(&metrics);

        assert_eq!(out.side, "LONG ↗");
        assert_eq!(out.side_class, "green");
        assert_eq!(out.size, "0.0050 ($120.00)");
        assert_eq!(out.unrealized_pnl, "$4.50 (2.50%)");
        assert_eq!(out.unrealized_pnl_class, "green");
        assert_eq!(out.leverage, "2.40×");
        assert_eq!(out.liquidation_price, "$1,800.00");
        assert_eq!(out.entry_price, "$1,850.00");
        assert_eq!(out.net_funding, "-$0.50");
        assert_eq!(out.net_funding_class, "red");
        assert!(out.can_close);
    }

    #[test]
    fn renders_placeholders_without_position() {
        let out = Renderer::new(DisplaySettings::default())
            .render_metrics(&PositionMetrics::compute(None, None));

        for cell in [
            &out.side,
            &out.size,
            &out.unrealized_pnl,
            &out.leverage,
            &out.liquidation_price,
            &out.entry_price,
            &out.net_funding,
            &out.margin_ratio,
        ] {
            assert_eq!(cell, "-");
        }
        assert_eq!(out.unrealized_pnl_class, "");
        assert!(!out.can_close);
    }

    #[test]
    fn percent_placeholder_inside_pnl_cell() {
        let mut pos = snapshot();
        pos.initial_margin = Quote::zero();
        let out = Renderer::new(DisplaySettings::default())
            .render_metrics(&PositionMetrics::compute(Some(&pos), Some(&market())));
        assert_eq!(out.unrealized_pnl, "$4.50 (-)");
    }

    #[test]
    fn dust_pnl_and_notional_use_four_decimals() {
        let mut pos = snapshot();
        pos.size = SignedSize::new(dec!(0.5));
        pos.notional_value = Quote::new(dec!(-0.004));
        pos.profit_loss = Quote::new(dec!(0.006));
        pos.accrued_funding = Quote::new(dec!(-0.002));
        let metrics = PositionMetrics::compute(Some(&pos), Some(&market()));

        let pnl = metrics.unrealized_pnl.as_option().unwrap();
        assert_eq!(pnl.value(), dec!(0.004));
        assert_eq!(pnl.figure.precision, Precision::Fine);
        let size = metrics.size.as_option().unwrap();
        assert_eq!(size.size.precision, Precision::Standard);
        assert_eq!(size.notional.precision, Precision::Fine);

        let out = Renderer::new(DisplaySettings::default()).render_metrics(&metrics);
        // 0.006 / 200 = 0.003%
        assert_eq!(out.unrealized_pnl, "$0.0040 (0.00%)");
        assert_eq!(out.size, "0.50 ($0.0040)");
        assert_eq!(out.net_funding, "-$0.0020");
    }

    #[test]
    fn uses_configured_currency_symbol() {
        let settings = DisplaySettings::new(Language::En, FiatCurrency::Eur);
        let out = Renderer::new(settings)
            .render_metrics(&PositionMetrics::compute(Some(&snapshot()), Some(&market())));
        assert_eq!(out.entry_price, "€1,850.00");
    }
}
