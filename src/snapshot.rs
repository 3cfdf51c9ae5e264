//! Position and market inputs as delivered by the query layer.
//!
//! A snapshot is assembled once per refresh cycle and never mutated after.
//! All monetary fields are decimals, taken as-is from upstream.

use crate::types::{AssetKey, Leverage, Price, Quote, Side, SignedSize};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Open position for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub asset: AssetKey,
    pub side: Side,
    pub size: SignedSize,
    /// Quote value of `size` at the current price.
    pub notional_value: Quote,
    pub initial_margin: Quote,
    pub initial_leverage: Leverage,
    pub leverage: Leverage,
    /// Unrealized, funding excluded.
    pub profit_loss: Quote,
    /// Positive = received.
    pub accrued_funding: Quote,
    /// Zero is a real value here, not "unknown".
    pub liquidation_price: Decimal,
    /// Filled from position history, absent when there is no entry.
    pub entry_price: Option<Price>,
}

impl PositionSnapshot {
    /// Fills `entry_price` from a history entry when the snapshot has none.
    pub fn with_history(mut self, history: Option<&PositionHistoryEntry>) -> Self {
        if self.entry_price.is_none() {
            self.entry_price = history.and_then(|h| h.entry_price);
        }
        self
    }
}

/// A market known to the futures layer. Only its presence matters here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReference {
    pub asset: AssetKey,
    pub price: Price,
}

impl MarketReference {
    pub fn new(asset: AssetKey, price: Price) -> Self {
        Self { asset, price }
    }

    pub fn find<'a>(markets: &'a [MarketReference], asset: &AssetKey) -> Option<&'a MarketReference> {
        markets.iter().find(|m| &m.asset == asset)
    }
}

/// One row of an account's position history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionHistoryEntry {
    pub asset: AssetKey,
    pub entry_price: Option<Price>,
}

impl PositionHistoryEntry {
    pub fn find<'a>(
        history: &'a [PositionHistoryEntry],
        asset: &AssetKey,
    ) -> Option<&'a PositionHistoryEntry> {
        history.iter().find(|h| &h.asset == asset)
    }
}
