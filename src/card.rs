// 4.0: position card assembly. joins the open position with its market and
// history entry, then runs the metrics. query failures are logged and treated
// as "no data": the card always renders.
// 4.1 CardState keeps the newest card and drops stale refreshes.

use crate::metrics::PositionMetrics;
use crate::snapshot::{MarketReference, PositionHistoryEntry, PositionSnapshot};
use crate::source::PositionSource;
use crate::types::{AssetKey, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionCard {
    pub asset: AssetKey,
    pub market_label: String,
    pub metrics: PositionMetrics,
    /// Close button is live only with an open position.
    pub can_close: bool,
    pub refreshed_at: Timestamp,
}

impl PositionCard {
    pub fn assemble(
        asset: AssetKey,
        position: Option<&PositionSnapshot>,
        markets: &[MarketReference],
        history: &[PositionHistoryEntry],
        at: Timestamp,
    ) -> Self {
        // market keyed by the position's asset, history by the card's
        let market = position.and_then(|p| MarketReference::find(markets, &p.asset));
        let entry = PositionHistoryEntry::find(history, &asset);
        let position = position.cloned().map(|p| p.with_history(entry));

        let metrics = PositionMetrics::compute(position.as_ref(), market);

        Self {
            market_label: asset.market_label(),
            asset,
            metrics,
            can_close: position.is_some(),
            refreshed_at: at,
        }
    }

    pub fn load<S: PositionSource + ?Sized>(source: &S, asset: AssetKey, at: Timestamp) -> Self {
        let position = source.open_position(&asset).unwrap_or_else(|e| {
            warn!(asset = %asset, error = %e, "position query failed, showing no position");
            None
        });
        let markets = source.markets().unwrap_or_else(|e| {
            warn!(error = %e, "markets query failed");
            Vec::new()
        });
        let history = source.position_history().unwrap_or_else(|e| {
            warn!(error = %e, "position history query failed");
            Vec::new()
        });

        debug!(
            asset = %asset,
            open = position.is_some(),
            markets = markets.len(),
            history = history.len(),
            "assembling position card"
        );

        Self::assemble(asset, position.as_ref(), &markets, &history, at)
    }
}

// 4.1: latest-wins holder. a refresh stamped before the held card is stale.
#[derive(Debug, Default, Clone)]
pub struct CardState {
    current: Option<PositionCard>,
}

impl CardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&PositionCard> {
        self.current.as_ref()
    }

    /// Returns false when `card` was discarded as stale.
    pub fn apply(&mut self, card: PositionCard) -> bool {
        if let Some(held) = &self.current {
            if card.refreshed_at < held.refreshed_at {
                debug!(
                    asset = %card.asset,
                    stale_at = card.refreshed_at.as_millis(),
                    held_at = held.refreshed_at.as_millis(),
                    "discarding stale position card"
                );
                return false;
            }
        }
        self.current = Some(card);
        true
    }
}
