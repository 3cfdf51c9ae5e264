//! Data source seam for the position card.
//!
//! The card never reaches for a global query cache; whoever builds it hands
//! in a [`PositionSource`]. [`InMemorySource`] backs tests and the sim binary.

use crate::snapshot::{MarketReference, PositionHistoryEntry, PositionSnapshot};
use crate::types::AssetKey;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("Query '{query}' failed: {reason}")]
    QueryFailed { query: &'static str, reason: String },

    #[error("Source not ready")]
    NotReady,
}

/// Where the card gets its already-fetched position and market data.
pub trait PositionSource {
    /// Open position for `asset`, `None` when flat.
    fn open_position(&self, asset: &AssetKey) -> Result<Option<PositionSnapshot>, SourceError>;

    fn markets(&self) -> Result<Vec<MarketReference>, SourceError>;

    fn position_history(&self) -> Result<Vec<PositionHistoryEntry>, SourceError>;
}

/// Mocked source. Each query can be made to fail independently.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    positions: HashMap<AssetKey, PositionSnapshot>,
    markets: Vec<MarketReference>,
    history: Vec<PositionHistoryEntry>,
    failing: Vec<&'static str>,
    not_ready: bool,
}

impl InMemorySource {
    pub const POSITIONS: &'static str = "positions";
    pub const MARKETS: &'static str = "markets";
    pub const HISTORY: &'static str = "history";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: PositionSnapshot) -> Self {
        self.positions.insert(position.asset.clone(), position);
        self
    }

    pub fn with_market(mut self, market: MarketReference) -> Self {
        self.markets.push(market);
        self
    }

    pub fn with_history(mut self, entry: PositionHistoryEntry) -> Self {
        self.history.push(entry);
        self
    }

    /// Source that hasn't loaded yet: every query returns [`SourceError::NotReady`].
    pub fn pending() -> Self {
        Self {
            not_ready: true,
            ..Self::default()
        }
    }

    pub fn mark_ready(&mut self) {
        self.not_ready = false;
    }

    /// Makes the named query return [`SourceError::QueryFailed`].
    pub fn failing(mut self, query: &'static str) -> Self {
        self.failing.push(query);
        self
    }

    pub fn close_position(&mut self, asset: &AssetKey) -> Option<PositionSnapshot> {
        self.positions.remove(asset)
    }

    fn check(&self, query: &'static str) -> Result<(), SourceError> {
        if self.not_ready {
            return Err(SourceError::NotReady);
        }
        if self.failing.contains(&query) {
            return Err(SourceError::QueryFailed {
                query,
                reason: "mocked failure".to_string(),
            });
        }
        Ok(())
    }
}

impl PositionSource for InMemorySource {
    fn open_position(&self, asset: &AssetKey) -> Result<Option<PositionSnapshot>, SourceError> {
        self.check(Self::POSITIONS)?;
        Ok(self.positions.get(asset).cloned())
    }

    fn markets(&self) -> Result<Vec<MarketReference>, SourceError> {
        self.check(Self::MARKETS)?;
        Ok(self.markets.clone())
    }

    fn position_history(&self) -> Result<Vec<PositionHistoryEntry>, SourceError> {
        self.check(Self::HISTORY)?;
        Ok(self.history.clone())
    }
}
