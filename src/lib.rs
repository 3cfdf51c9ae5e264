// position-metrics: display metrics for a perpetual futures position card.
// the query layer hands over an already-fetched snapshot; this crate turns it
// into exact decimal figures with precision, colour and availability attached.
// all derivation is deterministic with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: AssetKey, Side, Tone, SignedSize, Quote, Price, Leverage
//   2.x  snapshot.rs: PositionSnapshot, MarketReference, PositionHistoryEntry
//   3.x  metrics.rs: Metric, Precision, Figure, PositionMetrics::compute
//   4.x  card.rs: card assembly from a source, stale refresh handling
//   5.x  settings.rs: language + fiat currency, env overrides
//   6.x  staking.rs: staking portfolio summary
//   7.x  source.rs: PositionSource trait + in-memory source (mocked)
//   8.x  render.rs: reference text rendering

// core
pub mod metrics;
pub mod snapshot;
pub mod types;

// card assembly and presentation
pub mod card;
pub mod render;
pub mod settings;
pub mod source;
pub mod staking;

// re exports for convenience
pub use card::*;
pub use metrics::*;
pub use snapshot::*;
pub use staking::*;
pub use types::*;
pub use render::{format_currency, format_number, format_percent, RenderedCard, Renderer};
pub use settings::{ConfigError, DisplaySettings, FiatCurrency, Language};
pub use source::{InMemorySource, PositionSource, SourceError};
