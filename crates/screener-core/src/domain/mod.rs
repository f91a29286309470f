//! # Domain Models
//!
//! Canonical types shared by every pipeline stage.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Market`] | Logical market code (`US`, `CY`) |
//! | [`SegmentDescriptor`] | One venue under a market |
//! | [`Symbol`] | Validated ticker |
//! | [`CandidateSymbol`] | Discovered symbol tagged with its segment |
//! | [`RawFetchResult`] | Profile + metrics payloads for one symbol |
//! | [`StockRecord`] | Normalized output record |
//! | [`SymbolDetail`] | Logo, description and price history for one symbol |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Everything here lives for a single pipeline run; nothing is cached.

mod market;
mod models;
mod symbol;
mod timestamp;

pub use market::Market;
pub use models::{
    CandidateSymbol, CandleSeries, ListedSymbol, MetricPayload, PricePoint, ProfilePayload,
    RawFetchResult, SegmentDescriptor, StockRecord, SymbolDetail,
};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
