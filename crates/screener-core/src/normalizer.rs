//! Mapping from raw source payloads to [`StockRecord`]s.

use crate::{RawFetchResult, StockRecord};

const PRICE_TO_EARNINGS: &str = "peNormalizedAnnual";
const PRICE_TO_BOOK: &str = "pbAnnual";
const DIVIDEND_YIELD: &str = "dividendYieldIndicatedAnnual";

/// Maps raw profile and metric payloads onto a [`StockRecord`].
///
/// Total: any payload shape yields a record. Leverage and growth ratios are
/// not available from the live source and stay unknown.
///
/// Only finite numbers are read as ratios. A reported `0` (a non-paying
/// stock's yield, say) is kept as `Some(0.0)` rather than collapsed into
/// "unknown", so zero and missing stay distinguishable downstream.
pub fn normalize(raw: &RawFetchResult) -> StockRecord {
    let ticker = raw.ticker.as_str();
    let name = raw.profile.text("name").unwrap_or(ticker);

    StockRecord {
        ticker: ticker.to_owned(),
        name: name.to_owned(),
        price_to_earnings: raw.metrics.number(PRICE_TO_EARNINGS),
        price_to_book: raw.metrics.number(PRICE_TO_BOOK),
        debt_to_equity: None,
        dividend_yield_percent: raw.metrics.number(DIVIDEND_YIELD),
        price_earnings_to_growth: None,
    }
}

pub fn normalize_all(raw: &[RawFetchResult]) -> Vec<StockRecord> {
    raw.iter().map(normalize).collect()
}
