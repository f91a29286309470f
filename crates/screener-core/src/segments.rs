//! Static market-to-segment table.
//!
//! A logical market can span several venues. The US market is split by
//! market identifier code so each query returns a bounded listing; Cyprus has
//! a single venue and an empty MIC.

use crate::{Market, SegmentDescriptor};

const US_SEGMENTS: [SegmentDescriptor; 8] = [
    SegmentDescriptor::new("US", "XNYS", "USD", "New York Stock Exchange"),
    SegmentDescriptor::new("US", "XNGS", "USD", "Nasdaq Global Select Market"),
    SegmentDescriptor::new("US", "XNMS", "USD", "Nasdaq Global Market"),
    SegmentDescriptor::new("US", "XNCM", "USD", "Nasdaq Capital Market"),
    SegmentDescriptor::new("US", "XASE", "USD", "NYSE American"),
    SegmentDescriptor::new("US", "ARCX", "USD", "NYSE Arca"),
    SegmentDescriptor::new("US", "BATS", "USD", "Cboe BZX Exchange"),
    SegmentDescriptor::new("US", "IEXG", "USD", "Investors Exchange"),
];

const CY_SEGMENTS: [SegmentDescriptor; 1] = [SegmentDescriptor::new(
    "CY",
    "",
    "EUR",
    "Cyprus Stock Exchange",
)];

/// Ordered segments for a market.
pub fn segments_for(market: Market) -> &'static [SegmentDescriptor] {
    match market {
        Market::Us => &US_SEGMENTS,
        Market::Cy => &CY_SEGMENTS,
    }
}

/// Resolves a raw market code; unknown codes get the default market's segments.
pub fn resolve(market_code: &str) -> &'static [SegmentDescriptor] {
    segments_for(Market::resolve(market_code))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn us_starts_with_nyse_and_is_all_usd() {
        let segments = resolve("US");

        assert_eq!(segments[0].market_identifier_code, "XNYS");
        assert!(segments.len() > 1);
        assert!(segments.iter().all(|segment| segment.currency == "USD"));
        assert!(segments.iter().all(|segment| segment.venue_code == "US"));

        let mics: HashSet<_> = segments.iter().map(|s| s.market_identifier_code).collect();
        assert_eq!(mics.len(), segments.len(), "each MIC appears once");
    }

    #[test]
    fn cyprus_is_single_segment_without_mic() {
        let segments = resolve("cy");

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].venue_code, "CY");
        assert_eq!(segments[0].mic(), None);
        assert_eq!(segments[0].currency, "EUR");
    }

    #[test]
    fn unknown_code_resolves_to_default_market() {
        assert_eq!(resolve("ZZ"), resolve("US"));
        assert_eq!(resolve(""), segments_for(Market::DEFAULT));
    }
}
