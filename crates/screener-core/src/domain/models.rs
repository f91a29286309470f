use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Symbol;

/// Canonical per-stock valuation record.
///
/// Ratio fields are independently optional. `None` means the value is
/// unknown and must never be read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub ticker: String,
    pub name: String,
    pub price_to_earnings: Option<f64>,
    pub price_to_book: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub dividend_yield_percent: Option<f64>,
    pub price_earnings_to_growth: Option<f64>,
}

impl StockRecord {
    /// Record with every ratio unknown.
    pub fn bare(ticker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            price_to_earnings: None,
            price_to_book: None,
            debt_to_equity: None,
            dividend_yield_percent: None,
            price_earnings_to_growth: None,
        }
    }
}

/// One venue (or sub-venue) grouped under a logical market.
///
/// An empty `market_identifier_code` asks the source for every sub-venue of
/// `venue_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDescriptor {
    pub venue_code: &'static str,
    pub market_identifier_code: &'static str,
    pub currency: &'static str,
    pub display_name: &'static str,
}

impl SegmentDescriptor {
    pub const fn new(
        venue_code: &'static str,
        market_identifier_code: &'static str,
        currency: &'static str,
        display_name: &'static str,
    ) -> Self {
        Self {
            venue_code,
            market_identifier_code,
            currency,
            display_name,
        }
    }

    pub fn mic(&self) -> Option<&'static str> {
        if self.market_identifier_code.is_empty() {
            None
        } else {
            Some(self.market_identifier_code)
        }
    }

    /// Short label for logs, e.g. `US/XNYS` or `CY`.
    pub fn label(&self) -> String {
        match self.mic() {
            Some(mic) => format!("{}/{}", self.venue_code, mic),
            None => self.venue_code.to_owned(),
        }
    }
}

/// A validated symbol eligible for metric fetching, tagged with its segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSymbol {
    pub symbol: Symbol,
    pub origin_segment: SegmentDescriptor,
}

/// Raw entry from a segment's symbol listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListedSymbol {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Untyped company-profile payload as returned by the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePayload(pub Value);

impl ProfilePayload {
    /// Non-blank string field at the top level of the profile.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Untyped metrics payload; the ratios live in a nested `metric` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricPayload(pub Value);

impl MetricPayload {
    /// Finite numeric value of `metric.<field>`.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.0
            .get("metric")
            .and_then(|metric| metric.get(field))
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite())
    }
}

/// Profile and metrics for one symbol, both fetched successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFetchResult {
    pub ticker: Symbol,
    pub profile: ProfilePayload,
    pub metrics: MetricPayload,
}

/// Closing price on one trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// `YYYY-MM-DD`, UTC.
    pub date: String,
    pub price: f64,
}

/// Daily candle series from the source, column oriented.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CandleSeries {
    #[serde(rename = "s", default)]
    pub status: Option<String>,
    #[serde(rename = "t", default)]
    pub timestamps: Option<Vec<i64>>,
    #[serde(rename = "c", default)]
    pub closes: Option<Vec<f64>>,
}

/// Single-symbol detail view. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_history: Option<Vec<PricePoint>>,
}

impl SymbolDetail {
    pub fn is_empty(&self) -> bool {
        self.logo.is_none() && self.description.is_none() && self.price_history.is_none()
    }
}
