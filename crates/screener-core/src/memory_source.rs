//! In-memory [`MarketDataSource`] for tests and offline runs.
//!
//! Symbols without an explicit profile or metrics entry get a synthetic
//! payload (`"<TICKER> Corp"`, empty metric set). Segments without a listing
//! return an empty list.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::{json, Value};

use crate::data_source::{Endpoint, MarketDataSource, SourceError, SourceFuture};
use crate::{
    CandleSeries, ListedSymbol, MetricPayload, ProfilePayload, SegmentDescriptor, Symbol,
    UtcDateTime,
};

#[derive(Debug, Default)]
struct CallCounters {
    symbols: AtomicUsize,
    profile: AtomicUsize,
    metrics: AtomicUsize,
    candles: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl CallCounters {
    fn counter(&self, endpoint: Endpoint) -> &AtomicUsize {
        match endpoint {
            Endpoint::Symbols => &self.symbols,
            Endpoint::Profile => &self.profile,
            Endpoint::Metrics => &self.metrics,
            Endpoint::Candles => &self.candles,
        }
    }

    fn enter(&self, endpoint: Endpoint) {
        self.counter(endpoint).fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
pub struct InMemorySource {
    listings: HashMap<String, Result<Vec<ListedSymbol>, SourceError>>,
    segment_latency: HashMap<String, Duration>,
    symbol_latency: HashMap<String, Duration>,
    profiles: HashMap<String, Result<Value, SourceError>>,
    metrics: HashMap<String, Result<Value, SourceError>>,
    candles: HashMap<String, Result<CandleSeries, SourceError>>,
    latency: Duration,
    counters: CallCounters,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists `tickers` under `segment`, in order.
    pub fn with_tickers<I, S>(self, segment: &SegmentDescriptor, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let listed = tickers
            .into_iter()
            .map(|ticker| ListedSymbol {
                symbol: Some(ticker.into()),
                description: None,
            })
            .collect();
        self.with_listing(segment, listed)
    }

    pub fn with_listing(mut self, segment: &SegmentDescriptor, listed: Vec<ListedSymbol>) -> Self {
        self.listings.insert(segment.label(), Ok(listed));
        self
    }

    pub fn with_listing_error(mut self, segment: &SegmentDescriptor, error: SourceError) -> Self {
        self.listings.insert(segment.label(), Err(error));
        self
    }

    /// Delays only this segment's listing call, on top of the base latency.
    pub fn with_segment_latency(mut self, segment: &SegmentDescriptor, latency: Duration) -> Self {
        self.segment_latency.insert(segment.label(), latency);
        self
    }

    /// Delays this ticker's profile and metrics calls, on top of the base latency.
    pub fn with_symbol_latency(mut self, ticker: &str, latency: Duration) -> Self {
        self.symbol_latency.insert(key(ticker), latency);
        self
    }

    pub fn with_profile(mut self, ticker: &str, profile: Value) -> Self {
        self.profiles.insert(key(ticker), Ok(profile));
        self
    }

    pub fn with_profile_error(mut self, ticker: &str, error: SourceError) -> Self {
        self.profiles.insert(key(ticker), Err(error));
        self
    }

    pub fn with_metrics(mut self, ticker: &str, metrics: Value) -> Self {
        self.metrics.insert(key(ticker), Ok(metrics));
        self
    }

    pub fn with_metrics_error(mut self, ticker: &str, error: SourceError) -> Self {
        self.metrics.insert(key(ticker), Err(error));
        self
    }

    pub fn with_candles(mut self, ticker: &str, candles: CandleSeries) -> Self {
        self.candles.insert(key(ticker), Ok(candles));
        self
    }

    pub fn with_candles_error(mut self, ticker: &str, error: SourceError) -> Self {
        self.candles.insert(key(ticker), Err(error));
        self
    }

    /// Latency applied to every call, measured on the tokio clock.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.counters.counter(endpoint).load(Ordering::SeqCst)
    }

    /// Highest number of calls observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }

    fn symbol_delay(&self, symbol: &Symbol) -> Duration {
        self.symbol_latency
            .get(symbol.as_str())
            .copied()
            .unwrap_or_default()
    }

    async fn respond<T>(
        &self,
        endpoint: Endpoint,
        extra_latency: Duration,
        reply: Result<T, SourceError>,
    ) -> Result<T, SourceError> {
        self.counters.enter(endpoint);
        let delay = self.latency + extra_latency;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.counters.leave();
        reply
    }
}

fn key(ticker: &str) -> String {
    ticker.trim().to_ascii_uppercase()
}

impl MarketDataSource for InMemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn symbols<'a>(
        &'a self,
        segment: &'a SegmentDescriptor,
    ) -> SourceFuture<'a, Vec<ListedSymbol>> {
        let label = segment.label();
        let reply = self.listings.get(&label).cloned().unwrap_or_else(|| Ok(Vec::new()));
        let extra = self.segment_latency.get(&label).copied().unwrap_or_default();
        Box::pin(self.respond(Endpoint::Symbols, extra, reply))
    }

    fn profile<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, ProfilePayload> {
        let reply = self
            .profiles
            .get(symbol.as_str())
            .cloned()
            .unwrap_or_else(|| Ok(json!({ "name": format!("{symbol} Corp") })))
            .map(ProfilePayload);
        let extra = self.symbol_delay(symbol);
        Box::pin(self.respond(Endpoint::Profile, extra, reply))
    }

    fn metrics<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, MetricPayload> {
        let reply = self
            .metrics
            .get(symbol.as_str())
            .cloned()
            .unwrap_or_else(|| Ok(json!({ "metric": {} })))
            .map(MetricPayload);
        let extra = self.symbol_delay(symbol);
        Box::pin(self.respond(Endpoint::Metrics, extra, reply))
    }

    fn candles<'a>(
        &'a self,
        symbol: &'a Symbol,
        _from: UtcDateTime,
        _to: UtcDateTime,
    ) -> SourceFuture<'a, CandleSeries> {
        let reply = self
            .candles
            .get(symbol.as_str())
            .cloned()
            .unwrap_or_else(|| {
                Ok(CandleSeries {
                    status: Some(String::from("no_data")),
                    ..CandleSeries::default()
                })
            });
        Box::pin(self.respond(Endpoint::Candles, Duration::ZERO, reply))
    }
}
