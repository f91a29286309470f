//! # Screener Core
//!
//! Stock-metrics aggregation pipeline for the screener.
//!
//! ## Overview
//!
//! Given a market code, the pipeline discovers every tradable symbol across
//! the market's exchange segments, fetches profile and valuation metrics for
//! each in throttled batches, and normalizes the result into
//! [`StockRecord`]s. Failures are isolated per segment and per symbol. When
//! nothing usable comes back, a built-in dataset is served instead, so a call
//! never fails and never returns an empty list.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Finnhub REST adapter |
//! | [`config`] | Explicit pipeline configuration |
//! | [`data_source`] | Data source trait and error types |
//! | [`detail`] | Single-symbol detail lookup |
//! | [`discovery`] | Parallel segment listing, validation and dedup |
//! | [`domain`] | Domain models (StockRecord, Symbol, Market, SegmentDescriptor) |
//! | [`error`] | Core error types |
//! | [`fallback`] | Built-in datasets |
//! | [`fetcher`] | Batched profile/metrics acquisition |
//! | [`http_client`] | HTTP client abstraction |
//! | [`memory_source`] | In-memory data source |
//! | [`normalizer`] | Raw payload to record mapping |
//! | [`pipeline`] | Entry points |
//! | [`provider_policy`] | Batch size, delays and timeouts |
//! | [`segments`] | Market to segment table |
//! | [`throttling`] | Optional per-minute request quota |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use screener_core::{PipelineConfig, StockPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::new().with_api_token(std::env::var("FINNHUB_API_KEY").ok());
//!     let pipeline = StockPipeline::new(config)?;
//!
//!     for stock in pipeline.fetch_market_stocks("US").await {
//!         println!("{} {:?}", stock.ticker, stock.price_to_earnings);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod data_source;
pub mod detail;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod http_client;
pub mod memory_source;
pub mod normalizer;
pub mod pipeline;
pub mod provider_policy;
pub mod segments;
pub mod throttling;

pub use adapters::FinnhubAdapter;
pub use config::PipelineConfig;
pub use data_source::{Endpoint, MarketDataSource, SourceError, SourceErrorKind, SourceFuture};
pub use discovery::{discover, Discovery, DiscoveryOptions, DiscoveryReport};
pub use domain::{
    CandidateSymbol, CandleSeries, ListedSymbol, Market, MetricPayload, PricePoint,
    ProfilePayload, RawFetchResult, SegmentDescriptor, StockRecord, Symbol, SymbolDetail,
    UtcDateTime,
};
pub use error::ValidationError;
pub use fallback::fallback;
pub use fetcher::{BatchedFetcher, FetchOutcome, FetchReport};
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpErrorKind, HttpFuture, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};
pub use memory_source::InMemorySource;
pub use normalizer::normalize;
pub use pipeline::{DataOrigin, FallbackReason, MarketFetch, StockPipeline};
pub use provider_policy::ProviderPolicy;
pub use throttling::RequestQuota;
