//! Market pipeline entry points.
//!
//! ```text
//! segments::resolve ─▶ discover ─▶ BatchedFetcher ─▶ normalize ─▶ stocks
//!                          │              │               │
//!                          └── empty ─────┴── empty ──────┴──▶ fallback
//! ```

use std::sync::Arc;

use serde::Serialize;
use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::adapters::FinnhubAdapter;
use crate::config::PipelineConfig;
use crate::data_source::MarketDataSource;
use crate::detail::lookup_detail;
use crate::discovery::{discover, DiscoveryOptions, DiscoveryReport};
use crate::fallback::fallback_for;
use crate::fetcher::{BatchedFetcher, FetchReport};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::normalizer::normalize_all;
use crate::{segments, Market, StockRecord, Symbol, SymbolDetail, UtcDateTime, ValidationError};

/// Why the built-in dataset was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    MissingCredential,
    NoCandidates,
    NoUsableRecords,
}

impl FallbackReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::NoCandidates => "no_candidates",
            Self::NoUsableRecords => "no_usable_records",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum DataOrigin {
    Live,
    Fallback(FallbackReason),
}

impl DataOrigin {
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }

    pub fn label(self) -> String {
        match self {
            Self::Live => String::from("live"),
            Self::Fallback(reason) => format!("fallback:{}", reason.as_str()),
        }
    }
}

/// Result of one market run together with its counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketFetch {
    pub run_id: Uuid,
    pub market: Market,
    pub origin: DataOrigin,
    pub stocks: Vec<StockRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery: Option<DiscoveryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<FetchReport>,
}

/// Stock screener pipeline bound to one data source.
///
/// Without a source (no API token configured) every call is answered from
/// the built-in datasets and nothing goes over the network.
pub struct StockPipeline {
    config: PipelineConfig,
    source: Option<Arc<dyn MarketDataSource>>,
}

impl StockPipeline {
    /// Pipeline over Finnhub using the production HTTP client.
    pub fn new(config: PipelineConfig) -> Result<Self, ValidationError> {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Pipeline over Finnhub using a caller-supplied transport.
    pub fn with_http_client(
        config: PipelineConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, ValidationError> {
        config.validate()?;
        let source = config.api_token.as_ref().map(|token| {
            Arc::new(
                FinnhubAdapter::new(http_client, token.clone())
                    .with_base_url(config.base_url.clone())
                    .with_policy(&config.policy),
            ) as Arc<dyn MarketDataSource>
        });
        Ok(Self { config, source })
    }

    /// Pipeline over an arbitrary source. The source is assumed to be
    /// credentialed already.
    pub fn with_source(
        config: PipelineConfig,
        source: Arc<dyn MarketDataSource>,
    ) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            config,
            source: Some(source),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Normalized records for a market. Never empty.
    pub async fn fetch_market_stocks(&self, market_code: &str) -> Vec<StockRecord> {
        self.fetch_market_report(market_code).await.stocks
    }

    pub async fn fetch_market_report(&self, market_code: &str) -> MarketFetch {
        self.run(market_code, None).await
    }

    /// Stops fetching at `deadline` and keeps what already completed.
    pub async fn fetch_market_report_within(
        &self,
        market_code: &str,
        deadline: Instant,
    ) -> MarketFetch {
        self.run(market_code, Some(deadline)).await
    }

    /// Logo, description and price history. Empty when no source is
    /// configured or the ticker is not a valid symbol.
    pub async fn fetch_symbol_detail(&self, ticker: &str) -> SymbolDetail {
        let Some(source) = &self.source else {
            tracing::info!(ticker, "no api token configured, detail unavailable");
            return SymbolDetail::default();
        };
        let symbol = match Symbol::parse(ticker) {
            Ok(symbol) => symbol,
            Err(error) => {
                tracing::warn!(ticker, %error, "rejecting detail lookup");
                return SymbolDetail::default();
            }
        };

        lookup_detail(source.as_ref(), &symbol, UtcDateTime::now()).await
    }

    async fn run(&self, market_code: &str, deadline: Option<Instant>) -> MarketFetch {
        let market = Market::resolve(market_code);
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("market_fetch", %run_id, market = market.code());

        async move {
            if Market::from_code(market_code).is_none() {
                tracing::debug!(market_code, "unknown market code, using default market");
            }

            let Some(source) = &self.source else {
                tracing::info!("no api token configured, serving built-in dataset");
                return fallback_run(run_id, market, FallbackReason::MissingCredential, None, None);
            };

            let options = DiscoveryOptions {
                candidate_cap: self.config.candidate_cap(market),
                segment_timeout: self.config.policy.segment_timeout,
            };
            let discovery =
                discover(source.as_ref(), segments::segments_for(market), options).await;
            if discovery.candidates.is_empty() {
                tracing::info!("discovery found no candidates, serving built-in dataset");
                return fallback_run(
                    run_id,
                    market,
                    FallbackReason::NoCandidates,
                    Some(discovery.report),
                    None,
                );
            }

            let fetcher = BatchedFetcher::new(source.as_ref(), &self.config.policy);
            let outcome = fetcher
                .fetch_all_until(&discovery.candidates, deadline)
                .await;
            let stocks = normalize_all(&outcome.results);
            if stocks.is_empty() {
                tracing::info!("no usable records, serving built-in dataset");
                return fallback_run(
                    run_id,
                    market,
                    FallbackReason::NoUsableRecords,
                    Some(discovery.report),
                    Some(outcome.report),
                );
            }

            tracing::info!(records = stocks.len(), "market fetch complete");
            MarketFetch {
                run_id,
                market,
                origin: DataOrigin::Live,
                stocks,
                discovery: Some(discovery.report),
                fetch: Some(outcome.report),
            }
        }
        .instrument(span)
        .await
    }
}

fn fallback_run(
    run_id: Uuid,
    market: Market,
    reason: FallbackReason,
    discovery: Option<DiscoveryReport>,
    fetch: Option<FetchReport>,
) -> MarketFetch {
    MarketFetch {
        run_id,
        market,
        origin: DataOrigin::Fallback(reason),
        stocks: fallback_for(market),
        discovery,
        fetch,
    }
}
