use std::sync::Arc;

use serde_json::Value;

use crate::data_source::{Endpoint, MarketDataSource, SourceError, SourceFuture};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest};
use crate::provider_policy::ProviderPolicy;
use crate::throttling::RequestQuota;
use crate::{
    CandleSeries, ListedSymbol, MetricPayload, ProfilePayload, SegmentDescriptor, Symbol,
    UtcDateTime,
};

pub const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";
const TOKEN_HEADER: &str = "X-Finnhub-Token";
const SECURITY_TYPE: &str = "Common Stock";

/// Finnhub REST adapter.
///
/// The API token travels in the `X-Finnhub-Token` header so request URLs can
/// be logged without leaking it.
#[derive(Clone)]
pub struct FinnhubAdapter {
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
    base_url: String,
    timeout_ms: u64,
    quota: Option<RequestQuota>,
}

impl FinnhubAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, api_token: impl Into<String>) -> Self {
        let api_token = api_token.into();
        let auth = if api_token.trim().is_empty() {
            HttpAuth::None
        } else {
            HttpAuth::Header {
                name: String::from(TOKEN_HEADER),
                value: api_token,
            }
        };
        let policy = ProviderPolicy::finnhub_default();

        Self {
            http_client,
            auth,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: policy.request_timeout_ms(),
            quota: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Applies the policy's request timeout and optional per-minute quota.
    pub fn with_policy(mut self, policy: &ProviderPolicy) -> Self {
        self.timeout_ms = policy.request_timeout_ms();
        self.quota = RequestQuota::from_limit(policy.requests_per_minute);
        self
    }

    fn symbols_url(&self, segment: &SegmentDescriptor) -> String {
        let mut url = format!(
            "{}/stock/symbol?exchange={}",
            self.base_url,
            urlencoding::encode(segment.venue_code)
        );
        if let Some(mic) = segment.mic() {
            url.push_str("&mic=");
            url.push_str(&urlencoding::encode(mic));
        }
        url.push_str("&securityType=");
        url.push_str(&urlencoding::encode(SECURITY_TYPE));
        url.push_str("&currency=");
        url.push_str(&urlencoding::encode(segment.currency));
        url
    }

    fn profile_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/stock/profile2?symbol={}",
            self.base_url,
            urlencoding::encode(symbol.as_str())
        )
    }

    fn metrics_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/stock/metric?symbol={}&metric=all",
            self.base_url,
            urlencoding::encode(symbol.as_str())
        )
    }

    fn candles_url(&self, symbol: &Symbol, from: UtcDateTime, to: UtcDateTime) -> String {
        format!(
            "{}/stock/candle?symbol={}&resolution=D&from={}&to={}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            from.unix_seconds(),
            to.unix_seconds()
        )
    }

    async fn get_json(&self, endpoint: Endpoint, url: String) -> Result<Value, SourceError> {
        if let Some(quota) = &self.quota {
            quota.acquire().await;
        }

        tracing::trace!(%endpoint, %url, "finnhub request");
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_auth(&self.auth)
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            let what = if error.timed_out() { "timed out" } else { "transport error" };
            SourceError::unavailable(format!("finnhub {endpoint} {what}: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::from_status(endpoint, response.status));
        }

        let value: Value = serde_json::from_str(&response.body).map_err(|error| {
            SourceError::invalid_response(format!(
                "failed to parse finnhub {endpoint} response: {error}"
            ))
        })?;

        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(SourceError::invalid_response(format!(
                "finnhub {endpoint} returned error payload: {message}"
            )));
        }

        Ok(value)
    }
}

fn listed_symbol(item: &Value) -> ListedSymbol {
    let text = |field: &str| item.get(field).and_then(Value::as_str).map(str::to_owned);
    ListedSymbol {
        symbol: text("symbol"),
        description: text("description"),
    }
}

impl MarketDataSource for FinnhubAdapter {
    fn name(&self) -> &'static str {
        "finnhub"
    }

    fn symbols<'a>(
        &'a self,
        segment: &'a SegmentDescriptor,
    ) -> SourceFuture<'a, Vec<ListedSymbol>> {
        Box::pin(async move {
            let value = self
                .get_json(Endpoint::Symbols, self.symbols_url(segment))
                .await?;

            let Value::Array(items) = value else {
                return Err(SourceError::invalid_response(format!(
                    "symbol list for segment {} is not an array",
                    segment.label()
                )));
            };

            // Only `symbol` matters; entries without a string one are dropped by discovery.
            Ok(items.iter().map(listed_symbol).collect())
        })
    }

    fn profile<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, ProfilePayload> {
        Box::pin(async move {
            let value = self
                .get_json(Endpoint::Profile, self.profile_url(symbol))
                .await?;
            if !value.is_object() {
                return Err(SourceError::invalid_response(format!(
                    "profile for {symbol} is not an object"
                )));
            }
            Ok(ProfilePayload(value))
        })
    }

    fn metrics<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, MetricPayload> {
        Box::pin(async move {
            let value = self
                .get_json(Endpoint::Metrics, self.metrics_url(symbol))
                .await?;
            if !value.is_object() {
                return Err(SourceError::invalid_response(format!(
                    "metrics for {symbol} are not an object"
                )));
            }
            Ok(MetricPayload(value))
        })
    }

    fn candles<'a>(
        &'a self,
        symbol: &'a Symbol,
        from: UtcDateTime,
        to: UtcDateTime,
    ) -> SourceFuture<'a, CandleSeries> {
        Box::pin(async move {
            let value = self
                .get_json(Endpoint::Candles, self.candles_url(symbol, from, to))
                .await?;
            serde_json::from_value(value).map_err(|error| {
                SourceError::invalid_response(format!("malformed candles for {symbol}: {error}"))
            })
        })
    }
}
