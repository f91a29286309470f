//! Contract tests for the Finnhub adapter wired through the pipeline.
//!
//! A scripted transport stands in for the network so the tests pin down the
//! exact requests sent and how each response shape is treated.

use std::sync::{Arc, Mutex};

use screener_core::{
    segments, DataOrigin, Endpoint, FinnhubAdapter, HttpClient, HttpError, HttpFuture,
    HttpRequest, HttpResponse, MarketDataSource, PipelineConfig, ProviderPolicy, SourceErrorKind,
    StockPipeline, Symbol, UtcDateTime,
};

type Script = dyn Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync;

struct ScriptedHttp {
    script: Box<Script>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttp {
    fn new<F>(script: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            script: Box::new(script),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().expect("lock").clone()
    }
}

impl HttpClient for ScriptedHttp {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        let reply = (self.script)(&request);
        self.seen.lock().expect("lock").push(request);
        Box::pin(async move { reply })
    }
}

fn query_symbol(url: &str) -> Option<&str> {
    url.split(['?', '&'])
        .find_map(|pair| pair.strip_prefix("symbol="))
}

fn finnhub_like(request: &HttpRequest) -> Result<HttpResponse, HttpError> {
    let url = request.url.as_str();
    if url.contains("/stock/symbol?") {
        let body = if url.contains("mic=XNYS") {
            r#"[{"symbol":"IBM","description":"INTL BUSINESS MACHINES"},{"symbol":"KO"},{"description":"no symbol"}]"#
        } else if url.contains("mic=XNGS") {
            r#"[{"symbol":"AAPL"},{"symbol":"IBM"}]"#
        } else if url.contains("mic=XNMS") {
            r#"{"error":"exchange segment unavailable"}"#
        } else {
            "[]"
        };
        return Ok(HttpResponse::ok_json(body));
    }

    let symbol = query_symbol(url).unwrap_or_default();
    if url.contains("/stock/profile2?") {
        return Ok(match symbol {
            "IBM" => HttpResponse::ok_json(r#"{"name":"International Business Machines"}"#),
            "KO" => HttpResponse::ok_json(r#"{"name":"Coca-Cola Co"}"#),
            _ => HttpResponse::ok_json("{}"),
        });
    }
    if url.contains("/stock/metric?") {
        return match symbol {
            "IBM" => Ok(HttpResponse::ok_json(
                r#"{"metric":{"peNormalizedAnnual":21.7,"pbAnnual":7.4,"dividendYieldIndicatedAnnual":3.1},"series":{}}"#,
            )),
            "KO" => Ok(HttpResponse::with_status(429, r#"{"error":"API limit reached"}"#)),
            _ => Ok(HttpResponse::ok_json(r#"{"metric":{}}"#)),
        };
    }
    Ok(HttpResponse::with_status(404, "{}"))
}

fn config() -> PipelineConfig {
    PipelineConfig::new()
        .with_api_token(Some(String::from("contract-token")))
        .with_base_url("https://finnhub.test/api/v1")
        .with_policy(
            ProviderPolicy::finnhub_default()
                .with_inter_batch_delay(std::time::Duration::ZERO),
        )
}

#[tokio::test]
async fn pipeline_over_finnhub_adapter_honors_the_wire_contract() {
    // Given: A scripted Finnhub
    let http = ScriptedHttp::new(finnhub_like);
    let pipeline = StockPipeline::with_http_client(config(), http.clone()).expect("valid");

    // When: The US market is fetched
    let report = pipeline.fetch_market_report("US").await;

    // Then: Records reflect listing order, dedup and the rate-limited symbol is dropped
    assert_eq!(report.origin, DataOrigin::Live);
    let tickers: Vec<_> = report.stocks.iter().map(|s| s.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["IBM", "AAPL"]);
    assert_eq!(report.stocks[0].price_to_earnings, Some(21.7));
    assert_eq!(report.stocks[1].name, "AAPL");

    let discovery = report.discovery.expect("discovery");
    assert_eq!(discovery.segments_failed, 1, "non-array payload fails the segment");
    assert_eq!(discovery.invalid_symbols, 1);
    assert_eq!(discovery.duplicate_symbols, 1);

    // And: every request authenticates by header only
    let requests = http.requests();
    assert_eq!(
        requests.len(),
        segments::resolve("US").len() + 3 * 2,
        "one listing per segment plus two calls per candidate"
    );
    for request in &requests {
        assert_eq!(
            request.headers.get("x-finnhub-token").map(String::as_str),
            Some("contract-token")
        );
        assert!(!request.url.contains("contract-token"));
        assert!(!request.url.contains("token="));
    }
    assert!(requests
        .iter()
        .any(|r| r.url.ends_with("/stock/metric?symbol=IBM&metric=all")));
}

#[tokio::test]
async fn missing_credential_never_touches_the_transport() {
    // Given: No token
    let http = ScriptedHttp::new(finnhub_like);
    let pipeline =
        StockPipeline::with_http_client(PipelineConfig::new(), http.clone()).expect("valid");

    // When: A market and a detail are requested
    let stocks = pipeline.fetch_market_stocks("CY").await;
    let detail = pipeline.fetch_symbol_detail("BOC").await;

    // Then: Built-in data, empty detail, zero requests
    assert!(stocks.len() >= 10);
    assert!(detail.is_empty());
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn detail_lookup_reads_profile_and_one_year_of_candles() {
    // Given: Profile and candle responses
    let http = ScriptedHttp::new(|request| {
        if request.url.contains("/stock/profile2?") {
            Ok(HttpResponse::ok_json(
                r#"{"logo":"https://static.finnhub.test/AAPL.png","finnhubIndustry":"Technology","weburl":"https://www.apple.com/"}"#,
            ))
        } else {
            Ok(HttpResponse::ok_json(
                r#"{"s":"ok","t":[1704153600,1704240000],"c":[185.64,184.25],"o":[187.15,184.22]}"#,
            ))
        }
    });
    let pipeline = StockPipeline::with_http_client(config(), http.clone()).expect("valid");

    // When: Detail is requested
    let detail = pipeline.fetch_symbol_detail("aapl").await;

    // Then: All three parts are present
    assert_eq!(detail.logo.as_deref(), Some("https://static.finnhub.test/AAPL.png"));
    assert_eq!(
        detail.description.as_deref(),
        Some("Technology - https://www.apple.com/")
    );
    let history = detail.price_history.expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].date, "2024-01-02");

    // And: the candle window spans 365 days at daily resolution
    let candle_url = http
        .requests()
        .into_iter()
        .map(|r| r.url)
        .find(|url| url.contains("/stock/candle?"))
        .expect("candle request");
    assert!(candle_url.contains("symbol=AAPL&resolution=D"));
    let bound = |name: &str| -> i64 {
        candle_url
            .split('&')
            .find_map(|pair| pair.strip_prefix(name))
            .and_then(|value| value.parse().ok())
            .expect("bound present")
    };
    assert_eq!(bound("to=") - bound("from="), 365 * 86_400);
}

#[tokio::test]
async fn adapter_error_kinds_follow_http_status() {
    let symbol = Symbol::parse("MSFT").expect("valid");

    for (status, kind) in [
        (401, SourceErrorKind::Unauthorized),
        (403, SourceErrorKind::Unauthorized),
        (429, SourceErrorKind::RateLimited),
        (422, SourceErrorKind::InvalidRequest),
        (502, SourceErrorKind::Unavailable),
    ] {
        // Given: A transport answering every call with `status`
        let http = ScriptedHttp::new(move |_| Ok(HttpResponse::with_status(status, "")));
        let adapter = FinnhubAdapter::new(http, "token");

        // When: Metrics are requested
        let error = adapter.metrics(&symbol).await.expect_err("non-2xx must fail");

        // Then: The status maps to a stable kind
        assert_eq!(error.kind(), kind, "status {status}");
    }
}

#[tokio::test]
async fn adapter_treats_transport_failure_as_unavailable() {
    let http = ScriptedHttp::new(|_| Err(HttpError::new("connection refused")));
    let adapter = FinnhubAdapter::new(http, "token");
    let segment = segments::resolve("CY")[0];

    let error = adapter.symbols(&segment).await.expect_err("must fail");
    assert_eq!(error.kind(), SourceErrorKind::Unavailable);

    let now = UtcDateTime::now();
    let symbol = Symbol::parse("BOC").expect("valid");
    let error = adapter
        .candles(&symbol, now.minus_days(365), now)
        .await
        .expect_err("must fail");
    assert_eq!(error.code(), "source.unavailable");
    assert_eq!(Endpoint::Candles.as_str(), "candles");
}

#[tokio::test]
async fn adapter_keeps_symbols_whose_other_fields_are_malformed() {
    // Given: A listing where one entry has a numeric description
    let http = ScriptedHttp::new(|_| {
        Ok(HttpResponse::ok_json(
            r#"[{"symbol":"IBM","description":5},{"symbol":"KO","description":"COCA-COLA CO"},{"symbol":7}]"#,
        ))
    });
    let adapter = FinnhubAdapter::new(http, "token");
    let segment = segments::resolve("US")[0];

    // When: The segment is listed
    let listed = adapter.symbols(&segment).await.expect("listing");

    // Then: Only the symbol field decides whether an entry survives
    let symbols: Vec<_> = listed.iter().map(|entry| entry.symbol.as_deref()).collect();
    assert_eq!(symbols, vec![Some("IBM"), Some("KO"), None]);
    assert_eq!(listed[0].description, None);
    assert_eq!(listed[1].description.as_deref(), Some("COCA-COLA CO"));
}
