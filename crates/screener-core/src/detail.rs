use crate::data_source::MarketDataSource;
use crate::{CandleSeries, PricePoint, ProfilePayload, Symbol, SymbolDetail, UtcDateTime};

const HISTORY_DAYS: i64 = 365;

/// Logo, description and one year of daily closes for `symbol`.
///
/// Profile and candles are requested together and fail independently: a
/// failed call leaves its part of the detail empty.
pub async fn lookup_detail(
    source: &dyn MarketDataSource,
    symbol: &Symbol,
    now: UtcDateTime,
) -> SymbolDetail {
    let from = now.minus_days(HISTORY_DAYS);
    let (profile, candles) = tokio::join!(source.profile(symbol), source.candles(symbol, from, now));

    let mut detail = SymbolDetail::default();
    match profile {
        Ok(profile) => {
            detail.logo = profile.text("logo").map(str::to_owned);
            detail.description = describe(&profile);
        }
        Err(error) => tracing::warn!(
            ticker = %symbol,
            code = error.code(),
            error = error.message(),
            "profile lookup failed"
        ),
    }
    match candles {
        Ok(series) => detail.price_history = price_history(&series),
        Err(error) => tracing::warn!(
            ticker = %symbol,
            code = error.code(),
            error = error.message(),
            "candle lookup failed"
        ),
    }

    detail
}

/// `"{industry} - {weburl}"`, with `Company` standing in for a missing industry.
fn describe(profile: &ProfilePayload) -> Option<String> {
    let industry = profile.text("finnhubIndustry");
    let website = profile.text("weburl");

    match (industry, website) {
        (None, None) => None,
        (industry, Some(website)) => Some(format!("{} - {website}", industry.unwrap_or("Company"))),
        (Some(industry), None) => Some(industry.to_owned()),
    }
}

fn price_history(series: &CandleSeries) -> Option<Vec<PricePoint>> {
    if series.status.as_deref() != Some("ok") {
        return None;
    }
    let (timestamps, closes) = (series.timestamps.as_ref()?, series.closes.as_ref()?);

    let points: Vec<PricePoint> = timestamps
        .iter()
        .zip(closes)
        .filter(|(_, close)| close.is_finite())
        .filter_map(|(&seconds, &price)| {
            UtcDateTime::from_unix_seconds(seconds).map(|at| PricePoint {
                date: at.date_string(),
                price,
            })
        })
        .collect();

    (!points.is_empty()).then_some(points)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data_source::SourceError;
    use crate::memory_source::InMemorySource;

    fn now() -> UtcDateTime {
        UtcDateTime::parse("2024-06-01T12:00:00Z").expect("valid")
    }

    fn ok_candles() -> CandleSeries {
        CandleSeries {
            status: Some("ok".into()),
            timestamps: Some(vec![1_704_153_600, 1_704_240_000]),
            closes: Some(vec![185.64, 184.25]),
        }
    }

    #[tokio::test]
    async fn builds_full_detail() {
        let source = InMemorySource::new()
            .with_profile(
                "AAPL",
                json!({
                    "logo": "https://static.example/AAPL.png",
                    "finnhubIndustry": "Technology",
                    "weburl": "https://www.apple.com/"
                }),
            )
            .with_candles("AAPL", ok_candles());
        let symbol = Symbol::parse("AAPL").expect("valid");

        let detail = lookup_detail(&source, &symbol, now()).await;

        assert_eq!(detail.logo.as_deref(), Some("https://static.example/AAPL.png"));
        assert_eq!(
            detail.description.as_deref(),
            Some("Technology - https://www.apple.com/")
        );
        let history = detail.price_history.expect("history present");
        assert_eq!(history[0].date, "2024-01-02");
        assert_eq!(history[1].price, 184.25);
    }

    #[test]
    fn description_rules() {
        let only_url = ProfilePayload(json!({ "weburl": "https://x.example" }));
        let only_industry = ProfilePayload(json!({ "finnhubIndustry": "Banking" }));
        let neither = ProfilePayload(json!({ "name": "Nothing Ltd" }));

        assert_eq!(describe(&only_url).as_deref(), Some("Company - https://x.example"));
        assert_eq!(describe(&only_industry).as_deref(), Some("Banking"));
        assert_eq!(describe(&neither), None);
    }

    #[test]
    fn history_requires_ok_status_and_points() {
        let mut series = ok_candles();
        series.status = Some("no_data".into());
        assert_eq!(price_history(&series), None);

        let empty = CandleSeries {
            status: Some("ok".into()),
            timestamps: Some(vec![]),
            closes: Some(vec![]),
        };
        assert_eq!(price_history(&empty), None);
    }

    #[tokio::test]
    async fn failed_candles_keep_profile_parts() {
        let source = InMemorySource::new()
            .with_profile("BOC", json!({ "logo": "https://static.example/BOC.png" }))
            .with_candles_error("BOC", SourceError::unauthorized("premium endpoint"));
        let symbol = Symbol::parse("BOC").expect("valid");

        let detail = lookup_detail(&source, &symbol, now()).await;

        assert!(detail.logo.is_some());
        assert_eq!(detail.price_history, None);
    }
}
