use std::time::Duration;

use screener_core::{DataOrigin, Market, MarketFetch, PipelineConfig, StockPipeline};
use serde_json::json;
use tokio::time::Instant;

use crate::cli::StocksArgs;
use crate::error::CliError;

use super::{unknown_market_warning, CommandResult};

pub async fn run(args: &StocksArgs, config: PipelineConfig) -> Result<CommandResult, CliError> {
    let market = Market::resolve(&args.market);
    let pipeline = StockPipeline::new(apply_overrides(config, args, market))?;

    let report = match args.deadline_ms {
        Some(ms) => {
            let deadline = Instant::now() + Duration::from_millis(ms);
            pipeline
                .fetch_market_report_within(&args.market, deadline)
                .await
        }
        None => pipeline.fetch_market_report(&args.market).await,
    };

    let mut result = CommandResult::ok(json!({
        "stocks": &report.stocks,
        "discovery": &report.discovery,
        "fetch": &report.fetch,
    }))
    .with_run_id(report.run_id)
    .with_market(report.market)
    .with_origin(report.origin.label());

    for warning in report_warnings(&report)
        .into_iter()
        .chain(unknown_market_warning(&args.market))
    {
        result = result.with_warning(warning);
    }
    Ok(result)
}

fn apply_overrides(mut config: PipelineConfig, args: &StocksArgs, market: Market) -> PipelineConfig {
    if let Some(size) = args.batch_size {
        config.policy.batch_size = size;
    }
    if let Some(ms) = args.batch_delay_ms {
        config.policy.inter_batch_delay = Duration::from_millis(ms);
    }
    if let Some(limit) = args.requests_per_minute {
        config.policy.requests_per_minute = Some(limit);
    }
    if let Some(cap) = args.max_candidates {
        config = config.with_candidate_cap(market, cap);
    }
    config
}

fn report_warnings(report: &MarketFetch) -> Vec<String> {
    let mut warnings = Vec::new();

    if let DataOrigin::Fallback(reason) = report.origin {
        warnings.push(format!(
            "serving built-in dataset ({}); figures are not live",
            reason.as_str()
        ));
    }
    if let Some(discovery) = &report.discovery {
        if discovery.segments_failed > 0 {
            warnings.push(format!(
                "{} of {} exchange segments could not be listed",
                discovery.segments_failed, discovery.segments_queried
            ));
        }
    }
    if let Some(fetch) = &report.fetch {
        if fetch.deadline_hit {
            warnings.push(format!(
                "deadline reached after {} of {} batches, {} symbols abandoned",
                fetch.batches_run, fetch.batches_planned, fetch.symbols_abandoned
            ));
        }
        if fetch.symbols_failed > 0 {
            warnings.push(format!(
                "{} of {} symbols dropped after failed requests",
                fetch.symbols_failed, fetch.symbols_requested
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use screener_core::{FallbackReason, FetchReport};
    use uuid::Uuid;

    use super::*;

    fn args() -> StocksArgs {
        StocksArgs {
            market: String::from("CY"),
            batch_size: Some(10),
            batch_delay_ms: Some(250),
            max_candidates: Some(20),
            requests_per_minute: None,
            deadline_ms: None,
        }
    }

    #[test]
    fn flags_override_config() {
        let config = apply_overrides(PipelineConfig::new(), &args(), Market::Cy);

        assert_eq!(config.policy.batch_size, 10);
        assert_eq!(config.policy.inter_batch_delay, Duration::from_millis(250));
        assert_eq!(config.candidate_cap(Market::Cy), 20);
        assert_eq!(config.candidate_cap(Market::Us), 100);
    }

    #[test]
    fn warnings_describe_degraded_runs() {
        let report = MarketFetch {
            run_id: Uuid::new_v4(),
            market: Market::Us,
            origin: DataOrigin::Fallback(FallbackReason::NoUsableRecords),
            stocks: Vec::new(),
            discovery: None,
            fetch: Some(FetchReport {
                batches_planned: 3,
                batches_run: 1,
                symbols_requested: 100,
                symbols_fetched: 0,
                symbols_failed: 60,
                symbols_abandoned: 40,
                deadline_hit: true,
            }),
        };

        let warnings = report_warnings(&report);

        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("no_usable_records"));
        assert_eq!(
            warnings[1],
            "deadline reached after 1 of 3 batches, 40 symbols abandoned"
        );
    }

    #[tokio::test]
    async fn without_token_prints_fallback_envelope_data() {
        let result = run(&args(), PipelineConfig::new()).await.expect("runs");

        assert_eq!(result.origin.as_deref(), Some("fallback:missing_credential"));
        assert_eq!(result.market, Some(Market::Cy));
        let stocks = result.data["stocks"].as_array().expect("stocks array");
        assert!(stocks.len() >= 10);
        assert_eq!(stocks[0]["ticker"], "BOC");
    }
}
