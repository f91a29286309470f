use screener_core::{PipelineConfig, StockPipeline, Symbol};
use serde_json::json;

use crate::cli::DetailArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &DetailArgs, config: PipelineConfig) -> Result<CommandResult, CliError> {
    // Reject malformed tickers up front; the pipeline would only return an empty detail.
    let symbol = Symbol::parse(&args.ticker)?;
    let has_credential = config.has_credential();
    let pipeline = StockPipeline::new(config)?;

    let detail = pipeline.fetch_symbol_detail(symbol.as_str()).await;
    let mut result = CommandResult::ok(json!({
        "ticker": symbol.as_str(),
        "detail": &detail,
    }));

    if !has_credential {
        result = result.with_warning("FINNHUB_API_KEY is not set; detail is unavailable");
    } else if detail.is_empty() {
        result = result.with_warning(format!("no detail available for {symbol}"));
    }
    Ok(result)
}
