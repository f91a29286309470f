use screener_core::{segments, Market};
use serde_json::{json, Value};

use crate::cli::SegmentsArgs;
use crate::error::CliError;

use super::{unknown_market_warning, CommandResult};

pub fn run(args: &SegmentsArgs) -> Result<CommandResult, CliError> {
    let markets: Vec<Market> = match &args.market {
        Some(code) => vec![Market::resolve(code)],
        None => Market::ALL.to_vec(),
    };

    let rows = markets
        .iter()
        .flat_map(|&market| {
            segments::segments_for(market)
                .iter()
                .map(move |segment| -> Result<Value, CliError> {
                    let mut row = serde_json::to_value(segment)?;
                    row["market"] = json!(market.code());
                    Ok(row)
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut result = CommandResult::ok(json!({ "segments": rows }));
    if let [market] = markets.as_slice() {
        result = result.with_market(*market);
    }
    if let Some(warning) = args.market.as_deref().and_then(unknown_market_warning) {
        result = result.with_warning(warning);
    }
    Ok(result)
}
