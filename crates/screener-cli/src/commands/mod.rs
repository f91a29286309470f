mod detail;
mod segments;
mod stocks;

use std::time::Instant;

use screener_core::{Market, PipelineConfig, UtcDateTime};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::{Envelope, EnvelopeMeta, RequestId};

pub struct CommandResult {
    pub data: Value,
    pub run_id: Option<Uuid>,
    pub market: Option<Market>,
    pub origin: Option<String>,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            run_id: None,
            market: None,
            origin: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = Some(run_id);
        self
    }

    pub fn with_market(mut self, market: Market) -> Self {
        self.market = Some(market);
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope, CliError> {
    let started = Instant::now();

    let result = match &cli.command {
        Command::Stocks(args) => stocks::run(args, PipelineConfig::from_env()?).await?,
        Command::Detail(args) => detail::run(args, PipelineConfig::from_env()?).await?,
        Command::Segments(args) => segments::run(args)?,
    };

    let CommandResult {
        data,
        run_id,
        market,
        origin,
        warnings,
    } = result;

    let meta = EnvelopeMeta {
        request_id: run_id.map_or_else(RequestId::new_v4, RequestId::from),
        generated_at: UtcDateTime::now(),
        market: market.map(|market| market.code().to_owned()),
        origin,
        latency_ms: started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64,
        warnings,
    };

    Ok(Envelope { meta, data })
}

/// Warning text for a market code that did not resolve.
fn unknown_market_warning(code: &str) -> Option<String> {
    Market::from_code(code).is_none().then(|| {
        format!(
            "unknown market code '{}', using {}",
            code.trim(),
            Market::DEFAULT.code()
        )
    })
}
