//! Batched profile and metrics acquisition.

use std::future::Future;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use tokio::time::Instant;

use crate::data_source::{MarketDataSource, SourceError};
use crate::provider_policy::ProviderPolicy;
use crate::{CandidateSymbol, RawFetchResult, Symbol};

/// Counters describing one fetch run.
///
/// `batches_run` counts batches that fully settled; a batch cut short by the
/// deadline shows up in `symbols_abandoned` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    pub batches_planned: usize,
    pub batches_run: usize,
    pub symbols_requested: usize,
    pub symbols_fetched: usize,
    pub symbols_failed: usize,
    pub symbols_abandoned: usize,
    pub deadline_hit: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    pub results: Vec<RawFetchResult>,
    pub report: FetchReport,
}

/// Fetches candidates in fixed-size batches with a pause between batches.
///
/// Each batch is a join barrier: every symbol in it is requested at once and
/// the next batch starts only after all of them settled and the delay
/// elapsed. No delay follows the final batch.
pub struct BatchedFetcher<'a> {
    source: &'a dyn MarketDataSource,
    batch_size: usize,
    inter_batch_delay: Duration,
}

impl<'a> BatchedFetcher<'a> {
    pub fn new(source: &'a dyn MarketDataSource, policy: &ProviderPolicy) -> Self {
        Self {
            source,
            batch_size: policy.batch_size.max(1),
            inter_batch_delay: policy.inter_batch_delay,
        }
    }

    pub async fn fetch_all(&self, candidates: &[CandidateSymbol]) -> FetchOutcome {
        self.fetch_all_until(candidates, None).await
    }

    /// Like [`fetch_all`](Self::fetch_all), but stops waiting at `deadline`.
    ///
    /// Symbols that settled before the deadline are kept, including those of
    /// the batch in flight; the rest of that batch is abandoned.
    pub async fn fetch_all_until(
        &self,
        candidates: &[CandidateSymbol],
        deadline: Option<Instant>,
    ) -> FetchOutcome {
        let batches = candidates.len().div_ceil(self.batch_size);
        let mut report = FetchReport {
            batches_planned: batches,
            ..FetchReport::default()
        };
        let mut results = Vec::with_capacity(candidates.len());

        for (index, batch) in candidates.chunks(self.batch_size).enumerate() {
            report.symbols_requested += batch.len();
            let (settled, cut_short) = self.run_batch(batch, deadline).await;

            for (candidate, outcome) in batch.iter().zip(settled) {
                match outcome {
                    Some(Ok(raw)) => results.push(raw),
                    Some(Err(error)) => {
                        report.symbols_failed += 1;
                        tracing::debug!(
                            ticker = %candidate.symbol,
                            segment = %candidate.origin_segment.label(),
                            code = error.code(),
                            error = error.message(),
                            "dropping symbol"
                        );
                    }
                    None => report.symbols_abandoned += 1,
                }
            }

            if cut_short {
                report.deadline_hit = true;
                tracing::warn!(
                    batch = index,
                    abandoned = report.symbols_abandoned,
                    "deadline reached, abandoning batch in flight"
                );
                break;
            }

            report.batches_run += 1;
            tracing::debug!(
                batch = index,
                of = batches,
                fetched = results.len(),
                "batch settled"
            );

            let is_last = index + 1 == batches;
            if !is_last
                && within(deadline, tokio::time::sleep(self.inter_batch_delay))
                    .await
                    .is_none()
            {
                report.deadline_hit = true;
                tracing::warn!(batch = index, "deadline reached between batches");
                break;
            }
        }

        report.symbols_fetched = results.len();
        tracing::info!(
            batches = report.batches_run,
            requested = report.symbols_requested,
            fetched = report.symbols_fetched,
            failed = report.symbols_failed,
            abandoned = report.symbols_abandoned,
            deadline_hit = report.deadline_hit,
            "fetch finished"
        );

        FetchOutcome { results, report }
    }

    /// Requests a whole batch at once and collects outcomes by position.
    ///
    /// Slots still pending at the deadline stay `None`; the flag reports
    /// whether that happened.
    async fn run_batch(
        &self,
        batch: &[CandidateSymbol],
        deadline: Option<Instant>,
    ) -> (Vec<Option<Result<RawFetchResult, SourceError>>>, bool) {
        let mut pending: FuturesUnordered<_> = batch
            .iter()
            .enumerate()
            .map(|(slot, candidate)| async move {
                (slot, self.fetch_one(&candidate.symbol).await)
            })
            .collect();
        let mut settled: Vec<Option<Result<RawFetchResult, SourceError>>> =
            batch.iter().map(|_| None).collect();

        loop {
            match within(deadline, pending.next()).await {
                Some(Some((slot, outcome))) => settled[slot] = Some(outcome),
                Some(None) => return (settled, false),
                None => return (settled, true),
            }
        }
    }

    async fn fetch_one(&self, symbol: &Symbol) -> Result<RawFetchResult, SourceError> {
        let (profile, metrics) =
            tokio::join!(self.source.profile(symbol), self.source.metrics(symbol));

        Ok(RawFetchResult {
            ticker: symbol.clone(),
            profile: profile?,
            metrics: metrics?,
        })
    }
}

async fn within<F: Future>(deadline: Option<Instant>, future: F) -> Option<F::Output> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, future).await.ok(),
        None => Some(future.await),
    }
}
