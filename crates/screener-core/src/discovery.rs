//! Symbol discovery across the segments of one market.

use std::collections::HashSet;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;

use crate::data_source::MarketDataSource;
use crate::{CandidateSymbol, SegmentDescriptor, Symbol};

/// Discovery limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Maximum number of candidates handed to the fetcher.
    pub candidate_cap: usize,
    /// Upper bound on a single segment listing call.
    pub segment_timeout: Duration,
}

/// Counters describing one discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    pub segments_queried: usize,
    pub segments_failed: usize,
    pub raw_symbols: usize,
    pub invalid_symbols: usize,
    pub duplicate_symbols: usize,
    pub capped_symbols: usize,
    pub candidates: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discovery {
    pub candidates: Vec<CandidateSymbol>,
    pub report: DiscoveryReport,
}

/// Queries every segment in parallel and merges the listings.
///
/// Candidates keep segment order, then listing order. A ticker listed on
/// several segments is kept once, tagged with the first segment that listed
/// it. Segment failures and timeouts are counted and logged, never returned.
pub async fn discover(
    source: &dyn MarketDataSource,
    segments: &[SegmentDescriptor],
    options: DiscoveryOptions,
) -> Discovery {
    let queries = segments.iter().map(|segment| async move {
        let outcome = tokio::time::timeout(options.segment_timeout, source.symbols(segment)).await;
        (segment, outcome)
    });
    let outcomes = join_all(queries).await;

    let mut report = DiscoveryReport {
        segments_queried: segments.len(),
        ..DiscoveryReport::default()
    };
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for (segment, outcome) in outcomes {
        let listed = match outcome {
            Ok(Ok(listed)) => listed,
            Ok(Err(error)) => {
                report.segments_failed += 1;
                tracing::warn!(
                    source = source.name(),
                    segment = %segment.label(),
                    code = error.code(),
                    error = error.message(),
                    "segment listing failed"
                );
                continue;
            }
            Err(_) => {
                report.segments_failed += 1;
                tracing::warn!(
                    source = source.name(),
                    segment = %segment.label(),
                    timeout_ms = options.segment_timeout.as_millis() as u64,
                    "segment listing timed out"
                );
                continue;
            }
        };

        tracing::debug!(segment = %segment.label(), listed = listed.len(), "segment listed");
        report.raw_symbols += listed.len();

        for entry in listed {
            let symbol = match entry.symbol.as_deref().map(Symbol::listed) {
                Some(Ok(symbol)) => symbol,
                Some(Err(error)) => {
                    report.invalid_symbols += 1;
                    tracing::debug!(segment = %segment.label(), %error, "dropping listed symbol");
                    continue;
                }
                None => {
                    report.invalid_symbols += 1;
                    continue;
                }
            };

            if !seen.insert(symbol.clone()) {
                report.duplicate_symbols += 1;
                continue;
            }

            candidates.push(CandidateSymbol {
                symbol,
                origin_segment: *segment,
            });
        }
    }

    if candidates.len() > options.candidate_cap {
        report.capped_symbols = candidates.len() - options.candidate_cap;
        candidates.truncate(options.candidate_cap);
    }
    report.candidates = candidates.len();

    tracing::info!(
        segments = report.segments_queried,
        failed = report.segments_failed,
        raw = report.raw_symbols,
        candidates = report.candidates,
        "discovery finished"
    );

    Discovery { candidates, report }
}
