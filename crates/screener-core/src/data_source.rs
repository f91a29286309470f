//! The [`MarketDataSource`] contract the pipeline is written against.
//!
//! [`FinnhubAdapter`](crate::adapters::FinnhubAdapter) talks to the real API;
//! [`InMemorySource`](crate::InMemorySource) serves scripted payloads.
//!
//! # Endpoints
//!
//! | Endpoint | Input | Output | Used by |
//! |----------|-------|--------|---------|
//! | Symbols | [`SegmentDescriptor`] | `Vec<ListedSymbol>` | discovery |
//! | Profile | [`Symbol`] | [`ProfilePayload`] | fetcher, detail |
//! | Metrics | [`Symbol`] | [`MetricPayload`] | fetcher |
//! | Candles | [`Symbol`] + range | [`CandleSeries`] | detail |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{
    CandleSeries, ListedSymbol, MetricPayload, ProfilePayload, SegmentDescriptor, Symbol,
    UtcDateTime,
};

/// Which upstream call a request or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Symbols,
    Profile,
    Metrics,
    Candles,
}

impl Endpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Symbols => "symbols",
            Self::Profile => "profile",
            Self::Metrics => "metrics",
            Self::Candles => "candles",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse failure classes shared by every adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    Unauthorized,
    InvalidResponse,
    InvalidRequest,
    Internal,
}

/// Failure of one source call, tagged with a stable kind.
///
/// The pipeline never retries, but `retryable` is kept so callers layered on
/// top can decide for themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    fn of(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        let retryable = matches!(
            kind,
            SourceErrorKind::Unavailable | SourceErrorKind::RateLimited
        );
        Self {
            kind,
            message: message.into(),
            retryable,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::of(SourceErrorKind::Unavailable, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::of(SourceErrorKind::RateLimited, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::of(SourceErrorKind::Unauthorized, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::of(SourceErrorKind::InvalidResponse, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::of(SourceErrorKind::InvalidRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::of(SourceErrorKind::Internal, message)
    }

    /// Maps a non-2xx HTTP status onto an error kind.
    pub fn from_status(endpoint: Endpoint, status: u16) -> Self {
        let message = format!("{endpoint} endpoint returned status {status}");
        match status {
            401 | 403 => Self::unauthorized(message),
            429 => Self::rate_limited(message),
            400..=499 => Self::invalid_request(message),
            _ => Self::unavailable(message),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::Unauthorized => "source.unauthorized",
            SourceErrorKind::InvalidResponse => "source.invalid_response",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Source adapter contract.
///
/// Every call is independent: a failure on one symbol or segment says nothing
/// about the next call. Implementations must be `Send + Sync` because the
/// pipeline drives many calls concurrently through a shared reference.
pub trait MarketDataSource: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Lists the tradable symbols of one exchange segment.
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx statuses, and payloads that are not a
    /// JSON array all surface as [`SourceError`].
    fn symbols<'a>(&'a self, segment: &'a SegmentDescriptor)
        -> SourceFuture<'a, Vec<ListedSymbol>>;

    /// Fetches the company profile for a symbol.
    fn profile<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, ProfilePayload>;

    /// Fetches the valuation metric set for a symbol.
    fn metrics<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, MetricPayload>;

    /// Fetches daily candles between two instants.
    fn candles<'a>(
        &'a self,
        symbol: &'a Symbol,
        from: UtcDateTime,
        to: UtcDateTime,
    ) -> SourceFuture<'a, CandleSeries>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_distinguishes_auth_and_quota() {
        assert_eq!(
            SourceError::from_status(Endpoint::Metrics, 401).kind(),
            SourceErrorKind::Unauthorized
        );
        assert_eq!(
            SourceError::from_status(Endpoint::Metrics, 429).kind(),
            SourceErrorKind::RateLimited
        );
        assert_eq!(
            SourceError::from_status(Endpoint::Profile, 404).kind(),
            SourceErrorKind::InvalidRequest
        );
        assert_eq!(
            SourceError::from_status(Endpoint::Symbols, 503).kind(),
            SourceErrorKind::Unavailable
        );
    }

    #[test]
    fn display_includes_stable_code() {
        let error = SourceError::invalid_response("symbol list is not an array");
        assert_eq!(
            error.to_string(),
            "symbol list is not an array (source.invalid_response)"
        );
        assert!(!error.retryable());
    }
}
