use thiserror::Error;

/// Validation and contract errors exposed by `screener-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character {ch:?} at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("batch size must be greater than zero")]
    ZeroBatchSize,
    #[error("candidate cap for market '{market}' must be greater than zero")]
    ZeroCandidateCap { market: &'static str },
    #[error("requests per minute must be greater than zero when set")]
    ZeroRequestQuota,

    #[error("invalid value '{value}' for {key}")]
    InvalidSetting { key: &'static str, value: String },
}
