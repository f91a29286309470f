use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 24;

/// Normalized exchange ticker.
///
/// Listings from non-US venues carry digits, dots, slashes and suffixes
/// (`0700.HK`, `BRK/B`), so only emptiness, length, whitespace and control
/// characters are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            if ch.is_whitespace() || ch.is_control() {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    /// Accepts a ticker exactly as an exchange listing spells it.
    ///
    /// Only surrounding whitespace is removed; case and length are kept so the
    /// caller sees the listed ticker unchanged.
    pub fn listed(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" aapl ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "AAPL");
    }

    #[test]
    fn accepts_foreign_listing_formats() {
        for raw in ["0700.HK", "BRK/B", "BF-B", "ATL.CY"] {
            assert!(Symbol::parse(raw).is_ok(), "{raw} should parse");
        }
    }

    #[test]
    fn listed_symbols_keep_their_spelling() {
        let long = "X".repeat(30);
        assert_eq!(Symbol::listed(" brk.b ").expect("listed").as_str(), "brk.b");
        assert_eq!(Symbol::listed(&long).expect("listed").as_str(), long);
        assert_eq!(Symbol::listed("  "), Err(ValidationError::EmptySymbol));
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(Symbol::parse(""), Err(ValidationError::EmptySymbol));
        assert_eq!(Symbol::parse("   "), Err(ValidationError::EmptySymbol));
    }

    #[test]
    fn rejects_embedded_whitespace() {
        let err = Symbol::parse("AA PL").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { index: 2, .. }));
    }

    #[test]
    fn rejects_overlong_symbol() {
        let err = Symbol::parse(&"A".repeat(30)).expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolTooLong { len: 30, .. }));
    }
}
