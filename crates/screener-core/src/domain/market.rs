use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Logical market served by the pipeline.
///
/// Parsing never fails: codes that are not recognized resolve to
/// [`Market::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    /// United States, spread across several competing venues.
    Us,
    /// Cyprus Stock Exchange.
    Cy,
}

impl Market {
    pub const DEFAULT: Self = Self::Us;
    pub const ALL: [Self; 2] = [Self::Us, Self::Cy];

    /// Permissive lookup; unknown codes map to the default market.
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Self::DEFAULT)
    }

    /// Strict lookup used where the caller wants to know the code was unknown.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "US" => Some(Self::Us),
            "CY" => Some(Self::Cy),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Cy => "CY",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Us => "USA",
            Self::Cy => "Cyprus",
        }
    }
}

impl Default for Market {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for Market {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_codes_case_insensitively() {
        assert_eq!(Market::resolve("us"), Market::Us);
        assert_eq!(Market::resolve(" CY "), Market::Cy);
    }

    #[test]
    fn unknown_codes_fall_back_to_default() {
        assert_eq!(Market::resolve("XX"), Market::Us);
        assert_eq!(Market::resolve(""), Market::Us);
        assert_eq!(Market::from_code("XX"), None);
    }
}
