use std::str::FromStr;
use std::time::Duration;

use crate::adapters::DEFAULT_BASE_URL;
use crate::provider_policy::ProviderPolicy;
use crate::{Market, ValidationError};

pub const API_KEY_VARS: [&str; 2] = ["FINNHUB_API_KEY", "NEXT_PUBLIC_FINNHUB_API_KEY"];

const DEFAULT_US_CAP: usize = 100;
const DEFAULT_CY_CAP: usize = 50;

/// Everything a pipeline run needs, passed in explicitly.
///
/// A missing `api_token` is a valid configuration: the pipeline serves the
/// built-in datasets without touching the network.
#[derive(Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub api_token: Option<String>,
    pub base_url: String,
    pub policy: ProviderPolicy,
    pub us_candidate_cap: usize,
    pub cy_candidate_cap: usize,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self {
            api_token: None,
            base_url: String::from(DEFAULT_BASE_URL),
            policy: ProviderPolicy::finnhub_default(),
            us_candidate_cap: DEFAULT_US_CAP,
            cy_candidate_cap: DEFAULT_CY_CAP,
        }
    }

    /// Blank tokens count as missing.
    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token.filter(|token| !token.trim().is_empty());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_policy(mut self, policy: ProviderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_candidate_cap(mut self, market: Market, cap: usize) -> Self {
        match market {
            Market::Us => self.us_candidate_cap = cap,
            Market::Cy => self.cy_candidate_cap = cap,
        }
        self
    }

    pub fn candidate_cap(&self, market: Market) -> usize {
        match market {
            Market::Us => self.us_candidate_cap,
            Market::Cy => self.cy_candidate_cap,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_token.is_some()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.policy.validate()?;
        for market in Market::ALL {
            if self.candidate_cap(market) == 0 {
                return Err(ValidationError::ZeroCandidateCap {
                    market: market.code(),
                });
            }
        }
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::InvalidSetting {
                key: "SCREENER_BASE_URL",
                value: self.base_url.clone(),
            });
        }
        Ok(())
    }

    /// Reads the process environment. Intended for binaries; library callers
    /// should build the config explicitly.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new()
            .with_api_token(API_KEY_VARS.iter().find_map(|key| {
                lookup(key).filter(|value| !value.trim().is_empty())
            }));

        if let Some(base_url) = lookup("SCREENER_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(size) = parse_setting::<usize, _>(&lookup, "SCREENER_BATCH_SIZE")? {
            config.policy.batch_size = size;
        }
        if let Some(ms) = parse_setting::<u64, _>(&lookup, "SCREENER_BATCH_DELAY_MS")? {
            config.policy.inter_batch_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_setting::<u64, _>(&lookup, "SCREENER_SEGMENT_TIMEOUT_MS")? {
            config.policy.segment_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_setting::<u64, _>(&lookup, "SCREENER_REQUEST_TIMEOUT_MS")? {
            config.policy.request_timeout = Duration::from_millis(ms);
        }
        if let Some(limit) = parse_setting::<u32, _>(&lookup, "SCREENER_REQUESTS_PER_MINUTE")? {
            config.policy.requests_per_minute = Some(limit);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

// The token must not leak through `{:?}`.
impl std::fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("policy", &self.policy)
            .field("us_candidate_cap", &self.us_candidate_cap)
            .field("cy_candidate_cap", &self.cy_candidate_cap)
            .finish()
    }
}

fn parse_setting<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ValidationError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ValidationError::InvalidSetting { key, value: raw })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = PipelineConfig::from_lookup(lookup(&[])).expect("defaults are valid");

        assert!(!config.has_credential());
        assert_eq!(config.candidate_cap(Market::Us), 100);
        assert_eq!(config.candidate_cap(Market::Cy), 50);
        assert_eq!(config.policy, ProviderPolicy::finnhub_default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn reads_key_from_either_variable() {
        let primary = PipelineConfig::from_lookup(lookup(&[("FINNHUB_API_KEY", "abc")]))
            .expect("valid");
        assert_eq!(primary.api_token.as_deref(), Some("abc"));

        let public = PipelineConfig::from_lookup(lookup(&[
            ("FINNHUB_API_KEY", "  "),
            ("NEXT_PUBLIC_FINNHUB_API_KEY", "xyz"),
        ]))
        .expect("valid");
        assert_eq!(public.api_token.as_deref(), Some("xyz"));
    }

    #[test]
    fn overrides_pacing_settings() {
        let config = PipelineConfig::from_lookup(lookup(&[
            ("SCREENER_BATCH_SIZE", "25"),
            ("SCREENER_BATCH_DELAY_MS", "250"),
            ("SCREENER_REQUESTS_PER_MINUTE", "60"),
        ]))
        .expect("valid");

        assert_eq!(config.policy.batch_size, 25);
        assert_eq!(config.policy.inter_batch_delay, Duration::from_millis(250));
        assert_eq!(config.policy.requests_per_minute, Some(60));
    }

    #[test]
    fn rejects_unparsable_and_zero_values() {
        let bad = PipelineConfig::from_lookup(lookup(&[("SCREENER_BATCH_SIZE", "many")]));
        assert_eq!(
            bad,
            Err(ValidationError::InvalidSetting {
                key: "SCREENER_BATCH_SIZE",
                value: String::from("many"),
            })
        );

        let zero = PipelineConfig::from_lookup(lookup(&[("SCREENER_BATCH_SIZE", "0")]));
        assert_eq!(zero, Err(ValidationError::ZeroBatchSize));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = PipelineConfig::new().with_api_token(Some(String::from("secret-token")));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
    }
}
