//! Predictor Configuration
//!
//! Endpoint and category membership are explicit values handed to the
//! fetcher and selector, loaded from the environment or defaulted.

use thiserror::Error;

use crate::model::InvestmentPlan;
use crate::strategy::StrategySelector;

pub const DEFAULT_BASE_URL: &str = "https://demo4729673.mockable.io/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Plans configured for both bi- and tri-average: {0}")]
    OverlappingPlans(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictorConfig {
    /// History endpoint; the plan identifier is appended
    pub base_url: String,

    pub bi_average_plans: Vec<String>,

    pub tri_average_plans: Vec<String>,

    /// Request timeout, unbounded when `None`
    pub timeout_secs: Option<u64>,

    /// Serve built-in sample histories instead of calling the endpoint
    pub offline: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            bi_average_plans: InvestmentPlan::bi_average_defaults()
                .iter()
                .map(ToString::to_string)
                .collect(),
            tri_average_plans: InvestmentPlan::tri_average_defaults()
                .iter()
                .map(ToString::to_string)
                .collect(),
            timeout_secs: None,
            offline: false,
        }
    }
}

impl PredictorConfig {
    /// Load from `PREDICTOR_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup; unset keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("PREDICTOR_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.base_url, |v| v.trim().to_string());

        let bi_average_plans = lookup("PREDICTOR_BI_AVERAGE_PLANS")
            .map_or(defaults.bi_average_plans, |v| split_plans(&v));
        let tri_average_plans = lookup("PREDICTOR_TRI_AVERAGE_PLANS")
            .map_or(defaults.tri_average_plans, |v| split_plans(&v));

        let timeout_secs = match lookup("PREDICTOR_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue {
                        var: "PREDICTOR_TIMEOUT_SECS",
                        value: raw.clone(),
                    })?;
                Some(secs)
            }
            _ => defaults.timeout_secs,
        };

        let offline = lookup("PREDICTOR_OFFLINE")
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        Ok(Self {
            base_url,
            bi_average_plans,
            tri_average_plans,
            timeout_secs,
            offline,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn selector(&self) -> Result<StrategySelector, ConfigError> {
        StrategySelector::new(
            self.bi_average_plans.iter().cloned(),
            self.tri_average_plans.iter().cloned(),
        )
    }
}

fn split_plans(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
