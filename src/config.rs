//! Runtime configuration: thresholds, revenue assumptions and logging.
//!
//! Precedence, lowest first: built-in defaults, the TOML file,
//! `BASKETLENS_*` environment variables, explicit overrides from the caller.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;
use crate::domain::values::revenue::RevenueAssumptions;
use crate::domain::values::thresholds::Thresholds;

pub const DEFAULT_CONFIG_FILE: &str = "basketlens.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = PipelineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(PipelineError::Config(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub thresholds: Thresholds,
    pub revenue: RevenueAssumptions,
    pub logging: LoggingConfig,
}

/// Values supplied directly by the caller (e.g. CLI flags).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub min_pair_count: Option<u64>,
    pub min_pair_count_for_candidates: Option<u64>,
    pub min_cart_additions_for_upsell: Option<u64>,
    pub min_completion_rate_for_upsell: Option<f64>,
    pub min_abandonment_rate_for_post_purchase: Option<f64>,
    pub min_sessions_threshold: Option<u64>,
    pub average_order_value: Option<f64>,
    pub target_recovery_rate: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit file; when set it must exist.
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

impl AnalyticsConfig {
    pub fn load(options: LoadOptions) -> Result<Self, PipelineError> {
        let mut config = match &options.config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| env::var(key).ok())?;
        config.apply_overrides(&options.overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("could not read `{}`: {e}", path.display())))?;
        Self::from_toml(&raw)
            .map_err(|e| PipelineError::Config(format!("could not parse `{}`: {e}", path.display())))
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Apply `BASKETLENS_*` variables. `lookup` is injected so tests do not
    /// have to touch the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("BASKETLENS_MIN_PAIR_COUNT") {
            self.thresholds.min_pair_count = parse_env("BASKETLENS_MIN_PAIR_COUNT", &v)?;
        }
        if let Some(v) = get("BASKETLENS_MIN_PAIR_COUNT_FOR_CANDIDATES") {
            self.thresholds.min_pair_count_for_candidates =
                parse_env("BASKETLENS_MIN_PAIR_COUNT_FOR_CANDIDATES", &v)?;
        }
        if let Some(v) = get("BASKETLENS_MIN_CART_ADDITIONS_FOR_UPSELL") {
            self.thresholds.min_cart_additions_for_upsell =
                parse_env("BASKETLENS_MIN_CART_ADDITIONS_FOR_UPSELL", &v)?;
        }
        if let Some(v) = get("BASKETLENS_MIN_COMPLETION_RATE_FOR_UPSELL") {
            self.thresholds.min_completion_rate_for_upsell =
                parse_env("BASKETLENS_MIN_COMPLETION_RATE_FOR_UPSELL", &v)?;
        }
        if let Some(v) = get("BASKETLENS_MIN_ABANDONMENT_RATE_FOR_POST_PURCHASE") {
            self.thresholds.min_abandonment_rate_for_post_purchase =
                parse_env("BASKETLENS_MIN_ABANDONMENT_RATE_FOR_POST_PURCHASE", &v)?;
        }
        if let Some(v) = get("BASKETLENS_MIN_SESSIONS_THRESHOLD") {
            self.thresholds.min_sessions_threshold =
                parse_env("BASKETLENS_MIN_SESSIONS_THRESHOLD", &v)?;
        }
        if let Some(v) = get("BASKETLENS_AVERAGE_ORDER_VALUE") {
            self.revenue.average_order_value = parse_env("BASKETLENS_AVERAGE_ORDER_VALUE", &v)?;
        }
        if let Some(v) = get("BASKETLENS_TARGET_RECOVERY_RATE") {
            self.revenue.target_recovery_rate = parse_env("BASKETLENS_TARGET_RECOVERY_RATE", &v)?;
        }
        if let Some(v) = get("BASKETLENS_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = get("BASKETLENS_LOG_FORMAT") {
            self.logging.format = v.parse()?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, o: &ConfigOverrides) {
        let t = &mut self.thresholds;
        if let Some(v) = o.min_pair_count {
            t.min_pair_count = v;
        }
        if let Some(v) = o.min_pair_count_for_candidates {
            t.min_pair_count_for_candidates = v;
        }
        if let Some(v) = o.min_cart_additions_for_upsell {
            t.min_cart_additions_for_upsell = v;
        }
        if let Some(v) = o.min_completion_rate_for_upsell {
            t.min_completion_rate_for_upsell = v;
        }
        if let Some(v) = o.min_abandonment_rate_for_post_purchase {
            t.min_abandonment_rate_for_post_purchase = v;
        }
        if let Some(v) = o.min_sessions_threshold {
            t.min_sessions_threshold = v;
        }
        if let Some(v) = o.average_order_value {
            self.revenue.average_order_value = v;
        }
        if let Some(v) = o.target_recovery_rate {
            self.revenue.target_recovery_rate = v;
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        self.thresholds.validate().map_err(PipelineError::Config)?;
        self.revenue.validate().map_err(PipelineError::Config)?;
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, PipelineError> {
    value
        .trim()
        .parse()
        .map_err(|_| PipelineError::Config(format!("invalid value for `{key}`: `{value}`")))
}
