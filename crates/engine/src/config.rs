//! Engine-wide fallback values for step configuration.
//!
//! Step configs may omit `topic`, `max_iters`, and `min_score`; the values used
//! in that case come from [`EngineConfig`]. Hosts build one explicitly, take
//! the defaults, or overlay the process environment with [`EngineConfig::from_env`].

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable overriding the default refinement topic.
pub const DEFAULT_TOPIC_ENV: &str = "PROMPTCHAIN_DEFAULT_TOPIC";
/// Environment variable overriding the default refinement iteration bound.
pub const DEFAULT_MAX_ITERS_ENV: &str = "PROMPTCHAIN_DEFAULT_MAX_ITERS";
/// Environment variable overriding the default passing quality score.
pub const DEFAULT_MIN_SCORE_ENV: &str = "PROMPTCHAIN_DEFAULT_MIN_SCORE";

/// Fallback values applied when a step config leaves a key out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Topic passed to the refiner when `topic` is absent.
    pub default_topic: String,
    /// Iteration bound passed to the refiner when `max_iters` is absent.
    pub default_max_iters: u32,
    /// Passing threshold used when `min_score` is absent.
    pub default_min_score: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_topic: "general".to_string(),
            default_max_iters: 3,
            default_min_score: 7.0,
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with any `PROMPTCHAIN_DEFAULT_*` environment variables.
    ///
    /// Values that fail to parse are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(topic) = std::env::var(DEFAULT_TOPIC_ENV)
            && !topic.trim().is_empty()
        {
            config.default_topic = topic.trim().to_string();
        }

        if let Ok(raw) = std::env::var(DEFAULT_MAX_ITERS_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(value) => config.default_max_iters = value,
                Err(error) => warn!(variable = DEFAULT_MAX_ITERS_ENV, value = %raw, %error, "ignoring unparseable override"),
            }
        }

        if let Ok(raw) = std::env::var(DEFAULT_MIN_SCORE_ENV) {
            match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => config.default_min_score = value,
                Ok(_) => warn!(variable = DEFAULT_MIN_SCORE_ENV, value = %raw, "ignoring non-finite override"),
                Err(error) => warn!(variable = DEFAULT_MIN_SCORE_ENV, value = %raw, %error, "ignoring unparseable override"),
            }
        }

        config
    }
}
