// src/config/mod.rs
//! Engine configuration: scoring and aggregation knobs read from TOML.
//!
//! TOML shape (every key optional):
//! ```toml
//! [scoring]
//! positive_threshold = 0.1
//! negative_threshold = -0.1
//! negation_window = 2
//!
//! [aggregation]
//! flag_confidence_threshold = 0.6
//! low_rating_threshold = 2.0
//! flag_policy = "confidence_or_rating"
//! flag_order = "submission"
//! ```

pub mod hot;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::analytics::AggregationParams;
use crate::analyze::scoring::ScoringParams;

pub use hot::HotReloadConfig;

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/feedback.toml";
pub const ENV_CONFIG_PATH: &str = "FEEDBACK_CONFIG_PATH";
pub const ENV_FLAG_CONFIDENCE: &str = "FEEDBACK_FLAG_CONFIDENCE";
pub const ENV_LOW_RATING: &str = "FEEDBACK_LOW_RATING";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scoring: ScoringParams,
    #[serde(default)]
    pub aggregation: AggregationParams,
}

impl EngineConfig {
    /// Parse and sanitize a TOML document.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let mut cfg: EngineConfig = toml::from_str(s).context("invalid engine config TOML")?;
        cfg.sanitize();
        Ok(cfg)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config at {}", path.display()))?;
        Self::from_toml_str(&data)
            .with_context(|| format!("failed to parse engine config at {}", path.display()))
    }

    /// Resolve the config from `FEEDBACK_CONFIG_PATH` (or the default path),
    /// then apply env overrides.
    ///
    /// A missing file at the default path yields defaults; a missing file at an
    /// explicitly named path is an error.
    pub fn from_env() -> anyhow::Result<Self> {
        let explicit = std::env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from);
        let mut cfg = match explicit {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::load_from_file(path)?
                } else {
                    warn!(path = %path.display(), "engine config not found, using defaults");
                    Self::default()
                }
            }
        };

        if let Some(t) = parse_unit_env(std::env::var(ENV_FLAG_CONFIDENCE).ok()) {
            cfg.aggregation.flag_confidence_threshold = t;
        }
        if let Some(r) = parse_rating_env(std::env::var(ENV_LOW_RATING).ok()) {
            cfg.aggregation.low_rating_threshold = r;
        }
        cfg.sanitize();
        Ok(cfg)
    }

    pub fn sanitize(&mut self) {
        self.scoring.sanitize();
        self.aggregation.sanitize();
    }
}

// parse optional float env and clamp to <0.0..=1.0>
fn parse_unit_env(raw: Option<String>) -> Option<f32> {
    raw.and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

fn parse_rating_env(raw: Option<String>) -> Option<f32> {
    raw.and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
}
