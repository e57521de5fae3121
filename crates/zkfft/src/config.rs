//! Engine configuration: TOML file, then environment overrides.
//!
//! ```toml
//! threads = 8
//! parallel_threshold = 4096
//! max_order = 20          # optional; omit for the field's 2-adicity
//! warm_up_order = 20
//! validate_points = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Environment override for [`EngineConfig::threads`].
pub const ENV_THREADS: &str = "ZKFFT_THREADS";
/// Environment override for [`EngineConfig::parallel_threshold`].
pub const ENV_PARALLEL_THRESHOLD: &str = "ZKFFT_PARALLEL_THRESHOLD";

/// Construction-time knobs for [`crate::FftEngine`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Worker threads (`0` = one per available core).
    pub threads: usize,
    /// Buffers at least this long run on the pool; shorter ones run inline.
    pub parallel_threshold: usize,
    /// Engine-wide usable root order; `None` = the field's 2-adicity.
    ///
    /// Per-call [`crate::TransformOptions`] take precedence.
    pub max_order: Option<u32>,
    /// Root-table orders populated at construction (clamped to `s`).
    pub warm_up_order: u32,
    /// Check curve membership of group inputs.
    pub validate_points: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            parallel_threshold: 1 << 12,
            max_order: None,
            warm_up_order: 20,
            validate_points: true,
        }
    }
}

impl EngineConfig {
    /// Parse TOML; missing keys take their defaults.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        toml::from_str(src).context("parse engine config toml")
    }

    /// Load from `path` (defaults if it does not exist), then apply env overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = if path.exists() {
            let src = fs::read_to_string(path)
                .with_context(|| format!("failed to read config at {}", path.display()))?;
            Self::from_toml_str(&src)
                .with_context(|| format!("failed to parse config at {}", path.display()))?
        } else {
            info!(path = %path.display(), "configuration file not found, using defaults");
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Apply `ZKFFT_THREADS` / `ZKFFT_PARALLEL_THRESHOLD` if set and valid.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_THREADS) {
            match raw.trim().parse() {
                Ok(v) => self.threads = v,
                Err(_) => warn!(key = ENV_THREADS, value = %raw, "ignoring invalid override"),
            }
        }
        if let Some(raw) = lookup(ENV_PARALLEL_THRESHOLD) {
            match raw.trim().parse() {
                Ok(v) => self.parallel_threshold = v,
                Err(_) => {
                    warn!(key = ENV_PARALLEL_THRESHOLD, value = %raw, "ignoring invalid override");
                }
            }
        }
        self
    }
}
