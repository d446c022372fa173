//! Run configuration.
//!
//! Settings come from three layers, each overriding the one before:
//!
//! 1. Stock defaults ([`RunConfig::default`])
//! 2. An optional `frameglass.toml` file
//! 3. Command-line flags ([`Overrides`])
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! pairing_policy = "sequential"  # or "shuffled"
//! # random_seed = 42             # omit for a fresh seed every run
//! final_shuffle = false          # shuffled policy only
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::pairing::PairingPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name looked up by the CLI.
pub const CONFIG_FILENAME: &str = "frameglass.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// How Portraits are paired.
    pub pairing_policy: PairingPolicy,
    /// Seed for every permutation of the run. `None` draws a fresh seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
    /// Permute the assembled frameglass list once more (shuffled policy only).
    pub final_shuffle: bool,
}

impl RunConfig {
    /// Reject combinations that have no meaning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.final_shuffle && self.pairing_policy != PairingPolicy::Shuffled {
            return Err(ConfigError::Validation(
                "final_shuffle requires pairing_policy = \"shuffled\"".into(),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of this config.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(policy) = overrides.pairing_policy {
            self.pairing_policy = policy;
        }
        if let Some(seed) = overrides.random_seed {
            self.random_seed = Some(seed);
        }
        if overrides.final_shuffle {
            self.final_shuffle = true;
        }
    }
}

/// Values given explicitly on the command line. Unset fields leave the
/// file/default value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub pairing_policy: Option<PairingPolicy>,
    pub random_seed: Option<u64>,
    pub final_shuffle: bool,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(RunConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Resolve the effective config: defaults, then the file at `path` (if it
/// exists), then `overrides`. The result is validated.
pub fn load_config(path: &Path, overrides: &Overrides) -> Result<RunConfig, ConfigError> {
    let merged = match load_raw_config(path)? {
        Some(file) => merge_toml(stock_defaults_value(), file),
        None => stock_defaults_value(),
    };
    let mut config: RunConfig = merged.try_into()?;
    config.apply(overrides);
    config.validate()?;
    Ok(config)
}

/// Fully commented stock config, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Frameglass Configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# How Portrait photos are paired into frameglasses.
#   "sequential" - pair Portraits in input order; Landscapes and pairs come
#                  out interleaved in the order they are completed.
#   "shuffled"   - Landscapes first, then Portraits paired after a random
#                  permutation.
# With an odd number of Portraits, one is left out of the output.
pairing_policy = "sequential"

# Seed for the random permutations. Set it to get the same output on every
# run; leave it out for a fresh seed each time.
# random_seed = 42

# Shuffle the complete frameglass list once more after pairing.
# Only allowed with pairing_policy = "shuffled".
final_shuffle = false
"##
}
