use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Ingest policy
// ---------------------------------------------------------------------------

/// What to do with a file that fails to parse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IngestPolicy {
    /// Report a format error for the file; other files are still loaded.
    #[default]
    Strict,
    /// Drop the file with a warning in the log and nothing else.
    Skip,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Engine and viewer configuration.  Every field has a default so a partial
/// JSON file is enough.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Allowed bin counts, strictly ascending.
    #[serde(default = "Config::default_bin_options")]
    pub bin_options: Vec<usize>,
    /// Bin count every view starts with.
    #[serde(default = "Config::default_bins")]
    pub default_bins: usize,
    /// Labels whose two following rows are dropped at ingest.
    #[serde(default = "Config::default_trigger_labels")]
    pub trigger_labels: BTreeSet<String>,
    /// Human-readable names for event labels.
    #[serde(default = "Config::default_display_names")]
    pub display_names: BTreeMap<String, String>,
    /// Margin added around the data range when clamping axis bounds.
    #[serde(default = "Config::default_axis_padding")]
    pub axis_padding: f64,
    #[serde(default)]
    pub ingest_policy: IngestPolicy,
}

impl Config {
    fn default_bin_options() -> Vec<usize> {
        vec![5, 10, 20, 50, 70, 100, 200, 400]
    }
    fn default_bins() -> usize {
        50
    }
    fn default_trigger_labels() -> BTreeSet<String> {
        ["4ee", "4em", "4mm"].into_iter().map(String::from).collect()
    }
    fn default_display_names() -> BTreeMap<String, String> {
        [
            ("4e", "4e"),
            ("e", "ee"),
            ("g", "γγ"),
            ("4m", "4μ"),
            ("m", "μμ"),
            ("4em", "2e2μ"),
            ("4me", "2μ2e"),
            ("2e2m", "2e2μ"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }
    fn default_axis_padding() -> f64 {
        100.0
    }

    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.bin_options.is_empty() {
            return Err(Error::Config("bin_options is empty".into()));
        }
        if self.bin_options.contains(&0) {
            return Err(Error::Config("bin_options must be positive".into()));
        }
        if self.bin_options.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::Config(
                "bin_options must be strictly ascending".into(),
            ));
        }
        if !self.bin_options.contains(&self.default_bins) {
            return Err(Error::Config(format!(
                "default_bins {} is not one of {:?}",
                self.default_bins, self.bin_options
            )));
        }
        if !self.axis_padding.is_finite() || self.axis_padding < 0.0 {
            return Err(Error::Config(format!(
                "axis_padding must be a non-negative number, got {}",
                self.axis_padding
            )));
        }
        Ok(())
    }

    /// Display text for an event label; unknown labels show as-is.
    pub fn display_name<'a>(&'a self, label: &'a str) -> &'a str {
        self.display_names
            .get(label)
            .map(String::as_str)
            .unwrap_or(label)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bin_options: Self::default_bin_options(),
            default_bins: Self::default_bins(),
            trigger_labels: Self::default_trigger_labels(),
            display_names: Self::default_display_names(),
            axis_padding: Self::default_axis_padding(),
            ingest_policy: IngestPolicy::default(),
        }
    }
}
