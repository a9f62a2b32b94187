use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::color::ColorMap;
use crate::config::{Config, IngestPolicy};
use crate::data::exclusion::ExclusionFilter;
use crate::data::filter::{select_masses, AxisLimits, Selection};
use crate::data::histogram::{histogram, stats, BinTable, StatsSummary};
use crate::data::loader;
use crate::data::store::DatasetStore;
use crate::error::Result;

/// View key of the histogram over all files.
pub const SUMMED_KEY: &str = "\u{0}summed";

// ---------------------------------------------------------------------------
// One rendered histogram
// ---------------------------------------------------------------------------

/// Bin table and statistics of one dataset (or of the union).
#[derive(Debug)]
pub struct HistogramView {
    /// Dataset name, or [`SUMMED_KEY`].
    pub key: String,
    pub title: String,
    pub bins: usize,
    pub table: Result<BinTable>,
    pub stats: Result<StatsSummary>,
}

impl HistogramView {
    pub fn is_summed(&self) -> bool {
        self.key == SUMMED_KEY
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Loaded datasets; lives as long as the app.
    pub store: DatasetStore,

    /// Ticked event labels. `None` until the user touches the filter,
    /// meaning every available label.
    pub selected_labels: Option<BTreeSet<String>>,

    /// Axis bounds the user asked for; `None` follows the data limits.
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,

    /// Bounds actually used by the views: the request clamped into the
    /// current limits.
    pub effective_range: Option<(f64, f64)>,

    /// Data-derived bound limits of the current selection.
    pub limits: Option<AxisLimits>,

    /// Per-view bin count (view key → bins).
    pub bin_choice: BTreeMap<String, usize>,

    /// Views that draw the count above each bar.
    pub show_counts: BTreeSet<String>,

    /// Histograms of the current selection, datasets first then the sum.
    pub views: Vec<HistogramView>,

    pub color_map: ColorMap,

    /// Informational message (nothing loaded, nothing selected).
    pub notice: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let mut state = Self {
            config,
            store: DatasetStore::new(),
            selected_labels: None,
            x_min: None,
            x_max: None,
            effective_range: None,
            limits: None,
            bin_choice: BTreeMap::new(),
            show_counts: BTreeSet::new(),
            views: Vec::new(),
            color_map: ColorMap::default(),
            notice: None,
            status_message: None,
        };
        state.refresh();
        state
    }

    fn exclusion_filter(&self) -> ExclusionFilter {
        ExclusionFilter::new(self.config.trigger_labels.clone())
    }

    // -- ingest --

    /// Load files from disk. Bad files are reported, good ones are kept.
    pub fn ingest_paths(&mut self, paths: &[PathBuf]) {
        let before = self.store.available_labels();
        let report = loader::load_paths(paths, &self.config);

        for dataset in report.loaded {
            self.store.put(dataset);
        }
        self.status_message = if report.rejected.is_empty() {
            None
        } else {
            let msgs: Vec<String> = report.rejected.iter().map(|(_, e)| e.to_string()).collect();
            Some(format!("Error: {}", msgs.join("; ")))
        };
        self.after_ingest(&before);
    }

    /// Load one file from raw bytes (drag-and-drop without a path).
    pub fn ingest_bytes(&mut self, name: &str, raw: &[u8]) {
        let before = self.store.available_labels();
        match loader::ingest(raw, name, &self.exclusion_filter()) {
            Ok(dataset) => {
                self.store.put(dataset);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("Rejected {name}: {e}");
                if self.config.ingest_policy == IngestPolicy::Strict {
                    self.status_message = Some(format!("Error: {e}"));
                }
            }
        }
        self.after_ingest(&before);
    }

    /// Newly seen labels join an explicit selection, then everything is
    /// recomputed.
    fn after_ingest(&mut self, labels_before: &BTreeSet<String>) {
        if let Some(selected) = &mut self.selected_labels {
            let fresh = self.store.available_labels();
            selected.extend(fresh.difference(labels_before).cloned());
        }
        let names: Vec<String> = self.store.list().into_iter().map(|(n, _)| n).collect();
        self.color_map = ColorMap::new(names.iter().map(String::as_str));
        self.refresh();
    }

    // -- selection --

    /// Labels currently ticked.
    pub fn is_label_selected(&self, label: &str) -> bool {
        self.selected_labels
            .as_ref()
            .map_or(true, |s| s.contains(label))
    }

    /// Toggle a single event label.
    pub fn toggle_label(&mut self, label: &str) {
        let available = self.store.available_labels();
        let selected = self.selected_labels.get_or_insert(available);
        if !selected.remove(label) {
            selected.insert(label.to_string());
        }
        self.refresh();
    }

    /// Select all labels.
    pub fn select_all(&mut self) {
        self.selected_labels = None;
        self.refresh();
    }

    /// Deselect all labels.
    pub fn select_none(&mut self) {
        self.selected_labels = Some(BTreeSet::new());
        self.refresh();
    }

    pub fn set_bounds(&mut self, x_min: f64, x_max: f64) {
        self.x_min = Some(x_min);
        self.x_max = Some(x_max);
        self.refresh();
    }

    /// Forget user bounds and fall back to the data limits.
    pub fn reset_bounds(&mut self) {
        self.x_min = None;
        self.x_max = None;
        self.refresh();
    }

    /// Bin count of a view.
    pub fn bins_for(&self, key: &str) -> usize {
        self.bin_choice
            .get(key)
            .copied()
            .unwrap_or(self.config.default_bins)
    }

    /// Change the bin count of one view. Values outside the configured
    /// options are ignored.
    pub fn set_bins(&mut self, key: &str, bins: usize) {
        if !self.config.bin_options.contains(&bins) {
            log::warn!("ignoring bin count {bins}, not one of {:?}", self.config.bin_options);
            return;
        }
        self.bin_choice.insert(key.to_string(), bins);
        self.refresh();
    }

    pub fn toggle_show_counts(&mut self, key: &str) {
        if !self.show_counts.remove(key) {
            self.show_counts.insert(key.to_string());
        }
    }

    // -- recomputation --

    /// Recompute every histogram from the store and the current selection.
    pub fn refresh(&mut self) {
        self.views.clear();
        self.limits = None;
        self.effective_range = None;

        if self.store.is_empty() {
            self.notice = Some(
                "Upload one or more .txt files exported from HYPATIA to plot the invariant mass."
                    .into(),
            );
            return;
        }
        if self.selected_labels.as_ref().is_some_and(|s| s.is_empty()) {
            self.notice = Some("No final state selected.".into());
            return;
        }

        let selection = Selection {
            labels: self.selected_labels.clone().unwrap_or_default(),
            x_min: self.x_min,
            x_max: self.x_max,
        };
        let selected = match select_masses(&self.store, &selection, self.config.axis_padding) {
            Ok(sel) => sel,
            Err(e) if e.is_empty_result() => {
                self.notice = Some(format!("{e}."));
                return;
            }
            Err(e) => {
                log::error!("selection failed: {e}");
                self.notice = None;
                self.status_message = Some(format!("Error: {e}"));
                return;
            }
        };
        self.notice = None;
        self.limits = Some(selected.limits);
        self.effective_range = Some(selected.range());

        let (lo, hi) = selected.range();
        for (name, masses) in &selected.per_dataset {
            let view = self.build_view(name, format!("Histogram for {name}"), masses, lo, hi);
            self.views.push(view);
        }
        let summed = self.build_view(
            SUMMED_KEY,
            "Summed histogram of all files".into(),
            &selected.union,
            lo,
            hi,
        );
        self.views.push(summed);
        log::debug!("recomputed {} histograms over [{lo}, {hi}]", self.views.len());
    }

    fn build_view(&self, key: &str, title: String, masses: &[f64], lo: f64, hi: f64) -> HistogramView {
        let bins = self.bins_for(key);
        HistogramView {
            key: key.to_string(),
            title,
            bins,
            table: histogram(masses, lo, hi, bins),
            stats: stats(masses, lo, hi),
        }
    }

    /// `(title, table)` of every view with a valid bin table.
    pub fn exportable_tables(&self) -> Vec<(&str, &BinTable)> {
        self.views
            .iter()
            .filter_map(|v| v.table.as_ref().ok().map(|t| (v.title.as_str(), t)))
            .collect()
    }

    /// `(title, stats)` of every view with statistics.
    pub fn exportable_stats(&self) -> Vec<(&str, &StatsSummary)> {
        self.views
            .iter()
            .filter_map(|v| v.stats.as_ref().ok().map(|s| (v.title.as_str(), s)))
            .collect()
    }
}
