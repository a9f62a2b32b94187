use std::collections::BTreeSet;

use crate::error::{Error, Result};

use super::store::DatasetStore;

// ---------------------------------------------------------------------------
// Selection: which event labels and which mass interval
// ---------------------------------------------------------------------------

/// User selection. An empty label set means "everything available";
/// unset bounds default to the data-derived axis limits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub labels: BTreeSet<String>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
}

/// Allowed range for the axis bounds, derived from the selected data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub min: f64,
    pub max: f64,
}

impl AxisLimits {
    /// `[floor(min) - padding, ceil(max) + padding]` over `masses`.
    /// `None` for an empty slice.
    pub fn from_masses(masses: &[f64], padding: f64) -> Option<Self> {
        if masses.is_empty() {
            return None;
        }
        let padding = padding.max(0.0);
        let min = masses.iter().copied().fold(f64::INFINITY, f64::min);
        let max = masses.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            min: min.floor() - padding,
            max: max.ceil() + padding,
        })
    }

    /// Clamp requested bounds into the limits, keeping `x_min <= x_max`
    /// (an inverted pair has its upper bound raised to the lower one).
    pub fn clamp(&self, x_min: Option<f64>, x_max: Option<f64>) -> (f64, f64) {
        let lo = match x_min {
            Some(v) if !v.is_nan() => v.clamp(self.min, self.max),
            _ => self.min,
        };
        let hi = match x_max {
            Some(v) if !v.is_nan() => v.clamp(self.min, self.max),
            _ => self.max,
        };
        (lo, hi.max(lo))
    }
}

/// Category-filtered masses for every dataset and for their union, with the
/// effective bounds. Values outside `[x_min, x_max]` are still present.
#[derive(Debug, Clone)]
pub struct MassSelection {
    /// Labels actually applied (the select-all default already resolved).
    pub labels: BTreeSet<String>,
    /// `(dataset name, masses)` in store order.
    pub per_dataset: Vec<(String, Vec<f64>)>,
    pub union: Vec<f64>,
    pub limits: AxisLimits,
    pub x_min: f64,
    pub x_max: f64,
}

impl MassSelection {
    pub fn range(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Union of labels present in the surviving records of every dataset.
pub fn available_labels(store: &DatasetStore) -> BTreeSet<String> {
    store.available_labels()
}

/// Resolve the select-all default: an empty selection means every
/// available label.
pub fn effective_labels(store: &DatasetStore, selected: &BTreeSet<String>) -> BTreeSet<String> {
    if selected.is_empty() {
        available_labels(store)
    } else {
        selected.clone()
    }
}

/// Filter every dataset by event label and resolve the axis bounds.
///
/// Fails with [`Error::EmptySelection`] when no record matches, before any
/// bounds are derived.
pub fn select_masses(
    store: &DatasetStore,
    selection: &Selection,
    axis_padding: f64,
) -> Result<MassSelection> {
    let labels = effective_labels(store, &selection.labels);

    let per_dataset: Vec<(String, Vec<f64>)> = store
        .list()
        .into_iter()
        .map(|(name, ds)| (name, ds.masses_for(&labels)))
        .collect();
    let union: Vec<f64> = per_dataset
        .iter()
        .flat_map(|(_, masses)| masses.iter().copied())
        .collect();

    let limits = AxisLimits::from_masses(&union, axis_padding).ok_or(Error::EmptySelection)?;
    let (x_min, x_max) = limits.clamp(selection.x_min, selection.x_max);
    log::debug!(
        "selected {} masses from {} datasets, bounds [{x_min}, {x_max}]",
        union.len(),
        per_dataset.len()
    );

    Ok(MassSelection {
        labels,
        per_dataset,
        union,
        limits,
        x_min,
        x_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::exclusion::ExclusionFilter;
    use crate::data::model::Record;

    fn store() -> DatasetStore {
        let filter = ExclusionFilter::new(BTreeSet::new());
        let store = DatasetStore::new();
        store.put(filter.build_dataset(
            "a.txt",
            vec![Record::new(90.0, "e"), Record::new(125.0, "4e"), Record::new(91.5, "m")],
        ));
        store.put(filter.build_dataset(
            "b.txt",
            vec![Record::new(124.0, "4e"), Record::new(400.0, "g")],
        ));
        store
    }

    fn labels(l: &[&str]) -> BTreeSet<String> {
        l.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_selection_means_all_labels() {
        let sel = select_masses(&store(), &Selection::default(), 0.0).unwrap();
        assert_eq!(sel.labels, labels(&["4e", "e", "g", "m"]));
        assert_eq!(sel.union.len(), 5);
        assert_eq!(sel.range(), (90.0, 400.0));
    }

    #[test]
    fn filters_per_dataset_and_union() {
        let selection = Selection {
            labels: labels(&["4e"]),
            ..Selection::default()
        };
        let sel = select_masses(&store(), &selection, 10.0).unwrap();
        assert_eq!(sel.per_dataset[0], ("a.txt".to_string(), vec![125.0]));
        assert_eq!(sel.per_dataset[1], ("b.txt".to_string(), vec![124.0]));
        assert_eq!(sel.union, vec![125.0, 124.0]);
        assert_eq!(sel.limits, AxisLimits { min: 114.0, max: 135.0 });
    }

    #[test]
    fn range_does_not_drop_values() {
        let selection = Selection {
            x_min: Some(100.0),
            x_max: Some(130.0),
            ..Selection::default()
        };
        let sel = select_masses(&store(), &selection, 0.0).unwrap();
        assert_eq!(sel.union.len(), 5);
        assert_eq!(sel.range(), (100.0, 130.0));
    }

    #[test]
    fn bounds_are_clamped_and_ordered() {
        let limits = AxisLimits { min: 0.0, max: 500.0 };
        assert_eq!(limits.clamp(Some(-20.0), Some(9000.0)), (0.0, 500.0));
        assert_eq!(limits.clamp(Some(300.0), Some(200.0)), (300.0, 300.0));
        assert_eq!(limits.clamp(None, Some(f64::NAN)), (0.0, 500.0));
    }

    #[test]
    fn no_matching_label_is_empty_selection() {
        let selection = Selection {
            labels: labels(&["4mm"]),
            ..Selection::default()
        };
        assert!(matches!(
            select_masses(&store(), &selection, 0.0),
            Err(Error::EmptySelection)
        ));
        assert!(matches!(
            select_masses(&DatasetStore::new(), &Selection::default(), 0.0),
            Err(Error::EmptySelection)
        ));
    }
}
