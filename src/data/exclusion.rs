use std::collections::BTreeSet;

use super::model::{Dataset, Record};

/// Number of rows dropped after each trigger row.
pub const SKIP_AFTER_TRIGGER: usize = 2;

// ---------------------------------------------------------------------------
// Exclusion filter
// ---------------------------------------------------------------------------

/// Drops the two rows following every trigger-labelled row.
///
/// The trigger row itself stays. Windows that run past the end of the file
/// drop only the rows that exist, and overlapping windows are a plain union.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    triggers: BTreeSet<String>,
}

impl ExclusionFilter {
    pub fn new(triggers: BTreeSet<String>) -> Self {
        Self { triggers }
    }

    /// Indices (in file order) removed by the rule.
    pub fn removed_indices(&self, records: &[Record]) -> BTreeSet<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.triggers.contains(&r.event))
            .flat_map(|(i, _)| (i + 1..=i + SKIP_AFTER_TRIGGER).take_while(|&j| j < records.len()))
            .collect()
    }

    /// Surviving records, in file order.
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        let removed = self.removed_indices(&records);
        if removed.is_empty() {
            return records;
        }
        log::debug!("exclusion rule drops {} of {} rows", removed.len(), records.len());
        records
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !removed.contains(i))
            .map(|(_, r)| r)
            .collect()
    }

    /// Apply the rule to freshly parsed records and wrap them as a dataset.
    pub fn build_dataset(&self, name: &str, records: Vec<Record>) -> Dataset {
        Dataset::from_surviving(name, self.apply(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(labels: &[&str]) -> ExclusionFilter {
        ExclusionFilter::new(labels.iter().map(|s| s.to_string()).collect())
    }

    fn rows(labels: &[&str]) -> Vec<Record> {
        labels
            .iter()
            .enumerate()
            .map(|(i, l)| Record::new(i as f64, *l))
            .collect()
    }

    #[test]
    fn drops_two_rows_after_trigger() {
        let records = vec![
            Record::new(100.0, "4ee"),
            Record::new(1.0, "junk"),
            Record::new(2.0, "junk"),
            Record::new(50.0, "e"),
        ];
        let kept = filter(&["4ee"]).apply(records);
        assert_eq!(kept, vec![Record::new(100.0, "4ee"), Record::new(50.0, "e")]);
    }

    #[test]
    fn window_past_end_of_file() {
        let f = filter(&["4ee"]);
        assert_eq!(f.removed_indices(&rows(&["e", "4ee"])), BTreeSet::new());
        assert_eq!(
            f.removed_indices(&rows(&["e", "4ee", "m"])),
            BTreeSet::from([2])
        );
    }

    #[test]
    fn overlapping_windows_union() {
        // 0 triggers {1,2}; 1 triggers {2,3}
        let f = filter(&["4ee", "4mm"]);
        let records = rows(&["4ee", "4mm", "e", "m", "g"]);
        assert_eq!(f.removed_indices(&records), BTreeSet::from([1, 2, 3]));
        let kept: Vec<_> = f.apply(records).into_iter().map(|r| r.event).collect();
        assert_eq!(kept, vec!["4ee", "g"]);
    }

    #[test]
    fn trigger_inside_window_still_counts() {
        // row 2 is removed but still opens its own window
        let f = filter(&["4em"]);
        let records = rows(&["4em", "e", "4em", "m", "m", "g"]);
        assert_eq!(f.removed_indices(&records), BTreeSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn no_triggers_keeps_everything() {
        let records = rows(&["e", "m", "4e"]);
        assert_eq!(filter(&[]).apply(records.clone()), records);
    }
}
