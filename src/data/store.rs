use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Dataset store
// ---------------------------------------------------------------------------

/// Name → dataset mapping, iterated in name order.
///
/// `put` swaps a whole `Arc<Dataset>` under a write lock, so a reader holding
/// an earlier listing keeps the old dataset intact and never sees a mix of
/// old and new records.
#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: RwLock<BTreeMap<String, Arc<Dataset>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `dataset` under its name, replacing any previous one.
    /// Returns `true` when an existing dataset was replaced.
    ///
    /// The key is always [`Dataset::name`]: a dataset can only be built with
    /// the name of the file it came from, so there is no separate name
    /// argument that could disagree with it.
    pub fn put(&self, dataset: Dataset) -> bool {
        let name = dataset.name().to_string();
        let mut guard = self
            .datasets
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let replaced = guard.insert(name.clone(), Arc::new(dataset)).is_some();
        if replaced {
            log::info!("Replaced dataset {name}");
        }
        replaced
    }

    /// Snapshot of all datasets in lexicographic name order.
    pub fn list(&self) -> Vec<(String, Arc<Dataset>)> {
        self.read()
            .iter()
            .map(|(name, ds)| (name.clone(), Arc::clone(ds)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<Dataset>> {
        self.read().get(name).cloned()
    }

    /// Union of labels present in any stored dataset.
    pub fn available_labels(&self) -> BTreeSet<String> {
        self.read()
            .values()
            .flat_map(|ds| ds.labels().iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Arc<Dataset>>> {
        self.datasets
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset(name: &str, labels: &[&str]) -> Dataset {
        Dataset::from_surviving(
            name,
            labels.iter().map(|l| Record::new(1.0, *l)).collect(),
        )
    }

    #[test]
    fn lists_in_name_order() {
        let store = DatasetStore::new();
        store.put(dataset("b.txt", &["e"]));
        store.put(dataset("a.txt", &["m"]));
        store.put(dataset("C.txt", &["g"]));
        let names: Vec<_> = store.list().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["C.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn put_is_keyed_by_dataset_name() {
        let store = DatasetStore::new();
        store.put(dataset("run 7.TXT", &["e"]));
        assert!(store.get("run 7.TXT").is_some());
        assert_eq!(store.list()[0].0, store.list()[0].1.name());
    }

    #[test]
    fn put_replaces_wholesale() {
        let store = DatasetStore::new();
        assert!(!store.put(dataset("a.txt", &["e", "m"])));
        let before = store.get("a.txt").unwrap();

        assert!(store.put(dataset("a.txt", &["g"])));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a.txt").unwrap().len(), 1);
        // earlier snapshot untouched
        assert_eq!(before.len(), 2);
        assert_eq!(store.available_labels(), BTreeSet::from(["g".to_string()]));
    }

    #[test]
    fn labels_union_across_datasets() {
        let store = DatasetStore::new();
        store.put(dataset("a.txt", &["e", "m"]));
        store.put(dataset("b.txt", &["m", "4e"]));
        let labels: Vec<_> = store.available_labels().into_iter().collect();
        assert_eq!(labels, vec!["4e", "e", "m"]);
    }

    #[test]
    fn concurrent_puts_never_tear() {
        let store = Arc::new(DatasetStore::new());
        let writers: Vec<_> = (0..4)
            .map(|k| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let n = k + 1;
                        store.put(Dataset::from_surviving(
                            "shared.txt",
                            (0..n).map(|_| Record::new(n as f64, "e")).collect(),
                        ));
                    }
                })
            })
            .collect();
        for _ in 0..200 {
            if let Some(ds) = store.get("shared.txt") {
                let n = ds.len() as f64;
                assert!(ds.records().iter().all(|r| r.mass == n));
            }
        }
        for w in writers {
            w.join().unwrap();
        }
        assert_eq!(store.len(), 1);
    }
}
