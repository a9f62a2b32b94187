use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Record – one row of an input file
// ---------------------------------------------------------------------------

/// A single event: invariant mass and final-state label.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Invariant mass, always finite.
    pub mass: f64,
    /// Final-state code such as `4e` or `m`. Unknown codes are kept.
    pub event: String,
}

impl Record {
    pub fn new(mass: f64, event: impl Into<String>) -> Self {
        Self {
            mass,
            event: event.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the surviving records of one source file
// ---------------------------------------------------------------------------

/// Records of one file after the exclusion rule, with a label index.
///
/// A `Dataset` is only ever built from exclusion output (see
/// [`ExclusionFilter::build_dataset`](super::exclusion::ExclusionFilter::build_dataset)),
/// so the stored records are final and are never filtered twice.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    records: Vec<Record>,
    labels: BTreeSet<String>,
}

impl Dataset {
    pub(crate) fn from_surviving(name: impl Into<String>, records: Vec<Record>) -> Self {
        let labels = records.iter().map(|r| r.event.clone()).collect();
        Self {
            name: name.into(),
            records,
            labels,
        }
    }

    /// Source file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Surviving records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sorted set of labels present in the surviving records.
    pub fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    /// Masses whose label is in `selected`, in file order.
    pub fn masses_for(&self, selected: &BTreeSet<String>) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| selected.contains(&r.event))
            .map(|r| r.mass)
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
