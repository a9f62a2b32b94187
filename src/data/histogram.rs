use serde::Serialize;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Bin table
// ---------------------------------------------------------------------------

/// One histogram bin: `[lower, upper)`, except the last which is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

impl Bin {
    pub fn center(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }
}

/// Equal-width bins covering `[x_min, x_max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinTable {
    bins: Vec<Bin>,
    width: f64,
}

impl BinTable {
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Count-axis caption, e.g. `Counts/2.5`.
    pub fn count_axis_label(&self) -> String {
        format!("Counts/{}", self.width)
    }
}

/// Bin `masses` into `bins` equal-width bins over `[x_min, x_max]`.
///
/// Values outside the extent are left out of every bin; `x_max` itself lands
/// in the last bin.
pub fn histogram(masses: &[f64], x_min: f64, x_max: f64, bins: usize) -> Result<BinTable> {
    if bins == 0 || !x_min.is_finite() || !x_max.is_finite() || x_max <= x_min {
        return Err(Error::DegenerateRange { x_min, x_max, bins });
    }
    let width = (x_max - x_min) / bins as f64;
    // the reported edges and the bin assignment share this formula
    let edge = |i: usize| x_min + i as f64 * width;

    let mut counts = vec![0u64; bins];
    for &m in masses {
        if !(x_min..=x_max).contains(&m) {
            continue;
        }
        let mut idx = (((m - x_min) / width) as usize).min(bins - 1);
        while idx + 1 < bins && m >= edge(idx + 1) {
            idx += 1;
        }
        while idx > 0 && m < edge(idx) {
            idx -= 1;
        }
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            lower: edge(i),
            upper: if i + 1 == bins { x_max } else { edge(i + 1) },
            count,
        })
        .collect();

    Ok(BinTable { bins, width })
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Count, mean, sample standard deviation, min and max of the values inside
/// a range.
///
/// `std` uses the n−1 denominator and is `NaN` when `count <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl StatsSummary {
    /// `(name, value)` rows in display order; count is shown as an integer.
    pub fn rows(&self) -> [(&'static str, String); 5] {
        let fmt = |v: f64| if v.is_nan() { "–".to_string() } else { format!("{v:.1}") };
        [
            ("Count", self.count.to_string()),
            ("Mean", fmt(self.mean)),
            ("Std", fmt(self.std)),
            ("Min", fmt(self.min)),
            ("Max", fmt(self.max)),
        ]
    }
}

/// Values of `masses` inside the closed interval `[x_min, x_max]`.
pub fn in_range(masses: &[f64], x_min: f64, x_max: f64) -> Vec<f64> {
    masses
        .iter()
        .copied()
        .filter(|m| (x_min..=x_max).contains(m))
        .collect()
}

/// Summary statistics of the masses inside `[x_min, x_max]`.
///
/// Fails with [`Error::EmptyRange`] when no value qualifies.
pub fn stats(masses: &[f64], x_min: f64, x_max: f64) -> Result<StatsSummary> {
    let vals = in_range(masses, x_min, x_max);
    if vals.is_empty() {
        return Err(Error::EmptyRange { x_min, x_max });
    }

    let count = vals.len();
    let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
    let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = vals.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        (ss / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    Ok(StatsSummary {
        count,
        mean,
        std,
        min,
        max,
    })
}
