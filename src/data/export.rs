use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::histogram::{BinTable, StatsSummary};

/// One CSV row: a bin of a named histogram.
#[derive(Serialize)]
struct BinRow<'a> {
    histogram: &'a str,
    lower: f64,
    upper: f64,
    count: u64,
}

/// Write the bin tables of several views as a single CSV.
pub fn write_bin_tables<W: Write>(writer: W, tables: &[(&str, &BinTable)]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for &(name, table) in tables {
        for bin in table.bins() {
            wtr.serialize(BinRow {
                histogram: name,
                lower: bin.lower,
                upper: bin.upper,
                count: bin.count,
            })
            .with_context(|| format!("writing bins of {name}"))?;
        }
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

#[derive(Serialize)]
struct StatsRow<'a> {
    histogram: &'a str,
    count: usize,
    mean: f64,
    std: f64,
    min: f64,
    max: f64,
}

/// Write one summary row per view.
pub fn write_stats<W: Write>(writer: W, stats: &[(&str, &StatsSummary)]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for &(name, s) in stats {
        wtr.serialize(StatsRow {
            histogram: name,
            count: s.count,
            mean: s.mean,
            std: s.std,
            min: s.min,
            max: s.max,
        })
        .with_context(|| format!("writing stats of {name}"))?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

/// Write bin tables to `path`, creating or truncating the file.
pub fn export_bin_tables(path: &Path, tables: &[(&str, &BinTable)]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_bin_tables(file, tables)?;
    log::info!("Exported {} histograms to {}", tables.len(), path.display());
    Ok(())
}

/// Write summary statistics to `path`.
pub fn export_stats(path: &Path, stats: &[(&str, &StatsSummary)]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_stats(file, stats)?;
    log::info!("Exported statistics to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::histogram::{histogram, stats};

    #[test]
    fn bin_csv_has_header_and_rows() {
        let table = histogram(&[1.0, 2.0, 3.0], 0.0, 4.0, 2).unwrap();
        let mut out = Vec::new();
        write_bin_tables(&mut out, &[("a.txt", &table)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "histogram,lower,upper,count");
        assert_eq!(lines[1], "a.txt,0.0,2.0,1");
        assert_eq!(lines[2], "a.txt,2.0,4.0,2");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn stats_csv_one_row_per_view() {
        let s = stats(&[1.0, 3.0], 0.0, 4.0).unwrap();
        let mut out = Vec::new();
        write_stats(&mut out, &[("Summed", &s)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("histogram,count,mean,std,min,max"));
        assert!(lines.next().unwrap().starts_with("Summed,2,2.0,"));
    }
}
