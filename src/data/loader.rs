use std::path::{Path, PathBuf};

use crate::config::{Config, IngestPolicy};
use crate::error::{Error, Result};

use super::exclusion::ExclusionFilter;
use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Record parser
// ---------------------------------------------------------------------------

/// Parse whitespace-delimited `mass event` text.
///
/// Blank lines are ignored. Any other line must hold exactly two tokens
/// with a finite number first, otherwise the whole input is rejected with
/// [`Error::Format`] naming `source_name`. An input with no records at all
/// is rejected too.
pub fn parse(raw: &[u8], source_name: &str) -> Result<Vec<Record>> {
    let format_error = |line: usize, reason: String| Error::Format {
        source_name: source_name.to_string(),
        line,
        reason,
    };

    let text = std::str::from_utf8(raw)
        .map_err(|e| format_error(0, format!("not valid UTF-8 text ({e})")))?;

    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            [mass, event] => {
                let mass = mass
                    .parse::<f64>()
                    .ok()
                    .filter(|m| m.is_finite())
                    .ok_or_else(|| format_error(line_no, format!("'{mass}' is not a finite number")))?;
                records.push(Record::new(mass, *event));
            }
            other => {
                return Err(format_error(
                    line_no,
                    format!("expected 2 columns, found {}", other.len()),
                ))
            }
        }
    }

    if records.is_empty() {
        return Err(format_error(0, "no records".into()));
    }
    Ok(records)
}

/// Parse raw bytes and run the exclusion rule: the full ingest path for one
/// file.
pub fn ingest(raw: &[u8], source_name: &str, filter: &ExclusionFilter) -> Result<Dataset> {
    let records = parse(raw, source_name)?;
    let parsed = records.len();
    let dataset = filter.build_dataset(source_name, records);
    log::info!(
        "Loaded {source_name}: {} of {parsed} rows kept, labels {:?}",
        dataset.len(),
        dataset.labels()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Batch ingest from disk
// ---------------------------------------------------------------------------

/// Result of loading several files. Failures never abort the batch.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub loaded: Vec<Dataset>,
    /// `(file name, error)` for files rejected under [`IngestPolicy::Strict`].
    pub rejected: Vec<(String, Error)>,
}

/// Whether a path looks like an input file (`.txt`, any case).
pub fn is_input_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

/// Replace directories by the input files they contain (one level deep,
/// the layout of an upload folder). Unreadable directories are logged and
/// skipped.
pub fn expand_dirs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for path in paths {
        if !path.is_dir() {
            out.push(path.clone());
            continue;
        }
        match std::fs::read_dir(path) {
            Ok(entries) => out.extend(
                entries
                    .filter_map(|e| e.ok().map(|e| e.path()))
                    .filter(|p| p.is_file() && is_input_file(p)),
            ),
            Err(e) => log::warn!("Cannot list {}: {e}", path.display()),
        }
    }
    out
}

/// Load every `.txt` file among `paths`, in file-name order.
pub fn load_paths(paths: &[PathBuf], config: &Config) -> IngestReport {
    let filter = ExclusionFilter::new(config.trigger_labels.clone());

    let mut inputs: Vec<&PathBuf> = paths.iter().filter(|p| is_input_file(p)).collect();
    inputs.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));

    let mut report = IngestReport::default();
    for path in inputs {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let outcome = std::fs::read(path)
            .map_err(Error::from)
            .and_then(|raw| ingest(&raw, &name, &filter));

        match (outcome, config.ingest_policy) {
            (Ok(dataset), _) => report.loaded.push(dataset),
            (Err(e), IngestPolicy::Strict) => {
                log::warn!("Rejected {name}: {e}");
                report.rejected.push((name, e));
            }
            (Err(e), IngestPolicy::Skip) => {
                log::warn!("Skipping {name}: {e}");
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_whitespace() {
        let records = parse(b"91.2 e\n\n  125.1\t4e  \n3.1 m\r\n", "a.txt").unwrap();
        assert_eq!(
            records,
            vec![
                Record::new(91.2, "e"),
                Record::new(125.1, "4e"),
                Record::new(3.1, "m"),
            ]
        );
    }

    #[test]
    fn keeps_unknown_labels() {
        let records = parse(b"10 xyz\n", "a.txt").unwrap();
        assert_eq!(records[0].event, "xyz");
    }

    #[test]
    fn rejects_wrong_column_count() {
        let err = parse(b"1.0 e\n2.0 e extra\n", "bad.txt").unwrap_err();
        match err {
            Error::Format {
                source_name, line, ..
            } => {
                assert_eq!(source_name, "bad.txt");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_and_non_finite_mass() {
        assert!(matches!(parse(b"abc e\n", "x.txt"), Err(Error::Format { .. })));
        assert!(matches!(parse(b"inf e\n", "x.txt"), Err(Error::Format { .. })));
        assert!(matches!(parse(b"NaN e\n", "x.txt"), Err(Error::Format { .. })));
    }

    #[test]
    fn rejects_empty_and_binary_input() {
        assert!(matches!(parse(b"\n \n", "x.txt"), Err(Error::Format { line: 0, .. })));
        assert!(matches!(parse(&[0xff, 0xfe, 0x20], "x.txt"), Err(Error::Format { .. })));
    }

    #[test]
    fn ingest_applies_exclusion() {
        let filter = ExclusionFilter::new(["4ee".to_string()].into());
        let ds = ingest(b"100.0 4ee\n1.0 junk\n2.0 junk\n50.0 e\n", "a.txt", &filter).unwrap();
        assert_eq!(ds.name(), "a.txt");
        assert_eq!(ds.len(), 2);
        assert!(!ds.labels().contains("junk"));
    }

    #[test]
    fn input_file_extension_is_case_insensitive() {
        assert!(is_input_file(Path::new("run1.TXT")));
        assert!(is_input_file(Path::new("dir/run2.txt")));
        assert!(!is_input_file(Path::new("run3.csv")));
        assert!(!is_input_file(Path::new("txt")));
    }

    fn unique_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "massplot_loader_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&p).unwrap();
        p
    }

    fn write_batch(dir: &Path) {
        std::fs::write(dir.join("B.TXT"), "91.0 e\n92.0 m\n").unwrap();
        std::fs::write(dir.join("a.txt"), "125.0 g\n").unwrap();
        std::fs::write(dir.join("bad.txt"), "1.0 e extra\n").unwrap();
        std::fs::write(dir.join("notes.csv"), "mass,event\n").unwrap();
    }

    #[test]
    fn batch_from_directory_keeps_going_past_bad_files() {
        let dir = unique_dir("strict");
        write_batch(&dir);

        let mut expanded: Vec<String> = expand_dirs(&[dir.clone()])
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        expanded.sort();
        assert_eq!(expanded, vec!["B.TXT", "a.txt", "bad.txt"]);

        let config = Config::default();
        assert_eq!(config.ingest_policy, IngestPolicy::Strict);
        let report = load_paths(&expand_dirs(&[dir.clone()]), &config);
        let loaded: Vec<&str> = report.loaded.iter().map(|d| d.name()).collect();
        assert_eq!(loaded, vec!["B.TXT", "a.txt"]);
        assert_eq!(report.rejected.len(), 1);
        let (name, err) = &report.rejected[0];
        assert_eq!(name, "bad.txt");
        assert!(matches!(err, Error::Format { line: 1, .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn skip_policy_drops_bad_files_silently() {
        let dir = unique_dir("skip");
        write_batch(&dir);

        let config = Config {
            ingest_policy: IngestPolicy::Skip,
            ..Config::default()
        };
        let report = load_paths(&expand_dirs(&[dir.clone()]), &config);
        assert_eq!(report.loaded.len(), 2);
        assert!(report.rejected.is_empty());

        // loose paths go through the same extension filter
        let report = load_paths(&[dir.join("notes.csv"), dir.join("a.txt")], &config);
        let loaded: Vec<&str> = report.loaded.iter().map(|d| d.name()).collect();
        assert_eq!(loaded, vec!["a.txt"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
