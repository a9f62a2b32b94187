//! Error types for the histogram engine.

use thiserror::Error;

/// Errors raised by parsing, selection and aggregation.
///
/// Every variant is scoped to the single file or computation that raised
/// it; none of them leaves the [`DatasetStore`](crate::data::store::DatasetStore)
/// in a modified state.
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be read as two-column `mass event` text.
    #[error("{source_name}: line {line}: {reason}")]
    Format {
        source_name: String,
        line: usize,
        reason: String,
    },

    /// Zero-width (or inverted) bin extent, or no bins at all.
    #[error("degenerate bin range [{x_min}, {x_max}] with {bins} bins")]
    DegenerateRange { x_min: f64, x_max: f64, bins: usize },

    /// No record matches the selected event labels.
    #[error("no events match the selected final states")]
    EmptySelection,

    /// No value lies inside the requested interval.
    #[error("no values inside [{x_min}, {x_max}]")]
    EmptyRange { x_min: f64, x_max: f64 },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this is an "informational" outcome (nothing to show) rather
    /// than a real failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Error::EmptySelection | Error::EmptyRange { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
