//! Massplot - invariant-mass histograms for two-column event files.
//!
//! The [`data`] module is the engine: it parses `mass event` text, drops the
//! rows following trigger labels, keeps datasets by file name and turns a
//! label/range selection into bin tables and summary statistics. The
//! [`app`] and [`ui`] modules are the egui viewer on top of it.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use config::Config;
pub use error::{Error, Result};
