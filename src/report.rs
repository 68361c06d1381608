//! # Metrics Sinks
//!
//! Collaborators that persist [`RunReport`]s after the harness returns.
//! These consume the core's output; nothing in here feeds back into a run.
//!
//! Two sinks are provided:
//!
//! - [`CsvSink`] — one append-only row per run, header written on first
//!   use, parent directory created on demand. Matches the classic
//!   spreadsheet-friendly format of the demonstration.
//! - [`RunLog`] — an in-memory collection of reports with JSON save/load,
//!   for keeping a whole experiment series in one artifact.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::table::RunReport;

/// Appends one CSV row per run to a results file.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `report` as one row, creating the file (with a header) and
    /// its parent directory if needed.
    pub fn append(&self, report: &RunReport) -> Result<(), SimError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let new_file = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if new_file {
            let mut header = String::from("strategy,elapsed_s,stalled");
            for seat in 0..report.meals.len() {
                header.push_str(&format!(",seat_{}_meals", seat));
            }
            writeln!(file, "{}", header)?;
        }

        let mut row = format!(
            "{},{:.4},{}",
            report.strategy,
            report.elapsed.as_secs_f64(),
            report.stalled
        );
        for meals in &report.meals {
            row.push_str(&format!(",{}", meals));
        }
        writeln!(file, "{}", row)?;
        Ok(())
    }
}

/// A series of runs, persisted as one JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunLog {
    pub runs: Vec<RunReport>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, report: RunReport) {
        self.runs.push(report);
    }

    /// Saves the log as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Loads a previously saved log.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
