//! Best completion time record
//!
//! Persisted as a single number of seconds with two decimals. Lower is
//! better. A missing or unreadable file means there is no record yet.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::consts::{NO_RECORD, RECORD_DISPLAY_LIMIT};

/// Parse the record file contents
pub fn parse_best_time(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Record file contents for `secs`
pub fn format_best_time(secs: f64) -> String {
    format!("{:.2}", secs)
}

/// Whether a best time is a real record worth showing
pub fn is_displayable(best: f64) -> bool {
    best < RECORD_DISPLAY_LIMIT
}

/// The on-disk best time
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored best time, or [`NO_RECORD`] if absent or malformed
    pub fn load(&self) -> f64 {
        match fs::read_to_string(&self.path) {
            Ok(text) => parse_best_time(&text).unwrap_or_else(|| {
                log::warn!(
                    "Ignoring malformed record file {}: {:?}",
                    self.path.display(),
                    text.trim()
                );
                NO_RECORD
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No record file at {}, starting fresh", self.path.display());
                NO_RECORD
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                NO_RECORD
            }
        }
    }

    /// Check if a run time beats the stored record
    pub fn qualifies(&self, candidate: f64) -> bool {
        candidate < self.load()
    }

    /// Store `candidate` if it strictly beats the current record.
    /// Returns whether the file was written.
    pub fn save(&self, candidate: f64) -> io::Result<bool> {
        if !self.qualifies(candidate) {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, format_best_time(candidate))?;
        log::info!("New record saved: {:.2}s", candidate);
        Ok(true)
    }
}
