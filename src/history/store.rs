//! Durable, capped history of pile measurements
//!
//! The whole history is written as one JSON array under a fixed key
//! (`pileHistory.json` in the application data directory), oldest first.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::domain::Measurement;

/// Fixed storage key for the persisted history
pub const HISTORY_KEY: &str = "pileHistory";
/// Number of measurements kept; older ones are evicted first
pub const HISTORY_LIMIT: usize = 10;
/// Application directory under the user's data dir
const APP_DIR: &str = "pilegauge";

/// Ordered measurement history backed by a JSON file
#[derive(Debug, Clone)]
pub struct HistoryStore {
    /// Backing file; `None` keeps the history in memory only
    path: Option<PathBuf>,
    entries: Vec<Measurement>,
}

impl HistoryStore {
    /// Default location of the history file
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR).join(format!("{HISTORY_KEY}.json")))
    }

    /// Open the history at `path`, loading whatever was persisted there
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_history(&path);
        log::debug!(
            "Loaded {} measurement(s) from {}",
            entries.len(),
            path.display()
        );
        Self {
            path: Some(path),
            entries,
        }
    }

    /// Open the history in the default location
    ///
    /// Falls back to an in-memory history when no data directory exists.
    pub fn open_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::open(path),
            None => {
                log::warn!("No data directory available, history will not be saved");
                Self::in_memory()
            }
        }
    }

    /// History that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Vec::new(),
        }
    }

    /// All measurements, oldest first
    pub fn load_all(&self) -> &[Measurement] {
        &self.entries
    }

    /// Record a new height stamped with the current time and persist the history
    pub fn append(&mut self, height_cm: f64) -> anyhow::Result<Measurement> {
        self.push(Measurement::now(height_cm))
    }

    /// Append a measurement, evict beyond [`HISTORY_LIMIT`] and persist
    ///
    /// The in-memory history is updated even if writing fails.
    pub fn push(&mut self, measurement: Measurement) -> anyhow::Result<Measurement> {
        self.entries.push(measurement.clone());
        if self.entries.len() > HISTORY_LIMIT {
            let excess = self.entries.len() - HISTORY_LIMIT;
            self.entries.drain(..excess);
        }
        log::info!(
            "Recorded pile height {} cm ({} in history)",
            measurement.height_label(),
            self.entries.len()
        );
        self.persist()?;
        Ok(measurement)
    }

    fn persist(&self) -> anyhow::Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        write_history(path, &self.entries)
            .with_context(|| format!("Failed to save history to {}", path.display()))
    }
}

/// Parse a persisted history, degrading to empty on any error
pub fn parse_history(raw: &str) -> Vec<Measurement> {
    match serde_json::from_str::<Vec<Measurement>>(raw) {
        Ok(mut entries) => {
            if entries.len() > HISTORY_LIMIT {
                let excess = entries.len() - HISTORY_LIMIT;
                entries.drain(..excess);
            }
            entries
        }
        Err(err) => {
            log::warn!("Ignoring unreadable history: {err}");
            Vec::new()
        }
    }
}

fn read_history(path: &Path) -> Vec<Measurement> {
    match std::fs::read_to_string(path) {
        Ok(raw) => parse_history(&raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            log::warn!("Could not read history {}: {err}", path.display());
            Vec::new()
        }
    }
}

/// Write the history atomically: temp file in the same directory, then rename
fn write_history(path: &Path, entries: &[Measurement]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut file = tempfile::Builder::new()
        .prefix(".pileHistory-")
        .suffix(".json")
        .tempfile_in(dir)?;
    serde_json::to_writer(&mut file, entries)?;
    file.flush()?;
    file.persist(path)?;
    Ok(())
}
