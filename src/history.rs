//! Scan history
//!
//! A capped, newest-first log of completed scans. The extension keeps one in
//! its local storage, the web UI keeps one for the session, and the terminal
//! client persists one to a JSON file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::{ScanResult, Verdict};

/// Number of entries kept
pub const HISTORY_CAPACITY: usize = 50;

/// One completed scan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanHistoryEntry {
    pub url: String,
    pub status: Verdict,
    /// ISO-8601 on the wire
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ScanHistoryEntry {
    pub fn new(url: impl Into<String>, status: Verdict, timestamp: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            status,
            timestamp,
            confidence: None,
        }
    }

    /// Entry for a result received just now
    pub fn from_result(url: &str, result: &ScanResult) -> Self {
        Self {
            url: url.to_string(),
            status: result.status.clone(),
            timestamp: Utc::now(),
            confidence: Some(result.confidence),
        }
    }

    /// Plain-text report offered as a download
    pub fn report_text(&self) -> String {
        let mut report = String::from("PhishScan Report\n=================\n");
        report.push_str(&format!("URL: {}\n", self.url));
        report.push_str(&format!("Status: {}\n", self.status));
        if let Some(confidence) = self.confidence {
            report.push_str(&format!("Confidence: {:.2}\n", confidence));
        }
        report.push_str(&format!(
            "Timestamp: {}\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        ));
        report
    }

    /// File name for the downloaded report of the `index`-th entry (0-based)
    pub fn report_file_name(index: usize) -> String {
        format!("phishscan_report_{}.txt", index + 1)
    }
}

/// Newest-first ring buffer of scans
#[derive(Debug, Clone, PartialEq)]
pub struct ScanHistory {
    entries: VecDeque<ScanHistoryEntry>,
    capacity: usize,
}

impl Default for ScanHistory {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl ScanHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from a stored newest-first list, dropping anything past capacity
    pub fn from_entries(entries: Vec<ScanHistoryEntry>) -> Self {
        let mut history = Self::default();
        history.entries.extend(entries.into_iter().take(HISTORY_CAPACITY));
        history
    }

    /// Record a scan as the newest entry. When full, the oldest one is dropped.
    pub fn record(&mut self, entry: ScanHistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanHistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ScanHistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Newest-first list for storage
    pub fn to_vec(&self) -> Vec<ScanHistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Timestamps of every entry, for the per-day chart
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.entries.iter().map(|e| e.timestamp).collect()
    }
}

/// Errors reading or writing the history file
#[derive(Debug, Error)]
pub enum HistoryFileError {
    #[error("Failed to access history file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse history file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// JSON file holding a `ScanHistory`
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history; a missing file is an empty history
    pub fn load(&self) -> Result<ScanHistory, HistoryFileError> {
        if !self.path.exists() {
            return Ok(ScanHistory::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| HistoryFileError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        let entries: Vec<ScanHistoryEntry> =
            serde_json::from_str(&content).map_err(|e| HistoryFileError::Parse {
                path: self.path.clone(),
                error: e.to_string(),
            })?;

        Ok(ScanHistory::from_entries(entries))
    }

    pub fn save(&self, history: &ScanHistory) -> Result<(), HistoryFileError> {
        let io_err = |e: std::io::Error| HistoryFileError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(&history.to_vec()).map_err(|e| {
            HistoryFileError::Parse {
                path: self.path.clone(),
                error: e.to_string(),
            }
        })?;

        std::fs::write(&self.path, json).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::tempdir;

    fn entry(i: i64) -> ScanHistoryEntry {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        ScanHistoryEntry::new(
            format!("https://site{}.test", i),
            Verdict::Safe,
            base + Duration::minutes(i),
        )
    }

    #[test]
    fn test_cap_after_51_scans() {
        let mut history = ScanHistory::default();
        for i in 0..51 {
            history.record(entry(i));
        }

        assert_eq!(history.len(), 50);
        assert_eq!(history.get(0).unwrap().url, "https://site50.test");
        assert_eq!(history.get(49).unwrap().url, "https://site1.test");
        assert!(history.iter().all(|e| e.url != "https://site0.test"));
    }

    #[test]
    fn test_newest_first() {
        let mut history = ScanHistory::new(3);
        history.record(entry(1));
        history.record(entry(2));
        let urls: Vec<_> = history.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["https://site2.test", "https://site1.test"]);
    }

    #[test]
    fn test_from_entries_truncates() {
        let stored: Vec<_> = (0..60).map(entry).collect();
        let history = ScanHistory::from_entries(stored);
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.get(0).unwrap().url, "https://site0.test");
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let json = serde_json::to_value(entry(0)).unwrap();
        assert_eq!(json["timestamp"], "2025-03-01T12:00:00Z");
        assert_eq!(json["status"], "safe");
        assert!(json.get("confidence").is_none());
    }

    #[test]
    fn test_report_text() {
        let mut e = entry(0);
        e.status = Verdict::Dangerous;
        e.confidence = Some(0.98);

        let report = e.report_text();
        assert!(report.starts_with("PhishScan Report\n=================\n"));
        assert!(report.contains("URL: https://site0.test\n"));
        assert!(report.contains("Status: dangerous\n"));
        assert!(report.contains("Confidence: 0.98\n"));
        assert!(report.contains("Timestamp: 2025-03-01 12:00:00\n"));
        assert_eq!(ScanHistoryEntry::report_file_name(0), "phishscan_report_1.txt");
    }

    #[test]
    fn test_history_file_round_trip() {
        let dir = tempdir().unwrap();
        let file = HistoryFile::new(dir.path().join("nested").join("history.json"));

        assert!(file.load().unwrap().is_empty());

        let mut history = ScanHistory::default();
        history.record(entry(1));
        history.record(entry(2));
        file.save(&history).unwrap();

        let loaded = file.load().unwrap();
        assert_eq!(loaded, history);
    }

    #[test]
    fn test_history_file_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = HistoryFile::new(&path).load().unwrap_err();
        assert!(matches!(err, HistoryFileError::Parse { .. }));
    }
}
