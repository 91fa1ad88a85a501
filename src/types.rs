use crate::error::DownloaderError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// A point of interest, written as `lat, lon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub lat: f64,
    pub lon: f64,
}

impl FromStr for Footprint {
    type Err = DownloaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DownloaderError::InvalidFootprint(s.to_string());
        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(invalid());
        }
        Ok(Footprint { lat, lon })
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub footprint: Footprint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product type code understood by the catalog, e.g. `L2__NO2___`.
    pub catalog_code: String,
    pub key: String,
    pub display_name: String,
}

/// The three clauses of one catalog search, in the order they are joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub footprint: String,
    pub time_range: String,
    pub product_type: String,
}

/// One dataset file discovered in a catalog response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateItem {
    pub title: String,
    pub ingestion_date: DateTime<Utc>,
    pub download_link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    InFlight,
    Done,
    Failed,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Done | TaskState::Failed)
    }
}

/// Per-item download state. Transitions only move forward:
/// Pending -> InFlight -> Done | Failed.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub item: CandidateItem,
    pub destination_path: PathBuf,
    pub bytes_expected: Option<u64>,
    pub bytes_received: u64,
    /// Temporary file this task created, renamed onto `destination_path`
    /// once the download completes.
    pub partial_path: Option<PathBuf>,
    state: TaskState,
}

impl DownloadTask {
    pub fn new(item: CandidateItem, destination_path: PathBuf) -> Self {
        Self {
            item,
            destination_path,
            bytes_expected: None,
            bytes_received: 0,
            partial_path: None,
            state: TaskState::Pending,
        }
    }

    /// Progress id of the task: its destination file name, unique per batch.
    pub fn id(&self) -> &str {
        self.destination_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn start(&mut self) {
        if self.state == TaskState::Pending {
            self.state = TaskState::InFlight;
        }
    }

    /// Adds a received chunk and returns the running total.
    pub fn record(&mut self, chunk_len: u64) -> u64 {
        if self.state == TaskState::InFlight {
            self.bytes_received += chunk_len;
        }
        self.bytes_received
    }

    /// Fraction of the expected size received so far, if the size is known.
    pub fn fraction(&self) -> Option<f64> {
        match self.bytes_expected {
            Some(0) => Some(1.0),
            Some(total) => Some((self.bytes_received as f64 / total as f64).min(1.0)),
            None => None,
        }
    }

    pub fn finish(&mut self) {
        if self.state == TaskState::InFlight {
            self.state = TaskState::Done;
        }
    }

    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = TaskState::Failed;
        }
    }
}

#[derive(Debug)]
pub struct DownloadReport {
    pub task: DownloadTask,
    pub duration: Duration,
    pub error: Option<String>,
}

impl DownloadReport {
    pub fn state(&self) -> TaskState {
        self.task.state()
    }

    pub fn file_name(&self) -> &str {
        self.task.id()
    }
}

#[derive(Debug)]
pub struct DownloadSummary {
    pub total_downloads: usize,
    pub successful_downloads: usize,
    pub failed_downloads: usize,
    pub total_bytes_downloaded: u64,
    pub total_duration: Duration,
    pub reports: Vec<DownloadReport>,
}

impl DownloadSummary {
    pub fn is_success(&self) -> bool {
        self.failed_downloads == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &DownloadReport> {
        self.reports.iter().filter(|r| r.state() == TaskState::Failed)
    }
}
