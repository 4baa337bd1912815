use snafu::{Snafu, ensure};

use super::Priority;

/// One entry of the torrent's file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentFile {
    /// Path inside the torrent, either slash convention.
    pub name: String,
    pub length: u64,
}

impl TorrentFile {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// Live per-file state reported by the daemon, aligned with the file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub wanted: bool,
    pub bytes_completed: u64,
    pub priority: Priority,
}

impl FileStat {
    pub fn new(wanted: bool, bytes_completed: u64, priority: Priority) -> Self {
        Self {
            wanted,
            bytes_completed,
            priority,
        }
    }
}

impl Default for FileStat {
    /// State of a file freshly read from a .torrent file.
    fn default() -> Self {
        Self::new(true, 0, Priority::Normal)
    }
}

/// A flat, fully materialized view of a torrent's files.
#[derive(Debug, Clone, PartialEq)]
pub struct TorrentSnapshot {
    hash_string: String,
    id: i64,
    name: String,
    files: Vec<TorrentFile>,
    file_stats: Option<Vec<FileStat>>,
}

impl TorrentSnapshot {
    pub fn new(
        hash_string: impl Into<String>,
        id: i64,
        name: impl Into<String>,
        files: Vec<TorrentFile>,
        file_stats: Vec<FileStat>,
    ) -> Result<Self, SnapshotError> {
        ensure!(
            files.len() == file_stats.len(),
            StatsMismatchSnafu {
                files: files.len(),
                stats: file_stats.len(),
            }
        );

        Ok(Self {
            hash_string: hash_string.into(),
            id,
            name: name.into(),
            files,
            file_stats: Some(file_stats),
        })
    }

    /// Snapshot of a torrent parsed from a .torrent file, which carries no
    /// per-file progress.
    pub fn from_metainfo(
        hash_string: impl Into<String>,
        id: i64,
        name: impl Into<String>,
        files: Vec<TorrentFile>,
    ) -> Self {
        Self {
            hash_string: hash_string.into(),
            id,
            name: name.into(),
            files,
            file_stats: None,
        }
    }

    pub fn hash_string(&self) -> &str {
        &self.hash_string
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[TorrentFile] {
        &self.files
    }

    pub(crate) fn has_stats(&self) -> bool {
        self.file_stats.is_some()
    }

    /// Reported stats for the file at `index`; `None` for metainfo snapshots.
    pub fn file_stat(&self, index: usize) -> Option<&FileStat> {
        self.file_stats.as_ref().and_then(|stats| stats.get(index))
    }
}

#[derive(Debug, Snafu)]
pub enum SnapshotError {
    #[snafu(display("Snapshot lists {} files but {} file stats", files, stats))]
    StatsMismatch { files: usize, stats: usize },
}
