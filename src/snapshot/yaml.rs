use std::{borrow::Cow, path::Path};

use compio::fs;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::ext::{AsyncTryFrom, BestEffortPathExt};

use super::{FileStat, InvalidPriorityError, Priority, SnapshotError, TorrentFile, TorrentSnapshot};

/// Snapshots of one torrent in arrival order, one per YAML document.
///
/// The field names follow the daemon's RPC response:
///
/// ```yaml
/// hashString: 3f2a
/// id: 1
/// name: T
/// files:
///   - { name: a/b.txt, length: 100 }
/// fileStats:
///   - { wanted: true, bytesCompleted: 50, priority: 0 }
/// ```
///
/// `fileStats` may be omitted for a torrent read from a .torrent file.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotSeries {
    snapshots: Vec<TorrentSnapshot>,
}

impl SnapshotSeries {
    pub fn snapshots(&self) -> &[TorrentSnapshot] {
        &self.snapshots
    }

    /// The initial snapshot and the updates that follow it.
    pub fn split_first(&self) -> Option<(&TorrentSnapshot, &[TorrentSnapshot])> {
        self.snapshots.split_first()
    }

    fn parse_snapshot(document: usize, yaml: &Yaml) -> Result<TorrentSnapshot, SnapshotLoadError> {
        let top_level = yaml
            .as_mapping()
            .context(TopLevelNotMapSnafu { document })?;

        let hash_string = top_level
            .get(&key("hashString"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let id = top_level
            .get(&key("id"))
            .and_then(|v| v.as_integer())
            .unwrap_or_default();
        let name = top_level
            .get(&key("name"))
            .and_then(|v| v.as_str())
            .context(MissingFieldSnafu {
                document,
                field: "name",
            })?
            .to_string();

        let files = top_level
            .get(&key("files"))
            .and_then(|v| v.as_sequence())
            .context(MissingFieldSnafu {
                document,
                field: "files",
            })?
            .iter()
            .enumerate()
            .map(|(index, file)| Self::parse_file(document, index, file))
            .collect::<Result<Vec<_>, _>>()?;

        let Some(stats) = top_level.get(&key("fileStats")) else {
            debug!("Document {} has no fileStats, treating it as metainfo", document);
            return Ok(TorrentSnapshot::from_metainfo(hash_string, id, name, files));
        };

        let stats = stats
            .as_sequence()
            .context(InvalidFieldSnafu {
                document,
                field: "fileStats",
            })?
            .iter()
            .enumerate()
            .map(|(index, stat)| Self::parse_stat(document, index, stat))
            .collect::<Result<Vec<_>, _>>()?;

        TorrentSnapshot::new(hash_string, id, name, files, stats).context(InvalidSnapshotSnafu { document })
    }

    fn parse_file(document: usize, index: usize, yaml: &Yaml) -> Result<TorrentFile, SnapshotLoadError> {
        let field = "files";
        let entry = yaml
            .as_mapping()
            .context(InvalidEntrySnafu { document, field, index })?;

        let name = entry
            .get(&key("name"))
            .and_then(|v| v.as_str())
            .context(InvalidEntrySnafu { document, field, index })?;
        let length = entry
            .get(&key("length"))
            .and_then(|v| v.as_integer())
            .and_then(|v| u64::try_from(v).ok())
            .context(InvalidEntrySnafu { document, field, index })?;

        Ok(TorrentFile::new(name, length))
    }

    fn parse_stat(document: usize, index: usize, yaml: &Yaml) -> Result<FileStat, SnapshotLoadError> {
        let field = "fileStats";
        let entry = yaml
            .as_mapping()
            .context(InvalidEntrySnafu { document, field, index })?;

        let wanted = entry
            .get(&key("wanted"))
            .and_then(|v| v.as_bool())
            .context(InvalidEntrySnafu { document, field, index })?;
        let bytes_completed = entry
            .get(&key("bytesCompleted"))
            .and_then(|v| v.as_integer())
            .and_then(|v| u64::try_from(v).ok())
            .context(InvalidEntrySnafu { document, field, index })?;
        let priority = match entry.get(&key("priority")).and_then(|v| v.as_integer()) {
            Some(value) => Priority::try_from(value).context(PrioritySnafu { document, index })?,
            None => Priority::Normal,
        };

        Ok(FileStat::new(wanted, bytes_completed, priority))
    }
}

fn key<'a>(name: &'a str) -> Yaml<'a> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

impl TryFrom<&str> for SnapshotSeries {
    type Error = SnapshotLoadError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents =
            Yaml::load_from_str(contents).map_err(|e| SnapshotLoadError::ParseError { source: e })?;
        ensure!(!documents.is_empty(), MalformedSnafu);

        let snapshots = documents
            .iter()
            .enumerate()
            .map(|(document, yaml)| Self::parse_snapshot(document, yaml))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Parsed {} snapshots", snapshots.len());

        Ok(SnapshotSeries { snapshots })
    }
}

impl<'a> AsyncTryFrom<&'a Path> for SnapshotSeries {
    type Error = SnapshotLoadError;

    async fn async_try_from(path: &'a Path) -> Result<Self, Self::Error> {
        debug!("Reading snapshot file: {}", path.best_effort_path_display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read snapshot file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }
}

#[derive(Debug, Snafu)]
pub enum SnapshotLoadError {
    #[snafu(display("Failed to read the snapshot file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Snapshot file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the snapshot file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Snapshot file holds no documents"))]
    Malformed,
    #[snafu(display("Document {} should be a map", document))]
    TopLevelNotMap { document: usize },
    #[snafu(display("Document {} is missing '{}'", document, field))]
    MissingField { document: usize, field: &'static str },
    #[snafu(display("Document {}: '{}' should be a list", document, field))]
    InvalidField { document: usize, field: &'static str },
    #[snafu(display("Document {}: entry {} of '{}' is malformed", document, index, field))]
    InvalidEntry {
        document: usize,
        field: &'static str,
        index: usize,
    },
    #[snafu(display("Document {}: file {} has an invalid priority", document, index))]
    PriorityError {
        document: usize,
        index: usize,
        source: InvalidPriorityError,
    },
    #[snafu(display("Document {} is not a consistent snapshot", document))]
    InvalidSnapshot {
        document: usize,
        source: SnapshotError,
    },
}
