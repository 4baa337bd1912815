//! Flat torrent snapshots as handed over by the transport layer.
//!
//! A snapshot is the file list of a torrent plus, for torrents known to the
//! daemon, the per-file stats aligned with it by index.

mod priority;
mod torrent;
mod yaml;

pub use priority::{InvalidPriorityError, Priority};
pub use torrent::{FileStat, SnapshotError, TorrentFile, TorrentSnapshot};
pub use yaml::{SnapshotLoadError, SnapshotSeries};
