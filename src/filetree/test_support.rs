use crate::snapshot::{FileStat, Priority, TorrentFile, TorrentSnapshot};

use super::CachedFileTree;

pub(crate) trait SnapshotExt {
    fn into_tree(self) -> CachedFileTree;
}

impl SnapshotExt for TorrentSnapshot {
    fn into_tree(self) -> CachedFileTree {
        let mut tree = CachedFileTree::new(self.hash_string(), self.id());
        tree.parse(&self);
        tree
    }
}

pub(crate) fn snapshot(name: &str, files: &[(&str, u64, bool, u64, Priority)]) -> TorrentSnapshot {
    let (files, stats): (Vec<_>, Vec<_>) = files
        .iter()
        .map(|&(path, size, wanted, done, priority)| {
            (TorrentFile::new(path, size), FileStat::new(wanted, done, priority))
        })
        .unzip();
    TorrentSnapshot::new("hash", 1, name, files, stats).expect("aligned fixture")
}

/// Two files under one directory, half of the first one downloaded.
pub(crate) fn sample_snapshot() -> TorrentSnapshot {
    snapshot(
        "T",
        &[
            ("a/b.txt", 100, true, 50, Priority::Normal),
            ("a/c.txt", 200, false, 0, Priority::Normal),
        ],
    )
}

/// Six files under a `Pack/` prefix, listed out of path order.
///
/// ```text
/// Pack/
///   docs/readme.md       10  wanted  done 10  normal
///   src/lib/mod.rs       30  wanted  done 15  normal
///   src/lib/util.rs      20  -       done 0   low
///   src/main.rs          40  wanted  done 40  high
///   Cargo.toml            5  wanted  done 5   normal
///   empty.bin             0  wanted  done 0   normal
/// ```
pub(crate) fn nested_snapshot() -> TorrentSnapshot {
    snapshot(
        "Pack",
        &[
            ("Pack/src/main.rs", 40, true, 40, Priority::High),
            ("Pack/docs/readme.md", 10, true, 10, Priority::Normal),
            ("Pack\\src\\lib\\util.rs", 20, false, 0, Priority::Low),
            ("Pack/Cargo.toml", 5, true, 5, Priority::Normal),
            ("Pack/src/lib/mod.rs", 30, true, 15, Priority::Normal),
            ("Pack/empty.bin", 0, true, 0, Priority::Normal),
        ],
    )
}

/// A single file without any directory.
pub(crate) fn single_file_snapshot() -> TorrentSnapshot {
    snapshot("movie.mkv", &[("movie.mkv", 700, true, 70, Priority::Normal)])
}
