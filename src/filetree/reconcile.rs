use tracing::debug;

use crate::snapshot::TorrentSnapshot;

use super::entry::{EntryKind, percent_of};
use super::lookup::normalize_path;
use super::tree::CachedFileTree;

/// What applying a snapshot did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// First snapshot for an uninitialized tree.
    Built,
    /// Same file list; only leaf stats were updated.
    Patched,
    /// The file list changed identity, the tree was rebuilt from scratch.
    Rebuilt,
}

impl CachedFileTree {
    /// Applies a fresh snapshot aligned by index with the one the tree was
    /// built from.
    ///
    /// Leaf stats are patched in place unless any path differs from the path
    /// recorded at the same index, in which case the whole tree is rebuilt.
    /// A patch also acknowledges every pending want toggle.
    pub fn reconcile(&mut self, snapshot: &TorrentSnapshot) -> Reconciliation {
        if !self.initialized {
            self.parse(snapshot);
            return Reconciliation::Built;
        }

        if snapshot.files().len() != self.files.len() {
            debug!(
                "File count changed from {} to {}, rebuilding",
                self.files.len(),
                snapshot.files().len()
            );
            self.parse(snapshot);
            return Reconciliation::Rebuilt;
        }

        if !snapshot.has_stats() {
            debug!("Snapshot of torrent {} carries no file stats", self.hash);
        }

        for (index, file) in snapshot.files().iter().enumerate() {
            let path = normalize_path(&file.name);
            if self.files[index].path != path {
                debug!(
                    "File {} moved from '{}' to '{}', rebuilding",
                    index, self.files[index].path, path
                );
                self.parse(snapshot);
                return Reconciliation::Rebuilt;
            }

            let Some(stat) = snapshot.file_stat(index) else {
                continue;
            };
            let node = self.files[index].node;
            let entry = self.entry_mut(node);
            match &mut entry.kind {
                // A repeated path shares the first occurrence's entry.
                EntryKind::File(leaf) if leaf.index == index => {
                    leaf.want = stat.wanted;
                    leaf.priority = stat.priority;
                }
                _ => continue,
            }
            entry.done = stat.bytes_completed;
            entry.percent = percent_of(entry.done, entry.size);
        }

        for entry in &mut self.nodes {
            entry.wanted_updating = false;
        }

        self.recalc_tree();
        Reconciliation::Patched
    }
}
