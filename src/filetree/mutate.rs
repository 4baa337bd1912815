use tracing::{debug, warn};

use super::entry::{EntryKind, NodeId};
use super::lookup::join_path;
use super::tree::CachedFileTree;

impl CachedFileTree {
    /// Sets `want` on the entry at `path` and, for a directory, on its whole
    /// subtree. `updating` marks the change as not yet confirmed by the daemon.
    ///
    /// Returns `false` when the path does not resolve.
    pub fn set_wanted(&mut self, path: &str, state: bool, updating: bool) -> bool {
        let Some(id) = self.find_entry(path) else {
            warn!("Cannot set wanted on '{}': no such entry", path);
            return false;
        };

        for node in self.subtree(id) {
            self.entry_mut(node).set_want(state, updating);
        }
        self.recalc_tree();
        true
    }

    /// Renames the entry at `path` to `new_name`, keeping everything else.
    ///
    /// The entry moves to the end of its parent's listing. Returns `false` when
    /// the path does not resolve, names the root, or `new_name` is taken.
    pub fn rename(&mut self, path: &str, new_name: &str) -> bool {
        let Some(id) = self.find_entry(path) else {
            warn!("Cannot rename '{}': no such entry", path);
            return false;
        };
        let Some(parent) = self.entry(id).parent else {
            warn!("Cannot rename the torrent root");
            return false;
        };

        let old_name = self.entry(id).name.clone();
        let is_dir = self.entry(id).is_dir();
        let Some(siblings) = self.entry_mut(parent).as_dir_mut() else {
            return false;
        };
        let map = if is_dir {
            &mut siblings.subdirs
        } else {
            &mut siblings.files
        };
        if old_name != new_name && map.contains_key(new_name) {
            warn!("Cannot rename '{}': '{}' already exists", path, new_name);
            return false;
        }
        map.remove(&old_name);
        map.insert(new_name.to_string(), id);

        let fullpath = join_path(&self.entry(parent).fullpath, new_name);
        let entry = self.entry_mut(id);
        entry.name = new_name.to_string();
        entry.fullpath = fullpath;
        self.rebase_children(id);
        debug!("Renamed '{}' to '{}'", path, self.entry(id).fullpath);
        true
    }

    fn rebase_children(&mut self, dir: NodeId) {
        for child in self.children(dir) {
            let fullpath = join_path(&self.entry(dir).fullpath, &self.entry(child).name);
            self.entry_mut(child).fullpath = fullpath;
            self.rebase_children(child);
        }
    }

    /// Snapshot indexes of every file at or below `path`.
    pub fn child_file_indexes(&self, path: &str) -> Vec<usize> {
        let Some(id) = self.find_entry(path) else {
            return Vec::new();
        };
        self.file_indexes_where(id, |_| true)
    }

    /// Snapshot indexes of every file the user does not want.
    pub fn unwanted_file_indexes(&self) -> Vec<usize> {
        self.file_indexes_where(self.root_id(), |want| !want)
    }

    /// Total size of the wanted files.
    pub fn wanted_size(&self) -> u64 {
        self.subtree(self.root_id())
            .into_iter()
            .map(|node| self.entry(node))
            .filter(|entry| entry.as_file().is_some_and(|file| file.want))
            .map(|entry| entry.size)
            .sum()
    }

    fn file_indexes_where(&self, id: NodeId, keep: impl Fn(bool) -> bool) -> Vec<usize> {
        self.subtree(id)
            .into_iter()
            .filter_map(|node| match &self.entry(node).kind {
                EntryKind::File(file) if keep(file.want) => Some(file.index),
                _ => None,
            })
            .collect()
    }
}
