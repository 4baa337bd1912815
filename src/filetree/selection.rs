use derive_more::Display;
use hashlink::LinkedHashSet;
use tracing::warn;

use super::entry::NodeId;
use super::tree::CachedFileTree;

/// How a batch of ids combines with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SelectVerb {
    /// Select the ids, keeping the rest of the selection.
    #[display("add")]
    Add,
    /// Replace the selection with the ids.
    #[display("set")]
    Set,
    /// Flip each id individually.
    #[display("toggle")]
    Toggle,
}

impl CachedFileTree {
    /// Applies a selection action to the entries named by `ids`.
    ///
    /// Selecting or deselecting a directory applies to its whole subtree.
    /// Afterwards each affected directory is selected exactly when all of
    /// its children are. Ids that do not resolve are logged and skipped.
    pub fn select<I, S>(&mut self, verb: SelectVerb, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if verb == SelectVerb::Set {
            self.set_selection(self.root_id(), false);
        }

        let mut affected_parents = LinkedHashSet::new();
        for id in ids {
            let path = id.as_ref();
            let Some(node) = self.find_entry(path) else {
                warn!("Selection id '{}' does not resolve in torrent {}", path, self.hash);
                continue;
            };
            if let Some(parent) = self.entry(node).parent {
                affected_parents.insert(parent);
            }

            let value = verb != SelectVerb::Toggle || !self.entry(node).is_selected;
            self.set_selection(node, value);
        }

        for parent in affected_parents {
            self.update_ancestor_selection_states(parent);
        }
    }

    /// Full paths of every selected entry, directories before their files.
    pub fn selected_paths(&self) -> Vec<String> {
        let mut result = Vec::new();
        self.collect_selected(self.root_id(), &mut result);
        result
    }

    fn collect_selected(&self, dir: NodeId, result: &mut Vec<String>) {
        let entry = self.entry(dir);
        let Some(listing) = entry.as_dir() else {
            return;
        };
        if entry.is_selected {
            result.push(entry.fullpath.clone());
        }
        for &file in listing.files.values() {
            if self.entry(file).is_selected {
                result.push(self.entry(file).fullpath.clone());
            }
        }
        for &subdir in listing.subdirs.values() {
            self.collect_selected(subdir, result);
        }
    }

    fn set_selection(&mut self, id: NodeId, value: bool) {
        for node in self.subtree(id) {
            self.entry_mut(node).is_selected = value;
        }
    }

    /// Walks up from `ancestor`, selecting directories whose children are all
    /// selected. The first directory with an unselected child is deselected
    /// together with everything above it, and the walk stops there.
    fn update_ancestor_selection_states(&mut self, ancestor: NodeId) {
        let root = self.root_id();
        let mut current = Some(ancestor);
        while let Some(dir) = current.filter(|&dir| dir != root) {
            let all_selected = self
                .children(dir)
                .into_iter()
                .all(|child| self.entry(child).is_selected);
            if !all_selected {
                self.entry_mut(dir).is_selected = false;
                self.deselect_ancestors(dir);
                return;
            }
            self.entry_mut(dir).is_selected = true;
            current = self.entry(dir).parent;
        }
    }

    fn deselect_ancestors(&mut self, id: NodeId) {
        let root = self.root_id();
        let mut current = self.entry(id).parent;
        while let Some(dir) = current.filter(|&dir| dir != root) {
            self.entry_mut(dir).is_selected = false;
            current = self.entry(dir).parent;
        }
    }
}
