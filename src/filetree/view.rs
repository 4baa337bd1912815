use crate::snapshot::Priority;

use super::entry::{NodeId, TriState};
use super::tree::CachedFileTree;

/// Read-only projection of one tree entry for display.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub name: String,
    pub fullpath: String,
    pub level: usize,
    pub size: u64,
    pub done: u64,
    /// `None` when the entry is empty and has no meaningful percentage.
    pub percent: Option<f64>,
    pub want: TriState<bool>,
    pub priority: TriState<Priority>,
    pub wanted_updating: bool,
    pub is_dir: bool,
    pub subrows: Vec<EntryView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Directories with their children nested as subrows.
    #[default]
    Nested,
    /// Files only, named by their path below the root.
    Flat,
}

impl CachedFileTree {
    /// Materializes the tree's current state; the root itself is not a row.
    pub fn view(&self, mode: ViewMode) -> Vec<EntryView> {
        match mode {
            ViewMode::Nested => self
                .children(self.root_id())
                .into_iter()
                .map(|child| self.nested_row(child))
                .collect(),
            ViewMode::Flat => {
                let mut rows = Vec::new();
                self.flatten_into(self.root_id(), &mut rows);
                rows
            }
        }
    }

    fn nested_row(&self, id: NodeId) -> EntryView {
        let subrows = self
            .children(id)
            .into_iter()
            .map(|child| self.nested_row(child))
            .collect();
        let entry = self.entry(id);
        self.project(id, entry.name.clone(), entry.level, subrows)
    }

    fn flatten_into(&self, dir: NodeId, rows: &mut Vec<EntryView>) {
        let Some(listing) = self.entry(dir).as_dir() else {
            return;
        };
        for &subdir in listing.subdirs.values() {
            self.flatten_into(subdir, rows);
        }
        for &file in listing.files.values() {
            rows.push(self.project(file, self.relative_name(file), 0, Vec::new()));
        }
    }

    fn relative_name(&self, id: NodeId) -> String {
        let fullpath = self.entry(id).fullpath();
        let root = self.root().fullpath();
        if root.is_empty() {
            return fullpath.to_string();
        }
        fullpath
            .strip_prefix(root)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(fullpath)
            .to_string()
    }

    fn project(&self, id: NodeId, name: String, level: usize, subrows: Vec<EntryView>) -> EntryView {
        let entry = self.entry(id);
        EntryView {
            name,
            fullpath: entry.fullpath.clone(),
            level,
            size: entry.size,
            done: entry.done,
            percent: entry.percent(),
            want: entry.want(),
            priority: entry.priority(),
            wanted_updating: entry.wanted_updating,
            is_dir: entry.is_dir(),
            subrows,
        }
    }
}
