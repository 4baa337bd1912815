use super::entry::{NodeId, TriState, percent_of};
use super::tree::CachedFileTree;

impl CachedFileTree {
    /// Recomputes size, progress, want and priority of every directory.
    pub fn recalc_tree(&mut self) {
        self.recalc(self.root_id());
    }

    fn recalc(&mut self, id: NodeId) {
        let children = self.children(id);
        for &child in &children {
            if self.entry(child).is_dir() {
                self.recalc(child);
            }
        }

        let size: u64 = children.iter().map(|&child| self.entry(child).size).sum();
        let done: u64 = children.iter().map(|&child| self.entry(child).done).sum();
        // Homogeneity is judged one level at a time: a mixed subdirectory
        // makes its parent mixed, nothing deeper is consulted.
        let want = TriState::rollup(children.iter().map(|&child| self.entry(child).want()));
        let priority = TriState::rollup(children.iter().map(|&child| self.entry(child).priority()));

        let entry = self.entry_mut(id);
        entry.size = size;
        entry.done = done;
        entry.percent = percent_of(done, size);
        if let Some(dir) = entry.as_dir_mut() {
            dir.want = want;
            dir.priority = priority;
        }
    }
}
