use hashlink::LinkedHashMap;

use super::entry::{Entry, NodeId};

/// Snapshot-side record of a file: the normalized path it had in the snapshot
/// the tree was built from, and the node it became.
#[derive(Debug, Clone)]
pub(crate) struct FileSlot {
    pub(crate) path: String,
    pub(crate) node: NodeId,
}

/// Hierarchical cache of one torrent's file list.
///
/// Nodes live in a single arena owned by the tree. Directories own their
/// children through name maps and children point back at their parent by
/// [`NodeId`], so there is exactly one owner per node.
#[derive(Debug, Clone)]
pub struct CachedFileTree {
    pub(crate) hash: String,
    pub(crate) id: i64,
    pub(crate) nodes: Vec<Entry>,
    pub(crate) files: Vec<FileSlot>,
    pub(crate) path_index: LinkedHashMap<String, usize>,
    pub(crate) initialized: bool,
    pub(crate) generation: u64,
}

impl CachedFileTree {
    pub fn new(hash: impl Into<String>, id: i64) -> Self {
        Self {
            hash: hash.into(),
            id,
            nodes: vec![Entry::root()],
            files: Vec::new(),
            path_index: LinkedHashMap::new(),
            initialized: false,
            generation: 0,
        }
    }

    /// Drops every node and index, keeping identity and build generation.
    pub(crate) fn reset(&mut self) {
        self.nodes.clear();
        self.nodes.push(Entry::root());
        self.files.clear();
        self.path_index.clear();
        self.initialized = false;
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// True once a snapshot with at least one file has been built.
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Number of times the tree has been built from scratch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handle of the root in the current build.
    pub fn root_id(&self) -> NodeId {
        NodeId::new(0, self.generation)
    }

    pub fn root(&self) -> &Entry {
        &self.nodes[0]
    }

    /// Entry behind `id`, or `None` when the handle comes from an earlier
    /// build of the tree.
    pub fn get(&self, id: NodeId) -> Option<&Entry> {
        if id.generation != self.generation {
            return None;
        }
        self.nodes.get(id.index)
    }

    pub(crate) fn entry(&self, id: NodeId) -> &Entry {
        &self.nodes[id.index]
    }

    pub(crate) fn entry_mut(&mut self, id: NodeId) -> &mut Entry {
        &mut self.nodes[id.index]
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Node of the file at `index` in the flat snapshot.
    pub fn file_node(&self, index: usize) -> Option<NodeId> {
        self.files.get(index).map(|slot| slot.node)
    }

    /// Snapshot index of a normalized snapshot path.
    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.path_index.get(path).copied()
    }

    /// Direct children of `id`, subdirectories first. Empty for files and
    /// stale handles.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id)
            .and_then(Entry::as_dir)
            .map(|dir| dir.children().collect())
            .unwrap_or_default()
    }

    /// Every node of the subtree rooted at `id`, the node itself last.
    ///
    /// Within a directory the subdirectories are expanded before its files,
    /// both in insertion order.
    pub(crate) fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_subtree(id, &mut out);
        out
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Some(dir) = self.entry(id).as_dir() {
            for &subdir in dir.subdirs.values() {
                self.collect_subtree(subdir, out);
            }
            out.extend(dir.files.values().copied());
        }
        out.push(id);
    }
}
