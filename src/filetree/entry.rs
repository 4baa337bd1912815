use derive_more::Display;
use hashlink::LinkedHashMap;

use crate::snapshot::Priority;

/// Handle of a node inside the tree arena.
///
/// A handle belongs to one build of the tree. Once a snapshot forces a
/// rebuild, handles from the previous build stop resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("#{index}")]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

impl NodeId {
    pub(crate) fn new(index: usize, generation: u64) -> Self {
        Self { index, generation }
    }
}

/// Roll-up of a per-file value over the direct children of a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriState<T> {
    Uniform(T),
    Mixed,
}

impl<T: Copy + PartialEq> TriState<T> {
    /// `Uniform(v)` iff every item is `Uniform(v)`. An empty input is `Mixed`.
    pub fn rollup(items: impl IntoIterator<Item = TriState<T>>) -> Self {
        let mut first = None;
        for item in items {
            match (item, first) {
                (TriState::Mixed, _) => return TriState::Mixed,
                (TriState::Uniform(value), None) => first = Some(value),
                (TriState::Uniform(value), Some(seen)) if value != seen => return TriState::Mixed,
                (TriState::Uniform(_), Some(_)) => {}
            }
        }
        first.map_or(TriState::Mixed, TriState::Uniform)
    }

    pub fn value(self) -> Option<T> {
        match self {
            TriState::Uniform(value) => Some(value),
            TriState::Mixed => None,
        }
    }

    pub fn is_mixed(self) -> bool {
        matches!(self, TriState::Mixed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// Position in the flat snapshot.
    pub index: usize,
    pub want: bool,
    pub priority: Priority,
}

#[derive(Debug, Clone)]
pub struct DirEntry {
    pub want: TriState<bool>,
    pub priority: TriState<Priority>,
    pub subdirs: LinkedHashMap<String, NodeId>,
    pub files: LinkedHashMap<String, NodeId>,
}

impl DirEntry {
    fn empty() -> Self {
        Self {
            want: TriState::Mixed,
            priority: TriState::Mixed,
            subdirs: LinkedHashMap::new(),
            files: LinkedHashMap::new(),
        }
    }

    /// Direct children, subdirectories first, each group in insertion order.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.subdirs.values().chain(self.files.values()).copied()
    }
}

#[derive(Debug, Clone)]
pub enum EntryKind {
    File(FileEntry),
    Dir(DirEntry),
}

/// A file or directory node of the cached tree.
#[derive(Debug, Clone)]
pub struct Entry {
    pub(crate) name: String,
    pub(crate) level: usize,
    pub(crate) fullpath: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) size: u64,
    pub(crate) done: u64,
    pub(crate) percent: f64,
    pub(crate) is_selected: bool,
    pub(crate) wanted_updating: bool,
    pub(crate) kind: EntryKind,
}

impl Entry {
    pub(crate) fn root() -> Self {
        Self {
            name: String::new(),
            level: 0,
            fullpath: String::new(),
            parent: None,
            size: 0,
            done: 0,
            percent: 0.0,
            is_selected: false,
            wanted_updating: false,
            kind: EntryKind::Dir(DirEntry {
                want: TriState::Uniform(true),
                priority: TriState::Uniform(Priority::Normal),
                ..DirEntry::empty()
            }),
        }
    }

    pub(crate) fn dir(name: &str, level: usize, fullpath: String, parent: NodeId) -> Self {
        Self {
            name: name.to_string(),
            level,
            fullpath,
            parent: Some(parent),
            size: 0,
            done: 0,
            percent: 0.0,
            is_selected: false,
            wanted_updating: false,
            kind: EntryKind::Dir(DirEntry::empty()),
        }
    }

    pub(crate) fn file(
        name: &str,
        level: usize,
        fullpath: String,
        parent: NodeId,
        size: u64,
        done: u64,
        file: FileEntry,
    ) -> Self {
        Self {
            name: name.to_string(),
            level,
            fullpath,
            parent: Some(parent),
            size,
            done,
            percent: percent_of(done, size),
            is_selected: false,
            wanted_updating: false,
            kind: EntryKind::File(file),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn fullpath(&self) -> &str {
        &self.fullpath
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn done(&self) -> u64 {
        self.done
    }

    /// Completion percentage, `None` when it is undefined for an empty entry.
    pub fn percent(&self) -> Option<f64> {
        (!self.percent.is_nan()).then_some(self.percent)
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn wanted_updating(&self) -> bool {
        self.wanted_updating
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Dir(_))
    }

    pub fn as_file(&self) -> Option<&FileEntry> {
        match &self.kind {
            EntryKind::File(file) => Some(file),
            EntryKind::Dir(_) => None,
        }
    }

    pub fn as_dir(&self) -> Option<&DirEntry> {
        match &self.kind {
            EntryKind::Dir(dir) => Some(dir),
            EntryKind::File(_) => None,
        }
    }

    pub(crate) fn as_dir_mut(&mut self) -> Option<&mut DirEntry> {
        match &mut self.kind {
            EntryKind::Dir(dir) => Some(dir),
            EntryKind::File(_) => None,
        }
    }

    pub fn want(&self) -> TriState<bool> {
        match &self.kind {
            EntryKind::File(file) => TriState::Uniform(file.want),
            EntryKind::Dir(dir) => dir.want,
        }
    }

    pub fn priority(&self) -> TriState<Priority> {
        match &self.kind {
            EntryKind::File(file) => TriState::Uniform(file.priority),
            EntryKind::Dir(dir) => dir.priority,
        }
    }

    pub(crate) fn set_want(&mut self, state: bool, updating: bool) {
        match &mut self.kind {
            EntryKind::File(file) => file.want = state,
            EntryKind::Dir(dir) => dir.want = TriState::Uniform(state),
        }
        self.wanted_updating = updating;
    }
}

pub(crate) fn percent_of(done: u64, size: u64) -> f64 {
    if size == 0 {
        return f64::NAN;
    }
    done as f64 * 100.0 / size as f64
}
