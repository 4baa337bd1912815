use tracing::{debug, warn};

use crate::snapshot::TorrentSnapshot;

use super::entry::{Entry, FileEntry, NodeId};
use super::lookup::{file_system_safe_name, join_path, normalize_path};
use super::tree::{CachedFileTree, FileSlot};

impl CachedFileTree {
    /// Discards the current tree and builds a new one from `snapshot`.
    ///
    /// Files are inserted in path order so that directories are discovered
    /// deterministically regardless of the snapshot's own ordering.
    pub fn parse(&mut self, snapshot: &TorrentSnapshot) {
        self.reset();
        self.generation += 1;
        self.hash = snapshot.hash_string().to_string();
        self.id = snapshot.id();

        let paths: Vec<String> = snapshot
            .files()
            .iter()
            .map(|file| normalize_path(&file.name))
            .collect();

        let safe_name = file_system_safe_name(snapshot.name());
        let prefix = format!("{safe_name}/");
        if paths.len() > 1 || paths.first().is_some_and(|path| path.starts_with(&prefix)) {
            let root = self.root_id();
            self.entry_mut(root).fullpath = safe_name;
        }

        let mut order: Vec<usize> = (0..paths.len()).collect();
        order.sort_by(|&a, &b| paths[a].cmp(&paths[b]));

        let root = self.root_id();
        self.files = paths
            .iter()
            .map(|path| FileSlot {
                path: path.clone(),
                node: root,
            })
            .collect();

        for index in order {
            let node = self.insert_file(snapshot, index, &paths[index]);
            self.files[index].node = node;
            self.path_index.insert(paths[index].clone(), index);
        }

        self.recalc_tree();
        self.initialized = !paths.is_empty();
        debug!(
            "Built tree '{}' for torrent {}: {} files, {} nodes, generation {}",
            self.root().fullpath(),
            self.hash,
            self.files.len(),
            self.nodes.len(),
            self.generation
        );
    }

    fn insert_file(&mut self, snapshot: &TorrentSnapshot, index: usize, path: &str) -> NodeId {
        let root_path = self.root().fullpath().to_string();
        let mut parts: Vec<&str> = path.split('/').collect();
        if parts.len() > 1 && parts[0] == root_path {
            parts.remove(0);
        }
        let Some((file_name, dirs)) = parts.split_last() else {
            return self.root_id();
        };

        let mut node = self.root_id();
        let mut current_path = root_path;
        for (level, &segment) in dirs.iter().enumerate() {
            current_path = join_path(&current_path, segment);
            let existing = self
                .entry(node)
                .as_dir()
                .and_then(|dir| dir.subdirs.get(segment).copied());
            node = match existing {
                Some(subdir) => subdir,
                None => self.attach(node, Entry::dir(segment, level, current_path.clone(), node)),
            };
        }

        let duplicate = self
            .entry(node)
            .as_dir()
            .and_then(|dir| dir.files.get(*file_name).copied());
        if let Some(existing) = duplicate {
            warn!(
                "File {} repeats path '{}', sharing the entry of the first occurrence",
                index, path
            );
            return existing;
        }

        let stat = snapshot.file_stat(index).copied().unwrap_or_default();
        let file = Entry::file(
            file_name,
            dirs.len(),
            join_path(&current_path, file_name),
            node,
            snapshot.files()[index].length,
            stat.bytes_completed,
            FileEntry {
                index,
                want: stat.wanted,
                priority: stat.priority,
            },
        );
        self.attach(node, file)
    }

    /// Moves `entry` into the arena and links it under `parent`.
    fn attach(&mut self, parent: NodeId, entry: Entry) -> NodeId {
        let id = NodeId::new(self.nodes.len(), self.generation);
        let name = entry.name.clone();
        let is_dir = entry.is_dir();
        self.nodes.push(entry);

        if let Some(dir) = self.entry_mut(parent).as_dir_mut() {
            let children = if is_dir { &mut dir.subdirs } else { &mut dir.files };
            children.insert(name, id);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filetree::test_support::*;
    use crate::snapshot::{Priority, TorrentFile};

    fn names(tree: &CachedFileTree, ids: impl IntoIterator<Item = NodeId>) -> Vec<String> {
        ids.into_iter()
            .map(|id| tree.entry(id).name().to_string())
            .collect()
    }

    #[test]
    fn multi_file_torrent_gets_a_synthetic_root() {
        let tree = sample_snapshot().into_tree();

        assert!(tree.initialized());
        assert_eq!(tree.root().fullpath(), "T");
        let dir = tree.root().as_dir().unwrap();
        assert_eq!(names(&tree, dir.subdirs.values().copied()), vec!["a"]);
        assert!(dir.files.is_empty());

        let a = tree.find_entry("a").unwrap();
        assert_eq!(tree.entry(a).fullpath(), "T/a");
        assert_eq!(tree.entry(a).level(), 0);
        assert_eq!(tree.entry(a).parent(), Some(tree.root_id()));
        assert_eq!(names(&tree, tree.children(a)), vec!["b.txt", "c.txt"]);
    }

    #[test]
    fn single_bare_file_has_pathless_root() {
        let tree = single_file_snapshot().into_tree();

        assert_eq!(tree.root().fullpath(), "");
        let file = tree.find_entry("movie.mkv").unwrap();
        assert_eq!(tree.entry(file).fullpath(), "movie.mkv");
        assert_eq!(tree.entry(file).level(), 0);
    }

    #[test]
    fn single_file_inside_torrent_folder_gets_synthetic_root() {
        let tree = snapshot(
            "Album",
            &[("Album/track.flac", 10, true, 0, Priority::Normal)],
        )
        .into_tree();

        assert_eq!(tree.root().fullpath(), "Album");
        let file = tree.find_entry("Album/track.flac").unwrap();
        assert_eq!(tree.entry(file).fullpath(), "Album/track.flac");
        assert_eq!(tree.entry(file).level(), 0);
        assert_eq!(tree.entry(file).parent(), Some(tree.root_id()));
    }

    #[test]
    fn directories_are_discovered_in_path_order() {
        let tree = nested_snapshot().into_tree();
        let root = tree.root().as_dir().unwrap();

        assert_eq!(root.subdirs.keys().collect::<Vec<_>>(), vec!["docs", "src"]);
        assert_eq!(root.files.keys().collect::<Vec<_>>(), vec!["Cargo.toml", "empty.bin"]);

        let src = tree.find_entry("src").unwrap();
        assert_eq!(names(&tree, tree.children(src)), vec!["lib", "main.rs"]);

        let util = tree.find_entry("Pack/src/lib/util.rs").unwrap();
        assert_eq!(tree.entry(util).level(), 2);
        assert_eq!(tree.entry(util).as_file().unwrap().index, 2);
    }

    #[test]
    fn path_index_maps_normalized_paths_to_snapshot_positions() {
        let tree = nested_snapshot().into_tree();

        assert_eq!(tree.index_of("Pack/src/main.rs"), Some(0));
        assert_eq!(tree.index_of("Pack/src/lib/util.rs"), Some(2));
        assert_eq!(tree.index_of("Pack\\src\\lib\\util.rs"), None);
        for index in 0..tree.file_count() {
            let node = tree.file_node(index).unwrap();
            assert_eq!(tree.entry(node).as_file().unwrap().index, index);
        }
    }

    #[test]
    fn file_fields_carry_their_stats() {
        let tree = sample_snapshot().into_tree();
        let b = tree.entry(tree.find_entry("a/b.txt").unwrap());

        assert_eq!(b.size(), 100);
        assert_eq!(b.done(), 50);
        assert_eq!(b.percent(), Some(50.0));
        assert_eq!(b.level(), 1);
        assert!(!b.is_selected());
        assert!(!b.wanted_updating());
    }

    #[test]
    fn metainfo_snapshot_wants_everything() {
        let snapshot = TorrentSnapshot::from_metainfo(
            "hash",
            1,
            "T",
            vec![TorrentFile::new("T/x", 10), TorrentFile::new("T/y", 20)],
        );
        let tree = snapshot.into_tree();
        let x = tree.entry(tree.find_entry("x").unwrap());

        assert_eq!(x.as_file().unwrap().want, true);
        assert_eq!(x.as_file().unwrap().priority, Priority::Normal);
        assert_eq!(x.percent(), Some(0.0));
        assert_eq!(tree.wanted_size(), 30);
    }

    #[test]
    fn empty_snapshot_leaves_tree_uninitialized() {
        let tree = snapshot("T", &[]).into_tree();

        assert!(!tree.initialized());
        assert_eq!(tree.generation(), 1);
        assert_eq!(tree.root().percent(), None);
    }

    #[test]
    fn rebuilding_replaces_previous_contents() {
        let mut tree = nested_snapshot().into_tree();
        tree.parse(&sample_snapshot());

        assert_eq!(tree.generation(), 2);
        assert_eq!(tree.file_count(), 2);
        assert_eq!(tree.find_entry("src"), None);
        assert_eq!(tree.index_of("Pack/src/main.rs"), None);
    }

    #[test]
    fn repeated_path_shares_the_first_entry() {
        let tree = snapshot(
            "T",
            &[
                ("a/x", 10, true, 0, Priority::Normal),
                ("a/x", 20, true, 0, Priority::Normal),
            ],
        )
        .into_tree();

        let x = tree.find_entry("a/x").unwrap();
        assert_eq!(tree.file_node(0), Some(x));
        assert_eq!(tree.file_node(1), Some(x));
        assert_eq!(tree.entry(x).size(), 10);
        assert_eq!(tree.subtree(tree.root_id()).len(), 3);
        assert_eq!(tree.root().size(), 10);
        assert_eq!(tree.wanted_size(), tree.root().size());
    }
}
