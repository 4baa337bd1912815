use super::entry::NodeId;
use super::tree::CachedFileTree;

const UNSAFE_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Rewrites backslash separators to forward slashes.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Torrent name made usable as a single path segment on any filesystem.
pub fn file_system_safe_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if UNSAFE_NAME_CHARS.contains(&c) || c.is_ascii_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

impl CachedFileTree {
    /// Resolves a `/`-delimited path to a node.
    ///
    /// A leading segment equal to the root's own path is skipped. The walk
    /// stops at the first file it meets.
    pub fn find_entry(&self, path: &str) -> Option<NodeId> {
        let mut parts = path.split('/').peekable();
        if parts.peek() == Some(&self.root().fullpath()) {
            parts.next();
        }

        let mut node = self.root_id();
        for part in parts {
            let dir = self.entry(node).as_dir()?;
            if let Some(&subdir) = dir.subdirs.get(part) {
                node = subdir;
            } else if let Some(&file) = dir.files.get(part) {
                return Some(file);
            } else {
                return None;
            }
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filetree::test_support::*;
    use rstest::*;

    #[rstest]
    #[case("a\\b\\c.txt", "a/b/c.txt")]
    #[case("a/b.txt", "a/b.txt")]
    #[case("plain", "plain")]
    fn normalize_rewrites_backslashes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(input), expected);
    }

    #[rstest]
    #[case("Ubuntu 24.04", "Ubuntu 24.04")]
    #[case("a/b:c", "a_b_c")]
    #[case("  what? <now>  ", "what_ _now_")]
    #[case("tab\there", "tab_here")]
    fn safe_name_replaces_reserved_characters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(file_system_safe_name(input), expected);
    }

    #[test]
    fn join_path_skips_empty_prefix() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("T", "a"), "T/a");
    }

    #[rstest]
    #[case("a", "T/a")]
    #[case("T/a", "T/a")]
    #[case("a/b.txt", "T/a/b.txt")]
    #[case("T/a/c.txt", "T/a/c.txt")]
    fn find_entry_resolves_with_or_without_root_prefix(
        #[case] path: &str,
        #[case] fullpath: &str,
    ) {
        let tree = sample_snapshot().into_tree();

        let found = tree.find_entry(path).expect("path resolves");
        assert_eq!(tree.entry(found).fullpath(), fullpath);
    }

    #[test]
    fn find_entry_returns_root_for_root_path() {
        let tree = sample_snapshot().into_tree();
        assert_eq!(tree.find_entry("T"), Some(tree.root_id()));
    }

    #[rstest]
    #[case("missing")]
    #[case("a/missing.txt")]
    #[case("T/T/a")]
    #[case("")]
    fn find_entry_reports_not_found(#[case] path: &str) {
        let tree = sample_snapshot().into_tree();
        assert_eq!(tree.find_entry(path), None);
    }

    #[test]
    fn find_entry_stops_at_first_file() {
        let tree = nested_snapshot().into_tree();

        let file = tree.find_entry("docs/readme.md/extra").expect("file resolves");
        assert_eq!(tree.entry(file).fullpath(), "Pack/docs/readme.md");
    }
}
