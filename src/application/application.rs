use snafu::Snafu;
use snafu::prelude::*;
use torrent_filetree::{
    ext::AsyncTryFrom,
    filetree::CachedFileTree,
    snapshot::{SnapshotLoadError, SnapshotSeries},
};
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::render;

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        colored::control::set_override(runtime_config.color);

        let series = SnapshotSeries::async_try_from(runtime_config.snapshot.as_path())
            .await
            .context(SnapshotSnafu)?;
        let tree = Self::build(&runtime_config, &series)?;

        print!("{}", render::render_rows(&tree.view(runtime_config.view_mode)));
        print!("{}", render::render_summary(&tree));

        Ok(())
    }

    /// Replays the snapshot series into a fresh tree and applies the
    /// requested edits in order: want, unwant, renames, selection.
    pub fn build(
        runtime_config: &RuntimeConfig,
        series: &SnapshotSeries,
    ) -> Result<CachedFileTree, ApplicationError> {
        let (first, updates) = series.split_first().context(NoSnapshotsSnafu)?;

        let mut tree = CachedFileTree::new(first.hash_string(), first.id());
        for (document, snapshot) in std::iter::once(first).chain(updates).enumerate() {
            let outcome = tree.reconcile(snapshot);
            info!("Document {}: {:?}", document, outcome);
        }
        debug!(
            "Tree holds {} files after {} builds",
            tree.file_count(),
            tree.generation()
        );

        for path in &runtime_config.want {
            tree.set_wanted(path, true, true);
        }
        for path in &runtime_config.unwant {
            tree.set_wanted(path, false, true);
        }
        for (path, name) in &runtime_config.renames {
            tree.rename(path, name);
        }
        if let Some((verb, ids)) = &runtime_config.selection {
            tree.select(*verb, ids);
        }

        Ok(tree)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading snapshots"))]
    SnapshotError { source: SnapshotLoadError },
    #[snafu(display("The snapshot file holds no snapshots"))]
    NoSnapshots,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;
    use torrent_filetree::filetree::{SelectVerb, TriState, ViewMode};

    const SERIES: &str = r#"
hashString: abc
id: 4
name: T
files:
  - { name: a/b.txt, length: 100 }
  - { name: a/c.txt, length: 200 }
fileStats:
  - { wanted: true, bytesCompleted: 50, priority: 0 }
  - { wanted: false, bytesCompleted: 0, priority: 0 }
---
hashString: abc
id: 4
name: T
files:
  - { name: a/b.txt, length: 100 }
  - { name: a/c.txt, length: 200 }
fileStats:
  - { wanted: true, bytesCompleted: 100, priority: 1 }
  - { wanted: false, bytesCompleted: 0, priority: 0 }
"#;

    fn config() -> RuntimeConfig {
        RuntimeConfig {
            snapshot: PathBuf::from("unused.yaml"),
            view_mode: ViewMode::Nested,
            want: Vec::new(),
            unwant: Vec::new(),
            renames: Vec::new(),
            selection: None,
            color: false,
        }
    }

    fn series() -> SnapshotSeries {
        SERIES.try_into().expect("valid series")
    }

    #[test]
    fn replays_updates_onto_the_first_snapshot() {
        let tree = Application::build(&config(), &series()).expect("tree builds");

        assert_eq!(tree.hash(), "abc");
        assert_eq!(tree.id(), 4);
        assert_eq!(tree.generation(), 1);
        assert_eq!(tree.root().done(), 100);
        assert_eq!(tree.wanted_size(), 100);
    }

    #[test]
    fn applies_edits_in_order() {
        let config = RuntimeConfig {
            want: vec!["a".to_string()],
            unwant: vec!["a/b.txt".to_string()],
            renames: vec![("a".to_string(), "z".to_string())],
            selection: Some((SelectVerb::Set, vec!["z/c.txt".to_string()])),
            ..config()
        };

        let tree = Application::build(&config, &series()).expect("tree builds");

        assert_eq!(tree.unwanted_file_indexes(), vec![0]);
        assert_eq!(tree.wanted_size(), 200);
        let dir = tree
            .find_entry("z")
            .and_then(|id| tree.get(id))
            .expect("renamed dir");
        assert_eq!(dir.want(), TriState::Mixed);
        assert!(dir.wanted_updating());
        assert_eq!(tree.selected_paths(), vec!["T/z/c.txt"]);
    }

    #[compio::test]
    async fn run_reports_missing_snapshot_file() {
        let config = RuntimeConfig {
            snapshot: PathBuf::from("does-not-exist.yaml"),
            ..config()
        };

        let result = Application::run(config).await;
        assert!(matches!(result, Err(ApplicationError::SnapshotError { .. })));
    }

    #[compio::test]
    async fn run_renders_snapshot_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "{}", SERIES).expect("Failed to write snapshots");
        let config = RuntimeConfig {
            snapshot: file.path().to_path_buf(),
            ..config()
        };

        Application::run(config).await.expect("run succeeds");
    }
}
