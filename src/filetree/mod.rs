//! Directory tree built from a torrent's flat file list.
//!
//! [`CachedFileTree`] is built from a [`TorrentSnapshot`](crate::snapshot::TorrentSnapshot),
//! keeps per-directory size, progress, want and priority roll-ups, and
//! tracks a multi-selection. Later snapshots are applied with
//! [`CachedFileTree::reconcile`], which patches leaves in place or rebuilds
//! when the file list no longer matches.
//!
//! The tree is a plain single-owner value: callers serialize access.

mod aggregate;
mod builder;
mod entry;
mod lookup;
mod mutate;
mod reconcile;
mod selection;
mod tree;
mod view;

#[cfg(test)]
mod test_support;

pub use entry::{DirEntry, Entry, EntryKind, FileEntry, NodeId, TriState};
pub use lookup::{file_system_safe_name, normalize_path};
pub use reconcile::Reconciliation;
pub use selection::SelectVerb;
pub use tree::CachedFileTree;
pub use view::{EntryView, ViewMode};
