//! In-memory file tree cache for a torrent client.
//!
//! Periodic flat snapshots of a torrent's files go in; a directory tree with
//! aggregated progress and per-entry wanted state comes out.

pub mod ext;
pub mod filetree;
pub mod snapshot;
