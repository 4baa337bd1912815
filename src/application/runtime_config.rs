use std::path::PathBuf;

use torrent_filetree::filetree::{SelectVerb, ViewMode};

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub snapshot: PathBuf,
    pub view_mode: ViewMode,
    pub want: Vec<String>,
    pub unwant: Vec<String>,
    pub renames: Vec<(String, String)>,
    pub selection: Option<(SelectVerb, Vec<String>)>,
    pub color: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        let view_mode = if cli.flat {
            ViewMode::Flat
        } else {
            ViewMode::Nested
        };
        let color = !cli.no_color && supports_color::on(supports_color::Stream::Stdout).is_some();

        Self {
            snapshot: cli.snapshot,
            view_mode,
            want: cli.want,
            unwant: cli.unwant,
            renames: cli.rename,
            selection: cli.select.map(|verb| (verb.into(), cli.ids)),
            color,
        }
    }
}
