use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{LogLevel, SelectionVerb};

/// Builds the file tree of a torrent from YAML snapshots and prints it.
///
/// The first document of SNAPSHOT builds the tree, every further document is
/// applied as an update.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// YAML file with one or more torrent snapshots
    pub snapshot: PathBuf,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Print files only, named by their path inside the torrent
    #[clap(long)]
    pub flat: bool,

    /// Mark an entry and everything below it as wanted
    #[clap(long, value_name = "PATH")]
    pub want: Vec<String>,

    /// Mark an entry and everything below it as unwanted
    #[clap(long, value_name = "PATH")]
    pub unwant: Vec<String>,

    /// Rename an entry, e.g. `--rename docs/readme.md=README`
    #[clap(long, value_name = "PATH=NAME", value_parser = parse_rename)]
    pub rename: Vec<(String, String)>,

    /// How the `--id` entries combine with the selection
    #[clap(long, value_enum, requires = "ids")]
    pub select: Option<SelectionVerb>,

    /// Entry to select, may be repeated
    #[clap(long = "id", value_name = "PATH")]
    pub ids: Vec<String>,

    /// Disable coloured output
    #[clap(long)]
    pub no_color: bool,
}

fn parse_rename(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((path, name)) if !path.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((path.to_string(), name.to_string()))
        }
        _ => Err(format!("expected PATH=NAME with a single-segment NAME, got '{value}'")),
    }
}
