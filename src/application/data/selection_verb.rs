use clap::ValueEnum;
use torrent_filetree::filetree::SelectVerb;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SelectionVerb {
    Add,
    Set,
    Toggle,
}

impl From<SelectionVerb> for SelectVerb {
    fn from(verb: SelectionVerb) -> Self {
        match verb {
            SelectionVerb::Add => SelectVerb::Add,
            SelectionVerb::Set => SelectVerb::Set,
            SelectionVerb::Toggle => SelectVerb::Toggle,
        }
    }
}
