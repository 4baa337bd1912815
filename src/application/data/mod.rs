mod log_level;
mod selection_verb;

pub use log_level::LogLevel;
pub use selection_verb::SelectionVerb;
