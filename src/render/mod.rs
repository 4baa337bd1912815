use colored::Colorize;
use torrent_filetree::filetree::{CachedFileTree, EntryView, TriState};

const UNITS: &[&str] = &["KiB", "MiB", "GiB", "TiB"];

/// Human readable byte count using binary units.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

fn want_marker(want: TriState<bool>, updating: bool) -> String {
    let marker = match want {
        TriState::Uniform(true) => "[x]",
        TriState::Uniform(false) => "[ ]",
        TriState::Mixed => "[~]",
    };
    if updating {
        format!("{marker}*")
    } else {
        format!("{marker} ")
    }
}

fn format_percent(percent: Option<f64>) -> String {
    percent.map_or_else(|| "-".to_string(), |p| format!("{p:.1}%"))
}

/// One line per row, nested rows indented two spaces per depth.
pub fn render_rows(rows: &[EntryView]) -> String {
    let mut out = String::new();
    for row in rows {
        render_row(row, 0, &mut out);
    }
    out
}

fn render_row(row: &EntryView, depth: usize, out: &mut String) {
    let name = if row.is_dir {
        format!("{}/", row.name).blue().bold()
    } else if row.want == TriState::Uniform(false) {
        row.name.dimmed()
    } else {
        row.name.normal()
    };
    let priority = row
        .priority
        .value()
        .map_or_else(|| "mixed".to_string(), |p| p.to_string());

    out.push_str(&format!(
        "{}{} {}  {}  {}  {}\n",
        "  ".repeat(depth),
        want_marker(row.want, row.wanted_updating),
        name,
        format_size(row.size),
        format_percent(row.percent),
        priority,
    ));
    for subrow in &row.subrows {
        render_row(subrow, depth + 1, out);
    }
}

/// Totals the daemon would need to apply the current choices.
pub fn render_summary(tree: &CachedFileTree) -> String {
    let unwanted = tree
        .unwanted_file_indexes()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    let selected = tree.selected_paths();

    let mut lines = vec![
        format!("{} {}", "wanted:".bold(), format_size(tree.wanted_size())),
        format!("{} [{}]", "unwanted:".bold(), unwanted.join(", ")),
    ];
    if !selected.is_empty() {
        lines.push(format!("{} {}", "selected:".bold(), selected.join(", ")));
    }
    lines.into_iter().map(|line| line + "\n").collect()
}
