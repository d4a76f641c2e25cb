use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use super::pdf::format_score;
use crate::scoring::{ResultSet, StudentRecord, Subject};

/// Summary printed to stdout next to the PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Pad to `width` characters (not bytes, so accents line up).
fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

const INDEX_WIDTH: usize = 3;
const SCORE_WIDTH: usize = 7;
const MIN_NAME_WIDTH: usize = 10;
const SEPARATOR: &str = "  ";

fn short_label(subject: Subject) -> &'static str {
    match subject {
        Subject::Linguagens => "LING",
        Subject::Natureza => "NAT",
        Subject::Matematica => "MAT",
        Subject::Humanas => "HUM",
        Subject::Redacao => "RED",
    }
}

/// Format results as an aligned table: index, name, five subjects, mean.
///
/// Index column: 3 chars (fits "99."), right-aligned.
/// Score columns are right-aligned, 7 chars wide (fits "1000.0").
/// The name column shrinks to fit the terminal; piped output is never
/// truncated.
pub fn format_results_table(results: &ResultSet, use_colors: bool) -> String {
    if results.is_empty() {
        return "No students found.".to_string();
    }

    let longest = results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NOME".len());
    let fixed_width = INDEX_WIDTH + 1 + (SCORE_WIDTH + SEPARATOR.len()) * (Subject::ALL.len() + 1);
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + MIN_NAME_WIDTH => longest.min(width - fixed_width),
        Some(_) => longest.min(MIN_NAME_WIDTH),
        None => longest,
    };

    let mut header = format!("{:>w$} {}", "#", pad_right("NOME", name_width), w = INDEX_WIDTH);
    for subject in Subject::ALL {
        header.push_str(SEPARATOR);
        header.push_str(&format!("{:>w$}", short_label(subject), w = SCORE_WIDTH));
    }
    header.push_str(SEPARATOR);
    header.push_str(&format!("{:>w$}", "MÉDIA", w = SCORE_WIDTH));

    let mut lines = vec![if use_colors {
        header.dimmed().to_string()
    } else {
        header
    }];

    lines.extend(
        results
            .iter()
            .enumerate()
            .map(|(idx, record)| format_row(idx, record, name_width, use_colors)),
    );
    lines.join("\n")
}

fn format_row(idx: usize, record: &StudentRecord, name_width: usize, use_colors: bool) -> String {
    // 1-based index, right-aligned with trailing dot
    let index_str = format!("{:>2}.", idx + 1);
    let name = pad_right(&truncate_name(&record.name, name_width), name_width);
    let scores: String = record
        .scores
        .values()
        .iter()
        .map(|v| format!("{}{:>w$}", SEPARATOR, format_score(*v), w = SCORE_WIDTH))
        .collect();
    let mean = format!("{:>w$}", format_score(record.mean), w = SCORE_WIDTH);

    if use_colors {
        format!(
            "{} {}{}{}{}",
            index_str.dimmed(),
            name,
            scores,
            SEPARATOR,
            mean.bold()
        )
    } else {
        format!("{} {}{}{}{}", index_str, name, scores, SEPARATOR, mean)
    }
}

/// Format results as tab-separated values for scripting
/// Columns: name, five subjects, mean (no headers, no colors)
pub fn format_tsv(results: &ResultSet) -> String {
    results
        .iter()
        .map(|record| {
            let mut fields = vec![record.name.clone()];
            fields.extend(record.scores.values().iter().map(|v| format_score(*v)));
            fields.push(format_score(record.mean));
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format results as a pretty-printed JSON array with unrounded scores.
pub fn format_json(results: &ResultSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}
