//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use pantry_search::{FieldKey, Recipe, ScoredMatch};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Print ranked recipes, highlighting where the title matched.
pub fn print_hits(hits: &[(Recipe, Option<&ScoredMatch>)], show_scores: bool) {
    for (rank, (recipe, scored)) in hits.iter().enumerate() {
        let title_ranges = scored
            .and_then(|m| m.matches.iter().find(|f| f.field == FieldKey::Title))
            .map(|f| f.indices.as_slice())
            .unwrap_or(&[]);

        let mut line = format!(
            "{:>3}. {}",
            (rank + 1).dimmed(),
            highlight(&recipe.title, title_ranges)
        );
        if !recipe.slug.is_empty() {
            line.push_str(&format!(" {}", format!("/{}", recipe.slug).dimmed()));
        }
        if show_scores {
            if let Some(m) = scored {
                let fields: Vec<&str> = m.matches.iter().map(|f| f.field.as_str()).collect();
                line.push_str(&format!(
                    "  {} {}",
                    format_score(m.score).cyan(),
                    fields.join(",").dimmed()
                ));
            }
        }
        println!("{}", line);
    }
}

/// Print autocomplete suggestions, one per line.
pub fn print_suggestions(suggestions: &[String]) {
    for suggestion in suggestions {
        println!("  {} {}", "›".blue(), suggestion);
    }
}

/// Emphasize the given inclusive character ranges of `text`.
pub fn highlight(text: &str, ranges: &[(usize, usize)]) -> String {
    split_ranges(text, ranges)
        .into_iter()
        .map(|(segment, matched)| {
            if matched {
                segment.bold().yellow().to_string()
            } else {
                segment.to_string()
            }
        })
        .collect()
}

/// Split `text` into segments flagged as inside or outside `ranges`.
///
/// Ranges are inclusive character positions. Ranges that fall outside the
/// text or overlap an earlier range are skipped.
pub fn split_ranges<'a>(text: &'a str, ranges: &[(usize, usize)]) -> Vec<(&'a str, bool)> {
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = offsets.len() - 1;

    let mut sorted = ranges.to_vec();
    sorted.sort_unstable();

    let mut segments = Vec::new();
    let mut cursor = 0;
    for (start, end) in sorted {
        if start < cursor || end < start || end >= char_count {
            continue;
        }
        if start > cursor {
            segments.push((&text[offsets[cursor]..offsets[start]], false));
        }
        segments.push((&text[offsets[start]..offsets[end + 1]], true));
        cursor = end + 1;
    }
    if cursor < char_count {
        segments.push((&text[offsets[cursor]..], false));
    }

    segments
}

/// Format a relevance score for display
pub fn format_score(score: f64) -> String {
    if score == 0.0 {
        "0".to_string()
    } else if score < 0.001 {
        format!("{:.2e}", score)
    } else {
        format!("{:.4}", score)
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 0.001 {
        format!("{}µs", duration.as_micros())
    } else if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{:.1}s", secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
