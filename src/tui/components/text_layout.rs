//! Column-accurate text layout for fixed-size terminal panes.
//!
//! Widths are measured in terminal columns with `unicode-width`, so Hangul
//! titles and nicknames take two columns per syllable.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `max_width` columns, ending with `...` when cut.
///
/// Widths of three columns or fewer cannot fit any text beside the ellipsis
/// and render as dots only.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width <= ELLIPSIS.len() {
        return ".".repeat(max_width);
    }

    let budget = max_width.saturating_sub(ELLIPSIS.len());
    let mut kept = String::new();
    let mut used = 0_usize;
    for character in text.chars() {
        let columns = character.width().unwrap_or(0);
        if used.saturating_add(columns) > budget {
            break;
        }
        kept.push(character);
        used = used.saturating_add(columns);
    }
    kept.push_str(ELLIPSIS);
    kept
}

/// Keeps at most `max_lines` lines, replacing the overflow with `...`.
///
/// A limit of zero leaves the output untouched.
pub(crate) fn truncate_to_height(output: &mut String, max_lines: usize) {
    if max_lines == 0 || output.lines().count() <= max_lines {
        return;
    }

    let keep = max_lines.saturating_sub(1);
    let cut = output
        .match_indices('\n')
        .nth(keep.saturating_sub(1))
        .map_or(0, |(position, _)| position.saturating_add(1));
    output.truncate(if keep == 0 { 0 } else { cut });
    output.push_str(ELLIPSIS);
    output.push('\n');
}

/// Greedily wraps `text` into lines of at most `max_width` columns.
///
/// Words wider than a full line are truncated rather than split.
pub(crate) fn wrap_to_width(text: &str, max_width: usize) -> Vec<String> {
    let width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.width()
        } else {
            current.width().saturating_add(1).saturating_add(word.width())
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&truncate_to_width(word, width));
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Pads or truncates `text` to exactly `width` columns.
pub(crate) fn fit_to_width(text: &str, width: usize) -> String {
    let mut fitted = truncate_to_width(text, width);
    let used = fitted.width();
    fitted.push_str(&" ".repeat(width.saturating_sub(used)));
    fitted
}
