//! Annotated text rendering of a difference tree.
//!
//! Each changed entry is one line starting with a four-character marker
//! (`>>> ` added, `<<< ` removed, `||| ` changed, `=== ` unchanged in long
//! mode) followed by the key or `[index]`. Scalars are printed inline after the
//! key; compound values and nested changes follow on indented lines that
//! keep the marker column aligned.

use super::compact::compact;
use super::escape::strip_control;
use super::{ansi_color, Color, DiffFormat, DiffReporter, ReportError};
use crate::diff::{ChangeType, DiffNode};
use crate::model::Document;

const MARKER_WIDTH: usize = 4;
const INDENT: &str = "  ";

/// Render a difference tree as annotated text.
///
/// An entirely unchanged comparison renders as the empty string.
#[must_use]
pub fn render(node: &DiffNode, colorize: bool) -> String {
    DiffRenderer::new().colorize(colorize).render(node)
}

/// Text renderer for [`DiffNode`] trees.
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct DiffRenderer {
    colorize: bool,
    /// Long mode: show unchanged entries and removed values
    show_unchanged: bool,
}

impl DiffRenderer {
    pub const fn new() -> Self {
        Self {
            colorize: false,
            show_unchanged: false,
        }
    }

    pub const fn colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    pub const fn show_unchanged(mut self, show_unchanged: bool) -> Self {
        self.show_unchanged = show_unchanged;
        self
    }

    /// Render `node`.
    #[must_use]
    pub fn render(&self, node: &DiffNode) -> String {
        let text = match node {
            DiffNode::Leaf { value, change } => {
                if *change == ChangeType::Unchanged && !self.show_unchanged {
                    String::new()
                } else {
                    prefixed_lines(value, *change)
                }
            }
            DiffNode::Sequence { items } => self.format_entries(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, child)| (format!("[{i}]"), child)),
            ),
            DiffNode::Mapping { entries } => {
                let mut sorted: Vec<(&String, &DiffNode)> = entries.iter().collect();
                sorted.sort_by(|a, b| a.0.cmp(b.0));
                self.format_entries(
                    sorted
                        .into_iter()
                        .map(|(key, child)| (strip_control(key), child)),
                )
            }
        };

        if self.colorize {
            colorize_lines(&text)
        } else {
            text
        }
    }

    fn format_entries<'a>(&self, entries: impl Iterator<Item = (String, &'a DiffNode)>) -> String {
        let mut out = String::new();

        for (label, child) in entries {
            let change = child.change_type();
            if change == ChangeType::Unchanged && !self.show_unchanged {
                continue;
            }

            out.push_str(change.marker());
            out.push_str(&label);

            if child.is_leaf() && change == ChangeType::Removed && !self.show_unchanged {
                out.push('\n');
            } else {
                out.push(':');
                out.push_str(&self.format_child(child));
            }
        }

        out
    }

    fn format_child(&self, child: &DiffNode) -> String {
        match child {
            DiffNode::Leaf { value, change } => {
                let text = compact(value);
                if value.is_scalar() && !text.contains('\n') {
                    return format!(" {}\n", strip_control(&text));
                }
                format!("\n{}", indent_lines(&prefixed_lines(value, *change)))
            }
            nested => {
                let inner = self.uncolored().render(nested);
                format!("\n{}", indent_lines(&inner))
            }
        }
    }

    const fn uncolored(self) -> Self {
        self.colorize(false)
    }
}

impl DiffReporter for DiffRenderer {
    fn generate(&self, diff: &DiffNode) -> Result<String, ReportError> {
        Ok(self.render(diff))
    }

    fn format(&self) -> DiffFormat {
        DiffFormat::Text
    }
}

/// Every line of the compact form of `value`, each prefixed with the marker
/// for `change`.
fn prefixed_lines(value: &Document, change: ChangeType) -> String {
    let mut out = String::new();
    for line in compact(value).lines().filter(|l| !l.trim().is_empty()) {
        out.push_str(change.marker());
        out.push_str(&strip_control(line));
        out.push('\n');
    }
    out
}

/// Insert indentation after the marker column of every line.
fn indent_lines(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        match (line.get(..MARKER_WIDTH), line.get(MARKER_WIDTH..)) {
            (Some(marker), Some(rest)) => {
                out.push_str(marker);
                out.push_str(INDENT);
                out.push_str(rest);
            }
            _ => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

fn colorize_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let color = match line.get(..MARKER_WIDTH) {
            Some(m) if m == ChangeType::Added.marker() => Some(Color::Green),
            Some(m) if m == ChangeType::Removed.marker() => Some(Color::Red),
            Some(m) if m == ChangeType::Changed.marker() => Some(Color::Yellow),
            Some(m) if m == ChangeType::Unchanged.marker() => Some(Color::Dim),
            _ => None,
        };
        match color {
            Some(color) => out.push_str(&ansi_color(line, color, true)),
            None => out.push_str(line),
        }
        out.push('\n');
    }
    out
}
