//! Dependency tree text report.
//!
//! ```text
//! Resources:
//!   Bucket:
//!     DependsOn:
//!       Parameters:
//!         - Name
//! ```

use super::escape::strip_control;
use super::{ansi_color, Color, GraphFormat, GraphReporter, ReportError};
use crate::graph::Graph;
use crate::model::{Category, Entity};
use std::fmt::Write;

/// Indented tree of each entity's dependencies, grouped by section.
#[derive(Debug, Clone)]
#[must_use]
pub struct TreeReporter {
    /// Include entities that have no links
    all: bool,
    /// Also list dependents under `UsedBy`
    both: bool,
    /// Use colored output
    colored: bool,
}

struct Row<'a> {
    entity: &'a Entity,
    depends_on: Vec<Entity>,
    used_by: Vec<Entity>,
}

impl TreeReporter {
    pub const fn new() -> Self {
        Self {
            all: false,
            both: false,
            colored: true,
        }
    }

    pub const fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub const fn both(mut self, both: bool) -> Self {
        self.both = both;
        self
    }

    pub const fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Disable colored output
    pub const fn no_color(self) -> Self {
        self.colored(false)
    }

    fn write_section(
        &self,
        out: &mut String,
        graph: &Graph,
        ordered: &[Entity],
        category: Category,
    ) -> Result<(), ReportError> {
        let rows: Vec<Row<'_>> = ordered
            .iter()
            .filter(|entity| entity.category == category)
            .map(|entity| Row {
                entity,
                depends_on: graph.dependencies_of(entity),
                used_by: if self.both {
                    graph.dependents_of(entity)
                } else {
                    Vec::new()
                },
            })
            .filter(|row| self.all || !row.depends_on.is_empty() || !row.used_by.is_empty())
            .collect();

        if rows.is_empty() {
            return Ok(());
        }

        writeln!(out, "{category}:")?;
        for row in rows {
            let name = strip_control(&row.entity.name);
            writeln!(out, "  {}:", ansi_color(&name, Color::Yellow, self.colored))?;

            if self.all || !row.depends_on.is_empty() {
                self.write_links(out, "DependsOn", &row.depends_on)?;
            }
            if self.both && (self.all || !row.used_by.is_empty()) {
                self.write_links(out, "UsedBy", &row.used_by)?;
            }
        }
        Ok(())
    }

    fn write_links(&self, out: &mut String, label: &str, links: &[Entity]) -> Result<(), ReportError> {
        if links.is_empty() {
            writeln!(out, "    {label}: []")?;
            return Ok(());
        }

        writeln!(out, "    {label}:")?;
        for category in Category::ALL {
            let mut names = links.iter().filter(|link| link.category == category).peekable();
            if names.peek().is_none() {
                continue;
            }
            writeln!(out, "      {category}:")?;
            for link in names {
                let name = strip_control(&link.name);
                writeln!(out, "        - {}", ansi_color(&name, Color::Blue, self.colored))?;
            }
        }
        Ok(())
    }
}

impl Default for TreeReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphReporter for TreeReporter {
    fn generate(&self, graph: &Graph) -> Result<String, ReportError> {
        let ordered = graph.ordered_entities();
        let mut out = String::new();
        for category in Category::ALL {
            self.write_section(&mut out, graph, &ordered, category)?;
        }
        Ok(out)
    }

    fn format(&self) -> GraphFormat {
        GraphFormat::Text
    }
}
