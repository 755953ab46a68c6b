//! Grid layout for the `table` and `ttable` output formats.
//!
//! Dialects:
//! - `default`: box-drawing borders, or a space-padded grid without pseudographics
//! - `markdown`: empty header row plus `|-|` separator, unpadded pipe rows
//! - `jira`: unpadded pipe rows only

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::blocks::Block;

/// Table rendering convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableDialect {
    #[default]
    Default,
    Jira,
    Markdown,
}

impl TableDialect {
    pub const NAMES: &[&str] = &["default", "jira", "markdown"];

    pub fn name(self) -> &'static str {
        match self {
            TableDialect::Default => "default",
            TableDialect::Jira => "jira",
            TableDialect::Markdown => "markdown",
        }
    }
}

impl fmt::Display for TableDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableDialect {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(TableDialect::Default),
            "jira" => Ok(TableDialect::Jira),
            "markdown" => Ok(TableDialect::Markdown),
            _ => Err(()),
        }
    }
}

/// Table settings held by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub dialect: TableDialect,
    /// Draw borders in the default dialect.
    pub graphics: bool,
    /// Maximum cell width in columns (0 = unlimited).
    pub column_width: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            dialect: TableDialect::Default,
            graphics: true,
            column_width: 0,
        }
    }
}

/// A logical row: one entry per column, each split into physical lines.
type Row = Vec<Vec<String>>;

/// Renders blocks one after another.
pub fn render(blocks: &[Block], options: &TableOptions, transposed: bool) -> String {
    blocks
        .iter()
        .map(|block| render_block(block, options, transposed))
        .collect()
}

fn render_block(block: &Block, options: &TableOptions, transposed: bool) -> String {
    if block.columns.is_empty() {
        return String::new();
    }

    let logical: Vec<Vec<&str>> = if transposed {
        block
            .columns
            .iter()
            .enumerate()
            .map(|(j, column)| {
                std::iter::once(column.as_str())
                    .chain(block.rows.iter().map(|row| row[j].as_str()))
                    .collect()
            })
            .collect()
    } else {
        std::iter::once(block.columns.iter().map(String::as_str).collect::<Vec<_>>())
            .chain(
                block
                    .rows
                    .iter()
                    .map(|row| row.iter().map(String::as_str).collect::<Vec<_>>()),
            )
            .collect()
    };

    let rows: Vec<Row> = logical
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| wrap(cell, options.column_width))
                .collect()
        })
        .collect();

    match options.dialect {
        TableDialect::Default if options.graphics => boxed(&rows),
        TableDialect::Default => plain(&rows),
        TableDialect::Markdown => piped(&rows, true),
        TableDialect::Jira => piped(&rows, false),
    }
}

fn column_widths(rows: &[Row]) -> Vec<usize> {
    let count = rows.first().map_or(0, Vec::len);
    (0..count)
        .map(|j| {
            rows.iter()
                .flat_map(|row| row[j].iter())
                .map(|line| line.width())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn row_height(row: &Row) -> usize {
    row.iter().map(Vec::len).max().unwrap_or(1).max(1)
}

fn pad(out: &mut String, text: &str, width: usize) {
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(text.width())));
}

fn boxed(rows: &[Row]) -> String {
    let widths = column_widths(rows);
    let mut rule = String::from("+");
    for width in &widths {
        rule.extend(std::iter::repeat_n('-', width + 2));
        rule.push('+');
    }
    rule.push('\n');

    let mut out = rule.clone();
    for row in rows {
        for k in 0..row_height(row) {
            out.push('|');
            for (cell, width) in row.iter().zip(&widths) {
                out.push(' ');
                pad(&mut out, cell.get(k).map_or("", String::as_str), *width);
                out.push_str(" |");
            }
            out.push('\n');
        }
        out.push_str(&rule);
    }
    out
}

fn plain(rows: &[Row]) -> String {
    let widths = column_widths(rows);
    let mut out = String::new();
    for row in rows {
        for k in 0..row_height(row) {
            for (cell, width) in row.iter().zip(&widths) {
                out.push(' ');
                pad(&mut out, cell.get(k).map_or("", String::as_str), *width);
                out.push(' ');
            }
            out.push('\n');
        }
    }
    out.push('\n');
    out
}

fn piped(rows: &[Row], header_lines: bool) -> String {
    let count = rows.first().map_or(0, Vec::len);
    let mut out = String::new();
    if header_lines {
        out.push('|');
        out.push_str(&" |".repeat(count));
        out.push_str("\n|");
        out.push_str(&"-|".repeat(count));
        out.push('\n');
    }
    for row in rows {
        let cells: Vec<String> = row.iter().map(|lines| lines.concat()).collect();
        out.push_str("| ");
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");
    }
    out.push('\n');
    out
}

/// Splits a cell into physical lines no wider than `width` (0 = unlimited).
///
/// Continuation chunks start with `+` and count it toward the width.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for line in text.split('\n') {
        if width == 0 || line.width() <= width {
            lines.push(line.to_string());
            continue;
        }
        let (head, mut rest) = split_at_width(line, width);
        lines.push(head.to_string());
        let budget = width.saturating_sub(1).max(1);
        while !rest.is_empty() {
            let (chunk, tail) = split_at_width(rest, budget);
            lines.push(format!("+{chunk}"));
            rest = tail;
        }
    }
    lines
}

/// Splits off the longest prefix fitting `budget` columns (at least one char).
fn split_at_width(s: &str, budget: usize) -> (&str, &str) {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > budget && used > 0 {
            return s.split_at(i);
        }
        used += w;
    }
    (s, "")
}
