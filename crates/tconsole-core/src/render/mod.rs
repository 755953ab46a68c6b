//! Output renderers.
//!
//! - `lua`: Lua literal syntax terminated by `;`
//! - `yaml`: YAML documents (default)
//! - `table`: grids built from the values of one input line

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value::Value;

pub mod blocks;
pub mod lua;
pub mod table;
pub mod yaml;

pub use table::{TableDialect, TableOptions};

/// Output format of evaluated results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Lua,
    Table,
    /// Transposed table.
    #[serde(rename = "ttable")]
    TTable,
    #[default]
    Yaml,
}

impl OutputFormat {
    /// Names accepted by `\set output`, in help order.
    pub const NAMES: &[&str] = &["lua", "table", "ttable", "yaml"];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Lua => "lua",
            OutputFormat::Table => "table",
            OutputFormat::TTable => "ttable",
            OutputFormat::Yaml => "yaml",
        }
    }

    /// Next format in the `\x` cycle: yaml, lua, table, ttable, yaml, ...
    pub fn next(self) -> Self {
        match self {
            OutputFormat::Yaml => OutputFormat::Lua,
            OutputFormat::Lua => OutputFormat::Table,
            OutputFormat::Table => OutputFormat::TTable,
            OutputFormat::TTable => OutputFormat::Yaml,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lua" => Ok(OutputFormat::Lua),
            "table" => Ok(OutputFormat::Table),
            "ttable" => Ok(OutputFormat::TTable),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(()),
        }
    }
}

/// Renders the results of one input line.
pub fn render(values: &[Value], format: OutputFormat, table: &TableOptions) -> String {
    match format {
        OutputFormat::Lua => lua::render(values),
        OutputFormat::Yaml => yaml::render(values),
        OutputFormat::Table => table::render(&blocks::build(values), table, false),
        OutputFormat::TTable => table::render(&blocks::build(values), table, true),
    }
}
