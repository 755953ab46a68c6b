//! Expression evaluation seam.
//!
//! The console hands every non-command line to an [`Evaluator`] and renders
//! whatever values come back. Evaluation failures are values too
//! ([`Value::Error`]), so rendering never fails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value::Value;

mod lexer;
pub mod literal;

pub use literal::LiteralEvaluator;

/// Input language of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Lua,
    Sql,
}

impl Language {
    pub const NAMES: &[&str] = &["lua", "sql"];

    pub fn name(self) -> &'static str {
        match self {
            Language::Lua => "lua",
            Language::Sql => "sql",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lua" => Ok(Language::Lua),
            "sql" => Ok(Language::Sql),
            _ => Err(()),
        }
    }
}

/// Evaluates one input line.
pub trait Evaluator {
    /// Returns the values produced by `source`, one per result.
    ///
    /// A failed evaluation returns a single [`Value::Error`].
    fn evaluate(&mut self, source: &str, language: Language) -> Vec<Value>;
}
