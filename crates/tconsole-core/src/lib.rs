//! Core tconsole library (values, renderers, backslash commands, evaluator, config).

pub mod config;
pub mod console;
pub mod eval;
pub mod interrupt;
pub mod render;
pub mod value;
