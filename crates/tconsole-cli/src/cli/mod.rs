//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tconsole_core::eval::Language;
use tconsole_core::interrupt;
use tconsole_core::render::{OutputFormat, TableDialect};

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "tconsole")]
#[command(version)]
#[command(about = "Interactive console with lua, yaml and table output formats")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    console: ConsoleArgs,
}

/// Session overrides applied on top of the config file.
#[derive(clap::Args, Debug, Clone, Default)]
pub(crate) struct ConsoleArgs {
    /// Output format (lua, table, ttable, yaml)
    #[arg(short = 'x', long = "outputformat", value_name = "FORMAT", value_parser = parse_output)]
    output: Option<OutputFormat>,

    /// Input language (lua, sql)
    #[arg(short, long, value_parser = parse_language)]
    language: Option<Language>,

    /// Table dialect (default, jira, markdown)
    #[arg(long = "table-format", value_name = "DIALECT", value_parser = parse_dialect)]
    table_format: Option<TableDialect>,

    /// Draw tables without pseudographics
    #[arg(long = "no-graphics")]
    no_graphics: bool,

    /// Maximum table column width (0 disables wrapping)
    #[arg(long = "column-width", value_name = "WIDTH")]
    column_width: Option<usize>,

    /// Read input lines from a file instead of stdin
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults
    Generate,
}

fn expected_one_of(names: &[&str]) -> String {
    format!("expected one of: {}", names.join(", "))
}

fn parse_output(value: &str) -> Result<OutputFormat, String> {
    value
        .parse()
        .map_err(|()| expected_one_of(OutputFormat::NAMES))
}

fn parse_language(value: &str) -> Result<Language, String> {
    value
        .parse()
        .map_err(|()| expected_one_of(Language::NAMES))
}

fn parse_dialect(value: &str) -> Result<TableDialect, String> {
    value
        .parse()
        .map_err(|()| expected_one_of(TableDialect::NAMES))
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init();

    match cli.command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
        None => {
            interrupt::init()?;
            commands::console::run(&cli.console)
        }
    }
}
