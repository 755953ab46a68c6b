//! Console command handler.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};

use anyhow::{Context, Result};
use tconsole_core::config::Config;
use tconsole_core::console::Console;
use tconsole_core::console::session::Session;
use tconsole_core::eval::LiteralEvaluator;
use tracing::debug;

use crate::cli::ConsoleArgs;

const PROMPT: &str = "tconsole> ";

pub fn run(args: &ConsoleArgs) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::from_config(&config.console);
    apply_overrides(&mut session, args);
    debug!(?session, "starting console");

    let mut console = Console::new(LiteralEvaluator::new(), io::stdout().lock(), session);

    if let Some(path) = &args.file {
        let file = File::open(path)
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        return console.run(BufReader::new(file));
    }

    let stdin = io::stdin();
    let mut console = if stdin.is_terminal() {
        console.with_prompt(PROMPT)
    } else {
        console
    };
    console.run(stdin.lock())
}

fn apply_overrides(session: &mut Session, args: &ConsoleArgs) {
    if let Some(output) = args.output {
        session.output = output;
    }
    if let Some(language) = args.language {
        session.language = language;
    }
    if let Some(dialect) = args.table_format {
        session.table.dialect = dialect;
    }
    if args.no_graphics {
        session.table.graphics = false;
    }
    if let Some(width) = args.column_width {
        session.table.column_width = width;
    }
}
