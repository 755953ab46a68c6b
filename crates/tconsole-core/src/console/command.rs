//! Backslash command parsing.
//!
//! A line is a command when its first token starts with `\` or is `?`.
//! Parsing is single-shot: the first token selects the command, the rest are
//! positional arguments validated per command.

use thiserror::Error;

use crate::eval::Language;
use crate::render::{OutputFormat, TableDialect};

/// Options of `\set`, in the order they are listed on error.
const SET_OPTIONS: &[&str] = &[
    "graphics",
    "language",
    "output",
    "table_column_width",
    "table_format",
];

/// A validated backslash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    SetLanguage(Language),
    SetOutput(OutputFormat),
    SetTableFormat(TableDialect),
    SetGraphics(bool),
    SetColumnWidth(usize),
    /// `\x`: switch to the next output format.
    CycleOutput,
    Shortcuts,
    Quit,
}

/// Why a backslash command was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("the command does not expect arguments")]
    UnexpectedArguments,
    #[error("the command expects one of: {}", .0.join(", "))]
    ExpectedOneOf(&'static [&'static str]),
    #[error("the command expects one boolean")]
    ExpectedBoolean,
    #[error("the command expects one unsigned number")]
    ExpectedUnsigned,
    #[error("unknown command: {0}")]
    Unknown(String),
}

/// Entry of the backslash command reference.
#[derive(Debug, Clone)]
pub struct CommandInfo {
    /// Usage as shown in help, e.g. `\set output <format>`.
    pub usage: &'static str,
    pub description: &'static str,
}

/// Commands listed by `\help`.
pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        usage: "\\help, ?",
        description: "show this screen",
    },
    CommandInfo {
        usage: "\\set language <language>",
        description: "set language lua (default) or sql",
    },
    CommandInfo {
        usage: "\\set output <format>",
        description: "set format lua, table, ttable or yaml (default)",
    },
    CommandInfo {
        usage: "\\set table_format <format>",
        description: "set table format default, jira or markdown",
    },
    CommandInfo {
        usage: "\\set graphics <false/true>",
        description: "disables/enables pseudographics for table modes",
    },
    CommandInfo {
        usage: "\\set table_column_width <width>",
        description: "set max column width for table/ttable",
    },
    CommandInfo {
        usage: "\\xw <width>",
        description: "set max column width for table/ttable",
    },
    CommandInfo {
        usage: "\\x",
        description: "switches output format cyclically",
    },
    CommandInfo {
        usage: "\\x[l,t,T,y]",
        description: "set output format lua, table, ttable or yaml",
    },
    CommandInfo {
        usage: "\\x[g,G]",
        description: "disables/enables pseudographics for table modes",
    },
    CommandInfo {
        usage: "\\shortcuts",
        description: "show available hotkeys and shortcuts",
    },
    CommandInfo {
        usage: "\\quit, \\q",
        description: "quit from the console",
    },
];

/// Hotkeys of the interactive line editor, printed by `\shortcuts`.
pub const SHORTCUTS: &str = "\
Available hotkeys and shortcuts:

   Ctrl + J / Ctrl + M [Enter] -- Enter the command
   Ctrl + A [Home]             -- Go to the beginning of the command
   Ctrl + E [End]              -- Go to the end of the command
   Ctrl + P [Up Arrow]         -- Previous command
   Ctrl + N [Down Arrow]       -- Next command
   Ctrl + F [Right Arrow]      -- Forward one character
   Ctrl + B [Left Arrow]       -- Backward one character
   Ctrl + H [Backspace]        -- Delete character before the cursor
   Ctrl + I [Tab]              -- Get next completion
   BackTab                     -- Get previous completion
   Ctrl + D                    -- Delete character under the cursor
   Ctrl + W                    -- Cut the word before the cursor
   Ctrl + K                    -- Cut the command after the cursor
   Ctrl + U                    -- Cut the command before the cursor
   Ctrl + L                    -- Clear the screen
   Ctrl + R                    -- Enter in the reverse search mode
   Ctrl + C                    -- Interrupt current unfinished expression
   Alt + B                     -- Move backwards one word
   Alt + F                     -- Move forwards one word
";

/// Returns the `\help` screen.
pub fn help_text() -> String {
    let mut out = String::from(
        "\n  To get help, see the Tarantool manual at https://tarantool.io/en/doc/\n  \
         To start the interactive Tarantool tutorial, type 'tutorial()' here.\n\n  \
         This help is expanded with additional backslash commands\n  \
         because tconsole is used.\n\n  \
         Available backslash commands:\n\n",
    );
    for command in COMMANDS {
        out.push_str(&format!("  {:<32}-- {}\n", command.usage, command.description));
    }
    out.push('\n');
    out
}

/// True when the line should be handled as a backslash command.
pub fn is_command(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('\\') || trimmed.split_whitespace().next() == Some("?")
}

/// Parses a backslash command line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().unwrap_or_default();
    let args: Vec<&str> = tokens.collect();

    match name {
        "\\help" | "?" => no_args(&args, Command::Help),
        "\\set" => parse_set(&args),
        "\\xw" => one_unsigned(&args).map(Command::SetColumnWidth),
        "\\x" => no_args(&args, Command::CycleOutput),
        "\\xl" => no_args(&args, Command::SetOutput(OutputFormat::Lua)),
        "\\xt" => no_args(&args, Command::SetOutput(OutputFormat::Table)),
        "\\xT" => no_args(&args, Command::SetOutput(OutputFormat::TTable)),
        "\\xy" => no_args(&args, Command::SetOutput(OutputFormat::Yaml)),
        "\\xg" => no_args(&args, Command::SetGraphics(false)),
        "\\xG" => no_args(&args, Command::SetGraphics(true)),
        "\\shortcuts" => no_args(&args, Command::Shortcuts),
        "\\quit" | "\\q" => no_args(&args, Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_set(args: &[&str]) -> Result<Command, CommandError> {
    let Some((option, rest)) = args.split_first() else {
        return Err(CommandError::ExpectedOneOf(SET_OPTIONS));
    };
    match *option {
        "language" => one_of(rest, Language::NAMES).map(Command::SetLanguage),
        "output" => one_of(rest, OutputFormat::NAMES).map(Command::SetOutput),
        "table_format" => one_of(rest, TableDialect::NAMES).map(Command::SetTableFormat),
        "graphics" => one_boolean(rest).map(Command::SetGraphics),
        "table_column_width" => one_unsigned(rest).map(Command::SetColumnWidth),
        _ => Err(CommandError::ExpectedOneOf(SET_OPTIONS)),
    }
}

fn no_args(args: &[&str], command: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::UnexpectedArguments)
    }
}

fn one_of<T: std::str::FromStr>(
    args: &[&str],
    names: &'static [&'static str],
) -> Result<T, CommandError> {
    match args {
        [value] => value
            .parse()
            .map_err(|_| CommandError::ExpectedOneOf(names)),
        _ => Err(CommandError::ExpectedOneOf(names)),
    }
}

fn one_boolean(args: &[&str]) -> Result<bool, CommandError> {
    match args {
        [value] => parse_bool(value).ok_or(CommandError::ExpectedBoolean),
        _ => Err(CommandError::ExpectedBoolean),
    }
}

fn one_unsigned(args: &[&str]) -> Result<usize, CommandError> {
    match args {
        [value] if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => {
            value.parse().map_err(|_| CommandError::ExpectedUnsigned)
        }
        _ => Err(CommandError::ExpectedUnsigned),
    }
}

/// Boolean spellings accepted by `\set graphics`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_text(line: &str) -> String {
        parse(line).unwrap_err().to_string()
    }

    #[test]
    fn test_valid_commands() {
        assert_eq!(parse("\\help"), Ok(Command::Help));
        assert_eq!(parse("?"), Ok(Command::Help));
        assert_eq!(
            parse("\\set output ttable"),
            Ok(Command::SetOutput(OutputFormat::TTable))
        );
        assert_eq!(
            parse("\\set table_format jira"),
            Ok(Command::SetTableFormat(TableDialect::Jira))
        );
        assert_eq!(
            parse("\\set language sql"),
            Ok(Command::SetLanguage(Language::Sql))
        );
        assert_eq!(parse("\\set graphics false"), Ok(Command::SetGraphics(false)));
        assert_eq!(parse("\\set graphics T"), Ok(Command::SetGraphics(true)));
        assert_eq!(
            parse("\\set table_column_width 1"),
            Ok(Command::SetColumnWidth(1))
        );
        assert_eq!(parse(" \\xw 5 "), Ok(Command::SetColumnWidth(5)));
        assert_eq!(parse("\\x"), Ok(Command::CycleOutput));
        assert_eq!(parse("\\xl"), Ok(Command::SetOutput(OutputFormat::Lua)));
        assert_eq!(parse("\\xt"), Ok(Command::SetOutput(OutputFormat::Table)));
        assert_eq!(parse("\\xT"), Ok(Command::SetOutput(OutputFormat::TTable)));
        assert_eq!(parse("\\xy"), Ok(Command::SetOutput(OutputFormat::Yaml)));
        assert_eq!(parse("\\xg"), Ok(Command::SetGraphics(false)));
        assert_eq!(parse("\\xG"), Ok(Command::SetGraphics(true)));
        assert_eq!(parse("\\shortcuts"), Ok(Command::Shortcuts));
        assert_eq!(parse("\\quit"), Ok(Command::Quit));
        assert_eq!(parse("\\q"), Ok(Command::Quit));
    }

    #[test]
    fn test_argument_errors() {
        let cases = [
            ("\\help arg", "the command does not expect arguments"),
            ("? arg", "the command does not expect arguments"),
            ("\\set language", "the command expects one of: lua, sql"),
            ("\\set language arg", "the command expects one of: lua, sql"),
            ("\\set language arg arg", "the command expects one of: lua, sql"),
            ("\\set language lua sql", "the command expects one of: lua, sql"),
            (
                "\\set output",
                "the command expects one of: lua, table, ttable, yaml",
            ),
            (
                "\\set output arg",
                "the command expects one of: lua, table, ttable, yaml",
            ),
            (
                "\\set table_format",
                "the command expects one of: default, jira, markdown",
            ),
            (
                "\\set table_format arg",
                "the command expects one of: default, jira, markdown",
            ),
            ("\\set graphics", "the command expects one boolean"),
            ("\\set graphics arg", "the command expects one boolean"),
            ("\\set table_column_width", "the command expects one unsigned number"),
            (
                "\\set table_column_width arg",
                "the command expects one unsigned number",
            ),
            ("\\xw", "the command expects one unsigned number"),
            ("\\xw arg", "the command expects one unsigned number"),
            ("\\xw -1", "the command expects one unsigned number"),
            ("\\xw +1", "the command expects one unsigned number"),
            ("\\x arg", "the command does not expect arguments"),
            ("\\xl arg", "the command does not expect arguments"),
            ("\\xt arg", "the command does not expect arguments"),
            ("\\xT arg", "the command does not expect arguments"),
            ("\\xy arg", "the command does not expect arguments"),
            ("\\xg arg", "the command does not expect arguments"),
            ("\\xG arg", "the command does not expect arguments"),
            ("\\shortcuts arg", "the command does not expect arguments"),
            ("\\quit arg", "the command does not expect arguments"),
            ("\\q arg", "the command does not expect arguments"),
        ];
        for (line, expected) in cases {
            assert_eq!(error_text(line), expected, "line: {line}");
        }
    }

    #[test]
    fn test_set_without_option_lists_options() {
        let expected =
            "the command expects one of: graphics, language, output, table_column_width, table_format";
        assert_eq!(error_text("\\set"), expected);
        assert_eq!(error_text("\\set colors on"), expected);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(error_text("\\nope"), "unknown command: \\nope");
    }

    #[test]
    fn test_is_command() {
        assert!(is_command("\\x"));
        assert!(is_command("  \\xw 5"));
        assert!(is_command("?"));
        assert!(is_command("? arg"));
        assert!(!is_command("2+2"));
        assert!(!is_command("?x"));
        assert!(!is_command(""));
    }

    #[test]
    fn test_help_lists_every_command_aligned() {
        let help = help_text();
        assert!(help.starts_with("\n  To get help"));
        assert!(help.ends_with("-- quit from the console\n\n"));
        assert!(help.contains("  \\help, ?                        -- show this screen\n"));
        assert!(
            help.contains("  \\set table_column_width <width> -- set max column width for table/ttable\n")
        );
        assert!(help.contains("  \\quit, \\q                       -- quit from the console\n"));
    }
}
