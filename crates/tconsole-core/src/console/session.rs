//! Per-session console settings.

use tracing::debug;

use super::command::Command;
use crate::config::ConsoleConfig;
use crate::eval::Language;
use crate::render::{OutputFormat, TableOptions};

/// What the console has to do after a command was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Help,
    Shortcuts,
    Quit,
}

/// Settings read by the renderers, changed only by backslash commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub language: Language,
    pub output: OutputFormat,
    pub table: TableOptions,
}

impl Session {
    /// Session seeded from configured defaults.
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self {
            language: config.language,
            output: config.output,
            table: TableOptions {
                dialect: config.table_format,
                graphics: config.graphics,
                column_width: config.table_column_width,
            },
        }
    }

    /// Applies a validated command.
    pub fn apply(&mut self, command: Command) -> Action {
        debug!(?command, "apply console command");
        match command {
            Command::Help => return Action::Help,
            Command::Shortcuts => return Action::Shortcuts,
            Command::Quit => return Action::Quit,
            Command::SetLanguage(language) => self.language = language,
            Command::SetOutput(format) => self.output = format,
            Command::SetTableFormat(dialect) => self.table.dialect = dialect,
            Command::SetGraphics(enabled) => self.table.graphics = enabled,
            Command::SetColumnWidth(width) => self.table.column_width = width,
            Command::CycleOutput => self.output = self.output.next(),
        }
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TableDialect;

    #[test]
    fn test_defaults() {
        let session = Session::default();
        assert_eq!(session.output, OutputFormat::Yaml);
        assert_eq!(session.language, Language::Lua);
        assert_eq!(session.table.dialect, TableDialect::Default);
        assert!(session.table.graphics);
        assert_eq!(session.table.column_width, 0);
    }

    #[test]
    fn test_cycle_four_times_restores_format() {
        let mut session = Session::default();
        let seen: Vec<OutputFormat> = (0..4)
            .map(|_| {
                session.apply(Command::CycleOutput);
                session.output
            })
            .collect();
        assert_eq!(
            seen,
            vec![
                OutputFormat::Lua,
                OutputFormat::Table,
                OutputFormat::TTable,
                OutputFormat::Yaml
            ]
        );
    }

    #[test]
    fn test_setters() {
        let mut session = Session::default();
        assert_eq!(session.apply(Command::SetGraphics(false)), Action::None);
        assert_eq!(session.apply(Command::SetColumnWidth(7)), Action::None);
        session.apply(Command::SetTableFormat(TableDialect::Markdown));
        session.apply(Command::SetLanguage(Language::Sql));
        assert!(!session.table.graphics);
        assert_eq!(session.table.column_width, 7);
        assert_eq!(session.table.dialect, TableDialect::Markdown);
        assert_eq!(session.language, Language::Sql);
    }

    #[test]
    fn test_actions_leave_state_alone() {
        let mut session = Session::default();
        let before = session;
        assert_eq!(session.apply(Command::Help), Action::Help);
        assert_eq!(session.apply(Command::Shortcuts), Action::Shortcuts);
        assert_eq!(session.apply(Command::Quit), Action::Quit);
        assert_eq!(session, before);
    }

    #[test]
    fn test_from_config() {
        let config = ConsoleConfig {
            output: OutputFormat::Table,
            table_format: TableDialect::Jira,
            graphics: false,
            table_column_width: 12,
            language: Language::Lua,
        };
        let session = Session::from_config(&config);
        assert_eq!(session.output, OutputFormat::Table);
        assert_eq!(session.table.dialect, TableDialect::Jira);
        assert!(!session.table.graphics);
        assert_eq!(session.table.column_width, 12);
    }
}
