//! Line-oriented console.
//!
//! Each input line is either a backslash command, which changes the session
//! or prints a reference screen, or an expression handed to the evaluator and
//! printed in the session's output format.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

pub mod command;
pub mod session;

use self::session::{Action, Session};
use crate::eval::Evaluator;
use crate::interrupt::{self, InterruptedError};
use crate::render::{self, OutputFormat, yaml};
use crate::value::Value;

const ERROR_GLYPH: &str = "⨯";
const INFO_GLYPH: &str = "•";

/// Whether the console keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Formats a status line: glyph right-aligned in 4 columns, message padded to 25.
fn status_line(glyph: &str, message: &str) -> String {
    format!("{glyph:>4} {message:<25}\n")
}

pub struct Console<E, W> {
    evaluator: E,
    out: W,
    session: Session,
    prompt: Option<String>,
}

impl<E: Evaluator, W: Write> Console<E, W> {
    pub fn new(evaluator: E, out: W, session: Session) -> Self {
        Self {
            evaluator,
            out,
            session,
            prompt: None,
        }
    }

    /// Shows `prompt` before every line and treats Ctrl+C as "drop this line".
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Handles one input line and writes its output.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim_end_matches(['\n', '\r']);
        let text = if command::is_command(line) {
            match command::parse(line) {
                Ok(cmd) => match self.session.apply(cmd) {
                    Action::None => String::new(),
                    Action::Help => command::help_text(),
                    Action::Shortcuts => {
                        yaml::render(&[Value::Array(vec![Value::string(command::SHORTCUTS)])])
                    }
                    Action::Quit => {
                        self.write(&status_line(INFO_GLYPH, "Quit from the console"))?;
                        return Ok(Flow::Quit);
                    }
                },
                Err(err) => {
                    debug!(%line, %err, "rejected console command");
                    status_line(ERROR_GLYPH, &err.to_string()) + "\n"
                }
            }
        } else {
            self.evaluate(line)
        };
        self.write(&text)?;
        Ok(Flow::Continue)
    }

    fn evaluate(&mut self, line: &str) -> String {
        let values = self.evaluator.evaluate(line, self.session.language);
        debug!(count = values.len(), format = %self.session.output, "evaluated line");
        let mut text = render::render(&values, self.session.output, &self.session.table);
        if self.session.output == OutputFormat::Yaml {
            text.push('\n');
        }
        text
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
            .context("Failed to write console output")
    }

    /// Reads lines until end of input or `\quit`.
    ///
    /// Without a prompt a Ctrl+C stops the run with [`InterruptedError`].
    pub fn run<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut line = String::new();
        loop {
            if let Some(prompt) = self.prompt.clone() {
                self.write(&prompt)?;
            }
            line.clear();
            let read = reader
                .read_line(&mut line)
                .context("Failed to read console input")?;
            if interrupt::is_interrupted() {
                if self.prompt.is_none() {
                    return Err(InterruptedError.into());
                }
                interrupt::reset();
                self.write("\n")?;
                continue;
            }
            if read == 0 {
                return Ok(());
            }
            if self.handle_line(&line)? == Flow::Quit {
                return Ok(());
            }
        }
    }
}
