//! Configuration management for tconsole.
//!
//! Loads configuration from ${TCONSOLE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item};

use crate::eval::Language;
use crate::render::{OutputFormat, TableDialect};

/// Default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Copies the generated `[console]` values into the template's `[console]`
/// table. Keys keep their template comments; keys commented out in the
/// template are appended.
fn fill_console_table(template: &mut DocumentMut, generated: &DocumentMut) -> Result<()> {
    let target = template
        .get_mut("console")
        .and_then(Item::as_table_mut)
        .context("Default config template has no [console] table")?;
    let source = generated
        .get("console")
        .and_then(Item::as_table)
        .context("Generated config has no [console] table")?;
    for (key, value) in source {
        target[key] = value.clone();
    }
    Ok(())
}

pub mod paths {
    //! Path resolution for tconsole configuration.
    //!
    //! TCONSOLE_HOME resolution order:
    //! 1. TCONSOLE_HOME environment variable (if set)
    //! 2. ~/.config/tconsole (default)

    use std::path::PathBuf;

    /// Returns the tconsole home directory.
    ///
    /// Falls back to a relative `.tconsole` when no home directory is known.
    pub fn tconsole_home() -> PathBuf {
        if let Ok(home) = std::env::var("TCONSOLE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".tconsole"),
            |h| h.join(".config").join("tconsole"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        tconsole_home().join("config.toml")
    }
}

/// Startup defaults of a console session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub output: OutputFormat,
    pub table_format: TableDialect,
    pub graphics: bool,
    /// Maximum cell width, 0 disables wrapping.
    pub table_column_width: usize,
    pub language: Language,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::Yaml,
            table_format: TableDialect::Default,
            graphics: true,
            table_column_width: 0,
            language: Language::Lua,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub console: ConsoleConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Uses the embedded template for structure/comments and merges
    /// generated values from `Config::default()` into it.
    pub fn generate() -> Result<String> {
        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        fill_console_table(&mut doc, &generated_doc)?;

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.console.output, OutputFormat::Yaml);
        assert!(config.console.graphics);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[console]\noutput = \"ttable\"\ntable_column_width = 10\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.console.output, OutputFormat::TTable);
        assert_eq!(config.console.table_column_width, 10);
        assert_eq!(config.console.table_format, TableDialect::Default);
        assert_eq!(config.console.language, Language::Lua);
    }

    #[test]
    fn test_load_rejects_unknown_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[console]\noutput = \"csv\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("[console]"));
        assert!(contents.contains("# table_column_width ="));
        assert_eq!(Config::load_from(&config_path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_generate_matches_defaults() {
        let generated = Config::generate().unwrap();
        assert!(generated.contains("output = \"yaml\""));
        assert!(generated.contains("table_format = \"default\""));
        assert!(generated.contains("graphics = true"));

        let parsed: Config = toml::from_str(&generated).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_generate_keeps_comments_and_fills_commented_keys() {
        let generated = Config::generate().unwrap();
        assert!(generated.contains("# Input language: \"lua\" or \"sql\".\nlanguage = \"lua\""));
        assert!(generated.contains("\ntable_column_width = 0"));
        assert_eq!(generated.matches("[console]").count(), 1);
    }
}
