//! Terminal output for command results.

use std::io::{self, Write};

use colored::Colorize;

use crate::error::CliError;

/// Writes user-facing lines.
///
/// Results go to stdout and errors go to stderr. Only the status
/// marker is coloured so the message text stays greppable.
#[derive(Debug, Clone, Default)]
pub struct OutputManager;

impl OutputManager {
    pub fn new() -> Self {
        Self
    }

    /// Plain line on stdout.
    pub fn println(&self, message: &str) -> Result<(), CliError> {
        writeln!(io::stdout().lock(), "{message}")?;
        Ok(())
    }

    pub fn success(&self, message: &str) -> Result<(), CliError> {
        writeln!(io::stdout().lock(), "{} {}", "✓".green().bold(), message)?;
        Ok(())
    }

    pub fn error(&self, message: &str) -> Result<(), CliError> {
        writeln!(io::stderr().lock(), "{} {}", "✗".red().bold(), message)?;
        Ok(())
    }

    /// Bold heading on stdout.
    pub fn section(&self, title: &str) -> Result<(), CliError> {
        writeln!(io::stdout().lock(), "{}", title.bold())?;
        Ok(())
    }

    /// Indented line on stdout.
    pub fn indent(&self, message: &str) -> Result<(), CliError> {
        writeln!(io::stdout().lock(), "  {message}")?;
        Ok(())
    }
}
