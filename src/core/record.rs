//! Selection records written by the forwarding script.
//!
//! A record is one line of text with three fields joined by [`FIELD_SEPARATOR`]:
//!
//! ```text
//! <command>$$<working directory>$$<argument>
//! ```
//!
//! # Public API
//! - [`SelectionCommand`]: The record tag (`open`, `add`, `rg`)
//! - [`SelectionRecord`]: A parsed record
//! - [`Location`]: The `path:line:column` argument of an `rg` record
//!
//! Parsing never fails loudly: anything that is not a well-formed record with
//! a non-empty argument parses to `None`, the same outcome as a user who
//! dismissed the selector.

use crate::core::error::QuickOpenError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Separator between the three record fields.
pub const FIELD_SEPARATOR: &str = "$$";

/// What the host should do with a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCommand {
    /// Open the selected file
    Open,
    /// Add the selected directory as a workspace folder
    Add,
    /// Open a ripgrep match at its line and column
    Rg,
}

impl SelectionCommand {
    pub fn tag(&self) -> &'static str {
        match self {
            SelectionCommand::Open => "open",
            SelectionCommand::Add => "add",
            SelectionCommand::Rg => "rg",
        }
    }
}

impl fmt::Display for SelectionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SelectionCommand {
    type Err = QuickOpenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(SelectionCommand::Open),
            "add" => Ok(SelectionCommand::Add),
            "rg" => Ok(SelectionCommand::Rg),
            other => Err(QuickOpenError::invalid_tag(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRecord {
    pub command: SelectionCommand,
    pub working_directory: PathBuf,
    pub argument: String,
}

impl SelectionRecord {
    /// Parse one record line.
    ///
    /// The line must split into exactly three fields. A path that itself
    /// contains the separator therefore produces a dropped record.
    pub fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.trim().split(FIELD_SEPARATOR).map(str::trim).collect();
        let [command, working_directory, argument] = fields.as_slice() else {
            log::debug!(
                "Dropping selection with {} field(s): {:?}",
                fields.len(),
                line
            );
            return None;
        };

        if argument.is_empty() {
            return None;
        }

        let command = match command.parse::<SelectionCommand>() {
            Ok(command) => command,
            Err(e) => {
                log::debug!("Dropping selection: {e}");
                return None;
            }
        };

        Some(Self {
            command,
            working_directory: PathBuf::from(working_directory),
            argument: (*argument).to_string(),
        })
    }

    /// Serialize the record in the forwarding script's wire format.
    pub fn to_line(&self) -> String {
        format_record(
            self.command.tag(),
            &self.working_directory.to_string_lossy(),
            &self.argument,
        )
    }

    /// Resolve the argument as a path against the working directory.
    pub fn resolve(&self, argument: &str) -> Option<PathBuf> {
        resolve_existing(argument, &self.working_directory)
    }
}

/// Format a record line as the forwarding script writes it.
pub fn format_record(tag: &str, working_directory: &str, selection: &str) -> String {
    format!("{tag}{FIELD_SEPARATOR}{working_directory}{FIELD_SEPARATOR}{selection}")
}

/// Join `argument` onto `working_directory` unless it is absolute, and keep it
/// only when the result exists.
pub fn resolve_existing(argument: &str, working_directory: &Path) -> Option<PathBuf> {
    let candidate = Path::new(argument);
    let path = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        working_directory.join(candidate)
    };

    path.exists().then_some(path)
}

/// A 1-based `path:line:column` location from ripgrep's `--vimgrep` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Parse `path:line:column[:text]`.
    ///
    /// Anything after the third field is matched text and is ignored. A leading
    /// single-letter field followed by a path separator is a Windows drive
    /// prefix and stays part of the path.
    pub fn parse(argument: &str) -> Option<Self> {
        let mut fields = argument.split(':');
        let mut path = fields.next()?.to_string();

        let mut line = fields.next()?;
        if is_drive_prefix(&path, line) {
            path = format!("{path}:{line}");
            line = fields.next()?;
        }
        let column = fields.next()?;

        let line = line.trim().parse::<usize>().ok().filter(|&n| n > 0)?;
        let column = column.trim().parse::<usize>().ok().filter(|&n| n > 0)?;

        Some(Self { path, line, column })
    }

    /// Zero-based `(line, column)` of the location.
    pub fn zero_based(&self) -> (usize, usize) {
        (self.line - 1, self.column - 1)
    }
}

fn is_drive_prefix(first: &str, next: &str) -> bool {
    first.len() == 1
        && first.chars().all(|c| c.is_ascii_alphabetic())
        && (next.starts_with('\\') || next.starts_with('/'))
}
