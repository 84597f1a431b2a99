//! The editor surface this crate drives.
//!
//! [`EditorHost`] is the narrow interface to the editor UI: terminals,
//! documents, workspace folders and the few queries the commands need.
//! Terminals are identified by name.

use crate::core::error::Result;
use std::path::{Path, PathBuf};

/// Name of the terminal rooted at the workspace.
pub const TERMINAL_NAME: &str = "fzf terminal";
/// Name of the terminal that follows the active file's directory.
pub const TERMINAL_NAME_PWD: &str = "fzf pwd terminal";

/// The two terminals managed by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    Workspace,
    CurrentFileDir,
}

impl TerminalKind {
    pub fn name(&self) -> &'static str {
        match self {
            TerminalKind::Workspace => TERMINAL_NAME,
            TerminalKind::CurrentFileDir => TERMINAL_NAME_PWD,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            TERMINAL_NAME => Some(TerminalKind::Workspace),
            TERMINAL_NAME_PWD => Some(TerminalKind::CurrentFileDir),
            _ => None,
        }
    }

    /// Select the kind from the `pwd` flag carried by editor commands.
    pub fn from_pwd(pwd: bool) -> Self {
        if pwd {
            TerminalKind::CurrentFileDir
        } else {
            TerminalKind::Workspace
        }
    }
}

/// Zero-based caret position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretPosition {
    pub line: usize,
    pub column: usize,
}

pub trait EditorHost {
    /// Names of the currently open terminals.
    fn terminals(&self) -> Vec<String>;

    fn active_terminal(&self) -> Option<String>;

    /// Create a terminal. `cwd` of `None` leaves the choice to the editor.
    fn create_terminal(&mut self, name: &str, cwd: Option<&Path>) -> Result<()>;

    fn show_terminal(&mut self, name: &str) -> Result<()>;

    fn hide_terminal(&mut self, name: &str) -> Result<()>;

    /// Send a line of text to a terminal for execution.
    fn send_text(&mut self, name: &str, text: &str) -> Result<()>;

    fn open_document(&mut self, path: &Path) -> Result<()>;

    /// Collapse the selection of the active document to `position`.
    fn set_caret(&mut self, position: CaretPosition) -> Result<()>;

    fn reveal(&mut self, position: CaretPosition) -> Result<()>;

    fn workspace_folders(&self) -> Vec<PathBuf>;

    /// Append a folder after the existing workspace folders.
    fn add_workspace_folder(&mut self, path: &Path) -> Result<()>;

    fn focus_explorer(&mut self) -> Result<()>;

    /// Path of the document in the active editor.
    fn active_document(&self) -> Option<PathBuf>;

    /// Selected text of the active editor, or the word under the cursor when
    /// the selection is empty.
    fn selected_text(&self) -> Option<String>;

    /// Ask the user for a search pattern. `None` means the prompt was dismissed.
    fn prompt_search_pattern(&mut self, initial: Option<&str>) -> Option<String>;
}
