//! Recording editor host
//!
//! [`RecordingHost`] keeps just enough editor state for the session to query
//! and records every mutating call in order.

#![allow(dead_code)]

use fzf_quick_open::core::error::Result;
use fzf_quick_open::core::host::{CaretPosition, EditorHost};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    CreateTerminal { name: String, cwd: Option<PathBuf> },
    ShowTerminal(String),
    HideTerminal(String),
    SendText { name: String, text: String },
    OpenDocument(PathBuf),
    SetCaret(CaretPosition),
    Reveal(CaretPosition),
    AddWorkspaceFolder(PathBuf),
    FocusExplorer,
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    pub terminals: Vec<String>,
    pub active_terminal: Option<String>,
    pub workspace_folders: Vec<PathBuf>,
    pub active_document: Option<PathBuf>,
    pub selection: Option<String>,
    /// What the search prompt answers; `None` dismisses it.
    pub prompt_answer: Option<String>,
    /// Initial values the search prompt was opened with.
    pub prompted_with: Vec<Option<String>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace_folders(folders: &[&Path]) -> Self {
        Self {
            workspace_folders: folders.iter().map(|f| f.to_path_buf()).collect(),
            ..Self::default()
        }
    }

    /// Texts sent to a terminal, in order.
    pub fn sent_to(&self, terminal: &str) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::SendText { name, text } if name == terminal => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn created_terminals(&self) -> Vec<&HostCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::CreateTerminal { .. }))
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl EditorHost for RecordingHost {
    fn terminals(&self) -> Vec<String> {
        self.terminals.clone()
    }

    fn active_terminal(&self) -> Option<String> {
        self.active_terminal.clone()
    }

    fn create_terminal(&mut self, name: &str, cwd: Option<&Path>) -> Result<()> {
        self.calls.push(HostCall::CreateTerminal {
            name: name.to_string(),
            cwd: cwd.map(Path::to_path_buf),
        });
        self.terminals.push(name.to_string());
        Ok(())
    }

    fn show_terminal(&mut self, name: &str) -> Result<()> {
        self.calls.push(HostCall::ShowTerminal(name.to_string()));
        self.active_terminal = Some(name.to_string());
        Ok(())
    }

    fn hide_terminal(&mut self, name: &str) -> Result<()> {
        self.calls.push(HostCall::HideTerminal(name.to_string()));
        Ok(())
    }

    fn send_text(&mut self, name: &str, text: &str) -> Result<()> {
        self.calls.push(HostCall::SendText {
            name: name.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn open_document(&mut self, path: &Path) -> Result<()> {
        self.calls.push(HostCall::OpenDocument(path.to_path_buf()));
        self.active_document = Some(path.to_path_buf());
        Ok(())
    }

    fn set_caret(&mut self, position: CaretPosition) -> Result<()> {
        self.calls.push(HostCall::SetCaret(position));
        Ok(())
    }

    fn reveal(&mut self, position: CaretPosition) -> Result<()> {
        self.calls.push(HostCall::Reveal(position));
        Ok(())
    }

    fn workspace_folders(&self) -> Vec<PathBuf> {
        self.workspace_folders.clone()
    }

    fn add_workspace_folder(&mut self, path: &Path) -> Result<()> {
        self.calls.push(HostCall::AddWorkspaceFolder(path.to_path_buf()));
        self.workspace_folders.push(path.to_path_buf());
        Ok(())
    }

    fn focus_explorer(&mut self) -> Result<()> {
        self.calls.push(HostCall::FocusExplorer);
        Ok(())
    }

    fn active_document(&self) -> Option<PathBuf> {
        self.active_document.clone()
    }

    fn selected_text(&self) -> Option<String> {
        self.selection.clone()
    }

    fn prompt_search_pattern(&mut self, initial: Option<&str>) -> Option<String> {
        self.prompted_with.push(initial.map(str::to_string));
        self.prompt_answer.clone()
    }
}
