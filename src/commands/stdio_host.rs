//! JSON-lines editor host used by `fzf-quick-open serve`.
//!
//! The editor plugin writes [`HostMessage`]s to our stdin and executes the
//! [`HostAction`]s we print on stdout, one JSON object per line:
//!
//! ```text
//! → {"type":"runFzfFile","pwd":false}
//! ← {"type":"showTerminal","name":"fzf terminal"}
//! ← {"type":"sendText","name":"fzf terminal","text":"fzf | ..."}
//! ← {"type":"openDocument","path":"/work/app/src/main.rs"}
//! ```
//!
//! Editor state the session queries (open terminals, active editor, workspace
//! folders) is mirrored from the messages the plugin sends.

use crate::core::config::Settings;
use crate::core::error::{QuickOpenError, Result};
use crate::core::host::{CaretPosition, EditorHost};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Messages from the editor plugin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    RunFzfFile {
        #[serde(default)]
        pwd: bool,
    },
    RunFzfAddWorkspaceFolder {
        #[serde(default)]
        pwd: bool,
    },
    RunFzfSearch {
        #[serde(default)]
        pwd: bool,
        /// Pattern the plugin already prompted for.
        #[serde(default)]
        pattern: Option<String>,
    },
    TerminalOpened {
        name: String,
    },
    TerminalClosed {
        name: String,
    },
    ActiveTerminal {
        #[serde(default)]
        name: Option<String>,
    },
    ActiveEditor {
        #[serde(default)]
        path: Option<PathBuf>,
        #[serde(default)]
        selection: Option<String>,
    },
    WorkspaceFolders {
        paths: Vec<PathBuf>,
    },
    /// New settings, or `null` to reload them from disk.
    ConfigurationChanged {
        #[serde(default)]
        settings: Option<Settings>,
    },
    Shutdown,
}

impl HostMessage {
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line).map_err(QuickOpenError::host_protocol)
    }
}

/// Actions for the editor plugin to perform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostAction {
    Ready {
        channel: Option<String>,
    },
    CreateTerminal {
        name: String,
        cwd: Option<PathBuf>,
    },
    ShowTerminal {
        name: String,
    },
    HideTerminal {
        name: String,
    },
    SendText {
        name: String,
        text: String,
    },
    OpenDocument {
        path: PathBuf,
    },
    SetCaret {
        line: usize,
        column: usize,
    },
    RevealRange {
        line: usize,
        column: usize,
    },
    AddWorkspaceFolder {
        path: PathBuf,
    },
    FocusExplorer,
}

pub struct StdioHost<W: Write> {
    out: W,
    terminals: Vec<String>,
    active_terminal: Option<String>,
    active_document: Option<PathBuf>,
    selection: Option<String>,
    workspace_folders: Vec<PathBuf>,
    pending_pattern: Option<String>,
}

impl<W: Write> StdioHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            terminals: Vec::new(),
            active_terminal: None,
            active_document: None,
            selection: None,
            workspace_folders: Vec::new(),
            pending_pattern: None,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Tell the plugin the session is up and where selections arrive.
    pub fn announce_ready(&mut self, channel: Option<&str>) -> Result<()> {
        self.emit(&HostAction::Ready {
            channel: channel.map(str::to_string),
        })
    }

    /// Pattern answered by the next search prompt.
    pub fn set_pending_pattern(&mut self, pattern: Option<String>) {
        self.pending_pattern = pattern;
    }

    /// Update the mirrored editor state from a plugin message.
    pub fn observe(&mut self, message: &HostMessage) {
        match message {
            HostMessage::TerminalOpened { name } => {
                if !self.terminals.contains(name) {
                    self.terminals.push(name.clone());
                }
            }
            HostMessage::TerminalClosed { name } => {
                self.terminals.retain(|open| open != name);
                if self.active_terminal.as_ref() == Some(name) {
                    self.active_terminal = None;
                }
            }
            HostMessage::ActiveTerminal { name } => self.active_terminal = name.clone(),
            HostMessage::ActiveEditor { path, selection } => {
                self.active_document = path.clone();
                self.selection = selection.clone().filter(|s| !s.trim().is_empty());
            }
            HostMessage::WorkspaceFolders { paths } => self.workspace_folders = paths.clone(),
            _ => {}
        }
    }

    fn emit(&mut self, action: &HostAction) -> Result<()> {
        serde_json::to_writer(&mut self.out, action)?;
        writeln!(self.out).map_err(QuickOpenError::host_write)?;
        self.out.flush().map_err(QuickOpenError::host_write)
    }
}

impl<W: Write> EditorHost for StdioHost<W> {
    fn terminals(&self) -> Vec<String> {
        self.terminals.clone()
    }

    fn active_terminal(&self) -> Option<String> {
        self.active_terminal.clone()
    }

    fn create_terminal(&mut self, name: &str, cwd: Option<&Path>) -> Result<()> {
        self.emit(&HostAction::CreateTerminal {
            name: name.to_string(),
            cwd: cwd.map(Path::to_path_buf),
        })?;
        if !self.terminals.iter().any(|open| open == name) {
            self.terminals.push(name.to_string());
        }
        Ok(())
    }

    fn show_terminal(&mut self, name: &str) -> Result<()> {
        self.emit(&HostAction::ShowTerminal {
            name: name.to_string(),
        })?;
        self.active_terminal = Some(name.to_string());
        Ok(())
    }

    fn hide_terminal(&mut self, name: &str) -> Result<()> {
        self.emit(&HostAction::HideTerminal {
            name: name.to_string(),
        })
    }

    fn send_text(&mut self, name: &str, text: &str) -> Result<()> {
        self.emit(&HostAction::SendText {
            name: name.to_string(),
            text: text.to_string(),
        })
    }

    fn open_document(&mut self, path: &Path) -> Result<()> {
        self.emit(&HostAction::OpenDocument {
            path: path.to_path_buf(),
        })?;
        self.active_document = Some(path.to_path_buf());
        Ok(())
    }

    fn set_caret(&mut self, position: CaretPosition) -> Result<()> {
        self.emit(&HostAction::SetCaret {
            line: position.line,
            column: position.column,
        })
    }

    fn reveal(&mut self, position: CaretPosition) -> Result<()> {
        self.emit(&HostAction::RevealRange {
            line: position.line,
            column: position.column,
        })
    }

    fn workspace_folders(&self) -> Vec<PathBuf> {
        self.workspace_folders.clone()
    }

    fn add_workspace_folder(&mut self, path: &Path) -> Result<()> {
        self.emit(&HostAction::AddWorkspaceFolder {
            path: path.to_path_buf(),
        })?;
        self.workspace_folders.push(path.to_path_buf());
        Ok(())
    }

    fn focus_explorer(&mut self) -> Result<()> {
        self.emit(&HostAction::FocusExplorer)
    }

    fn active_document(&self) -> Option<PathBuf> {
        self.active_document.clone()
    }

    fn selected_text(&self) -> Option<String> {
        self.selection.clone()
    }

    fn prompt_search_pattern(&mut self, initial: Option<&str>) -> Option<String> {
        self.pending_pattern
            .take()
            .or_else(|| initial.map(str::to_string))
    }
}
