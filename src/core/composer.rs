//! Shell pipeline composition.
//!
//! [`CommandComposer`] turns the current [`SessionConfig`] into the command
//! lines sent to the managed terminals. It performs no I/O: the same snapshot,
//! forwarder and channel address always produce the same strings.
//!
//! Every pipeline ends in the forwarder, which receives the record tag and the
//! channel address:
//!
//! ```text
//! fzf | "<fzf-quick-open>" topipe open "<channel>"
//! ```

use crate::core::config::Settings;
use crate::core::record::SelectionCommand;
use crate::core::session_config::{quote, SessionConfig, IGNORE_FILE_FLAG};
use std::path::Path;

/// Subcommand of this binary that implements the forwarding script.
pub const FORWARD_SUBCOMMAND: &str = "topipe";

/// Program run as the last pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forwarder {
    program: String,
    native: bool,
}

impl Forwarder {
    /// This binary, invoked through its `topipe` subcommand.
    pub fn native(exe: &Path) -> Self {
        Self {
            program: exe.to_string_lossy().into_owned(),
            native: true,
        }
    }

    /// An external script taking `<tag> <channel>` directly.
    pub fn script(path: impl Into<String>) -> Self {
        Self {
            program: path.into(),
            native: false,
        }
    }

    /// The configured script, or the running executable.
    pub fn from_settings(settings: &Settings) -> Self {
        if let Some(script) = settings.forward_script.as_deref().filter(|s| !s.trim().is_empty()) {
            return Self::script(script.trim());
        }
        match std::env::current_exe() {
            Ok(exe) => Self::native(&exe),
            Err(e) => {
                log::warn!("Cannot locate own executable, relying on PATH: {e}");
                Self::native(Path::new(env!("CARGO_PKG_NAME")))
            }
        }
    }
}

pub struct CommandComposer<'a> {
    config: &'a SessionConfig,
    forwarder: &'a Forwarder,
    channel: Option<&'a str>,
}

impl<'a> CommandComposer<'a> {
    /// `channel` is the bridge address, absent when the bridge could not be set up.
    pub fn new(
        config: &'a SessionConfig,
        forwarder: &'a Forwarder,
        channel: Option<&'a str>,
    ) -> Self {
        Self {
            config,
            forwarder,
            channel,
        }
    }

    /// Selector invocation, optionally fed by the workspace enumerator.
    pub fn fuzzy_cmd(&self, use_enumerator: bool) -> String {
        match self.config.fzf_input_cmd.as_deref() {
            Some(input) if use_enumerator => format!("{input} | {}", self.config.fuzzy_cmd),
            _ => self.config.fuzzy_cmd.clone(),
        }
    }

    /// Final pipeline stage handing the selection to the forwarder.
    pub fn forward_stage(&self, command: SelectionCommand) -> String {
        let channel = self.channel.unwrap_or_default();
        let subcommand = if self.forwarder.native {
            format!(" {FORWARD_SUBCOMMAND}")
        } else {
            String::new()
        };
        format!(
            "\"{}\"{} {} \"{}\"",
            self.escape_path(&self.forwarder.program),
            subcommand,
            command.tag(),
            self.escape_path(channel)
        )
    }

    pub fn file_open_pipeline(&self) -> String {
        format!(
            "{} | {}",
            self.fuzzy_cmd(true),
            self.forward_stage(SelectionCommand::Open)
        )
    }

    pub fn folder_add_pipeline(&self) -> String {
        format!(
            "{} | {} | {}",
            self.config.find_directories_cmd,
            self.fuzzy_cmd(false),
            self.forward_stage(SelectionCommand::Add)
        )
    }

    pub fn search_pipeline(&self, pattern: &str) -> String {
        let mut rg = vec!["rg".to_string(), quote(self.config.shell, pattern)];

        if self.config.use_workspace_folders_rg {
            if let Some(paths) = self.config.workspace_folder_paths.as_deref() {
                rg.push(paths.to_string());
            }
        }
        if !self.config.rg_flags.is_empty() {
            rg.push(self.config.rg_flags.clone());
        }
        rg.push("--vimgrep".to_string());
        rg.push("--color ansi".to_string());
        if self.config.force_ignore_file {
            rg.push(IGNORE_FILE_FLAG.to_string());
        }

        format!(
            "{} | {} --ansi | {}",
            rg.join(" "),
            self.fuzzy_cmd(false),
            self.forward_stage(SelectionCommand::Rg)
        )
    }

    /// Move a terminal into `dir` before running a pipeline there.
    pub fn change_directory(&self, dir: &Path) -> String {
        format!("cd {}", quote(self.config.shell, &dir.to_string_lossy()))
    }

    fn escape_path(&self, path: &str) -> String {
        if self.config.shell.needs_backslash_escape() {
            path.replace('\\', r"\\")
        } else {
            path.to_string()
        }
    }
}
