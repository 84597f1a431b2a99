//! Session configuration snapshot.
//!
//! [`SessionConfig`] is everything the command composer needs, derived in one
//! step from the user [`Settings`], the workspace folders and the platform. The
//! session replaces the whole snapshot whenever one of those inputs changes, so
//! no half-updated configuration is ever observed.

use crate::core::config::Settings;
use std::path::PathBuf;

/// Operating system family the pipelines are composed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }
}

/// Shell family that will run the composed pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Posix,
    /// `cmd.exe`: no single quotes, backslashes are literal
    WindowsCmd,
    /// Any other Windows shell: single quotes, backslashes need doubling
    WindowsOther,
}

impl ShellKind {
    pub fn detect(platform: Platform, windows_shell: Option<&str>) -> Self {
        match platform {
            Platform::Posix => ShellKind::Posix,
            Platform::Windows => {
                let is_cmd = windows_shell
                    .map(|shell| shell.trim().to_lowercase().ends_with("cmd.exe"))
                    .unwrap_or(false);
                if is_cmd {
                    ShellKind::WindowsCmd
                } else {
                    ShellKind::WindowsOther
                }
            }
        }
    }

    pub fn quote_char(&self) -> char {
        match self {
            ShellKind::WindowsCmd => '"',
            ShellKind::Posix | ShellKind::WindowsOther => '\'',
        }
    }

    pub fn needs_backslash_escape(&self) -> bool {
        matches!(self, ShellKind::WindowsOther)
    }
}

/// ripgrep case handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStyle {
    #[default]
    CaseSensitive,
    IgnoreCase,
    SmartCase,
}

impl SearchStyle {
    /// Map the setting's display name; unknown names fall back to case sensitive.
    pub fn from_setting(value: &str) -> Self {
        match value.trim() {
            "Ignore case" => SearchStyle::IgnoreCase,
            "Smart case" => SearchStyle::SmartCase,
            _ => SearchStyle::CaseSensitive,
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            SearchStyle::CaseSensitive => "--case-sensitive",
            SearchStyle::IgnoreCase => "--ignore-case",
            SearchStyle::SmartCase => "--smart-case",
        }
    }
}

/// Immutable snapshot consumed by the command composer.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub fuzzy_cmd: String,
    pub find_directories_cmd: String,
    /// Candidate enumerator piped into the selector for file-open pipelines.
    pub fzf_input_cmd: Option<String>,
    /// Workspace folders, each quoted, joined by spaces.
    pub workspace_folder_paths: Option<String>,
    pub rg_flags: String,
    pub shell: ShellKind,
    pub use_workspace_folders_fzf: bool,
    pub use_workspace_folders_rg: bool,
    pub force_ignore_file: bool,
    pub close_terminal_after_search: bool,
    pub initial_working_directory: Option<PathBuf>,
}

impl SessionConfig {
    pub fn resolve(settings: &Settings, workspace_folders: &[PathBuf], platform: Platform) -> Self {
        let shell = ShellKind::detect(platform, settings.windows_shell.as_deref());

        let style = SearchStyle::from_setting(&settings.ripgrep_search_style);
        let rg_flags = format!("{} {}", style.flag(), settings.ripgrep_options)
            .trim()
            .to_string();

        let uses_workspace_folders =
            settings.use_workspace_folders_fzf || settings.use_workspace_folders_rg;
        let workspace_folder_paths = (uses_workspace_folders && !workspace_folders.is_empty())
            .then(|| {
                workspace_folders
                    .iter()
                    .map(|folder| quote(shell, &folder.to_string_lossy()))
                    .collect::<Vec<_>>()
                    .join(" ")
            });

        let fzf_input_cmd = workspace_folder_paths
            .as_deref()
            .filter(|_| settings.use_workspace_folders_fzf)
            .map(|paths| {
                let mut parts = vec![
                    "fd".to_string(),
                    quote(shell, ".*"),
                    paths.to_string(),
                    "--type f".to_string(),
                ];
                if settings.force_ignore_file {
                    parts.push(IGNORE_FILE_FLAG.to_string());
                }
                parts.join(" ")
            });

        let initial_working_directory = Some(settings.initial_working_directory.trim())
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Self {
            fuzzy_cmd: settings.fuzzy_cmd.clone(),
            find_directories_cmd: settings.find_directories_cmd.clone(),
            fzf_input_cmd,
            workspace_folder_paths,
            rg_flags,
            shell,
            use_workspace_folders_fzf: settings.use_workspace_folders_fzf,
            use_workspace_folders_rg: settings.use_workspace_folders_rg,
            force_ignore_file: settings.force_ignore_file,
            close_terminal_after_search: settings.close_terminal_after_search,
            initial_working_directory,
        }
    }
}

/// Flag passed to fd and rg when the ignore file is enforced.
pub const IGNORE_FILE_FLAG: &str = "--ignore-file .ignore";

/// Wrap `value` in the shell's quote character, escaping embedded quotes.
pub fn quote(shell: ShellKind, value: &str) -> String {
    let q = shell.quote_char();
    let escaped = match q {
        '\'' => value.replace('\'', r"'\''"),
        _ => value.replace('"', r#"\""#),
    };
    format!("{q}{escaped}{q}")
}
