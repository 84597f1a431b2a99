use crate::core::dirs::get_settings_file;
use crate::core::error::QuickOpenError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings as written in `config.json`.
///
/// Key names follow the editor extension's setting names so an editor plugin
/// can forward its configuration section verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub fuzzy_cmd: String,
    pub find_directories_cmd: String,
    pub use_workspace_folders_fzf: bool,
    pub use_workspace_folders_rg: bool,
    pub force_ignore_file: bool,
    pub close_terminal_after_search: bool,
    pub initial_working_directory: String,
    pub ripgrep_search_style: String,
    pub ripgrep_options: String,
    /// Shell used by the editor's integrated terminal on Windows.
    pub windows_shell: Option<String>,
    /// External forwarding script used instead of `fzf-quick-open topipe`.
    pub forward_script: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fuzzy_cmd: "fzf".to_string(),
            find_directories_cmd: "find . -type d".to_string(),
            use_workspace_folders_fzf: false,
            use_workspace_folders_rg: false,
            force_ignore_file: false,
            close_terminal_after_search: false,
            initial_working_directory: String::new(),
            ripgrep_search_style: "Case sensitive".to_string(),
            ripgrep_options: String::new(),
            windows_shell: None,
            forward_script: None,
        }
    }
}

impl Settings {
    /// Load settings from an explicit path. The file must exist.
    pub fn load(path: &Path) -> Result<Self, QuickOpenError> {
        if !path.exists() {
            return Err(QuickOpenError::settings_not_found(path));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| QuickOpenError::settings_read_failed(path, e))?;
        serde_json::from_str(&content).map_err(|e| QuickOpenError::settings_parse_failed(path, e))
    }

    /// Load the settings file from the config directory, falling back to
    /// defaults when it has not been written yet.
    pub fn load_or_default() -> Result<Self, QuickOpenError> {
        let settings_file = get_settings_file()?;

        if settings_file.exists() {
            Self::load(&settings_file)
        } else {
            log::debug!(
                "No settings file at {}, using defaults",
                settings_file.display()
            );
            Ok(Self::default())
        }
    }

    /// Resolve the settings source used by the CLI.
    pub fn from_cli(path: Option<&Path>) -> Result<Self, QuickOpenError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load_or_default(),
        }
    }
}
