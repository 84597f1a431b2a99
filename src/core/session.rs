//! Session context.
//!
//! A [`Session`] owns everything that lives for the duration of one editor
//! process: the host, the user settings and their resolved snapshot, the
//! selection channel and the two managed terminals.
//!
//! # Lifecycle
//! 1. **Created** at startup with the channel opened by the caller
//! 2. **Mutated** by editor commands, configuration changes, terminal close
//!    events and selection records, all on one logical thread
//! 3. **Torn down** by [`Session::shutdown`], which closes the channel

use crate::core::bridge::{records_from_payload, SelectionChannel};
use crate::core::composer::{CommandComposer, Forwarder};
use crate::core::config::Settings;
use crate::core::dispatcher::{dispatch, DispatchOutcome};
use crate::core::error::Result;
use crate::core::host::{EditorHost, TerminalKind};
use crate::core::record::SelectionRecord;
use crate::core::session_config::{Platform, SessionConfig};
use std::path::PathBuf;

/// Terminals this session has shown, one slot per [`TerminalKind`].
#[derive(Debug, Default)]
struct ManagedTerminals {
    workspace: Option<String>,
    current_file_dir: Option<String>,
}

impl ManagedTerminals {
    fn slot(&mut self, kind: TerminalKind) -> &mut Option<String> {
        match kind {
            TerminalKind::Workspace => &mut self.workspace,
            TerminalKind::CurrentFileDir => &mut self.current_file_dir,
        }
    }

    fn get(&self, kind: TerminalKind) -> Option<&str> {
        match kind {
            TerminalKind::Workspace => self.workspace.as_deref(),
            TerminalKind::CurrentFileDir => self.current_file_dir.as_deref(),
        }
    }

    fn is_tracked(&self, name: &str) -> bool {
        self.workspace.as_deref() == Some(name) || self.current_file_dir.as_deref() == Some(name)
    }
}

pub struct Session<H: EditorHost> {
    host: H,
    settings: Settings,
    platform: Platform,
    config: SessionConfig,
    forwarder: Forwarder,
    channel: Option<Box<dyn SelectionChannel>>,
    terminals: ManagedTerminals,
}

impl<H: EditorHost> Session<H> {
    pub fn new(
        host: H,
        settings: Settings,
        platform: Platform,
        channel: Option<Box<dyn SelectionChannel>>,
    ) -> Self {
        let config = SessionConfig::resolve(&settings, &host.workspace_folders(), platform);
        let forwarder = Forwarder::from_settings(&settings);

        if channel.is_none() {
            log::warn!("No selection channel: selections will not reach the editor");
        }

        Self {
            host,
            settings,
            platform,
            config,
            forwarder,
            channel,
            terminals: ManagedTerminals::default(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn channel_address(&self) -> Option<&str> {
        self.channel.as_ref().map(|channel| channel.address())
    }

    /// Name of the terminal currently tracked for `kind`.
    pub fn tracked_terminal(&self, kind: TerminalKind) -> Option<&str> {
        self.terminals.get(kind)
    }

    pub fn composer(&self) -> CommandComposer<'_> {
        CommandComposer::new(&self.config, &self.forwarder, self.channel_address())
    }

    /// Pick a file with the fuzzy selector and open it.
    pub fn run_file_open(&mut self, kind: TerminalKind) -> Result<()> {
        let command = self.composer().file_open_pipeline();
        self.run_in_terminal(kind, &command)
    }

    /// Pick a directory with the fuzzy selector and add it to the workspace.
    pub fn run_folder_add(&mut self, kind: TerminalKind) -> Result<()> {
        let command = self.composer().folder_add_pipeline();
        self.run_in_terminal(kind, &command)
    }

    /// Prompt for a pattern, search it with ripgrep and jump to the chosen match.
    ///
    /// Returns `false` when the prompt was dismissed.
    pub fn run_search(&mut self, kind: TerminalKind) -> Result<bool> {
        let initial = self.host.selected_text();
        let Some(pattern) = self.host.prompt_search_pattern(initial.as_deref()) else {
            log::debug!("Search prompt dismissed");
            return Ok(false);
        };

        let command = self.composer().search_pipeline(&pattern);
        self.run_in_terminal(kind, &command)?;
        Ok(true)
    }

    /// Parse and dispatch everything in one channel payload.
    pub fn handle_payload(&mut self, payload: &[u8]) -> Result<Vec<DispatchOutcome>> {
        records_from_payload(payload)
            .iter()
            .map(|record| self.handle_record(record))
            .collect()
    }

    pub fn handle_record(&mut self, record: &SelectionRecord) -> Result<DispatchOutcome> {
        self.hide_after_selection()?;

        let outcome = dispatch(&mut self.host, record)?;
        log::debug!("Dispatched {}: {outcome:?}", record.command);

        if let DispatchOutcome::FolderAdded(_) = outcome {
            self.refresh();
        }
        Ok(outcome)
    }

    /// Forget a managed terminal the editor has closed. Other terminals keep
    /// their slot.
    pub fn terminal_closed(&mut self, name: &str) {
        if let Some(kind) = TerminalKind::from_name(name) {
            log::debug!("Managed terminal closed: {name}");
            *self.terminals.slot(kind) = None;
        }
    }

    /// Replace the settings and recompute the snapshot.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.forwarder = Forwarder::from_settings(&settings);
        self.settings = settings;
        self.refresh();
    }

    /// Recompute the snapshot from the current settings and workspace folders.
    pub fn refresh(&mut self) {
        self.config =
            SessionConfig::resolve(&self.settings, &self.host.workspace_folders(), self.platform);
        log::debug!("Session configuration refreshed");
    }

    pub fn shutdown(&mut self) {
        if let Some(mut channel) = self.channel.take() {
            log::info!("Closing selection channel {}", channel.address());
            channel.close();
        }
    }

    fn run_in_terminal(&mut self, kind: TerminalKind, command: &str) -> Result<()> {
        let name = self.show_terminal(kind)?;

        if kind == TerminalKind::CurrentFileDir {
            if let Some(dir) = self.active_document_dir() {
                let cd = self.composer().change_directory(&dir);
                self.host.send_text(&name, &cd)?;
            }
        }

        log::debug!("Running in {name}: {command}");
        self.host.send_text(&name, command)
    }

    /// Reuse the tracked terminal, adopt an open one with the managed name, or
    /// create it.
    fn show_terminal(&mut self, kind: TerminalKind) -> Result<String> {
        let name = kind.name();

        if self.terminals.get(kind).is_none() {
            let exists = self.host.terminals().iter().any(|open| open == name);
            if !exists {
                let cwd = self.initial_cwd();
                self.host.create_terminal(name, cwd.as_deref())?;
            }
            *self.terminals.slot(kind) = Some(name.to_string());
        }

        self.host.show_terminal(name)?;
        Ok(name.to_string())
    }

    fn hide_after_selection(&mut self) -> Result<()> {
        if !self.config.close_terminal_after_search {
            return Ok(());
        }

        match self.host.active_terminal() {
            Some(active) if self.terminals.is_tracked(&active) => self.host.hide_terminal(&active),
            _ => Ok(()),
        }
    }

    fn initial_cwd(&self) -> Option<PathBuf> {
        self.config
            .initial_working_directory
            .clone()
            .or_else(|| self.active_document_dir())
    }

    fn active_document_dir(&self) -> Option<PathBuf> {
        self.host
            .active_document()
            .and_then(|document| document.parent().map(PathBuf::from))
    }
}

impl<H: EditorHost> Drop for Session<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
