//! `fzf-quick-open compose`: print a pipeline without running it.
//!
//! Useful for checking settings, and for editor plugins that prefer to drive
//! their own terminals.

use crate::core::composer::{CommandComposer, Forwarder};
use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::session_config::{Platform, SessionConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pipeline {
    FileOpen,
    FolderAdd,
    Search(String),
}

pub fn execute_compose(
    settings: &Settings,
    pipeline: &Pipeline,
    channel: Option<&str>,
    workspace_folders: &[PathBuf],
) -> Result<()> {
    println!(
        "{}",
        compose_pipeline(settings, pipeline, channel, workspace_folders, Platform::current())
    );
    Ok(())
}

pub fn compose_pipeline(
    settings: &Settings,
    pipeline: &Pipeline,
    channel: Option<&str>,
    workspace_folders: &[PathBuf],
    platform: Platform,
) -> String {
    let config = SessionConfig::resolve(settings, workspace_folders, platform);
    let forwarder = Forwarder::from_settings(settings);
    let composer = CommandComposer::new(&config, &forwarder, channel);

    match pipeline {
        Pipeline::FileOpen => composer.file_open_pipeline(),
        Pipeline::FolderAdd => composer.folder_add_pipeline(),
        Pipeline::Search(pattern) => composer.search_pipeline(pattern),
    }
}
