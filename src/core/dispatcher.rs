//! Selection record dispatch.
//!
//! [`dispatch`] maps one [`SelectionRecord`] onto editor actions. Each record
//! is handled in a single step; nothing is remembered between records. Paths
//! that do not exist and `rg` arguments that are not a valid location drop the
//! record without touching the host.

use crate::core::error::Result;
use crate::core::host::{CaretPosition, EditorHost};
use crate::core::record::{Location, SelectionCommand, SelectionRecord};
use std::path::PathBuf;

/// What a dispatched record did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Opened(PathBuf),
    FolderAdded(PathBuf),
    Jumped {
        path: PathBuf,
        position: CaretPosition,
    },
    Dropped,
}

pub fn dispatch<H: EditorHost + ?Sized>(
    host: &mut H,
    record: &SelectionRecord,
) -> Result<DispatchOutcome> {
    match record.command {
        SelectionCommand::Open => {
            let Some(path) = record.resolve(&record.argument) else {
                log::debug!("Selected file does not exist: {}", record.argument);
                return Ok(DispatchOutcome::Dropped);
            };
            host.open_document(&path)?;
            Ok(DispatchOutcome::Opened(path))
        }
        SelectionCommand::Add => {
            let Some(path) = record.resolve(&record.argument) else {
                log::debug!("Selected folder does not exist: {}", record.argument);
                return Ok(DispatchOutcome::Dropped);
            };
            host.add_workspace_folder(&path)?;
            host.focus_explorer()?;
            Ok(DispatchOutcome::FolderAdded(path))
        }
        SelectionCommand::Rg => {
            let Some(location) = Location::parse(&record.argument) else {
                log::debug!("Selected match is not a location: {}", record.argument);
                return Ok(DispatchOutcome::Dropped);
            };
            let Some(path) = record.resolve(&location.path) else {
                log::debug!("Matched file does not exist: {}", location.path);
                return Ok(DispatchOutcome::Dropped);
            };

            let (line, column) = location.zero_based();
            let position = CaretPosition { line, column };
            host.open_document(&path)?;
            host.set_caret(position)?;
            host.reveal(position)?;
            Ok(DispatchOutcome::Jumped { path, position })
        }
    }
}
