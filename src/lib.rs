//! fzf-quick-open - fuzzy file open and search for editor terminals.
//!
//! This library composes fzf and ripgrep pipelines for an editor's integrated
//! terminal and brings the user's selection back through a named pipe, turning
//! it into editor actions: open a file, add a workspace folder, or jump to a
//! search match.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The selection bridge (FIFO on POSIX, named pipe on Windows)
//! - Selection record parsing and dispatch
//! - Pipeline composition from the session configuration
//! - The [`EditorHost`] trait and the [`Session`] context
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Selection bridge
    open_channel,
    record_channel,
    // Dispatch
    dispatch,
    CaretPosition,
    CommandComposer,
    DispatchOutcome,
    EditorHost,
    Forwarder,
    Location,
    Platform,
    // Error handling
    QuickOpenError,
    Result,
    SelectionChannel,
    SelectionCommand,
    SelectionRecord,
    // Session context
    Session,
    SessionConfig,
    Settings,
    ShellKind,
    TerminalKind,
};
