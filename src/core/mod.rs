//! Core functionality for the fzf-quick-open tool.
//!
//! This module provides the selection bridge, command composition, record
//! dispatch and the session context tying them to an editor host.

pub mod bridge;
pub mod composer;
pub mod config;
pub mod dirs;
pub mod dispatcher;
pub mod error;
pub mod host;
pub mod output;
pub mod record;
pub mod session;
pub mod session_config;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{QuickOpenError, Result};

// === Selection records ===
// Wire format written by the forwarding script
pub use record::{format_record, Location, SelectionCommand, SelectionRecord, FIELD_SEPARATOR};

// === Selection bridge ===
// Platform channel delivering records from the forwarder
pub use bridge::{open_channel, record_channel, RecordReceiver, RecordSender, SelectionChannel};

// === Configuration ===
// Raw user settings and the snapshot derived from them
pub use config::Settings;
pub use session_config::{Platform, SearchStyle, SessionConfig, ShellKind};

// === Command composition ===
// Pure builders for the pipelines sent to terminals
pub use composer::{CommandComposer, Forwarder};

// === Dispatch and session ===
// Editor host interface, record dispatch and the session context
pub use dispatcher::{dispatch, DispatchOutcome};
pub use host::{CaretPosition, EditorHost, TerminalKind, TERMINAL_NAME, TERMINAL_NAME_PWD};
pub use session::Session;

// === Output formatting ===
// Colored messages for CLI failures
pub use output::print_error;
