//! `fzf-quick-open topipe <tag> <channel>`: the last stage of every pipeline.
//!
//! Reads the selector's output from stdin, prefixes each selected line with
//! the tag and the current directory, and writes all records to the channel
//! in one open-write-close so the reader sees them in a single session.

use crate::core::error::{QuickOpenError, Result};
use crate::core::record::{format_record, SelectionCommand};
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::Path;

pub fn execute_topipe(tag: &str, channel: &str) -> Result<()> {
    let command: SelectionCommand = tag.parse()?;
    let cwd = std::env::current_dir()?;

    let payload = collect_records(command, &cwd, io::stdin().lock())?;
    if payload.is_empty() {
        log::debug!("Nothing selected");
        return Ok(());
    }

    write_payload(channel, &payload)
}

/// One record line per non-blank input line.
pub fn collect_records<R: BufRead>(
    command: SelectionCommand,
    cwd: &Path,
    input: R,
) -> Result<String> {
    let cwd = cwd.to_string_lossy();
    let mut payload = String::new();

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        payload.push_str(&format_record(command.tag(), &cwd, &line));
        payload.push('\n');
    }

    Ok(payload)
}

fn write_payload(channel: &str, payload: &str) -> Result<()> {
    let mut pipe = OpenOptions::new()
        .write(true)
        .open(channel)
        .map_err(|e| QuickOpenError::channel_write(channel, e))?;

    pipe.write_all(payload.as_bytes())
        .map_err(|e| QuickOpenError::channel_write(channel, e))?;
    log::debug!("Forwarded {} byte(s) to {channel}", payload.len());
    Ok(())
}
