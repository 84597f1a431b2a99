//! Consolidated test utilities for fzf-quick-open
//!
//! This module provides a recording editor host, temporary workspaces and
//! output predicates shared by the integration tests.

pub mod assertions;
pub mod fixtures;
pub mod host;
