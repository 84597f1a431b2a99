//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating CLI output and error messages.

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for the styled error prefix
pub fn is_error() -> impl Predicate<str> {
    predicates::str::contains("Error:")
}

/// Creates a predicate that checks for a missing settings file
pub fn settings_not_found() -> impl Predicate<str> {
    predicates::str::contains("Settings file does not exist")
}

/// Creates a predicate that checks for an unknown record tag
pub fn invalid_tag(tag: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Unknown selection tag: '{tag}'"))
}

/// Creates a predicate that checks for a failed channel write
pub fn channel_write_failed() -> impl Predicate<str> {
    predicates::str::contains("Failed to write selection to")
}

/// Creates a predicate that checks a pipeline ends in the given forward stage
pub fn forwards_to(stage: &str) -> impl Predicate<str> {
    predicates::str::ends_with(format!("{stage}\n"))
}
