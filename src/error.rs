//! # Error Handling
//!
//! This module defines the centralized error type for the variable engine.
//! It uses the `thiserror` library to build an `Error` enum that covers every
//! failure the engine can report, with enough context in each variant to tell
//! the caller what went wrong and where.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. The two families callers usually care about
//!   are load failures (`Load`) and structural configuration failures
//!   (`Configuration` and `CycleDetected`). Use `is_load_error()` and
//!   `is_configuration_error()` to test for a family without matching every
//!   variant.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! A source that simply does not exist (no node file, no group file, no play
//! or task) is never an error. It contributes nothing to the merge.

use thiserror::Error;

/// Main error type for variable resolution
#[derive(Error, Debug)]
pub enum Error {
    /// A variable file could not be loaded or did not contain a mapping.
    #[error("Failed to load variables from {path}: {message}")]
    Load { path: String, message: String },

    /// Structurally invalid input, such as a reference to an unknown group or
    /// an invalid settings document.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Configuration {
        message: String,
        /// Optional hint for how to fix the input
        hint: Option<String>,
    },

    /// A cycle was found while expanding group ancestors.
    #[error("Cycle detected in group ancestry: {cycle}")]
    CycleDetected { cycle: String },

    /// A setup-phase write was attempted after the manager was frozen.
    #[error("Cannot {operation}: variable manager is frozen")]
    Frozen { operation: String },

    /// An execution-phase operation was attempted before the manager was frozen.
    #[error("Cannot {operation}: variable manager is not frozen")]
    NotFrozen { operation: String },

    /// A mutex guarding shared state has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },
}

impl Error {
    /// Returns true for failures to load or parse a variable file.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Load { .. })
    }

    /// Returns true for structural failures: ancestor cycles and invalid input.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Error::Configuration { .. } | Error::CycleDetected { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
