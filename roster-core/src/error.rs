//! Error types for the roster core library.

use thiserror::Error;

/// Top-level error type for all roster operations.
#[derive(Error, Debug)]
pub enum RosterError {
    /// A character name was empty (or only whitespace).
    #[error("Name must not be empty")]
    EmptyName,

    /// Another character already uses this name (case-insensitive).
    #[error("A character named '{name}' already exists")]
    DuplicateName {
        /// The rejected name, as typed.
        name: String,
    },

    /// The class selection does not map to a known class.
    #[error("Invalid class selection: {selection} (expected 1, 2 or 3)")]
    InvalidClass {
        /// The selection that was given.
        selection: i64,
    },

    /// The variant selection is neither Hero nor Enemy.
    #[error("Invalid variant selection: {selection} (expected 1 or 2)")]
    InvalidVariant {
        /// The selection that was given.
        selection: i64,
    },

    /// An enemy was created without a positive reward value.
    #[error("Enemies need a positive reward value")]
    InvalidReward,

    /// A number was required but the input could not be parsed as one.
    #[error("Invalid numeric input: '{input}'")]
    InvalidNumber {
        /// The raw text that failed to parse.
        input: String,
    },

    /// No character with this name exists.
    #[error("No character named '{name}'")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad classification of a [`RosterError`].
///
/// Drives both how the session reports an error and the log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The user typed something unacceptable. Logged as a warning.
    UserInput,
    /// The named record does not exist. Logged as a warning.
    NotFound,
    /// The backing file or configuration could not be read or written.
    Persistence,
}

impl RosterError {
    /// Classify this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyName
            | Self::DuplicateName { .. }
            | Self::InvalidClass { .. }
            | Self::InvalidVariant { .. }
            | Self::InvalidReward
            | Self::InvalidNumber { .. } => ErrorCategory::UserInput,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Serialization(_) | Self::Config(_) | Self::Io(_) => ErrorCategory::Persistence,
        }
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, RosterError>;
