//! Error types for parsing, querying, and flag-table configuration.
//!
//! Each concern gets its own enum so callers can match on exactly the
//! failures an operation can produce. Errors raised by caller-supplied
//! conversion functions never pass through these types.

use std::ffi::OsString;

use thiserror::Error;

/// Errors raised while turning raw tokens into [`Arguments`](crate::Arguments).
///
/// Either error aborts the whole parse; no partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character inside a `-xyz` cluster has no entry in the short-flag
    /// table.
    #[error("unknown short flag: {0}")]
    UnknownShortFlag(char),

    /// A value-taking flag was the last token, leaving nothing to consume.
    #[error("flag --{flag} requires a value")]
    MissingValue {
        /// Long name of the flag that needed a value.
        flag: String,
    },

    /// A platform argument could not be converted to a `String`.
    #[error("argument is not valid Unicode: {0:?}")]
    InvalidUnicode(OsString),
}

/// Errors raised by the query accessors on [`Arguments`](crate::Arguments).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Positional index outside `0..len`.
    #[error("positional index {index} out of range (have {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of positional arguments available.
        len: usize,
    },

    /// The flag never appeared in the input.
    #[error("no such flag: {0}")]
    NoSuchFlag(String),

    /// The flag appeared but does not take a value.
    #[error("flag has no value: {0}")]
    FlagHasNoValue(String),
}

/// Errors that can occur while loading or validating a
/// [`FlagConfig`](crate::FlagConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Short-flag key is not exactly one character, or is `-` itself.
    #[error("invalid short flag: {0:?}")]
    InvalidShortFlag(String),

    /// Long name is empty (the short flag it belongs to, or `<value_flags>`).
    #[error("empty long flag name for: {0}")]
    EmptyLongName(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
