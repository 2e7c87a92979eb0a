//! Flag value types shared by the parser and the query layer.

use serde::Serialize;

/// Value recorded for a flag in a parse result.
///
/// A flag that does not take a value is stored as [`FlagValue::NoValue`],
/// which is a separate variant and therefore never confused with a real
/// value, not even the empty string.
///
/// Serializes untagged: `NoValue` becomes `null`, `Value(s)` becomes `s`.
///
/// # Examples
///
/// ```
/// use tinyopt_core::FlagValue;
///
/// let empty = FlagValue::Value(String::new());
/// assert_ne!(empty, FlagValue::NoValue);
/// assert_eq!(empty.as_value(), Some(""));
/// assert_eq!(FlagValue::NoValue.as_value(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// The flag was given but takes no value.
    NoValue,
    /// The token consumed as the flag's value, verbatim.
    Value(String),
}

impl FlagValue {
    /// Returns the value, or `None` for [`FlagValue::NoValue`].
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::NoValue => None,
            Self::Value(value) => Some(value),
        }
    }
}

/// Three-state outcome of looking a flag up by name.
///
/// Returned by [`Arguments::lookup`](crate::Arguments::lookup). The
/// raising and optional accessors are all derived from this.
///
/// # Examples
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use tinyopt_core::{FlagLookup, parse};
///
/// let value_flags: HashSet<String> = ["out".to_string()].into();
/// let args = parse(["--out", "a.txt", "--quiet"], &HashMap::new(), &value_flags).unwrap();
///
/// assert_eq!(args.lookup("out"), FlagLookup::Value("a.txt"));
/// assert_eq!(args.lookup("quiet"), FlagLookup::NoValue);
/// assert_eq!(args.lookup("missing"), FlagLookup::Absent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagLookup<'a> {
    /// The flag never appeared.
    Absent,
    /// The flag appeared without a value.
    NoValue,
    /// The flag appeared with this value.
    Value(&'a str),
}

impl<'a> From<Option<&'a FlagValue>> for FlagLookup<'a> {
    fn from(value: Option<&'a FlagValue>) -> Self {
        match value.map(FlagValue::as_value) {
            None => Self::Absent,
            Some(None) => Self::NoValue,
            Some(Some(value)) => Self::Value(value),
        }
    }
}
