//! File-backed description of the short-flag table and value-flags set.
//!
//! Lets a program keep its flag tables next to its other settings instead of
//! hard-coding them. The file only describes flags; it never supplies flag
//! values.
//!
//! # Example YAML
//!
//! ```yaml
//! short_flags:
//!   w: weekdays
//!   f: format
//! value_flags:
//!   - format
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::parse::Parser;

/// Serializable form of a [`Parser`]'s tables.
///
/// Short flags are keyed by strings so that a malformed key surfaces as a
/// [`ConfigError::InvalidShortFlag`] from [`validate`](Self::validate)
/// instead of an opaque deserialization error.
///
/// # Examples
///
/// ```
/// use tinyopt_core::FlagConfig;
///
/// let config = FlagConfig::from_yaml_str(
///     "short_flags:\n  w: weekdays\n  f: format\nvalue_flags:\n  - format\n",
/// )
/// .unwrap();
///
/// let args = config.parser().unwrap().parse(["-wf", "%Y"]).unwrap();
/// assert!(args.has("weekdays"));
/// assert_eq!(args.get("format").unwrap(), "%Y");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagConfig {
    /// Short flag character to long name.
    #[serde(default)]
    pub short_flags: BTreeMap<String, String>,
    /// Long names that consume the following token as their value.
    #[serde(default)]
    pub value_flags: BTreeSet<String>,
}

impl FlagConfig {
    /// Loads a configuration file.
    ///
    /// Files ending in `.json` are read as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// or [`YamlError`](ConfigError::YamlError) /
    /// [`JsonError`](ConfigError::JsonError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        Ok(config)
    }

    /// Parses a configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError`](ConfigError::YamlError) if parsing fails.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be
    /// written, or [`YamlError`](ConfigError::YamlError) if serialization
    /// fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks that every short key is a single character other than `-`
    /// and that no long name is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tinyopt_core::{ConfigError, FlagConfig};
    ///
    /// let mut config = FlagConfig::default();
    /// config.short_flags.insert("vv".into(), "verbose".into());
    ///
    /// let errors = config.validate();
    /// assert!(matches!(errors.as_slice(), [ConfigError::InvalidShortFlag(s)] if s == "vv"));
    /// ```
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (short, long) in &self.short_flags {
            if short_char(short).is_none() {
                errors.push(ConfigError::InvalidShortFlag(short.clone()));
            }
            if long.is_empty() {
                errors.push(ConfigError::EmptyLongName(short.clone()));
            }
        }

        if self.value_flags.contains("") {
            errors.push(ConfigError::EmptyLongName("<value_flags>".to_string()));
        }

        errors
    }

    /// Validates the tables and builds a [`Parser`] from them.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`validate`](Self::validate).
    pub fn parser(&self) -> Result<Parser> {
        if let Some(err) = self.validate().into_iter().next() {
            return Err(err);
        }

        let short_flags = self
            .short_flags
            .iter()
            .filter_map(|(short, long)| short_char(short).map(|c| (c, long.clone())))
            .collect();
        let value_flags = self.value_flags.iter().cloned().collect();
        Ok(Parser::with_tables(short_flags, value_flags))
    }
}

impl From<&Parser> for FlagConfig {
    fn from(parser: &Parser) -> Self {
        Self {
            short_flags: parser
                .short_flags()
                .iter()
                .map(|(short, long)| (short.to_string(), long.clone()))
                .collect(),
            value_flags: parser.value_flags().iter().cloned().collect(),
        }
    }
}

/// Returns the key's character if it is exactly one character and not `-`.
fn short_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '-' => Some(c),
        _ => None,
    }
}
