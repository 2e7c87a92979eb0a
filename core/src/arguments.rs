//! Parse result and the query layer built on it.
//!
//! [`Arguments`] is produced once by [`parse`](crate::parse()) and is
//! read-only afterwards. Positional arguments are addressed by index, flags
//! by long name. Every accessor has a `_with` variant taking a conversion
//! function; conversion errors are returned unchanged, while lookup
//! failures are turned into the caller's error type through
//! `From<QueryError>`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::QueryError;
use crate::types::{FlagLookup, FlagValue};

/// Positional arguments and flags recovered from a token list.
///
/// # Examples
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use tinyopt_core::{QueryError, parse};
///
/// let short_flags = HashMap::from([('v', "verbose".to_string())]);
/// let value_flags = HashSet::from(["jobs".to_string()]);
/// let args = parse(["build", "-v", "--jobs", "4"], &short_flags, &value_flags)?;
///
/// assert_eq!(args.at(0)?, "build");
/// assert!(args.has("verbose"));
/// let jobs: usize = args.get_with("jobs", |s| Ok::<_, Box<dyn std::error::Error>>(s.parse()?))?;
/// assert_eq!(jobs, 4);
/// assert_eq!(args.get("verbose"), Err(QueryError::FlagHasNoValue("verbose".into())));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Arguments {
    positional: Vec<String>,
    flags: BTreeMap<String, FlagValue>,
}

impl Arguments {
    pub(crate) fn new(positional: Vec<String>, flags: BTreeMap<String, FlagValue>) -> Self {
        Self { positional, flags }
    }

    // -- positional ---------------------------------------------------------

    /// Number of positional arguments.
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// Returns `true` if there are no positional arguments.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    /// Returns the positional argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::IndexOutOfRange`] if `index >= self.len()`.
    pub fn at(&self, index: usize) -> Result<&str, QueryError> {
        self.optional_at(index).ok_or(QueryError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Converts the positional argument at `index` with `convert`.
    ///
    /// # Errors
    ///
    /// An out-of-range index is converted into `E`; an error from
    /// `convert` is returned as is.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::{HashMap, HashSet};
    /// use tinyopt_core::{QueryError, parse};
    ///
    /// let args = parse(["three"], &HashMap::new(), &HashSet::new()).unwrap();
    /// assert_eq!(args.at_with(0, |s| Ok::<_, QueryError>(s.len())), Ok(5));
    /// assert!(args.at_with(1, |s| Ok::<_, QueryError>(s.len())).is_err());
    /// ```
    pub fn at_with<'a, T, E, F>(&'a self, index: usize, convert: F) -> Result<T, E>
    where
        F: FnOnce(&'a str) -> Result<T, E>,
        E: From<QueryError>,
    {
        convert(self.at(index)?)
    }

    /// Returns the positional argument at `index`, or `None` when out of
    /// range.
    pub fn optional_at(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// Converts the positional argument at `index` if it exists.
    ///
    /// `convert` only runs when the argument is present. Its error is not
    /// swallowed into `None`.
    pub fn optional_at_with<'a, T, E, F>(
        &'a self,
        index: usize,
        convert: F,
    ) -> Result<Option<T>, E>
    where
        F: FnOnce(&'a str) -> Result<T, E>,
    {
        self.optional_at(index).map(convert).transpose()
    }

    // -- flags --------------------------------------------------------------

    /// Returns `true` if the flag appeared, with or without a value.
    pub fn has(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Looks a flag up, distinguishing absent, value-less, and valued flags.
    pub fn lookup(&self, name: &str) -> FlagLookup<'_> {
        FlagLookup::from(self.flags.get(name))
    }

    /// Returns the value of a flag.
    ///
    /// # Errors
    ///
    /// - [`QueryError::NoSuchFlag`] if the flag never appeared.
    /// - [`QueryError::FlagHasNoValue`] if it appeared without a value.
    pub fn get(&self, name: &str) -> Result<&str, QueryError> {
        self.get_optional(name)?
            .ok_or_else(|| QueryError::NoSuchFlag(name.to_string()))
    }

    /// Converts the value of a flag with `convert`.
    ///
    /// Same preconditions as [`get`](Self::get).
    pub fn get_with<'a, T, E, F>(&'a self, name: &str, convert: F) -> Result<T, E>
    where
        F: FnOnce(&'a str) -> Result<T, E>,
        E: From<QueryError>,
    {
        convert(self.get(name)?)
    }

    /// Returns the value of a flag, or `None` if it never appeared.
    ///
    /// A flag that appeared without a value is an error here, not `None`:
    /// absence is an expected outcome, a value-less flag queried for its
    /// value is a caller mistake.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::FlagHasNoValue`] if the flag appeared without a
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::{HashMap, HashSet};
    /// use tinyopt_core::{QueryError, parse};
    ///
    /// let value_flags = HashSet::from(["foo".to_string()]);
    /// let args = parse(["--foo", "red", "--bar"], &HashMap::new(), &value_flags).unwrap();
    ///
    /// assert_eq!(args.get_optional("foo"), Ok(Some("red")));
    /// assert_eq!(args.get_optional("baz"), Ok(None));
    /// assert_eq!(
    ///     args.get_optional("bar"),
    ///     Err(QueryError::FlagHasNoValue("bar".into()))
    /// );
    /// ```
    pub fn get_optional(&self, name: &str) -> Result<Option<&str>, QueryError> {
        match self.lookup(name) {
            FlagLookup::Absent => Ok(None),
            FlagLookup::NoValue => Err(QueryError::FlagHasNoValue(name.to_string())),
            FlagLookup::Value(value) => Ok(Some(value)),
        }
    }

    /// Converts the value of a flag if it appeared.
    ///
    /// Same preconditions as [`get_optional`](Self::get_optional).
    pub fn get_optional_with<'a, T, E, F>(
        &'a self,
        name: &str,
        convert: F,
    ) -> Result<Option<T>, E>
    where
        F: FnOnce(&'a str) -> Result<T, E>,
        E: From<QueryError>,
    {
        self.get_optional(name)?.map(convert).transpose()
    }

    // -- bulk ---------------------------------------------------------------

    /// All positional arguments, in input order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// All flags, keyed by long name.
    pub fn flags(&self) -> &BTreeMap<String, FlagValue> {
        &self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Query(QueryError),
        Convert(String),
    }

    impl From<QueryError> for TestError {
        fn from(err: QueryError) -> Self {
            Self::Query(err)
        }
    }

    fn sample() -> Arguments {
        Arguments::new(
            vec!["one".into(), "two".into(), "three".into()],
            BTreeMap::from([
                ("foo".to_string(), FlagValue::Value("red".into())),
                ("bar".to_string(), FlagValue::NoValue),
            ]),
        )
    }

    fn length(s: &str) -> Result<usize, TestError> {
        Ok(s.len())
    }

    fn reject(s: &str) -> Result<usize, TestError> {
        Err(TestError::Convert(s.to_string()))
    }

    #[test]
    fn test_empty_arguments() {
        let args = Arguments::default();

        assert_eq!(args.len(), 0);
        assert!(args.is_empty());
        assert_eq!(args.optional_at(0), None);
        assert_eq!(args.optional_at_with(0, length), Ok(None));
        assert_eq!(
            args.at(0),
            Err(QueryError::IndexOutOfRange { index: 0, len: 0 })
        );
        assert_eq!(
            args.at_with(0, length),
            Err(TestError::Query(QueryError::IndexOutOfRange {
                index: 0,
                len: 0
            }))
        );
        assert_eq!(args.get_optional("foo"), Ok(None));
        assert_eq!(args.get_optional_with("foo", length), Ok(None));
        assert_eq!(args.get("foo"), Err(QueryError::NoSuchFlag("foo".into())));
        assert_eq!(
            args.get_with("foo", length),
            Err(TestError::Query(QueryError::NoSuchFlag("foo".into())))
        );
    }

    #[test]
    fn test_positional_access() {
        let args = sample();

        assert_eq!(args.len(), 3);
        assert_eq!(args.at(2), Ok("three"));
        assert_eq!(args.optional_at(2), Some("three"));
        assert_eq!(args.optional_at_with(2, length), Ok(Some(5)));
        assert_eq!(args.optional_at(3), None);
        assert_eq!(args.optional_at(usize::MAX), None);
        assert_eq!(args.optional_at_with(3, length), Ok(None));
        assert!(matches!(
            args.at(3),
            Err(QueryError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_flag_access() {
        let args = sample();

        assert!(args.has("foo"));
        assert!(args.has("bar"));
        assert!(!args.has("baz"));

        assert_eq!(args.get("foo"), Ok("red"));
        assert_eq!(args.get("bar"), Err(QueryError::FlagHasNoValue("bar".into())));
        assert_eq!(args.get("baz"), Err(QueryError::NoSuchFlag("baz".into())));
        assert_eq!(args.get_with("foo", length), Ok(3));
        assert_eq!(
            args.get_with("bar", length),
            Err(TestError::Query(QueryError::FlagHasNoValue("bar".into())))
        );

        assert_eq!(args.get_optional("foo"), Ok(Some("red")));
        assert_eq!(
            args.get_optional("bar"),
            Err(QueryError::FlagHasNoValue("bar".into()))
        );
        assert_eq!(args.get_optional_with("foo", length), Ok(Some(3)));
        assert_eq!(args.get_optional_with("baz", length), Ok(None));
    }

    #[test]
    fn test_conversion_errors_pass_through() {
        let args = sample();

        assert_eq!(
            args.at_with(0, reject),
            Err(TestError::Convert("one".into()))
        );
        assert_eq!(
            args.optional_at_with(1, reject),
            Err(TestError::Convert("two".into()))
        );
        assert_eq!(
            args.get_with("foo", reject),
            Err(TestError::Convert("red".into()))
        );
        assert_eq!(
            args.get_optional_with("foo", reject),
            Err(TestError::Convert("red".into()))
        );
    }

    #[test]
    fn test_converter_not_called_when_absent() {
        let args = sample();
        let mut called = false;

        let result = args.optional_at_with(10, |s| {
            called = true;
            length(s)
        });

        assert_eq!(result, Ok(None));
        assert!(!called);
    }
}
